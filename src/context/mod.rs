//! Access to the active GL context
//!
//! The probe never talks to a GL binding directly. It goes through
//! [`GlContext`], which a binding implements on top of `glGetString`,
//! `glGetStringi`, `glGetIntegerv`, `glGetIntegeri_v` and `glGetError`.
//! Implementations must only be used on the thread where the context is
//! current.

mod recorded;

pub use recorded::RecordedContext;

use crate::gl_errors::GlErrorCode;
use serde::{Deserialize, Serialize};

/// String parameters read with `glGetString` / `glGetStringi`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringQuery {
    /// `GL_VENDOR`
    Vendor,
    /// `GL_RENDERER`
    Renderer,
    /// `GL_VERSION`
    Version,
    /// `GL_EXTENSIONS`, only valid indexed
    Extensions,
}

impl StringQuery {
    /// GL enum passed to the query
    pub const fn gl_enum(self) -> u32 {
        match self {
            StringQuery::Vendor => 0x1F00,
            StringQuery::Renderer => 0x1F01,
            StringQuery::Version => 0x1F02,
            StringQuery::Extensions => 0x1F03,
        }
    }
}

/// Integer parameters read with `glGetIntegerv` / `glGetIntegeri_v`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegerQuery {
    /// `GL_MAJOR_VERSION`
    MajorVersion,
    /// `GL_MINOR_VERSION`
    MinorVersion,
    /// `GL_NUM_EXTENSIONS`
    NumExtensions,
    /// `GL_MAX_COMPUTE_SHADER_STORAGE_BLOCKS`
    MaxComputeShaderStorageBlocks,
    /// `GL_MAX_COMPUTE_IMAGE_UNIFORMS`
    MaxComputeImageUniforms,
    /// `GL_MAX_COMPUTE_WORK_GROUP_SIZE`, indexed by dimension
    MaxComputeWorkGroupSize,
    /// `GL_MAX_COMPUTE_WORK_GROUP_INVOCATIONS`
    MaxComputeWorkGroupInvocations,
    /// `GL_MAX_TEXTURE_SIZE`
    MaxTextureSize,
    /// `GL_MAX_IMAGE_UNITS`
    MaxImageUnits,
    /// `GL_MAX_ARRAY_TEXTURE_LAYERS`
    MaxArrayTextureLayers,
}

impl IntegerQuery {
    /// GL enum passed to the query
    pub const fn gl_enum(self) -> u32 {
        match self {
            IntegerQuery::MajorVersion => 0x821B,
            IntegerQuery::MinorVersion => 0x821C,
            IntegerQuery::NumExtensions => 0x821D,
            IntegerQuery::MaxComputeShaderStorageBlocks => 0x90DB,
            IntegerQuery::MaxComputeImageUniforms => 0x91BD,
            IntegerQuery::MaxComputeWorkGroupSize => 0x91BF,
            IntegerQuery::MaxComputeWorkGroupInvocations => 0x90EB,
            IntegerQuery::MaxTextureSize => 0x0D33,
            IntegerQuery::MaxImageUnits => 0x8F38,
            IntegerQuery::MaxArrayTextureLayers => 0x88FF,
        }
    }
}

/// Queries against a GL context that is current on the calling thread.
///
/// Failing queries do not return errors. Like GL itself they push a code
/// onto the context's error queue and return a default value; callers
/// collect the queue once with [`GlContext::take_errors`].
#[cfg_attr(test, mockall::automock)]
pub trait GlContext {
    /// `glGetString`. `None` when the driver returns a null pointer.
    fn get_string(&mut self, name: StringQuery) -> Option<String>;

    /// `glGetStringi`. `None` when the driver returns a null pointer.
    fn get_string_indexed(&mut self, name: StringQuery, index: u32) -> Option<String>;

    /// `glGetIntegerv`
    fn get_integer(&mut self, name: IntegerQuery) -> i32;

    /// `glGetIntegeri_v`
    fn get_integer_indexed(&mut self, name: IntegerQuery, index: u32) -> i32;

    /// Errors raised since the previous call, oldest first. Clears the queue.
    fn take_errors(&mut self) -> Vec<GlErrorCode>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gl_enum_values() {
        assert_eq!(StringQuery::Renderer.gl_enum(), 0x1F01);
        assert_eq!(IntegerQuery::NumExtensions.gl_enum(), 0x821D);
        assert_eq!(IntegerQuery::MaxComputeWorkGroupSize.gl_enum(), 0x91BF);
    }

    #[test]
    fn test_query_names_serialize_snake_case() {
        let json = serde_json::to_string(&IntegerQuery::MaxComputeShaderStorageBlocks).unwrap();
        assert_eq!(json, "\"max_compute_shader_storage_blocks\"");
    }
}
