//! OpenGL error codes reported through the context's error queue

use serde::{Deserialize, Serialize};
use std::fmt;

/// `GL_NO_ERROR`, the value `glGetError` returns once the queue is empty
pub const GL_NO_ERROR: u32 = 0;

/// Upper bound on codes read in one drain. A lost context may keep
/// reporting `GL_CONTEXT_LOST` forever.
pub const MAX_DRAINED_ERRORS: usize = 32;

/// A single error code taken from the GL error queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GlErrorCode {
    /// `GL_INVALID_ENUM`
    InvalidEnum,
    /// `GL_INVALID_VALUE`
    InvalidValue,
    /// `GL_INVALID_OPERATION`
    InvalidOperation,
    /// `GL_STACK_OVERFLOW`
    StackOverflow,
    /// `GL_STACK_UNDERFLOW`
    StackUnderflow,
    /// `GL_OUT_OF_MEMORY`
    OutOfMemory,
    /// `GL_INVALID_FRAMEBUFFER_OPERATION`
    InvalidFramebufferOperation,
    /// `GL_CONTEXT_LOST`
    ContextLost,
    /// Any code outside the core set
    Unknown(u32),
}

impl GlErrorCode {
    /// Map a raw `glGetError` value. Returns `None` for `GL_NO_ERROR`.
    pub fn from_raw(code: u32) -> Option<Self> {
        let mapped = match code {
            GL_NO_ERROR => return None,
            0x0500 => GlErrorCode::InvalidEnum,
            0x0501 => GlErrorCode::InvalidValue,
            0x0502 => GlErrorCode::InvalidOperation,
            0x0503 => GlErrorCode::StackOverflow,
            0x0504 => GlErrorCode::StackUnderflow,
            0x0505 => GlErrorCode::OutOfMemory,
            0x0506 => GlErrorCode::InvalidFramebufferOperation,
            0x0507 => GlErrorCode::ContextLost,
            other => GlErrorCode::Unknown(other),
        };
        Some(mapped)
    }

    /// Raw GL enum value
    pub fn raw(self) -> u32 {
        match self {
            GlErrorCode::InvalidEnum => 0x0500,
            GlErrorCode::InvalidValue => 0x0501,
            GlErrorCode::InvalidOperation => 0x0502,
            GlErrorCode::StackOverflow => 0x0503,
            GlErrorCode::StackUnderflow => 0x0504,
            GlErrorCode::OutOfMemory => 0x0505,
            GlErrorCode::InvalidFramebufferOperation => 0x0506,
            GlErrorCode::ContextLost => 0x0507,
            GlErrorCode::Unknown(code) => code,
        }
    }

    /// Symbolic name as spelled in the GL headers
    pub fn name(self) -> &'static str {
        match self {
            GlErrorCode::InvalidEnum => "GL_INVALID_ENUM",
            GlErrorCode::InvalidValue => "GL_INVALID_VALUE",
            GlErrorCode::InvalidOperation => "GL_INVALID_OPERATION",
            GlErrorCode::StackOverflow => "GL_STACK_OVERFLOW",
            GlErrorCode::StackUnderflow => "GL_STACK_UNDERFLOW",
            GlErrorCode::OutOfMemory => "GL_OUT_OF_MEMORY",
            GlErrorCode::InvalidFramebufferOperation => "GL_INVALID_FRAMEBUFFER_OPERATION",
            GlErrorCode::ContextLost => "GL_CONTEXT_LOST",
            GlErrorCode::Unknown(_) => "GL_UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for GlErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlErrorCode::Unknown(code) => write!(f, "GL_UNKNOWN_ERROR(0x{:04x})", code),
            known => f.write_str(known.name()),
        }
    }
}

/// Drain a `glGetError`-style queue.
///
/// Calls `next_error` until it yields `GL_NO_ERROR` or
/// [`MAX_DRAINED_ERRORS`] codes were collected. Bindings use this to
/// implement [`GlContext::take_errors`](crate::context::GlContext::take_errors).
///
/// # Example
///
/// ```
/// use gpuprobe::gl_errors::drain_errors;
/// use gpuprobe::GlErrorCode;
///
/// // Stand-in for the driver's error flags
/// let mut flags = vec![0x0502u32, 0x0505].into_iter();
/// let gl_get_error = move || flags.next().unwrap_or(0);
///
/// assert_eq!(
///     drain_errors(gl_get_error),
///     vec![GlErrorCode::InvalidOperation, GlErrorCode::OutOfMemory]
/// );
/// ```
pub fn drain_errors<F>(mut next_error: F) -> Vec<GlErrorCode>
where
    F: FnMut() -> u32,
{
    let mut errors = Vec::new();
    while errors.len() < MAX_DRAINED_ERRORS {
        match GlErrorCode::from_raw(next_error()) {
            Some(code) => errors.push(code),
            None => break,
        }
    }
    errors
}

/// Render codes the way GL tooling prints them: `GL_INVALID_ENUM, GL_OUT_OF_MEMORY`
pub fn join_errors(errors: &[GlErrorCode]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
