//! Replayable snapshot of a GL context's answers

use super::{GlContext, IntegerQuery, StringQuery};
use crate::error::{ProbeError, ProbeResult};
use crate::gl_errors::GlErrorCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A GL context answered from recorded values.
///
/// Behaves the way a driver does for unsupported queries: an integer that
/// was never recorded raises `GL_INVALID_ENUM` and reads as `0`, an
/// indexed read past the recorded values raises `GL_INVALID_VALUE`. A code
/// that is already pending is not queued twice.
/// Raised codes, together with any `pending_errors` loaded from the
/// snapshot, are handed out by [`GlContext::take_errors`].
///
/// Snapshots are plain JSON:
///
/// ```json
/// {
///   "renderer": "Adreno (TM) 630",
///   "vendor": "Qualcomm",
///   "version": "OpenGL ES 3.2 V@415.0",
///   "extensions": ["GL_EXT_texture_buffer"],
///   "integers": { "major_version": 3, "max_texture_size": 16384 },
///   "indexed_integers": { "max_compute_work_group_size": [1024, 1024, 64] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordedContext {
    /// `GL_RENDERER`, `None` if the driver returned null
    pub renderer: Option<String>,
    /// `GL_VENDOR`
    pub vendor: Option<String>,
    /// `GL_VERSION`
    pub version: Option<String>,
    /// Extension names in `glGetStringi` index order
    pub extensions: Vec<String>,
    /// Values for `glGetIntegerv`
    pub integers: BTreeMap<IntegerQuery, i32>,
    /// Values for `glGetIntegeri_v`, by index
    pub indexed_integers: BTreeMap<IntegerQuery, Vec<i32>>,
    /// Error queue contents, oldest first
    pub pending_errors: Vec<GlErrorCode>,
}

impl RecordedContext {
    /// Empty context: no strings, no integers, no errors
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON snapshot
    pub fn from_json_str(json: &str) -> ProbeResult<Self> {
        let context: RecordedContext = serde_json::from_str(json)?;
        context.validate()?;
        Ok(context)
    }

    /// Load a JSON snapshot from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> ProbeResult<Self> {
        let path = path.as_ref();
        log::debug!("loading recorded context from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Pretty-printed JSON snapshot
    pub fn to_json_string(&self) -> ProbeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject snapshots no driver could produce
    pub fn validate(&self) -> ProbeResult<()> {
        if let Some(&count) = self.integers.get(&IntegerQuery::NumExtensions) {
            if count < 0 {
                return Err(ProbeError::Capture(format!(
                    "num_extensions must not be negative, got {}",
                    count
                )));
            }
            if count as usize > self.extensions.len() {
                return Err(ProbeError::Capture(format!(
                    "num_extensions is {} but only {} extensions are recorded",
                    count,
                    self.extensions.len()
                )));
            }
        }

        if let Some(sizes) = self.indexed_integers.get(&IntegerQuery::MaxComputeWorkGroupSize) {
            if sizes.len() != 3 {
                return Err(ProbeError::Capture(format!(
                    "max_compute_work_group_size needs 3 dimensions, got {}",
                    sizes.len()
                )));
            }
        }

        Ok(())
    }

    /// Set `GL_RENDERER`
    pub fn with_renderer(mut self, renderer: impl Into<String>) -> Self {
        self.renderer = Some(renderer.into());
        self
    }

    /// Set `GL_VENDOR`
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Set `GL_VERSION`
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Replace the extension list
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Record a `glGetIntegerv` answer
    pub fn with_integer(mut self, name: IntegerQuery, value: i32) -> Self {
        self.integers.insert(name, value);
        self
    }

    /// Record the three `GL_MAX_COMPUTE_WORK_GROUP_SIZE` dimensions
    pub fn with_work_group_size(mut self, size: [i32; 3]) -> Self {
        self.indexed_integers
            .insert(IntegerQuery::MaxComputeWorkGroupSize, size.to_vec());
        self
    }

    /// Queue an error as if an earlier GL call had failed
    pub fn with_pending_error(mut self, error: GlErrorCode) -> Self {
        self.pending_errors.push(error);
        self
    }

    /// Error flags are sticky: a code already pending is not queued again
    fn raise(&mut self, error: GlErrorCode) {
        if self.pending_errors.contains(&error) {
            return;
        }
        log::trace!("recorded context raised {}", error);
        self.pending_errors.push(error);
    }
}

impl GlContext for RecordedContext {
    fn get_string(&mut self, name: StringQuery) -> Option<String> {
        match name {
            StringQuery::Vendor => self.vendor.clone(),
            StringQuery::Renderer => self.renderer.clone(),
            StringQuery::Version => self.version.clone(),
            StringQuery::Extensions => Some(self.extensions.join(" ")),
        }
    }

    fn get_string_indexed(&mut self, name: StringQuery, index: u32) -> Option<String> {
        if name != StringQuery::Extensions {
            self.raise(GlErrorCode::InvalidEnum);
            return None;
        }
        match self.extensions.get(index as usize) {
            Some(extension) => Some(extension.clone()),
            None => {
                self.raise(GlErrorCode::InvalidValue);
                None
            }
        }
    }

    fn get_integer(&mut self, name: IntegerQuery) -> i32 {
        if let Some(&value) = self.integers.get(&name) {
            return value;
        }
        if name == IntegerQuery::NumExtensions {
            return i32::try_from(self.extensions.len()).unwrap_or(i32::MAX);
        }
        self.raise(GlErrorCode::InvalidEnum);
        0
    }

    fn get_integer_indexed(&mut self, name: IntegerQuery, index: u32) -> i32 {
        let lookup = self
            .indexed_integers
            .get(&name)
            .map(|values| values.get(index as usize).copied());
        match lookup {
            Some(Some(value)) => value,
            Some(None) => {
                self.raise(GlErrorCode::InvalidValue);
                0
            }
            None => {
                self.raise(GlErrorCode::InvalidEnum);
                0
            }
        }
    }

    fn take_errors(&mut self) -> Vec<GlErrorCode> {
        std::mem::take(&mut self.pending_errors)
    }
}
