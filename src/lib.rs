//! # gpuprobe - GPU identification for OpenGL ES compute
//!
//! Identifies the GPU behind an active OpenGL ES 3.1+ context and reads
//! the limits a compute scheduler needs to size its work.
//!
//! ## Features
//!
//! - **Vendor/model classification** from the `GL_RENDERER` string
//!   (ARM Mali, Qualcomm Adreno, PowerVR, Intel, NVIDIA; Adreno 1xx-6xx models)
//! - **Capability probe** of SSBO/image bindings, work group limits,
//!   texture limits and extensions
//! - **All-or-nothing results**: any GL error during the probe fails it
//! - **Binding agnostic**: implement [`GlContext`] for your GL loader
//! - **Recorded contexts** in JSON for offline inspection and tests
//!
//! ## Quick Start
//!
//! ```rust
//! use gpuprobe::{classify, GpuModel, GpuVendor};
//!
//! let (vendor, model) = classify("Adreno (TM) 630");
//! assert_eq!(vendor, GpuVendor::Adreno);
//! assert_eq!(model, GpuModel::Adreno630);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod context;
pub mod error;
pub mod gl_errors;
pub mod mappings;
pub mod probe;

// Re-export main API for easy access
pub use context::{GlContext, IntegerQuery, RecordedContext, StringQuery};
pub use error::{ProbeError, ProbeResult};
pub use gl_errors::GlErrorCode;
pub use mappings::{classify, GpuModel, GpuVendor};
pub use probe::{request_gpu_info, GpuInfo};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Probe a recorded context stored as JSON
///
/// # Example
///
/// ```no_run
/// let info = gpuprobe::probe_recorded("fixtures/adreno630.json")?;
/// println!("GPU: {} {}", info.vendor, info.model);
/// # Ok::<(), gpuprobe::ProbeError>(())
/// ```
pub fn probe_recorded<P: AsRef<std::path::Path>>(path: P) -> ProbeResult<GpuInfo> {
    let mut ctx = RecordedContext::from_path(path)?;
    request_gpu_info(&mut ctx)
}

/// Get library information
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(version(), VERSION);
    }

    #[test]
    fn test_probe_recorded_missing_file() {
        let err = probe_recorded("/nonexistent/gpuprobe/capture.json").unwrap_err();
        assert!(matches!(err, ProbeError::Io(_)));
    }
}

/// Prelude module for convenient imports
///
/// # Example
///
/// ```no_run
/// use gpuprobe::prelude::*;
///
/// let mut ctx = RecordedContext::from_path("capture.json")?;
/// let gpu_info = request_gpu_info(&mut ctx)?;
/// # Ok::<(), ProbeError>(())
/// ```
pub mod prelude {
    pub use crate::context::{GlContext, IntegerQuery, RecordedContext, StringQuery};
    pub use crate::error::{ProbeError, ProbeResult};
    pub use crate::mappings::{classify, GpuModel, GpuVendor};
    pub use crate::probe::{request_gpu_info, GpuInfo};
    pub use crate::{probe_recorded, version};
}
