//! Error types for the gpuprobe library

use crate::gl_errors::{join_errors, GlErrorCode};
use std::io;
use thiserror::Error;

/// Main error type for gpuprobe operations
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The GL error queue was not empty after the query pass
    #[error("OpenGL API error: {}", join_errors(.errors))]
    Api {
        /// Every code drained by the terminal check, in queue order
        errors: Vec<GlErrorCode>,
    },

    /// A recorded context snapshot is inconsistent
    #[error("Invalid capture: {0}")]
    Capture(String),

    /// Reading a recorded context failed
    #[error("Failed to read capture: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProbeError {
    /// GL error codes behind an [`ProbeError::Api`] failure, empty otherwise
    pub fn gl_errors(&self) -> &[GlErrorCode] {
        match self {
            ProbeError::Api { errors } => errors,
            _ => &[],
        }
    }
}

/// Result type for gpuprobe operations
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_lists_codes() {
        let err = ProbeError::Api {
            errors: vec![GlErrorCode::InvalidEnum, GlErrorCode::OutOfMemory],
        };
        assert_eq!(
            err.to_string(),
            "OpenGL API error: GL_INVALID_ENUM, GL_OUT_OF_MEMORY"
        );
        assert_eq!(err.gl_errors().len(), 2);
    }

    #[test]
    fn test_io_error_converts() {
        let err: ProbeError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, ProbeError::Io(_)));
        assert!(err.gl_errors().is_empty());
    }
}
