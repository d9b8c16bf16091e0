use std::fmt;
use std::path::PathBuf;

/// Prefix carried by every failure rendered through [`render_outcome`].
pub const FAILURE_PREFIX: &str = "error:";

/// Failure categories callers can branch on without matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    MissingCapability,
    FileNotFound,
    WrongFileType,
    MalformedDocument,
    GenericFailure,
    UnimplementedFeature,
    InvalidConfig,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::MissingCapability => "missing capability",
            FailureKind::FileNotFound => "file not found",
            FailureKind::WrongFileType => "wrong file type",
            FailureKind::MalformedDocument => "malformed document",
            FailureKind::GenericFailure => "failure",
            FailureKind::UnimplementedFeature => "unimplemented",
            FailureKind::InvalidConfig => "invalid config",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no PDF backend is installed ({missing}). Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    MissingBackend { missing: String },

    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("{} is not a supported file (expected {expected})", path.display())]
    WrongFileType { path: PathBuf, expected: String },

    #[error("the file does not contain a valid PDF structure or is damaged: {0}")]
    Malformed(String),

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("{backend} failed: {reason}")]
    Backend { backend: String, reason: String },

    #[error("AI to PDF conversion requires an external converter that is not available in this build")]
    Unimplemented,

    #[error("failed to load config from {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtractError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ExtractError::MissingBackend { .. } => FailureKind::MissingCapability,
            ExtractError::FileNotFound { .. } => FailureKind::FileNotFound,
            ExtractError::WrongFileType { .. } => FailureKind::WrongFileType,
            ExtractError::Malformed(_) => FailureKind::MalformedDocument,
            ExtractError::PdftotextFailed { .. } | ExtractError::Backend { .. } => {
                FailureKind::GenericFailure
            }
            ExtractError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                FailureKind::FileNotFound
            }
            ExtractError::Io(_) | ExtractError::Json(_) => FailureKind::GenericFailure,
            ExtractError::Unimplemented => FailureKind::UnimplementedFeature,
            ExtractError::Config { .. } => FailureKind::InvalidConfig,
        }
    }

    pub(crate) fn backend(backend: &str, reason: impl fmt::Display) -> Self {
        ExtractError::Backend {
            backend: backend.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Flatten a result into the single-string form used by string-only callers.
///
/// Failures always start with [`FAILURE_PREFIX`]; successes are returned as-is.
pub fn render_outcome(result: &Result<String, ExtractError>) -> String {
    match result {
        Ok(text) => text.clone(),
        Err(e) => format!("{FAILURE_PREFIX} {e}"),
    }
}

/// The prefix test string-only callers use to detect a failure.
pub fn is_failure_message(message: &str) -> bool {
    message.starts_with(FAILURE_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_failures_carry_prefix() {
        let errors = vec![
            ExtractError::MissingBackend {
                missing: "pdftotext, lopdf".into(),
            },
            ExtractError::FileNotFound {
                path: "missing.ai".into(),
            },
            ExtractError::Malformed("bad xref".into()),
            ExtractError::Unimplemented,
        ];
        for e in errors {
            let rendered = render_outcome(&Err(e));
            assert!(is_failure_message(&rendered), "{rendered}");
        }
    }

    #[test]
    fn test_success_renders_verbatim() {
        let rendered = render_outcome(&Ok("Hello\nWorld".into()));
        assert_eq!(rendered, "Hello\nWorld");
        assert!(!is_failure_message(&rendered));
    }

    #[test]
    fn test_io_not_found_maps_to_file_not_found() {
        let e = ExtractError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(e.kind(), FailureKind::FileNotFound);
        let e = ExtractError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert_eq!(e.kind(), FailureKind::GenericFailure);
    }

    #[test]
    fn test_distinct_kinds() {
        assert_eq!(
            ExtractError::Malformed("x".into()).kind(),
            FailureKind::MalformedDocument
        );
        assert_eq!(
            ExtractError::backend("lopdf", "boom").kind(),
            FailureKind::GenericFailure
        );
        assert_eq!(
            ExtractError::Unimplemented.kind(),
            FailureKind::UnimplementedFeature
        );
    }
}
