use crate::error::ExtractError;
use std::path::Path;

/// Convert the Illustrator file to a PDF and extract from that.
///
/// No converter ships with this crate, so this always fails with
/// [`ExtractError::Unimplemented`]. A real converter would shell out to an
/// external tool such as Inkscape.
pub fn convert_and_extract(path: &Path) -> Result<String, ExtractError> {
    tracing::debug!(path = %path.display(), "conversion requested but no converter is available");
    Err(ExtractError::Unimplemented)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn test_always_fails() {
        for p in ["design.ai", "missing.pdf", "", "/"] {
            let err = convert_and_extract(Path::new(p)).unwrap_err();
            assert_eq!(err.kind(), FailureKind::UnimplementedFeature);
        }
    }
}
