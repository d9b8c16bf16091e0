use crate::error::ExtractError;
use crate::extraction::{PdfBackend, PdfDocument};
use lopdf::Document;
use std::path::Path;

const BACKEND: &str = "lopdf";

/// Page-iteration backend built on `lopdf`. No layout information.
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        LopdfExtractor
    }
}

impl Default for LopdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfBackend for LopdfExtractor {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let doc = Document::load(path).map_err(map_load_error)?;
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        tracing::debug!(path = %path.display(), pages = page_numbers.len(), "lopdf opened document");

        Ok(Box::new(LopdfDocument { doc, page_numbers }))
    }

    fn backend_name(&self) -> &str {
        BACKEND
    }
}

fn map_load_error(err: lopdf::Error) -> ExtractError {
    match err {
        lopdf::Error::IO(e) => ExtractError::Io(e),
        other => ExtractError::Malformed(other.to_string()),
    }
}

struct LopdfDocument {
    doc: Document,
    /// One-based page numbers, ascending.
    page_numbers: Vec<u32>,
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&mut self, page_index: usize) -> Result<String, ExtractError> {
        let number = self
            .page_numbers
            .get(page_index)
            .copied()
            .ok_or_else(|| ExtractError::backend(BACKEND, format!("no page {page_index}")))?;
        self.doc
            .extract_text(&[number])
            .map_err(|e| ExtractError::backend(BACKEND, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractConfig;
    use crate::error::FailureKind;
    use crate::extraction::fixtures::{two_page_pdf, TWO_PAGES};
    use crate::model::ExtractionMethod;
    use crate::TextExtractor;
    use std::io::Write;

    #[test]
    fn test_missing_file() {
        let err = LopdfExtractor::new()
            .open(Path::new("/definitely/not/here.ai"))
            .err()
            .unwrap();
        assert_eq!(err.kind(), FailureKind::FileNotFound);
    }

    #[test]
    fn test_non_pdf_bytes_are_malformed() {
        let mut file = tempfile::Builder::new().suffix(".ai").tempfile().unwrap();
        file.write_all(b"%!PS-Adobe-3.0\nthis is not a PDF container\n")
            .unwrap();
        let err = LopdfExtractor::new().open(file.path()).err().unwrap();
        assert_eq!(err.kind(), FailureKind::MalformedDocument);
    }

    #[test]
    fn test_reads_every_page_of_a_real_document() {
        let file = two_page_pdf();
        let mut doc = LopdfExtractor::new().open(file.path()).unwrap();
        assert_eq!(doc.page_count(), 2);
        assert!(doc.page_text(0).unwrap().contains(TWO_PAGES[0]));
        assert!(doc.page_text(1).unwrap().contains(TWO_PAGES[1]));
        assert_eq!(doc.page_text(2).unwrap_err().kind(), FailureKind::GenericFailure);
    }

    #[test]
    fn test_direct_and_auto_use_page_backend_alone() {
        let file = two_page_pdf();
        let extractor = TextExtractor::new(
            None,
            Some(Box::new(LopdfExtractor::new())),
            ExtractConfig::default(),
        );

        let direct = extractor.extract(file.path(), ExtractionMethod::Direct).unwrap();
        assert_eq!(direct, "Hello page one\n\nSecond page");

        let auto = extractor.extract(file.path(), ExtractionMethod::Auto).unwrap();
        assert_eq!(auto, direct);
    }
}
