#[cfg(feature = "lopdf")]
pub mod lopdf_pages;
pub mod pdftotext;

#[cfg(all(test, feature = "lopdf"))]
pub(crate) mod fixtures;

use crate::error::ExtractError;
use crate::model::TextSpan;
use std::path::Path;
use std::sync::OnceLock;

/// An open document. Dropping the handle releases it.
pub trait PdfDocument {
    fn page_count(&self) -> usize;

    /// Plain text of one page (zero-based index).
    fn page_text(&mut self, page_index: usize) -> Result<String, ExtractError>;
}

/// An open document that can also report positioned spans.
pub trait SpanDocument: PdfDocument {
    /// Spans of one page in whatever order the backend emits them.
    fn page_spans(&mut self, page_index: usize) -> Result<Vec<TextSpan>, ExtractError>;
}

/// Backend that can only iterate pages and return their text.
pub trait PdfBackend: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, ExtractError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Backend that reports text spans with bounding boxes.
pub trait SpanBackend: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn SpanDocument>, ExtractError>;

    /// Open for page text only. Backends with a cheaper text-only path
    /// override this; the default goes through [`SpanBackend::open`].
    fn open_text(&self, path: &Path) -> Result<Box<dyn PdfDocument>, ExtractError> {
        Ok(Box::new(TextOnly(self.open(path)?)))
    }

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

struct TextOnly(Box<dyn SpanDocument>);

impl PdfDocument for TextOnly {
    fn page_count(&self) -> usize {
        self.0.page_count()
    }

    fn page_text(&mut self, page_index: usize) -> Result<String, ExtractError> {
        self.0.page_text(page_index)
    }
}

/// Which backends this process can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub pdftotext: bool,
    pub lopdf: bool,
}

impl Capabilities {
    /// Probe once per process; later calls return the memoized answer.
    pub fn detect() -> Capabilities {
        static CAPS: OnceLock<Capabilities> = OnceLock::new();
        *CAPS.get_or_init(|| {
            let caps = Capabilities {
                pdftotext: pdftotext::PdftotextExtractor::is_available(),
                lopdf: cfg!(feature = "lopdf"),
            };
            tracing::debug!(?caps, "probed extraction backends");
            caps
        })
    }

    pub fn span_backend(&self) -> Option<Box<dyn SpanBackend>> {
        if self.pdftotext {
            Some(Box::new(pdftotext::PdftotextExtractor::new()))
        } else {
            None
        }
    }

    pub fn page_backend(&self) -> Option<Box<dyn PdfBackend>> {
        #[cfg(feature = "lopdf")]
        if self.lopdf {
            return Some(Box::new(lopdf_pages::LopdfExtractor::new()));
        }
        None
    }
}
