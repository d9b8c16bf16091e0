use crate::error::ExtractError;
use crate::extraction::{PdfBackend, PdfDocument, SpanBackend};
use std::path::Path;

/// Read the document as a PDF without layout reconstruction.
///
/// The structured backend goes first; any failure there falls through to the
/// page-iteration backend. When the structured backend failed and there is no
/// page backend, its error is returned.
pub fn read_as_pdf(
    structured: Option<&dyn SpanBackend>,
    pages: Option<&dyn PdfBackend>,
    path: &Path,
) -> Result<String, ExtractError> {
    let mut structured_error = None;

    if let Some(backend) = structured {
        match backend
            .open_text(path)
            .and_then(|mut doc| concat_pages(doc.as_mut()))
        {
            Ok(text) => return Ok(text),
            Err(e) => {
                tracing::warn!(backend = backend.backend_name(), error = %e, "falling back to page backend");
                structured_error = Some(e);
            }
        }
    }

    match (pages, structured_error) {
        (Some(backend), _) => {
            let mut doc = backend.open(path)?;
            concat_pages(doc.as_mut())
        }
        (None, Some(e)) => Err(e),
        (None, None) => Err(ExtractError::MissingBackend {
            missing: "pdftotext, lopdf".into(),
        }),
    }
}

/// Every page's text followed by a newline, trimmed as a whole.
fn concat_pages<D: PdfDocument + ?Sized>(doc: &mut D) -> Result<String, ExtractError> {
    let mut text = String::new();
    for page_index in 0..doc.page_count() {
        text.push_str(&doc.page_text(page_index)?);
        text.push('\n');
    }
    Ok(text.trim().to_string())
}
