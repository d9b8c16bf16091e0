use crate::error::ExtractError;
use crate::extraction::{PdfDocument, SpanBackend, SpanDocument};
use crate::model::{BBox, TextSpan};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::{Path, PathBuf};
use std::process::Command;

const BACKEND: &str = "pdftotext";

/// Structured backend using pdftotext (from poppler-utils).
///
/// Spans come from `pdftotext -bbox`, one per word, in page coordinates with
/// the origin at the top-left corner. Plain page text comes from a `pdftotext`
/// run without layout flags; [`SpanBackend::open_text`] runs only that one.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SpanBackend for PdftotextExtractor {
    fn open(&self, path: &Path) -> Result<Box<dyn SpanDocument>, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let xhtml = run_pdftotext(&["-bbox"], path)?;
        let pages = parse_bbox_xhtml(&xhtml)?;
        tracing::debug!(path = %path.display(), pages = pages.len(), "pdftotext opened document");

        Ok(Box::new(PdftotextDocument {
            path: path.to_path_buf(),
            pages,
            texts: None,
        }))
    }

    /// One plain `pdftotext` run; the page count comes from the form feeds.
    fn open_text(&self, path: &Path) -> Result<Box<dyn PdfDocument>, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let raw = run_pdftotext(&[], path)?;
        let pages = PageTexts(split_pages(&raw));
        tracing::debug!(path = %path.display(), pages = pages.0.len(), "pdftotext read page text");
        Ok(Box::new(pages))
    }

    fn backend_name(&self) -> &str {
        BACKEND
    }
}

/// Plain text of every page, already split.
struct PageTexts(Vec<String>);

impl PdfDocument for PageTexts {
    fn page_count(&self) -> usize {
        self.0.len()
    }

    fn page_text(&mut self, page_index: usize) -> Result<String, ExtractError> {
        Ok(self.0.get(page_index).cloned().unwrap_or_default())
    }
}

struct PdftotextDocument {
    path: PathBuf,
    pages: Vec<Vec<TextSpan>>,
    texts: Option<Vec<String>>,
}

impl PdfDocument for PdftotextDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&mut self, page_index: usize) -> Result<String, ExtractError> {
        if self.texts.is_none() {
            let raw = run_pdftotext(&[], &self.path)?;
            self.texts = Some(split_pages(&raw));
        }
        Ok(self
            .texts
            .as_ref()
            .and_then(|t| t.get(page_index))
            .cloned()
            .unwrap_or_default())
    }
}

impl SpanDocument for PdftotextDocument {
    fn page_spans(&mut self, page_index: usize) -> Result<Vec<TextSpan>, ExtractError> {
        self.pages
            .get(page_index)
            .cloned()
            .ok_or_else(|| ExtractError::backend(BACKEND, format!("no page {page_index}")))
    }
}

fn run_pdftotext(flags: &[&str], pdf_path: &Path) -> Result<String, ExtractError> {
    let output = Command::new("pdftotext")
        .args(flags)
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ExtractError::MissingBackend {
                    missing: BACKEND.into(),
                }
            } else {
                ExtractError::backend(BACKEND, e)
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(classify_failure(code, stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Map a pdftotext exit status to an error. Exit code 1 means the input could
/// not be opened as a PDF; callers have already checked that the file exists.
fn classify_failure(code: i32, stderr: String) -> ExtractError {
    match code {
        1 => ExtractError::Malformed(stderr),
        _ => ExtractError::PdftotextFailed { code, stderr },
    }
}

/// pdftotext terminates every page with a form feed.
fn split_pages(raw: &str) -> Vec<String> {
    let mut pages: Vec<String> = raw.split('\x0c').map(|p| p.to_string()).collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    pages
}

fn parse_bbox_xhtml(xml: &str) -> Result<Vec<Vec<TextSpan>>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<Vec<TextSpan>> = Vec::new();
    let mut current_bbox: Option<BBox> = None;
    let mut word = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"page" => pages.push(Vec::new()),
                b"word" => {
                    current_bbox = Some(parse_word_bbox(&e)?);
                    word.clear();
                }
                _ => {}
            },
            Ok(Event::Empty(e)) if e.name().as_ref() == b"page" => pages.push(Vec::new()),
            Ok(Event::Text(t)) if current_bbox.is_some() => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractError::backend(BACKEND, e))?;
                word.push_str(&text);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"word" => {
                let page_index = pages.len().saturating_sub(1);
                if let (Some(bbox), Some(page)) = (current_bbox.take(), pages.last_mut()) {
                    page.push(TextSpan::new(word.as_str(), bbox, page_index));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::backend(
                    BACKEND,
                    format!(
                        "unreadable -bbox output at byte {}: {e}",
                        reader.buffer_position()
                    ),
                ))
            }
            _ => {}
        }
    }

    Ok(pages)
}

fn parse_word_bbox(tag: &BytesStart<'_>) -> Result<BBox, ExtractError> {
    let mut coords: [Option<f32>; 4] = [None; 4];
    for attr in tag.attributes() {
        let attr = attr.map_err(|e| ExtractError::backend(BACKEND, e))?;
        let slot = match attr.key.as_ref() {
            b"xMin" => 0,
            b"yMin" => 1,
            b"xMax" => 2,
            b"yMax" => 3,
            _ => continue,
        };
        let value = attr
            .unescape_value()
            .map_err(|e| ExtractError::backend(BACKEND, e))?;
        coords[slot] = value.trim().parse().ok();
    }

    match coords {
        [Some(left), Some(top), Some(right), Some(bottom)] => Ok(BBox {
            left,
            top,
            right,
            bottom,
        }),
        _ => Err(ExtractError::backend(
            BACKEND,
            "word without a complete bounding box",
        )),
    }
}
