use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Rectangle of a span in page units. `top` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// A contiguous run of text reported by the structured backend.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub text: String,
    pub bbox: BBox,
    /// Zero-based.
    pub page_index: usize,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, bbox: BBox, page_index: usize) -> Self {
        TextSpan {
            text: text.into(),
            bbox,
            page_index,
        }
    }
}

/// Which strategy (or chain of strategies) an extraction runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    /// Layout, then direct read, then conversion, stopping at the first non-empty success.
    #[default]
    Auto,
    Direct,
    Convert,
    Layout,
}

impl ExtractionMethod {
    pub const ALL: [ExtractionMethod; 4] = [
        ExtractionMethod::Auto,
        ExtractionMethod::Direct,
        ExtractionMethod::Convert,
        ExtractionMethod::Layout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::Auto => "auto",
            ExtractionMethod::Direct => "direct",
            ExtractionMethod::Convert => "convert",
            ExtractionMethod::Layout => "layout",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ExtractionMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| {
                format!("unknown method '{s}' (expected auto, direct, convert or layout)")
            })
    }
}

/// Kinds of document the extractor accepts, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentClass {
    Illustrator,
    Pdf,
}

impl DocumentClass {
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentClass::Illustrator => "ai",
            DocumentClass::Pdf => "pdf",
        }
    }

    /// Classify a path by its extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<DocumentClass> {
        let ext = path.extension()?.to_str()?;
        [DocumentClass::Illustrator, DocumentClass::Pdf]
            .into_iter()
            .find(|c| ext.eq_ignore_ascii_case(c.extension()))
    }
}

impl fmt::Display for DocumentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}
