use crate::config::ExtractConfig;
use crate::convert;
use crate::direct;
use crate::error::ExtractError;
use crate::extraction::{Capabilities, PdfBackend, SpanBackend};
use crate::layout;
use crate::model::{DocumentClass, ExtractionMethod};
use std::fmt;
use std::io::Write;
use std::path::Path;

/// One step of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Layout,
    Direct,
    Convert,
}

impl Strategy {
    /// Strategies a method runs, in order. `Auto` is the full waterfall.
    pub fn chain(method: ExtractionMethod) -> &'static [Strategy] {
        match method {
            ExtractionMethod::Auto => &[Strategy::Layout, Strategy::Direct, Strategy::Convert],
            ExtractionMethod::Direct => &[Strategy::Direct],
            ExtractionMethod::Convert => &[Strategy::Convert],
            ExtractionMethod::Layout => &[Strategy::Layout],
        }
    }

    pub fn run(self, extractor: &TextExtractor, path: &Path) -> Result<String, ExtractError> {
        match self {
            Strategy::Layout => extractor.read_with_layout(path),
            Strategy::Direct => extractor.read_as_pdf(path),
            Strategy::Convert => extractor.convert_and_extract(path),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Layout => write!(f, "layout"),
            Strategy::Direct => write!(f, "direct"),
            Strategy::Convert => write!(f, "convert"),
        }
    }
}

/// A successful result with at least one non-whitespace character.
fn is_usable(result: &Result<String, ExtractError>) -> bool {
    matches!(result, Ok(text) if !text.trim().is_empty())
}

/// Extraction entry point bound to a set of backends and a config.
pub struct TextExtractor {
    span_backend: Option<Box<dyn SpanBackend>>,
    page_backend: Option<Box<dyn PdfBackend>>,
    config: ExtractConfig,
}

impl TextExtractor {
    pub fn new(
        span_backend: Option<Box<dyn SpanBackend>>,
        page_backend: Option<Box<dyn PdfBackend>>,
        config: ExtractConfig,
    ) -> Self {
        TextExtractor {
            span_backend,
            page_backend,
            config,
        }
    }

    pub fn from_capabilities(caps: Capabilities, config: ExtractConfig) -> Self {
        Self::new(caps.span_backend(), caps.page_backend(), config)
    }

    /// Use whichever backends are installed on this system.
    pub fn detect(config: ExtractConfig) -> Self {
        Self::from_capabilities(Capabilities::detect(), config)
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Layout-aware extraction from the structured backend only.
    pub fn read_with_layout(&self, path: &Path) -> Result<String, ExtractError> {
        layout::read_with_layout(
            self.span_backend.as_deref(),
            path,
            self.config.line_tolerance,
        )
    }

    /// Plain page-by-page extraction, structured backend first.
    pub fn read_as_pdf(&self, path: &Path) -> Result<String, ExtractError> {
        direct::read_as_pdf(
            self.span_backend.as_deref(),
            self.page_backend.as_deref(),
            path,
        )
    }

    pub fn convert_and_extract(&self, path: &Path) -> Result<String, ExtractError> {
        convert::convert_and_extract(path)
    }

    /// Validate the input, then run the strategies `method` selects.
    ///
    /// Explicit methods return their single strategy's result as-is. `Auto`
    /// stops at the first strategy that yields non-blank text; otherwise the
    /// last strategy's result is returned.
    pub fn extract(&self, path: &Path, method: ExtractionMethod) -> Result<String, ExtractError> {
        self.check_input(path)?;

        let mut outcome = None;
        for &strategy in Strategy::chain(method) {
            tracing::info!(%strategy, path = %path.display(), "trying extraction strategy");
            let result = strategy.run(self, path);
            if is_usable(&result) {
                tracing::info!(%strategy, "extraction succeeded");
                return result;
            }
            match &result {
                Ok(_) => tracing::info!(%strategy, "strategy produced no text"),
                Err(e) => tracing::info!(%strategy, kind = %e.kind(), error = %e, "strategy failed"),
            }
            outcome = Some(result);
        }

        outcome.unwrap_or_else(|| convert::convert_and_extract(path))
    }

    /// Extract from an in-memory payload.
    ///
    /// The bytes go to a temporary file named with `class`'s extension, which
    /// is removed when this returns.
    pub fn extract_bytes(
        &self,
        bytes: &[u8],
        class: DocumentClass,
        method: ExtractionMethod,
    ) -> Result<String, ExtractError> {
        let suffix = format!(".{}", class.extension());
        let mut tmpfile = tempfile::Builder::new()
            .prefix("aitext-")
            .suffix(&suffix)
            .tempfile()?;
        tmpfile.write_all(bytes)?;
        tmpfile.flush()?;

        self.extract(tmpfile.path(), method)
    }

    fn check_input(&self, path: &Path) -> Result<(), ExtractError> {
        if !path.exists() {
            return Err(ExtractError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        if !self.config.accepts(path) {
            return Err(ExtractError::WrongFileType {
                path: path.to_path_buf(),
                expected: self.config.expected_extensions(),
            });
        }
        Ok(())
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::detect(ExtractConfig::default())
    }
}
