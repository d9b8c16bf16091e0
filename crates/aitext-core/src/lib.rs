pub mod config;
pub mod convert;
pub mod direct;
pub mod error;
pub mod extraction;
pub mod layout;
pub mod model;
pub mod selector;
pub mod stats;

use config::ExtractConfig;
use error::ExtractError;
use model::ExtractionMethod;
use std::path::Path;

pub use selector::TextExtractor;

/// Main API entry point: extract text from an Illustrator or PDF file.
///
/// Uses whichever backends are installed and the default config. Failures
/// come back as an [`ExtractError`]; use [`error::render_outcome`] when a
/// single prefixed string is needed instead.
pub fn extract_text(
    path: impl AsRef<Path>,
    method: ExtractionMethod,
) -> Result<String, ExtractError> {
    TextExtractor::detect(ExtractConfig::default()).extract(path.as_ref(), method)
}
