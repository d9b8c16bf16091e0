use crate::error::ExtractError;
use crate::model::DocumentClass;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Vertical distance within which two spans count as the same line.
///
/// A fixed heuristic in page units, not derived from font metrics.
pub const DEFAULT_LINE_TOLERANCE: f32 = 5.0;

/// Tunables for a [`TextExtractor`](crate::TextExtractor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    pub line_tolerance: f32,
    /// Document classes whose extensions pass the file-type check.
    pub accepted: Vec<DocumentClass>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            line_tolerance: DEFAULT_LINE_TOLERANCE,
            accepted: vec![DocumentClass::Illustrator, DocumentClass::Pdf],
        }
    }
}

impl ExtractConfig {
    pub fn accepts(&self, path: &Path) -> bool {
        DocumentClass::from_path(path).is_some_and(|class| self.accepted.contains(&class))
    }

    /// Human-readable list of accepted extensions, e.g. ".ai or .pdf".
    pub fn expected_extensions(&self) -> String {
        self.accepted
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<ExtractConfig, ExtractError> {
    let content = std::fs::read_to_string(path).map_err(|e| ExtractError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a config from a JSON string. Missing fields take their defaults.
pub fn parse_config(json: &str, source: &Path) -> Result<ExtractConfig, ExtractError> {
    let config: ExtractConfig = serde_json::from_str(json).map_err(|e| ExtractError::Config {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config).map_err(|reason| ExtractError::Config {
        path: source.to_path_buf(),
        reason,
    })?;
    Ok(config)
}

fn validate_config(config: &ExtractConfig) -> Result<(), String> {
    if !config.line_tolerance.is_finite() || config.line_tolerance < 0.0 {
        return Err(format!(
            "line_tolerance must be a non-negative number, got {}",
            config.line_tolerance
        ));
    }
    if config.accepted.is_empty() {
        return Err("accepted must list at least one document class".into());
    }
    Ok(())
}
