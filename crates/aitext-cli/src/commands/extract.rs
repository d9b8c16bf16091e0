use aitext_core::config::{load_config, ExtractConfig};
use aitext_core::error::ExtractError;
use aitext_core::model::ExtractionMethod;
use aitext_core::stats::TextStats;
use aitext_core::TextExtractor;
use std::path::{Path, PathBuf};

use crate::output;
use crate::Format;

pub fn run(
    input_file: PathBuf,
    method: ExtractionMethod,
    output_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    format: Format,
    save: bool,
) -> Result<(), ExtractError> {
    let config = match config_file {
        Some(path) => {
            let config = load_config(&path)?;
            tracing::debug!(path = %path.display(), ?config, "loaded configuration");
            config
        }
        None => ExtractConfig::default(),
    };

    let extractor = TextExtractor::detect(config);
    let text = extractor.extract(&input_file, method)?;
    let stats = TextStats::of(&text);

    match format {
        Format::Json => output::json::print(&input_file, method, &text, &stats)?,
        Format::Text => output::text::print(&text, &stats),
    }

    if save {
        let path = output_file.unwrap_or_else(|| default_output_path(&input_file));
        save_text(&path, &text)?;
        eprintln!("Text saved to {}", path.display());
    }

    Ok(())
}

fn save_text(path: &Path, text: &str) -> Result<(), ExtractError> {
    std::fs::write(path, text)?;
    tracing::info!(path = %path.display(), bytes = text.len(), "wrote extracted text");
    Ok(())
}

/// `<dir>/<stem>_extracted_text.txt` next to the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".into());
    input.with_file_name(format!("{stem}_extracted_text.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("art/poster.ai")),
            PathBuf::from("art/poster_extracted_text.txt")
        );
        assert_eq!(
            default_output_path(Path::new("flyer.v2.pdf")),
            PathBuf::from("flyer.v2_extracted_text.txt")
        );
    }

    #[test]
    fn test_save_text_writes_the_whole_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poster_extracted_text.txt");
        save_text(&path, "SPRING SALE\nSaturday 10am").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "SPRING SALE\nSaturday 10am"
        );
    }

    #[test]
    fn test_save_text_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_text(&dir.path().join("gone/out.txt"), "text").unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
