use aitext_core::error::ExtractError;
use aitext_core::model::ExtractionMethod;
use aitext_core::stats::TextStats;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ExtractionReport<'a> {
    file: &'a Path,
    method: ExtractionMethod,
    text: &'a str,
    stats: &'a TextStats,
}

pub fn print(
    file: &Path,
    method: ExtractionMethod,
    text: &str,
    stats: &TextStats,
) -> Result<(), ExtractError> {
    let report = ExtractionReport {
        file,
        method,
        text,
        stats,
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}
