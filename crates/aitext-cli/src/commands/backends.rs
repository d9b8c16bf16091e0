use aitext_core::error::ExtractError;
use aitext_core::extraction::Capabilities;

pub fn list() -> Result<(), ExtractError> {
    let caps = Capabilities::detect();

    println!("Extraction backends:\n");
    println!(
        "  {:<10} {:<14} layout spans + page text (poppler-utils)",
        "pdftotext",
        status(caps.pdftotext, "available", "not found")
    );
    println!(
        "  {:<10} {:<14} page text fallback",
        "lopdf",
        status(caps.lopdf, "built in", "not compiled")
    );
    println!();

    let usable: Vec<&str> = [
        ("layout", caps.pdftotext),
        ("direct", caps.pdftotext || caps.lopdf),
    ]
    .into_iter()
    .filter(|(_, ok)| *ok)
    .map(|(name, _)| name)
    .collect();

    if usable.is_empty() {
        println!("No method can extract text. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)");
    } else {
        println!("Usable methods: {}", usable.join(", "));
    }
    Ok(())
}

fn status(present: bool, yes: &'static str, no: &'static str) -> &'static str {
    if present {
        yes
    } else {
        no
    }
}
