use serde::{Deserialize, Serialize};

/// Summary numbers for an extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    /// Unicode scalar values, not bytes.
    pub chars: usize,
    /// Pieces between `\n`; an empty text still counts as one line.
    pub lines: usize,
    pub avg_chars_per_line: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        let chars = text.chars().count();
        let lines = text.split('\n').count();
        TextStats {
            chars,
            lines,
            avg_chars_per_line: chars.checked_div(lines).unwrap_or(0),
        }
    }
}
