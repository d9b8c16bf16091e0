use aitext_core::stats::TextStats;

const RULE_WIDTH: usize = 50;

pub fn print(text: &str, stats: &TextStats) {
    let rule = "=".repeat(RULE_WIDTH);

    println!("{rule}");
    println!("Extracted text:");
    println!("{rule}");
    println!("{text}");
    println!("{rule}");
    println!("  {:<22} {}", "Characters:", group_thousands(stats.chars));
    println!("  {:<22} {}", "Lines:", stats.lines);
    println!("  {:<22} {}", "Avg chars per line:", stats.avg_chars_per_line);
}

/// 12345 -> "12,345"
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
