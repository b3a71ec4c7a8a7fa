//! Output formatting utilities for CLI

use std::io::{self, BufRead, Write};

use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print a serializable value as JSON or use custom text formatter
pub fn print_formatted<T, F>(value: &T, format: OutputFormat, text_formatter: F)
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Text => println!("{}", text_formatter(value)),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a success message (suppressed in quiet mode)
pub fn print_success(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}

/// Print an error message (never suppressed)
pub fn print_error(message: &str) {
    eprintln!("Error: {}", message);
}

/// Ask a yes/no question on the terminal; anything but "y" or "yes" is a no
pub fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Cut `text` to at most `max` characters, marking the cut with "..."
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("nope"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a rather long description", 10), "a rathe...");
        // Multi-byte characters are never split
        assert_eq!(truncate("〰〰〰〰〰〰", 5), "〰〰...");
    }
}
