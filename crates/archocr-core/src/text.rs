//! Cleanup of raw OCR output.

use crate::models::config::CleanupConfig;

/// Drops OCR noise lines and trims the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCleaner {
    min_line_chars: usize,
}

impl TextCleaner {
    /// Create a cleaner that keeps trimmed lines of at least three characters.
    pub fn new() -> Self {
        Self { min_line_chars: 3 }
    }

    /// Set the minimum trimmed line length (in characters) to keep.
    pub fn with_min_line_chars(mut self, min_line_chars: usize) -> Self {
        self.min_line_chars = min_line_chars;
        self
    }

    /// Create a cleaner from configuration.
    pub fn from_config(config: &CleanupConfig) -> Self {
        Self::new().with_min_line_chars(config.min_line_chars)
    }

    /// Trim every line, drop short ones, and rejoin with `\n`.
    pub fn clean(&self, text: &str) -> String {
        text.split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty() && line.chars().count() >= self.min_line_chars)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Clean OCR output with the default noise threshold.
pub fn clean_recognized_text(text: &str) -> String {
    TextCleaner::new().clean(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_short_lines() {
        assert_eq!(clean_recognized_text("ab\nabc"), "abc");
    }

    #[test]
    fn test_trims_lines() {
        let text = "   Опись дел  \n\t|\n\n  Ф. 25, оп. 3\r\n";
        assert_eq!(clean_recognized_text(text), "Опись дел\nФ. 25, оп. 3");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // "ёж" is two characters but four bytes.
        assert_eq!(clean_recognized_text("ёж\nёжи"), "ёжи");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_recognized_text(""), "");
        assert_eq!(clean_recognized_text("\n \n a \n"), "");
    }

    #[test]
    fn test_custom_threshold() {
        let cleaner = TextCleaner::new().with_min_line_chars(1);
        assert_eq!(cleaner.clean("a\n\n  b "), "a\nb");

        let cleaner = TextCleaner::new().with_min_line_chars(5);
        assert_eq!(cleaner.clean("abcd\nabcde"), "abcde");
    }
}
