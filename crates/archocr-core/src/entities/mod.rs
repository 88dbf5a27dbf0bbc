//! Entity extraction from recognized text.
//!
//! Extraction is a pure function of its input: it never fails, keeps no
//! state between calls, and scans the text once per table entry.

pub mod patterns;

use tracing::trace;

use crate::error::Result;
use crate::models::config::{CustomPattern, ExtractionConfig};
use crate::models::entities::{EntityMatch, ExtractionResult};

use patterns::{COMPILED_PATTERNS, CompiledPattern};

/// Table-driven extractor for all entity categories.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    patterns: Vec<CompiledPattern>,
}

impl EntityExtractor {
    /// Create an extractor over the built-in pattern table.
    pub fn new() -> Self {
        Self {
            patterns: COMPILED_PATTERNS.clone(),
        }
    }

    /// Append user-supplied patterns after the built-in ones.
    pub fn with_extra_patterns(mut self, extra: &[CustomPattern]) -> Result<Self> {
        for custom in extra {
            self.patterns.push(custom.compile()?);
        }
        Ok(self)
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Self::new().with_extra_patterns(&config.extra_patterns)
    }

    /// Number of patterns in the table.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Extract all entities from `text`.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let mut result = ExtractionResult::new();
        for pattern in &self.patterns {
            for m in pattern.regex.find_iter(text) {
                result.push(pattern.category, m.as_str());
            }
        }
        trace!("Extracted {} entities from {} bytes", result.len(), text.len());
        result
    }

    /// Every match with its location, in table order.
    pub fn find_matches(&self, text: &str) -> Vec<EntityMatch> {
        self.patterns
            .iter()
            .flat_map(|pattern| {
                pattern.regex.find_iter(text).map(move |m| EntityMatch {
                    category: pattern.category,
                    pattern: pattern.label.clone(),
                    text: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                })
            })
            .collect()
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract entities with the built-in pattern table.
pub fn extract_entities(text: &str) -> ExtractionResult {
    EntityExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entities::EntityCategory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_long_date() {
        let result = extract_entities("15 марта 1925");
        assert_eq!(result.dates, vec!["15 марта 1925"]);
    }

    #[test]
    fn test_year_date() {
        let result = extract_entities("1941 г. началась война");
        assert_eq!(result.dates, vec!["1941 г."]);
    }

    #[test]
    fn test_numeric_date() {
        let result = extract_entities("Принято 1.2.1930 и 15.11.1931, не 15.11.31");
        assert_eq!(result.dates, vec!["1.2.1930", "15.11.1931"]);
    }

    #[test]
    fn test_month_name_case_insensitive() {
        let result = extract_entities("3 МАРТА 1925 и 4 Апреля 1926");
        assert_eq!(result.dates, vec!["3 МАРТА 1925", "4 Апреля 1926"]);
    }

    #[test]
    fn test_date_patterns_concatenate_in_table_order() {
        // The numeric date appears first in the text but its pattern is last.
        let text = "01.05.1945, затем 1946 г., затем 9 мая 1947";
        let result = extract_entities(text);
        assert_eq!(result.dates, vec!["9 мая 1947", "1946 г.", "01.05.1945"]);
    }

    #[test]
    fn test_archive_codes() {
        let result = extract_entities("Ф. 25, оп. 3, д. 117");
        assert_eq!(result.archive_codes, vec!["Ф. 25", "оп. 3", "д. 117"]);
    }

    #[test]
    fn test_archive_codes_pattern_order() {
        let text = "ед. хр. 4; Д. 9; Фонд 12; Оп.1; ф.7";
        let result = extract_entities(text);
        assert_eq!(
            result.archive_codes,
            vec!["ф.7", "Оп.1", "Д. 9", "Фонд 12", "ед. хр. 4"]
        );
    }

    #[test]
    fn test_archive_abbreviation_case_insensitive() {
        let result = extract_entities("ОП. 3 ЕД. ХР. 8");
        assert_eq!(result.archive_codes, vec!["ОП. 3", "ЕД. ХР. 8"]);
    }

    #[test]
    fn test_full_name() {
        let result = extract_entities("Иванов Петр Сергеевич");
        assert_eq!(result.names, vec!["Иванов Петр Сергеевич"]);
    }

    #[test]
    fn test_name_with_yo() {
        let result = extract_entities("Дело: Ёлкин Семён Фёдорович, 1902");
        assert_eq!(result.names, vec!["Ёлкин Семён Фёдорович"]);
    }

    #[test]
    fn test_name_requires_capitalized_tokens() {
        let result = extract_entities("иванов петр сергеевич; ИВАНОВ ПЕТР СЕРГЕЕВИЧ");
        assert!(result.names.is_empty());

        let result = extract_entities("Иванов петр Сергеевич");
        assert!(result.names.is_empty());
    }

    #[test]
    fn test_name_is_shape_heuristic() {
        let result = extract_entities("Государственный Архив Области");
        assert_eq!(result.names, vec!["Государственный Архив Области"]);
    }

    #[test]
    fn test_empty_input() {
        let result = extract_entities("");
        assert_eq!(result, ExtractionResult::default());
        assert!(result.places.is_empty());
    }

    #[test]
    fn test_no_matches() {
        let result = extract_entities("lorem ipsum 12345 !!!");
        assert!(result.is_empty());
    }

    #[test]
    fn test_places_always_empty() {
        let text = "г. Москва, ул. Тверская, Ленинград, Ф. 1, 1 мая 1920";
        assert!(extract_entities(text).places.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let text = "ГАРФ. Ф. 5446, оп. 1, д. 12. Петров Иван Ильич, 12.04.1936, 1937 г.";
        assert_eq!(extract_entities(text), extract_entities(text));
    }

    #[test]
    fn test_duplicates_preserved() {
        let result = extract_entities("д. 5 и снова д. 5");
        assert_eq!(result.archive_codes, vec!["д. 5", "д. 5"]);
    }

    #[test]
    fn test_find_matches_positions() {
        let text = "Ф. 25, оп. 3";
        let matches = EntityExtractor::new().find_matches(text);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].pattern, "fond");
        assert_eq!(&text[matches[0].start..matches[0].end], "Ф. 25");
        assert_eq!(matches[1].category, EntityCategory::ArchiveCode);
        assert_eq!(&text[matches[1].start..matches[1].end], "оп. 3");

        let rebuilt = ExtractionResult::from(matches.as_slice());
        assert_eq!(rebuilt, extract_entities(text));
    }

    #[test]
    fn test_extra_patterns_append_after_builtins() {
        let extra = vec![
            CustomPattern {
                category: EntityCategory::Place,
                label: Some("city".to_string()),
                pattern: r"г\.\s*[А-ЯЁ][а-яё]+".to_string(),
                case_insensitive: false,
            },
            CustomPattern {
                category: EntityCategory::ArchiveCode,
                label: None,
                pattern: r"л\.\s*\d+".to_string(),
                case_insensitive: true,
            },
        ];

        let extractor = EntityExtractor::new().with_extra_patterns(&extra).unwrap();
        let result = extractor.extract("л. 3, Ф. 1, г. Тверь");

        assert_eq!(result.places, vec!["г. Тверь"]);
        assert_eq!(result.archive_codes, vec!["Ф. 1", "л. 3"]);
    }
}
