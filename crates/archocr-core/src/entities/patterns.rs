//! Built-in entity pattern table.
//!
//! Table order is significant: within a category, every match of an earlier
//! entry is reported before any match of a later entry.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

use crate::error::ArchocrError;
use crate::models::config::CustomPattern;
use crate::models::entities::EntityCategory;

/// Declarative description of one entity pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternSpec {
    /// Category the matches report into.
    pub category: EntityCategory,
    /// Short label shown in match listings.
    pub label: &'static str,
    /// Regular expression source.
    pub pattern: &'static str,
    /// Match case-insensitively.
    pub case_insensitive: bool,
}

/// Built-in patterns in evaluation order.
pub const BUILTIN_PATTERNS: &[PatternSpec] = &[
    // "15 марта 1925"
    PatternSpec {
        category: EntityCategory::Date,
        label: "date_long",
        pattern: r"\b\d{1,2}\s+(?:января|февраля|марта|апреля|мая|июня|июля|августа|сентября|октября|ноября|декабря)\s+\d{4}\b",
        case_insensitive: true,
    },
    // "1941 г."
    PatternSpec {
        category: EntityCategory::Date,
        label: "date_year",
        pattern: r"\b\d{4}\s+г\.",
        case_insensitive: true,
    },
    // "01.02.1930"
    PatternSpec {
        category: EntityCategory::Date,
        label: "date_numeric",
        pattern: r"\b\d{1,2}\.\d{1,2}\.\d{4}\b",
        case_insensitive: true,
    },
    PatternSpec {
        category: EntityCategory::ArchiveCode,
        label: "fond",
        pattern: r"[Фф]\.\s*\d+",
        case_insensitive: true,
    },
    PatternSpec {
        category: EntityCategory::ArchiveCode,
        label: "opis",
        pattern: r"[Оо]п\.\s*\d+",
        case_insensitive: true,
    },
    PatternSpec {
        category: EntityCategory::ArchiveCode,
        label: "delo",
        pattern: r"[Дд]\.\s*\d+",
        case_insensitive: true,
    },
    PatternSpec {
        category: EntityCategory::ArchiveCode,
        label: "fond_full",
        pattern: r"[Фф]онд\s*\d+",
        case_insensitive: true,
    },
    PatternSpec {
        category: EntityCategory::ArchiveCode,
        label: "storage_unit",
        pattern: r"[Ее]д\.\s*[Хх]р\.\s*\d+",
        case_insensitive: true,
    },
    // Case folding would widen [А-ЯЁ] to lowercase letters, so the name shape
    // is matched case-sensitively.
    PatternSpec {
        category: EntityCategory::Name,
        label: "full_name",
        pattern: r"\b[А-ЯЁ][а-яё]+\s+[А-ЯЁ][а-яё]+\s+[А-ЯЁ][а-яё]+\b",
        case_insensitive: false,
    },
];

/// A pattern ready for matching.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Category the matches report into.
    pub category: EntityCategory,
    /// Label shown in match listings.
    pub label: String,
    /// Compiled expression.
    pub regex: Regex,
}

impl CompiledPattern {
    fn build(
        category: EntityCategory,
        label: String,
        pattern: &str,
        case_insensitive: bool,
    ) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()?;
        Ok(Self {
            category,
            label,
            regex,
        })
    }
}

impl PatternSpec {
    /// Compile this table entry.
    pub fn compile(&self) -> Result<CompiledPattern, regex::Error> {
        CompiledPattern::build(
            self.category,
            self.label.to_string(),
            self.pattern,
            self.case_insensitive,
        )
    }
}

impl CustomPattern {
    /// Compile a user-supplied pattern.
    pub fn compile(&self) -> Result<CompiledPattern, ArchocrError> {
        let label = self.label.clone().unwrap_or_else(|| self.pattern.clone());
        CompiledPattern::build(self.category, label, &self.pattern, self.case_insensitive).map_err(
            |e| ArchocrError::InvalidPattern {
                pattern: self.pattern.clone(),
                reason: e.to_string(),
            },
        )
    }
}

lazy_static! {
    /// The built-in table, compiled once per process.
    pub static ref COMPILED_PATTERNS: Vec<CompiledPattern> = BUILTIN_PATTERNS
        .iter()
        .map(|spec| spec.compile().unwrap())
        .collect();
}
