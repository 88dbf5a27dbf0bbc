//! Structured entities extracted from recognized text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category an entity pattern reports into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    /// Calendar dates ("15 марта 1925", "1941 г.", "01.02.1930").
    Date,
    /// Surname + given name + patronymic triples.
    Name,
    /// Archive references (fond, opis, delo, storage unit).
    ArchiveCode,
    /// Place names. No built-in pattern reports here.
    Place,
}

impl EntityCategory {
    /// All categories in output field order.
    pub const ALL: [EntityCategory; 4] = [
        EntityCategory::Date,
        EntityCategory::Name,
        EntityCategory::ArchiveCode,
        EntityCategory::Place,
    ];

    /// Name of the corresponding `ExtractionResult` field.
    pub fn field_name(&self) -> &'static str {
        match self {
            EntityCategory::Date => "dates",
            EntityCategory::Name => "names",
            EntityCategory::ArchiveCode => "archive_codes",
            EntityCategory::Place => "places",
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityCategory::Date => "date",
            EntityCategory::Name => "name",
            EntityCategory::ArchiveCode => "archive_code",
            EntityCategory::Place => "place",
        };
        f.write_str(s)
    }
}

impl FromStr for EntityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" | "dates" => Ok(EntityCategory::Date),
            "name" | "names" => Ok(EntityCategory::Name),
            "archive_code" | "archive_codes" => Ok(EntityCategory::ArchiveCode),
            "place" | "places" => Ok(EntityCategory::Place),
            other => Err(format!("unknown entity category: {}", other)),
        }
    }
}

/// Entities found in a block of recognized text.
///
/// Each list keeps duplicates. Within a list, every match of one pattern
/// precedes every match of the next pattern of the same category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Date strings.
    pub dates: Vec<String>,
    /// Full-name strings.
    pub names: Vec<String>,
    /// Archive reference strings.
    pub archive_codes: Vec<String>,
    /// Place strings (empty unless custom place patterns are configured).
    pub places: Vec<String>,
}

impl ExtractionResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to the field for `category`.
    pub fn push(&mut self, category: EntityCategory, value: impl Into<String>) {
        self.field_mut(category).push(value.into());
    }

    /// Values collected for `category`.
    pub fn get(&self, category: EntityCategory) -> &[String] {
        match category {
            EntityCategory::Date => &self.dates,
            EntityCategory::Name => &self.names,
            EntityCategory::ArchiveCode => &self.archive_codes,
            EntityCategory::Place => &self.places,
        }
    }

    fn field_mut(&mut self, category: EntityCategory) -> &mut Vec<String> {
        match category {
            EntityCategory::Date => &mut self.dates,
            EntityCategory::Name => &mut self.names,
            EntityCategory::ArchiveCode => &mut self.archive_codes,
            EntityCategory::Place => &mut self.places,
        }
    }

    /// Total number of values across all fields.
    pub fn len(&self) -> usize {
        self.dates.len() + self.names.len() + self.archive_codes.len() + self.places.len()
    }

    /// True when no field holds a value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single pattern match with its location in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMatch {
    /// Category the producing pattern reports into.
    pub category: EntityCategory,
    /// Label of the producing pattern.
    pub pattern: String,
    /// Matched text.
    pub text: String,
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
}

impl From<&[EntityMatch]> for ExtractionResult {
    fn from(matches: &[EntityMatch]) -> Self {
        let mut result = ExtractionResult::new();
        for m in matches {
            result.push(m.category, m.text.clone());
        }
        result
    }
}
