//! Core entity types shared by the loaders and the analogy engine.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Volcano
// ---------------------------------------------------------------------------

/// One row of the volcano catalogue.
/// The row position (not stored here) is the index used by every analogy matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolcanoRecord {
    pub name: String,
    pub country: String,
    pub smithsonian_id: u32,
}

impl VolcanoRecord {
    pub fn new(name: impl Into<String>, country: impl Into<String>, smithsonian_id: u32) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            smithsonian_id,
        }
    }
}

/// Render records as a right-aligned `name country smithsonian_id` text table.
pub fn format_volcano_table(records: &[VolcanoRecord]) -> String {
    let ids: Vec<String> = records.iter().map(|r| r.smithsonian_id.to_string()).collect();
    let name_w = records.iter().map(|r| r.name.chars().count()).max().unwrap_or(0).max(4);
    let country_w = records.iter().map(|r| r.country.chars().count()).max().unwrap_or(0).max(7);
    let id_w = ids.iter().map(String::len).max().unwrap_or(0).max(14);

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(format!(
        "{:>name_w$} {:>country_w$} {:>id_w$}",
        "name", "country", "smithsonian_id"
    ));
    for (r, id) in records.iter().zip(ids.iter()) {
        lines.push(format!("{:>name_w$} {:>country_w$} {:>id_w$}", r.name, r.country, id));
    }
    lines.join("\n")
}

/// How a caller refers to a volcano: by catalogue name or by Smithsonian id (VNUM).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VolcanoIdentity {
    CatalogueId(u32),
    Name(String),
}

impl VolcanoIdentity {
    /// Integers are treated as Smithsonian ids, anything else as a name.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<u32>() {
            Ok(id) => VolcanoIdentity::CatalogueId(id),
            Err(_) => VolcanoIdentity::Name(input.to_string()),
        }
    }
}

impl From<&str> for VolcanoIdentity {
    fn from(name: &str) -> Self {
        VolcanoIdentity::Name(name.to_string())
    }
}

impl From<u32> for VolcanoIdentity {
    fn from(id: u32) -> Self {
        VolcanoIdentity::CatalogueId(id)
    }
}

impl fmt::Display for VolcanoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolcanoIdentity::CatalogueId(id) => write!(f, "{id}"),
            VolcanoIdentity::Name(name) => f.write_str(name),
        }
    }
}

// ---------------------------------------------------------------------------
// Analogy criteria
// ---------------------------------------------------------------------------

/// The five independent analogy criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    TectonicSetting,
    Geochemistry,
    Morphology,
    EruptionSize,
    EruptionStyle,
}

impl Criterion {
    /// Fixed iteration order. Weight sums and matrix combination follow it.
    pub const ALL: [Criterion; 5] = [
        Criterion::TectonicSetting,
        Criterion::Geochemistry,
        Criterion::Morphology,
        Criterion::EruptionSize,
        Criterion::EruptionStyle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::TectonicSetting => "tectonic_setting",
            Criterion::Geochemistry => "geochemistry",
            Criterion::Morphology => "morphology",
            Criterion::EruptionSize => "eruption_size",
            Criterion::EruptionStyle => "eruption_style",
        }
    }

    /// Position in [`Criterion::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_parse_dispatches_on_integers() {
        assert_eq!(VolcanoIdentity::parse("283030"), VolcanoIdentity::CatalogueId(283030));
        assert_eq!(
            VolcanoIdentity::parse("Ruiz, Nevado del"),
            VolcanoIdentity::Name("Ruiz, Nevado del".to_string())
        );
        // Negative numbers are not valid ids, so they stay names and fail lookup later.
        assert_eq!(VolcanoIdentity::parse("-5"), VolcanoIdentity::Name("-5".to_string()));
    }

    #[test]
    fn test_volcano_table_has_header_and_rows() {
        let table = format_volcano_table(&[
            VolcanoRecord::new("Etna", "Italy", 211060),
            VolcanoRecord::new("Ruiz, Nevado del", "Colombia", 351020),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].trim_start().starts_with("name"));
        assert!(lines[2].contains("Ruiz, Nevado del"));
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn test_criterion_names_round_trip() {
        for (i, c) in Criterion::ALL.into_iter().enumerate() {
            assert_eq!(Criterion::from_name(c.as_str()), Some(c));
            assert_eq!(c.index(), i);
        }
        assert_eq!(Criterion::from_name("seismicity"), None);
    }

    #[test]
    fn test_identity_deserialises_untagged() {
        let id: VolcanoIdentity = serde_json::from_str("211060").unwrap();
        let name: VolcanoIdentity = serde_json::from_str("\"Etna\"").unwrap();
        assert_eq!(id, VolcanoIdentity::CatalogueId(211060));
        assert_eq!(name, VolcanoIdentity::Name("Etna".to_string()));
    }
}
