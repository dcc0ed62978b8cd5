//! Catalogue index: volcano identity ↔ matrix row.
//!
//! Row order of the catalogue is the index space of every analogy matrix.
//! Names are not unique in the Smithsonian catalogue, ids are.

use tracing::debug;
use volcans_common::{Result, VolcanoIdentity, VolcanoRecord, VolcansError};

/// Default number of fuzzy suggestions attached to name errors.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

const ID_NOT_FOUND_MSG: &str = "Volcano number does not exist. \
    Please provide a non-zero, positive, six digits number. To check for \
    existing volcano numbers (VNUM), please visit www.volcano.si.edu";

/// Read-only volcano catalogue.
#[derive(Debug, Clone)]
pub struct Catalogue {
    volcanoes: Vec<VolcanoRecord>,
    suggestion_limit: usize,
}

impl Catalogue {
    pub fn new(volcanoes: Vec<VolcanoRecord>) -> Self {
        Self {
            volcanoes,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    /// Number of suggestions attached to `AmbiguousName` errors.
    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    pub fn len(&self) -> usize {
        self.volcanoes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volcanoes.is_empty()
    }

    pub fn volcanoes(&self) -> &[VolcanoRecord] {
        &self.volcanoes
    }

    /// Resolve a name or Smithsonian id to its row index.
    pub fn resolve(&self, identity: &VolcanoIdentity) -> Result<usize> {
        match identity {
            VolcanoIdentity::Name(name) => self.index_from_name(name),
            VolcanoIdentity::CatalogueId(id) => self.index_from_id(*id),
        }
    }

    pub fn index_from_id(&self, smithsonian_id: u32) -> Result<usize> {
        self.volcanoes
            .iter()
            .position(|v| v.smithsonian_id == smithsonian_id)
            .ok_or_else(|| VolcansError::NotFound(ID_NOT_FOUND_MSG.to_string()))
    }

    /// Exact name match. Zero or several matches fail with suggestions.
    pub fn index_from_name(&self, name: &str) -> Result<usize> {
        let matches: Vec<usize> = self
            .volcanoes
            .iter()
            .enumerate()
            .filter(|(_, v)| v.name == name)
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [idx] => Ok(*idx),
            [] => Err(VolcansError::AmbiguousName {
                message: format!("{name} not found! Did you mean:"),
                suggestions: self.fuzzy_suggestions(name, self.suggestion_limit),
            }),
            _ => {
                debug!(name, count = matches.len(), "Duplicate volcano name");
                Err(VolcansError::AmbiguousName {
                    message: format!(
                        "Volcano name {name} is not unique. \
                         Please provide smithsonian id instead of name."
                    ),
                    suggestions: self.fuzzy_suggestions(name, self.suggestion_limit),
                })
            }
        }
    }

    pub fn record(&self, idx: usize) -> Result<&VolcanoRecord> {
        self.volcanoes.get(idx).ok_or(VolcansError::OutOfRange {
            index: idx,
            len: self.volcanoes.len(),
        })
    }

    pub fn name_of(&self, idx: usize) -> Result<&str> {
        Ok(self.record(idx)?.name.as_str())
    }

    pub fn smithsonian_id_of(&self, idx: usize) -> Result<u32> {
        Ok(self.record(idx)?.smithsonian_id)
    }

    /// Smithsonian id (VNUM) of a uniquely named volcano.
    pub fn smithsonian_id_from_name(&self, name: &str) -> Result<u32> {
        let idx = self.index_from_name(name)?;
        self.smithsonian_id_of(idx)
    }

    /// Up to `limit` catalogue records whose names are closest to `name`,
    /// best first. Equal scores keep catalogue order.
    pub fn fuzzy_suggestions(&self, name: &str, limit: usize) -> Vec<VolcanoRecord> {
        let query = fuzzy_normalise(name);
        let mut scored: Vec<(u8, &VolcanoRecord)> = self
            .volcanoes
            .iter()
            .map(|v| (name_similarity(&query, &fuzzy_normalise(&v.name)), v))
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().take(limit).map(|(_, v)| v.clone()).collect()
    }
}

/// Lowercase, and collapse every non-alphanumeric run into a single space.
fn fuzzy_normalise(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 0–100 similarity of two already-normalised names.
/// Normalised Levenshtein: a substitution costs one edit, like an insertion or a deletion.
pub fn name_similarity(a: &str, b: &str) -> u8 {
    (strsim::normalized_levenshtein(a, b) * 100.0).round() as u8
}
