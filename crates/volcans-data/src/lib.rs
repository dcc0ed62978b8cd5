//! On-disk VOLCANS reference data: the volcano catalogue and the five
//! pre-computed single-criterion analogy matrices.
//!
//! The data directory holds six headerless CSV files:
//!
//! | File | Content |
//! |------|---------|
//! | `volc_names.csv` | name, country, Smithsonian id (one volcano per row) |
//! | `tectonic_setting.csv` | N×N tectonic-setting analogy |
//! | `geochemistry.csv` | N×N geochemistry analogy |
//! | `morphology.csv` | N×N morphology analogy |
//! | `eruption_size.csv` | N×N eruption-size analogy |
//! | `eruption_style.csv` | N×N eruption-style analogy |
//!
//! Row `i` of every matrix refers to line `i` of `volc_names.csv`.
//!
//! # Example
//!
//! ```rust,no_run
//! use volcans_data::VolcansData;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let data = VolcansData::load().await?;
//!     println!("{} volcanoes in the catalogue", data.volcano_count());
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};
use volcans_common::{Criterion, SimilarityMatrix, VolcanoRecord};

/// Catalogue filename
pub const VOLCANO_NAMES_FILE: &str = "volc_names.csv";

/// Environment variable overriding the default data directory
pub const DATA_DIR_ENV: &str = "VOLCANS_DATA_DIR";

/// Matrix filename for a criterion.
pub fn matrix_file_name(criterion: Criterion) -> String {
    format!("{}.csv", criterion.as_str())
}

/// Catalogue and analogy matrices loaded from a data directory.
#[derive(Debug, Clone)]
pub struct VolcansData {
    volcanoes: Vec<VolcanoRecord>,
    matrices: HashMap<Criterion, SimilarityMatrix>,
    data_dir: PathBuf,
}

impl VolcansData {
    /// Load from `VOLCANS_DATA_DIR`, or the platform data directory if unset.
    pub async fn load() -> Result<Self> {
        Self::with_data_dir(Self::default_data_dir()).await
    }

    /// Load from a specific data directory.
    pub async fn with_data_dir(data_dir: PathBuf) -> Result<Self> {
        if !data_dir.is_dir() {
            anyhow::bail!(
                "VOLCANS data directory not found: {:?}\n\
                 Set {} or [data] dir in volcans.toml.",
                data_dir,
                DATA_DIR_ENV
            );
        }

        let mut data = Self {
            volcanoes: Vec::new(),
            matrices: HashMap::new(),
            data_dir,
        };

        info!("Loading VOLCANS data from {:?}", data.data_dir);
        data.load_volcano_names().await?;
        for criterion in Criterion::ALL {
            data.load_matrix(criterion).await?;
        }

        info!(
            "VOLCANS data ready: {} volcanoes, {} analogy matrices",
            data.volcanoes.len(),
            data.matrices.len()
        );

        Ok(data)
    }

    /// Get the default data directory
    pub fn default_data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return PathBuf::from(dir);
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from(".data"))
            .join("volcans")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn volcano_names_path(&self) -> PathBuf {
        self.data_dir.join(VOLCANO_NAMES_FILE)
    }

    fn matrix_path(&self, criterion: Criterion) -> PathBuf {
        self.data_dir.join(matrix_file_name(criterion))
    }

    /// Load the catalogue from volc_names.csv
    async fn load_volcano_names(&mut self) -> Result<()> {
        let path = self.volcano_names_path();
        debug!("Loading volcano names from {:?}", path);

        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {:?}", path))?;
        self.volcanoes = parse_volcano_names(&content)
            .with_context(|| format!("Malformed catalogue file {:?}", path))?;

        info!("Loaded {} volcano names", self.volcanoes.len());
        Ok(())
    }

    /// Load one criterion matrix
    async fn load_matrix(&mut self, criterion: Criterion) -> Result<()> {
        let path = self.matrix_path(criterion);
        debug!("Loading {} analogy from {:?}", criterion, path);

        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {:?}", path))?;
        let matrix = parse_matrix(&content)
            .with_context(|| format!("Malformed {} matrix {:?}", criterion, path))?;

        debug!("Loaded {} analogy: {}x{}", criterion, matrix.dim(), matrix.dim());
        self.matrices.insert(criterion, matrix);
        Ok(())
    }

    /// All catalogue rows in matrix index order.
    pub fn volcanoes(&self) -> &[VolcanoRecord] {
        &self.volcanoes
    }

    pub fn matrix(&self, criterion: Criterion) -> Option<&SimilarityMatrix> {
        self.matrices.get(&criterion)
    }

    pub fn volcano_count(&self) -> usize {
        self.volcanoes.len()
    }
}

/// Parse the headerless `name,country,smithsonian_id` catalogue.
pub fn parse_volcano_names(content: &str) -> Result<Vec<VolcanoRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(content.as_bytes());

    let mut volcanoes = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result?;
        let name = record.get(0).unwrap_or_default().to_string();
        let country = record.get(1).unwrap_or_default().to_string();
        let id_field = record.get(2).unwrap_or_default().trim();
        let smithsonian_id = id_field
            .parse::<u32>()
            .with_context(|| format!("line {}: invalid Smithsonian id '{}'", line + 1, id_field))?;
        volcanoes.push(VolcanoRecord {
            name,
            country,
            smithsonian_id,
        });
    }
    Ok(volcanoes)
}

/// Parse a headerless numeric CSV into a square matrix.
pub fn parse_matrix(content: &str) -> Result<SimilarityMatrix> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result?;
        let row = record
            .iter()
            .map(|v| {
                v.parse::<f64>()
                    .with_context(|| format!("line {}: invalid analogy value '{}'", line + 1, v))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    Ok(SimilarityMatrix::from_rows(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_volcano_names_keeps_quoted_commas() {
        let csv = "\"Ruiz, Nevado del\",Colombia,351020\nEtna,Italy,211060\n";
        let volcanoes = parse_volcano_names(csv).unwrap();
        assert_eq!(volcanoes.len(), 2);
        assert_eq!(volcanoes[0].name, "Ruiz, Nevado del");
        assert_eq!(volcanoes[1].smithsonian_id, 211060);
    }

    #[test]
    fn test_parse_volcano_names_rejects_bad_id() {
        assert!(parse_volcano_names("Etna,Italy,abc\n").is_err());
    }

    #[test]
    fn test_parse_matrix() {
        let m = parse_matrix("1, 0.5\n0.5, 1\n").unwrap();
        assert_eq!(m.dim(), 2);
        assert_eq!(m.get(0, 1), 0.5);
    }

    #[test]
    fn test_parse_matrix_rejects_non_square() {
        assert!(parse_matrix("1,0.5,0.2\n0.5,1,0.3\n").is_err());
    }

    #[test]
    fn test_matrix_file_names() {
        assert_eq!(matrix_file_name(Criterion::EruptionSize), "eruption_size.csv");
    }
}
