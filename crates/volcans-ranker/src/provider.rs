//! Trait for analogy data access.
//!
//! Provides an abstraction over where the catalogue and the pre-computed
//! single-criterion matrices come from, so the ranker is not tied to the
//! on-disk loader in `volcans-data`.

use std::collections::HashMap;

use volcans_common::{Criterion, SimilarityMatrix, VolcanoRecord};

/// Trait for accessing the volcano catalogue and criterion matrices.
///
/// Implementations can use:
/// - The VOLCANS data directory (local CSV files)
/// - Synthetic data (testing)
pub trait AnalogyDataProvider: Send + Sync {
    /// Catalogue rows, in matrix index order.
    fn volcano_records(&self) -> &[VolcanoRecord];

    /// Square analogy matrix for one criterion.
    ///
    /// Returns None if the provider has no data for that criterion.
    fn analogy_matrix(&self, criterion: Criterion) -> Option<&SimilarityMatrix>;
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Mock provider with in-memory data for unit tests.
pub struct MockAnalogyDataProvider {
    volcanoes: Vec<VolcanoRecord>,
    matrices: HashMap<Criterion, SimilarityMatrix>,
}

impl MockAnalogyDataProvider {
    pub fn new() -> Self {
        Self {
            volcanoes: Vec::new(),
            matrices: HashMap::new(),
        }
    }

    pub fn with_volcanoes(mut self, volcanoes: Vec<VolcanoRecord>) -> Self {
        self.volcanoes = volcanoes;
        self
    }

    /// Add a criterion matrix.
    pub fn with(mut self, criterion: Criterion, matrix: SimilarityMatrix) -> Self {
        self.matrices.insert(criterion, matrix);
        self
    }

    /// Use the same matrix for every criterion.
    pub fn with_all(mut self, matrix: SimilarityMatrix) -> Self {
        for c in Criterion::ALL {
            self.matrices.insert(c, matrix.clone());
        }
        self
    }
}

impl Default for MockAnalogyDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalogyDataProvider for MockAnalogyDataProvider {
    fn volcano_records(&self) -> &[VolcanoRecord] {
        &self.volcanoes
    }

    fn analogy_matrix(&self, criterion: Criterion) -> Option<&SimilarityMatrix> {
        self.matrices.get(&criterion)
    }
}

// ── Adapter for VolcansData ─────────────────────────────────────────────────

/// Adapter that wraps `volcans_data::VolcansData` to implement `AnalogyDataProvider`.
pub struct VolcansDataAdapter {
    data: volcans_data::VolcansData,
}

impl VolcansDataAdapter {
    pub fn new(data: volcans_data::VolcansData) -> Self {
        Self { data }
    }

    /// Load the data directory and wrap it.
    pub async fn load(data_dir: std::path::PathBuf) -> anyhow::Result<Self> {
        let data = volcans_data::VolcansData::with_data_dir(data_dir).await?;
        Ok(Self { data })
    }

    pub fn data(&self) -> &volcans_data::VolcansData {
        &self.data
    }
}

impl AnalogyDataProvider for VolcansDataAdapter {
    fn volcano_records(&self) -> &[VolcanoRecord] {
        self.data.volcanoes()
    }

    fn analogy_matrix(&self, criterion: Criterion) -> Option<&SimilarityMatrix> {
        self.data.matrix(criterion)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
