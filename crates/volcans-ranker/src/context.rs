//! Read-only analogy context: the catalogue plus the five criterion matrices,
//! built once and shared by every query.

use tracing::info;
use volcans_common::{Result, SimilarityMatrix, VolcanoIdentity, VolcansError};

use crate::catalogue::{Catalogue, DEFAULT_SUGGESTION_LIMIT};
use crate::combine::{weighted_analogy_matrix, AnalogyMatrices};
use crate::percentile::{analogy_percentiles, AprioriPercentile};
use crate::provider::AnalogyDataProvider;
use crate::scorer::{top_analogues, AnalogueResult};
use crate::weights::WeightVector;

#[derive(Debug, Clone)]
pub struct AnalogyContext {
    catalogue: Catalogue,
    matrices: AnalogyMatrices,
}

impl AnalogyContext {
    /// Matrices must match the catalogue size.
    pub fn new(catalogue: Catalogue, matrices: AnalogyMatrices) -> Result<Self> {
        if matrices.dim() != catalogue.len() {
            return Err(VolcansError::MatrixShape(format!(
                "analogy matrices are {}x{} but the catalogue has {} volcanoes",
                matrices.dim(),
                matrices.dim(),
                catalogue.len()
            )));
        }
        Ok(Self { catalogue, matrices })
    }

    /// Copy everything out of a provider and validate it.
    pub fn from_provider(provider: &dyn AnalogyDataProvider) -> Result<Self> {
        Self::from_provider_with_limit(provider, DEFAULT_SUGGESTION_LIMIT)
    }

    pub fn from_provider_with_limit(
        provider: &dyn AnalogyDataProvider,
        suggestion_limit: usize,
    ) -> Result<Self> {
        let catalogue = Catalogue::new(provider.volcano_records().to_vec())
            .with_suggestion_limit(suggestion_limit);
        let matrices = AnalogyMatrices::try_from_fn(|c| {
            provider
                .analogy_matrix(c)
                .cloned()
                .ok_or(VolcansError::MissingMatrix(c))
        })?;

        let ctx = Self::new(catalogue, matrices)?;
        info!("Analogy context ready: {} volcanoes", ctx.catalogue.len());
        Ok(ctx)
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn matrices(&self) -> &AnalogyMatrices {
        &self.matrices
    }

    /// Weighted multi-criteria analogy matrix for these weights.
    pub fn weighted_matrix(&self, weights: &WeightVector) -> SimilarityMatrix {
        weighted_analogy_matrix(weights, &self.matrices)
    }

    pub fn top_analogues(
        &self,
        weighted: &SimilarityMatrix,
        target: &VolcanoIdentity,
        count: usize,
    ) -> Result<AnalogueResult> {
        top_analogues(&self.catalogue, weighted, target, count)
    }

    pub fn analogy_percentiles(
        &self,
        weighted: &SimilarityMatrix,
        target: &VolcanoIdentity,
        apriori: &[VolcanoIdentity],
    ) -> Result<Vec<AprioriPercentile>> {
        analogy_percentiles(&self.catalogue, weighted, target, apriori)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAnalogyDataProvider;
    use volcans_common::Criterion;
    use volcans_test_utils::{abc_matrix, abc_volcanoes, constant_matrix};

    #[test]
    fn test_missing_criterion_is_reported() {
        let provider = MockAnalogyDataProvider::new()
            .with_volcanoes(abc_volcanoes())
            .with(Criterion::TectonicSetting, abc_matrix());
        let err = AnalogyContext::from_provider(&provider).unwrap_err();
        assert!(matches!(err, VolcansError::MissingMatrix(Criterion::Geochemistry)));
    }

    #[test]
    fn test_catalogue_size_mismatch_is_reported() {
        let provider = MockAnalogyDataProvider::new()
            .with_volcanoes(abc_volcanoes())
            .with_all(constant_matrix(4, 0.5));
        let err = AnalogyContext::from_provider(&provider).unwrap_err();
        assert!(matches!(err, VolcansError::MatrixShape(_)));
    }

    #[test]
    fn test_suggestion_limit_is_passed_to_catalogue() {
        let provider = MockAnalogyDataProvider::new()
            .with_volcanoes(abc_volcanoes())
            .with_all(abc_matrix());
        let ctx = AnalogyContext::from_provider_with_limit(&provider, 1).unwrap();
        match ctx.catalogue().index_from_name("Q").unwrap_err() {
            VolcansError::AmbiguousName { suggestions, .. } => assert_eq!(suggestions.len(), 1),
            other => panic!("expected AmbiguousName, got {other:?}"),
        }
    }
}
