//! Weighted multi-criteria analogy matrix.
//!
//! A(i, j) = Σ_c w_c × A_c(i, j) over the five criteria.

use volcans_common::{Criterion, Result, SimilarityMatrix, VolcansError};

use crate::weights::WeightVector;

/// The five single-criterion analogy matrices, all of one dimension.
#[derive(Debug, Clone)]
pub struct AnalogyMatrices {
    /// Indexed in `Criterion::ALL` order.
    matrices: [SimilarityMatrix; 5],
}

impl AnalogyMatrices {
    pub fn new(
        tectonic_setting: SimilarityMatrix,
        geochemistry: SimilarityMatrix,
        morphology: SimilarityMatrix,
        eruption_size: SimilarityMatrix,
        eruption_style: SimilarityMatrix,
    ) -> Result<Self> {
        let matrices = [
            tectonic_setting,
            geochemistry,
            morphology,
            eruption_size,
            eruption_style,
        ];
        let dim = matrices[0].dim();
        for (criterion, m) in Criterion::ALL.iter().zip(matrices.iter()) {
            if m.dim() != dim {
                return Err(VolcansError::MatrixShape(format!(
                    "{} analogy is {}x{}, tectonic_setting is {}x{}",
                    criterion,
                    m.dim(),
                    m.dim(),
                    dim,
                    dim
                )));
            }
        }
        Ok(Self { matrices })
    }

    /// Build by asking `fetch` for each criterion in turn.
    pub fn try_from_fn<F>(mut fetch: F) -> Result<Self>
    where
        F: FnMut(Criterion) -> Result<SimilarityMatrix>,
    {
        Self::new(
            fetch(Criterion::TectonicSetting)?,
            fetch(Criterion::Geochemistry)?,
            fetch(Criterion::Morphology)?,
            fetch(Criterion::EruptionSize)?,
            fetch(Criterion::EruptionStyle)?,
        )
    }

    pub fn get(&self, criterion: Criterion) -> &SimilarityMatrix {
        &self.matrices[criterion.index()]
    }

    pub fn dim(&self) -> usize {
        self.matrices[0].dim()
    }
}

/// Linear combination of the criterion matrices.
/// Weights are taken as given; validation belongs to `normalise_weights`.
pub fn weighted_analogy_matrix(weights: &WeightVector, matrices: &AnalogyMatrices) -> SimilarityMatrix {
    let mut total = SimilarityMatrix::zeros(matrices.dim());
    for (criterion, w) in Criterion::ALL.iter().zip(weights.as_array()) {
        total.add_scaled(matrices.get(*criterion), w);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use volcans_test_utils::{constant_matrix, random_symmetric_matrix};

    fn five_random(dim: usize) -> AnalogyMatrices {
        AnalogyMatrices::try_from_fn(|c| Ok(random_symmetric_matrix(dim, c as u64 + 1))).unwrap()
    }

    fn only(criterion: Criterion) -> WeightVector {
        let mut w = WeightVector {
            tectonic_setting: 0.0,
            geochemistry: 0.0,
            morphology: 0.0,
            eruption_size: 0.0,
            eruption_style: 0.0,
        };
        match criterion {
            Criterion::TectonicSetting => w.tectonic_setting = 1.0,
            Criterion::Geochemistry => w.geochemistry = 1.0,
            Criterion::Morphology => w.morphology = 1.0,
            Criterion::EruptionSize => w.eruption_size = 1.0,
            Criterion::EruptionStyle => w.eruption_style = 1.0,
        }
        w
    }

    #[test]
    fn test_unit_weight_selects_one_matrix() {
        let matrices = five_random(6);
        for c in Criterion::ALL {
            let combined = weighted_analogy_matrix(&only(c), &matrices);
            assert_eq!(&combined, matrices.get(c), "criterion {c}");
        }
    }

    #[test]
    fn test_half_half_is_elementwise_average() {
        let matrices = five_random(5);
        let w = WeightVector {
            tectonic_setting: 0.5,
            geochemistry: 0.5,
            morphology: 0.0,
            eruption_size: 0.0,
            eruption_style: 0.0,
        };
        let combined = weighted_analogy_matrix(&w, &matrices);
        let t = matrices.get(Criterion::TectonicSetting);
        let g = matrices.get(Criterion::Geochemistry);
        for i in 0..5 {
            for j in 0..5 {
                let expected = (t.get(i, j) + g.get(i, j)) / 2.0;
                assert!((combined.get(i, j) - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_uniform_weights_keep_unit_diagonal() {
        let matrices = five_random(4);
        let combined = weighted_analogy_matrix(&WeightVector::default(), &matrices);
        for i in 0..4 {
            assert!((combined.get(i, i) - 1.0).abs() < 1e-12);
        }
        assert!(combined.is_symmetric(1e-12));
    }

    #[test]
    fn test_weights_are_not_revalidated() {
        let matrices = AnalogyMatrices::try_from_fn(|_| Ok(constant_matrix(3, 1.0))).unwrap();
        let w = WeightVector {
            tectonic_setting: 2.0,
            geochemistry: 0.0,
            morphology: 0.0,
            eruption_size: 0.0,
            eruption_style: 0.0,
        };
        let combined = weighted_analogy_matrix(&w, &matrices);
        assert_eq!(combined.get(1, 2), 2.0);
    }

    #[test]
    fn test_mismatched_dimensions_rejected() {
        let err = AnalogyMatrices::try_from_fn(|c| {
            let dim = if c == Criterion::Morphology { 4 } else { 3 };
            Ok(constant_matrix(dim, 0.5))
        })
        .unwrap_err();
        assert!(err.to_string().contains("morphology"));
    }
}
