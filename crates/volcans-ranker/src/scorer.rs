//! Top-N analogue ranking against a target volcano.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use volcans_common::{Result, SimilarityMatrix, VolcanoIdentity, VolcanoRecord, VolcansError};

use crate::catalogue::Catalogue;

/// Default number of analogues reported (the target itself comes on top of these).
pub const DEFAULT_ANALOGUE_COUNT: usize = 10;

/// One line of the analogue table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogueRow {
    /// Row in the analogy matrices.
    #[serde(skip)]
    pub index: usize,
    pub smithsonian_id: u32,
    pub name: String,
    pub country: String,
    pub analogy_score: f64,
}

/// Ranked analogues of one target, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogueResult {
    pub target_index: usize,
    pub target: VolcanoRecord,
    /// Requested number of analogues, excluding the target.
    pub count: usize,
    /// `count + 1` rows (fewer for tiny catalogues); the target is normally row 0.
    pub rows: Vec<AnalogueRow>,
}

impl AnalogueResult {
    /// Rows other than the target, in rank order.
    pub fn analogues(&self) -> impl Iterator<Item = &AnalogueRow> {
        let target = self.target_index;
        self.rows.iter().filter(move |r| r.index != target)
    }

    /// Best analogue that is not the target itself.
    pub fn top_analogue(&self) -> Option<&AnalogueRow> {
        self.analogues().next()
    }
}

/// The weighted matrix must index the whole catalogue.
pub(crate) fn ensure_matrix_matches(catalogue: &Catalogue, weighted: &SimilarityMatrix) -> Result<()> {
    if weighted.dim() != catalogue.len() {
        return Err(VolcansError::MatrixShape(format!(
            "weighted analogy matrix is {}x{} but the catalogue has {} volcanoes",
            weighted.dim(),
            weighted.dim(),
            catalogue.len()
        )));
    }
    Ok(())
}

/// Order every row index of `values` from most to least similar.
///
/// Ties keep a fixed order: the target first, then ascending row index.
pub fn rank_indices(values: &[f64], target: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[b]
            .total_cmp(&values[a])
            .then_with(|| (b == target).cmp(&(a == target)))
            .then_with(|| a.cmp(&b))
    });
    order
}

/// Top `count` analogues of `target` in the weighted analogy matrix.
/// The result also carries the target itself, so it holds `count + 1` rows.
pub fn top_analogues(
    catalogue: &Catalogue,
    weighted: &SimilarityMatrix,
    target: &VolcanoIdentity,
    count: usize,
) -> Result<AnalogueResult> {
    ensure_matrix_matches(catalogue, weighted)?;
    let target_index = catalogue.resolve(target)?;
    let values = weighted.row(target_index);

    let ranked = rank_indices(values, target_index);
    let rows = ranked
        .into_iter()
        .take(count.saturating_add(1))
        .map(|idx| {
            let v = catalogue.record(idx)?;
            Ok(AnalogueRow {
                index: idx,
                smithsonian_id: v.smithsonian_id,
                name: v.name.clone(),
                country: v.country.clone(),
                analogy_score: values[idx],
            })
        })
        .collect::<Result<Vec<_>>>()?;

    for row in &rows {
        debug!(
            smithsonian_id = row.smithsonian_id,
            name = %row.name,
            score = row.analogy_score,
            "Top analogy"
        );
    }

    let result = AnalogueResult {
        target_index,
        target: catalogue.record(target_index)?.clone(),
        count,
        rows,
    };

    if let Some(top) = result.top_analogue() {
        info!(
            volcano = %result.target.name,
            top = %top.name,
            score = top.analogy_score,
            "Ranked {} analogues",
            count
        );
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use volcans_test_utils::{
        abc_matrix, abc_volcanoes, extended_volcanoes, random_symmetric_matrix, sample_volcanoes,
    };

    #[test]
    fn test_abc_ranking_order() {
        let catalogue = Catalogue::new(abc_volcanoes());
        let result = top_analogues(&catalogue, &abc_matrix(), &"A".into(), 2).unwrap();

        let names: Vec<&str> = result.rows.iter().map(|r| r.name.as_str()).collect();
        let scores: Vec<f64> = result.rows.iter().map(|r| r.analogy_score).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(scores, [1.0, 0.8, 0.3]);
        assert_eq!(result.top_analogue().unwrap().name, "B");
    }

    #[test]
    fn test_count_plus_target_rows_without_duplicates() {
        let volcanoes = sample_volcanoes();
        let catalogue = Catalogue::new(volcanoes.clone());
        let matrix = random_symmetric_matrix(volcanoes.len(), 42);

        for target in 0..volcanoes.len() {
            let id = VolcanoIdentity::CatalogueId(volcanoes[target].smithsonian_id);
            let result = top_analogues(&catalogue, &matrix, &id, 5).unwrap();

            assert_eq!(result.rows.len(), 6);
            assert_eq!(result.rows[0].index, target);
            assert_eq!(result.rows[0].analogy_score, 1.0);
            let ids: HashSet<u32> = result.rows.iter().map(|r| r.smithsonian_id).collect();
            assert_eq!(ids.len(), result.rows.len());
            assert!(result
                .rows
                .windows(2)
                .all(|w| w[0].analogy_score >= w[1].analogy_score));
        }
    }

    #[test]
    fn test_count_larger_than_catalogue_returns_everything() {
        let catalogue = Catalogue::new(abc_volcanoes());
        let result = top_analogues(&catalogue, &abc_matrix(), &"C".into(), 10).unwrap();
        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.analogues().count(), 2);
    }

    #[test]
    fn test_ties_keep_target_first_then_row_order() {
        let values = [0.5, 1.0, 0.5, 1.0];
        assert_eq!(rank_indices(&values, 3), vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_top_analogue_skips_target_even_when_not_first() {
        let catalogue = Catalogue::new(abc_volcanoes());
        // B scores above A's self-similarity.
        let matrix = volcans_common::SimilarityMatrix::from_rows(vec![
            vec![0.9, 1.0, 0.3],
            vec![1.0, 1.0, 0.1],
            vec![0.3, 0.1, 1.0],
        ])
        .unwrap();
        let result = top_analogues(&catalogue, &matrix, &"A".into(), 2).unwrap();
        assert_eq!(result.rows[0].name, "B");
        assert_eq!(result.top_analogue().unwrap().name, "B");
        assert_eq!(result.analogues().count(), 2);
    }

    #[test]
    fn test_ten_analogues_give_eleven_rows() {
        let volcanoes = extended_volcanoes();
        let catalogue = Catalogue::new(volcanoes.clone());
        let matrix = random_symmetric_matrix(volcanoes.len(), 3);

        let result = top_analogues(&catalogue, &matrix, &"Hekla".into(), 10).unwrap();
        assert_eq!(result.rows.len(), 11);
        assert_eq!(result.rows[0].name, "Hekla");
        assert_eq!(result.rows[0].analogy_score, 1.0);
        let ids: HashSet<u32> = result.rows.iter().map(|r| r.smithsonian_id).collect();
        assert_eq!(ids.len(), 11);
    }

    #[test]
    fn test_undersized_matrix_is_a_shape_error() {
        let catalogue = Catalogue::new(sample_volcanoes());
        let err = top_analogues(&catalogue, &abc_matrix(), &"Hekla".into(), 2).unwrap_err();
        assert!(matches!(err, volcans_common::VolcansError::MatrixShape(_)));
    }

    #[test]
    fn test_unknown_target_propagates_lookup_error() {
        let catalogue = Catalogue::new(abc_volcanoes());
        let err = top_analogues(&catalogue, &abc_matrix(), &"Z".into(), 2).unwrap_err();
        assert!(matches!(err, volcans_common::VolcansError::AmbiguousName { .. }));
    }
}
