//! Percentile of an a priori analogue within a target's analogy distribution.
//!
//! The target's row of the weighted analogy matrix (its analogy with every
//! volcano in the catalogue) is the reference distribution. Percentiles 0..=100
//! are taken with midpoint interpolation; the a priori analogue gets the
//! percentile whose break-point lies closest to its own analogy value.

use serde::{Deserialize, Serialize};
use tracing::debug;
use volcans_common::{Result, SimilarityMatrix, VolcanoIdentity};

use crate::catalogue::Catalogue;
use crate::scorer::ensure_matrix_matches;

/// Percentile of one a priori analogue, plus the share of the catalogue that
/// is a better analogue than it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AprioriPercentile {
    pub volcano: VolcanoIdentity,
    pub percentile: u8,
    /// 100 − percentile.
    pub better_analogues: u8,
}

/// The 101 break-points (0th..100th percentile) of `values`, midpoint method.
/// Empty input gives no break-points.
pub fn midpoint_percentiles(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let last = (sorted.len() - 1) as f64;

    (0..=100u32)
        .map(|p| {
            let pos = (p as f64 / 100.0) * last;
            let below = sorted[pos.floor() as usize];
            let above = sorted[pos.ceil() as usize];
            if pos.fract() == 0.0 {
                below
            } else {
                above - (above - below) * 0.5
            }
        })
        .collect()
}

/// Index of the break-point numerically closest to `value`; the lowest index wins ties.
pub fn closest_percentile(breakpoints: &[f64], value: f64) -> u8 {
    let mut best = 0usize;
    let mut best_diff = f64::INFINITY;
    for (i, bp) in breakpoints.iter().enumerate() {
        let diff = (bp - value).abs();
        if diff < best_diff {
            best = i;
            best_diff = diff;
        }
    }
    best as u8
}

/// Percentile (0–100) of `apriori`'s analogy to `target` among all of `target`'s analogies.
pub fn analogy_percentile(
    catalogue: &Catalogue,
    weighted: &SimilarityMatrix,
    target: &VolcanoIdentity,
    apriori: &VolcanoIdentity,
) -> Result<u8> {
    ensure_matrix_matches(catalogue, weighted)?;
    let target_idx = catalogue.resolve(target)?;
    let apriori_idx = catalogue.resolve(apriori)?;

    let values = weighted.row(target_idx);
    let breakpoints = midpoint_percentiles(values);
    let percentile = closest_percentile(&breakpoints, values[apriori_idx]);

    debug!(
        volcano = %target,
        apriori = %apriori,
        analogy = values[apriori_idx],
        percentile,
        "A priori analogue percentile"
    );
    Ok(percentile)
}

/// [`analogy_percentile`] for each a priori analogue, in input order.
pub fn analogy_percentiles(
    catalogue: &Catalogue,
    weighted: &SimilarityMatrix,
    target: &VolcanoIdentity,
    apriori: &[VolcanoIdentity],
) -> Result<Vec<AprioriPercentile>> {
    apriori
        .iter()
        .map(|volcano| {
            let percentile = analogy_percentile(catalogue, weighted, target, volcano)?;
            Ok(AprioriPercentile {
                volcano: volcano.clone(),
                percentile,
                better_analogues: 100 - percentile,
            })
        })
        .collect()
}
