//! Analysis requests: target, count, weights and a priori analogues.
//!
//! Requests arrive either from the command line or as a JSON object:
//!
//! ```json
//! {
//!   "volcano": "Fuji",
//!   "count": 10,
//!   "weights": { "tectonic_setting": 0.5, "geochemistry": "1/2" },
//!   "apriori": ["Etna", 211020]
//! }
//! ```

use serde::Serialize;
use serde_json::Value;
use tracing::info;
use volcans_common::{Criterion, Result, VolcanoIdentity, VolcansError};

use crate::context::AnalogyContext;
use crate::percentile::AprioriPercentile;
use crate::scorer::{AnalogueResult, DEFAULT_ANALOGUE_COUNT};
use crate::weights::{normalise_weights, parse_weight, PartialWeights, WeightVector};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalogyRequest {
    pub volcano: VolcanoIdentity,
    pub count: usize,
    pub weights: PartialWeights,
    pub apriori: Vec<VolcanoIdentity>,
}

/// Everything one request produces.
#[derive(Debug, Clone, Serialize)]
pub struct AnalogyReport {
    pub weights: WeightVector,
    pub analogues: AnalogueResult,
    pub apriori: Vec<AprioriPercentile>,
}

impl AnalogyRequest {
    pub fn new(volcano: VolcanoIdentity) -> Self {
        Self {
            volcano,
            count: DEFAULT_ANALOGUE_COUNT,
            weights: PartialWeights::default(),
            apriori: Vec::new(),
        }
    }

    pub fn from_json(params: &Value) -> Result<Self> {
        Self::from_json_with_count(params, DEFAULT_ANALOGUE_COUNT)
    }

    /// Like [`AnalogyRequest::from_json`], with `default_count` used when `count` is absent.
    pub fn from_json_with_count(params: &Value, default_count: usize) -> Result<Self> {
        let volcano = match params.get("volcano") {
            Some(v) => identity_from_value(v)?,
            None => {
                return Err(VolcansError::InputType(
                    "Request is missing 'volcano'".to_string(),
                ))
            }
        };

        let count = match params.get("count") {
            None | Some(Value::Null) => default_count,
            Some(v) => v.as_u64().map(|n| n as usize).ok_or_else(|| {
                VolcansError::InputType(format!("count should be a non-negative integer, got {v}"))
            })?,
        };

        let weights = match params.get("weights") {
            None | Some(Value::Null) => PartialWeights::default(),
            Some(Value::Object(map)) => {
                let mut weights = PartialWeights::default();
                for (key, v) in map {
                    let criterion = Criterion::from_name(key).ok_or_else(|| {
                        VolcansError::InvalidWeight(format!("unknown criterion '{key}'"))
                    })?;
                    weights.set(criterion, weight_from_value(v)?);
                }
                weights
            }
            Some(other) => {
                return Err(VolcansError::InputType(format!(
                    "weights should be an object, got {other}"
                )))
            }
        };

        let apriori = match params.get("apriori") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(identity_from_value)
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(VolcansError::InputType(
                    "A priori volcanoes should be a list!".to_string(),
                ))
            }
        };

        Ok(Self {
            volcano,
            count,
            weights,
            apriori,
        })
    }

    /// Normalise weights, build the weighted matrix, rank, and score the a priori analogues.
    pub fn run(&self, ctx: &AnalogyContext) -> Result<AnalogyReport> {
        let weights = normalise_weights(&self.weights)?;
        info!(
            tectonic_setting = weights.tectonic_setting,
            geochemistry = weights.geochemistry,
            morphology = weights.morphology,
            eruption_size = weights.eruption_size,
            eruption_style = weights.eruption_style,
            "Using criterion weights"
        );

        let weighted = ctx.weighted_matrix(&weights);
        let analogues = ctx.top_analogues(&weighted, &self.volcano, self.count)?;
        let apriori = ctx.analogy_percentiles(&weighted, &self.volcano, &self.apriori)?;

        Ok(AnalogyReport {
            weights,
            analogues,
            apriori,
        })
    }
}

fn identity_from_value(v: &Value) -> Result<VolcanoIdentity> {
    match v {
        Value::String(name) => Ok(VolcanoIdentity::Name(name.clone())),
        Value::Number(n) => n
            .as_u64()
            .and_then(|id| u32::try_from(id).ok())
            .map(VolcanoIdentity::CatalogueId)
            .ok_or_else(|| {
                VolcansError::NotFound(format!(
                    "Volcano number {n} does not exist. Please provide a non-zero, positive, six digits number."
                ))
            }),
        other => Err(VolcansError::InputType(format!(
            "Volcano should be a name or a Smithsonian id, got {other}"
        ))),
    }
}

fn weight_from_value(v: &Value) -> Result<Option<f64>> {
    match v {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| VolcansError::InvalidWeight(n.to_string())),
        Value::String(s) => parse_weight(s).map(Some),
        other => Err(VolcansError::InvalidWeight(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAnalogyDataProvider;
    use serde_json::json;
    use volcans_test_utils::{abc_matrix, abc_volcanoes, constant_matrix};

    fn abc_context() -> AnalogyContext {
        // Only tectonic setting carries signal; other criteria are flat.
        let provider = MockAnalogyDataProvider::new()
            .with_volcanoes(abc_volcanoes())
            .with_all(constant_matrix(3, 0.0))
            .with(Criterion::TectonicSetting, abc_matrix());
        AnalogyContext::from_provider(&provider).unwrap()
    }

    #[test]
    fn test_from_json_full_request() {
        let req = AnalogyRequest::from_json(&json!({
            "volcano": 283030,
            "count": 5,
            "weights": {"tectonic_setting": 0.5, "geochemistry": "1/2"},
            "apriori": ["Etna", 211020]
        }))
        .unwrap();

        assert_eq!(req.volcano, VolcanoIdentity::CatalogueId(283030));
        assert_eq!(req.count, 5);
        assert_eq!(req.weights.tectonic_setting, Some(0.5));
        assert_eq!(req.weights.geochemistry, Some(0.5));
        assert_eq!(req.weights.morphology, None);
        assert_eq!(
            req.apriori,
            vec![VolcanoIdentity::from("Etna"), VolcanoIdentity::CatalogueId(211020)]
        );
    }

    #[test]
    fn test_from_json_defaults() {
        let req = AnalogyRequest::from_json(&json!({"volcano": "Fuji"})).unwrap();
        assert_eq!(req, AnalogyRequest::new("Fuji".into()));
    }

    #[test]
    fn test_missing_count_takes_caller_default() {
        let req = AnalogyRequest::from_json_with_count(&json!({"volcano": "Taal"}), 30).unwrap();
        assert_eq!(req.count, 30);

        let req = AnalogyRequest::from_json_with_count(&json!({"volcano": "Taal", "count": 4}), 30)
            .unwrap();
        assert_eq!(req.count, 4);
    }

    #[test]
    fn test_apriori_must_be_a_list() {
        let err = AnalogyRequest::from_json(&json!({"volcano": "Fuji", "apriori": "Etna"}))
            .unwrap_err();
        assert!(matches!(err, VolcansError::InputType(_)));
        assert_eq!(err.to_string(), "A priori volcanoes should be a list!");
    }

    #[test]
    fn test_unknown_criterion_rejected() {
        let err = AnalogyRequest::from_json(&json!({
            "volcano": "Fuji",
            "weights": {"seismicity": 1.0}
        }))
        .unwrap_err();
        assert!(matches!(err, VolcansError::InvalidWeight(_)));
    }

    #[test]
    fn test_run_single_criterion_scenario() {
        let mut req = AnalogyRequest::new("A".into());
        req.count = 2;
        req.weights = PartialWeights::default().with(Criterion::TectonicSetting, 1.0);
        req.apriori = vec!["C".into()];

        let report = req.run(&abc_context()).unwrap();
        let ranked: Vec<(&str, f64)> = report
            .analogues
            .rows
            .iter()
            .map(|r| (r.name.as_str(), r.analogy_score))
            .collect();
        assert_eq!(ranked, vec![("A", 1.0), ("B", 0.8), ("C", 0.3)]);
        assert_eq!(report.apriori[0].percentile, 0);
        assert_eq!(report.apriori[0].better_analogues, 100);
    }

    #[test]
    fn test_run_rejects_bad_weight_sum() {
        let req = AnalogyRequest::from_json(&json!({
            "volcano": "A",
            "weights": {
                "tectonic_setting": 0.2,
                "geochemistry": 0.2,
                "morphology": 0.2,
                "eruption_size": 0.2,
                "eruption_style": 0.19
            }
        }))
        .unwrap();
        let err = req.run(&abc_context()).unwrap_err();
        assert!(matches!(err, VolcansError::WeightSum { .. }));
        assert!(err.to_string().contains("0.99"));
    }
}
