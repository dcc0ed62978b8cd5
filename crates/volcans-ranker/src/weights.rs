//! Criterion weight vector for the multi-criteria analogy.

use serde::{Deserialize, Serialize};
use volcans_common::{Criterion, Result, VolcansError};

/// The 5-component weight vector W.
/// Weights sum to 1.0 once produced by [`normalise_weights`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub tectonic_setting: f64,
    pub geochemistry: f64,
    pub morphology: f64,
    pub eruption_size: f64,
    pub eruption_style: f64,
}

impl Default for WeightVector {
    /// Uniform weighting, used when the caller specifies nothing.
    fn default() -> Self {
        Self {
            tectonic_setting: 0.2,
            geochemistry: 0.2,
            morphology: 0.2,
            eruption_size: 0.2,
            eruption_style: 0.2,
        }
    }
}

impl WeightVector {
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::TectonicSetting => self.tectonic_setting,
            Criterion::Geochemistry => self.geochemistry,
            Criterion::Morphology => self.morphology,
            Criterion::EruptionSize => self.eruption_size,
            Criterion::EruptionStyle => self.eruption_style,
        }
    }

    /// Convert to array for iteration, in `Criterion::ALL` order.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.tectonic_setting,
            self.geochemistry,
            self.morphology,
            self.eruption_size,
            self.eruption_style,
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

/// Caller-supplied weights; `None` means "not specified".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialWeights {
    pub tectonic_setting: Option<f64>,
    pub geochemistry: Option<f64>,
    pub morphology: Option<f64>,
    pub eruption_size: Option<f64>,
    pub eruption_style: Option<f64>,
}

impl PartialWeights {
    pub fn get(&self, criterion: Criterion) -> Option<f64> {
        match criterion {
            Criterion::TectonicSetting => self.tectonic_setting,
            Criterion::Geochemistry => self.geochemistry,
            Criterion::Morphology => self.morphology,
            Criterion::EruptionSize => self.eruption_size,
            Criterion::EruptionStyle => self.eruption_style,
        }
    }

    pub fn set(&mut self, criterion: Criterion, value: Option<f64>) {
        let slot = match criterion {
            Criterion::TectonicSetting => &mut self.tectonic_setting,
            Criterion::Geochemistry => &mut self.geochemistry,
            Criterion::Morphology => &mut self.morphology,
            Criterion::EruptionSize => &mut self.eruption_size,
            Criterion::EruptionStyle => &mut self.eruption_style,
        };
        *slot = value;
    }

    pub fn with(mut self, criterion: Criterion, value: f64) -> Self {
        self.set(criterion, Some(value));
        self
    }

    pub fn is_unspecified(&self) -> bool {
        Criterion::ALL.iter().all(|c| self.get(*c).is_none())
    }
}

/// Fill and validate caller weights.
///
/// Nothing specified → uniform 0.2. Otherwise unspecified criteria become 0.0
/// and the explicit values must add up to exactly 1.
pub fn normalise_weights(partial: &PartialWeights) -> Result<WeightVector> {
    if partial.is_unspecified() {
        return Ok(WeightVector::default());
    }

    let mut sum = 0.0;
    for c in Criterion::ALL {
        if let Some(w) = partial.get(c) {
            sum += w;
        }
    }

    // Exact comparison, no tolerance.
    if sum != 1.0 {
        return Err(VolcansError::WeightSum { sum });
    }

    Ok(WeightVector {
        tectonic_setting: partial.tectonic_setting.unwrap_or(0.0),
        geochemistry: partial.geochemistry.unwrap_or(0.0),
        morphology: partial.morphology.unwrap_or(0.0),
        eruption_size: partial.eruption_size.unwrap_or(0.0),
        eruption_style: partial.eruption_style.unwrap_or(0.0),
    })
}

/// Parse a decimal (`0.5`) or fractional (`1/2`) weight literal.
pub fn parse_weight(literal: &str) -> Result<f64> {
    let invalid = || VolcansError::InvalidWeight(format!("'{literal}' is not a decimal or a fraction"));
    let trimmed = literal.trim();

    let value = match trimmed.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().map_err(|_| invalid())?;
            let den: f64 = den.trim().parse().map_err(|_| invalid())?;
            if den == 0.0 {
                return Err(VolcansError::InvalidWeight(format!(
                    "'{literal}' has a zero denominator"
                )));
            }
            num / den
        }
        None => trimmed.parse::<f64>().map_err(|_| invalid())?,
    };

    if !value.is_finite() || value < 0.0 {
        return Err(VolcansError::InvalidWeight(format!(
            "'{literal}' must be a finite, non-negative number"
        )));
    }
    Ok(value)
}
