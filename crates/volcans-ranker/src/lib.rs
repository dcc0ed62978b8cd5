//! volcans-ranker: volcano analogue ranking engine.
//!
//! Catalogue lookups, weight normalisation, the weighted multi-criteria
//! analogy matrix, top-N analogue ranking and a priori percentiles.

pub mod catalogue;
pub mod combine;
pub mod context;
pub mod percentile;
pub mod provider;
pub mod report;
pub mod request;
pub mod scorer;
pub mod weights;

pub use catalogue::Catalogue;
pub use context::AnalogyContext;
pub use percentile::AprioriPercentile;
pub use provider::{AnalogyDataProvider, MockAnalogyDataProvider, VolcansDataAdapter};
pub use request::{AnalogyReport, AnalogyRequest};
pub use scorer::{AnalogueResult, AnalogueRow};
pub use weights::{PartialWeights, WeightVector};
