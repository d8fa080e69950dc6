//! Forecast data models

use serde::{Deserialize, Serialize};

use super::ProviderTrend;

/// One projected period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Calendar month name (e.g. "March")
    pub period: String,

    /// Projected monthly cost, rounded to cents
    pub predicted_cost: f64,

    /// Projected stored data in decimal gigabytes
    pub predicted_storage_gb: u64,

    /// Confidence of the projection, in percent
    pub confidence_pct: u8,
}

/// Qualitative storage growth over the forecast horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageGrowth {
    /// Nothing was projected
    None,
    /// Growth stayed in the lower half of the sampled range
    Moderate,
    /// Growth reached the upper half of the sampled range
    High,
}

/// A projected series with its qualitative summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// One point per period, in chronological order
    pub points: Vec<ForecastPoint>,

    /// Expected direction of fleet latency
    pub latency_trend: ProviderTrend,

    /// Expected storage growth
    pub storage_growth: StorageGrowth,

    /// Optimization hints
    pub recommendations: Vec<String>,
}

impl Forecast {
    /// Number of projected periods
    pub fn horizon(&self) -> usize {
        self.points.len()
    }
}
