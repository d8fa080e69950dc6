//! What-if scenario models

use serde::{Deserialize, Serialize};

/// A provider that is not in the catalog yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProvider {
    /// Display name
    pub name: String,

    /// Monthly cost per storage unit
    pub cost_per_unit: f64,

    /// Expected latency, informational
    #[serde(default)]
    pub latency_ms: Option<f64>,
}

impl CandidateProvider {
    /// Create a candidate with a unit cost
    pub fn new(name: impl Into<String>, cost_per_unit: f64) -> Self {
        Self {
            name: name.into(),
            cost_per_unit,
            latency_ms: None,
        }
    }
}

/// A hypothetical change to the fleet.
///
/// Every field is optional; the default value is the empty scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// Provider to add
    #[serde(default)]
    pub add_provider: Option<CandidateProvider>,

    /// Id of a catalog provider to remove
    #[serde(default)]
    pub remove_provider: Option<String>,

    /// Change of usage in percent, negative for a decrease
    #[serde(default)]
    pub usage_increase_pct: Option<f64>,
}

impl ScenarioInput {
    /// Whether no change is described
    pub fn is_empty(&self) -> bool {
        self.add_provider.is_none()
            && self.remove_provider.is_none()
            && self.usage_increase_pct.is_none()
    }
}

/// Risk of a scenario's cost impact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Within the expected variance
    #[default]
    Low,
    /// Noticeable cost increase
    Medium,
    /// Large cost increase
    High,
}

/// Impact of a scenario on the fleet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Baseline monthly cost
    pub current_cost: f64,

    /// Monthly cost after the change
    pub projected_cost: f64,

    /// Signed cost change
    pub cost_impact: f64,

    /// Amount saved, 0 unless the cost goes down
    pub cost_savings: f64,

    /// Baseline average latency
    pub current_latency: f64,

    /// Average latency after the change
    pub projected_latency: f64,

    /// Signed latency change
    pub latency_impact: f64,

    /// Risk classification of the cost impact
    pub risk: RiskLevel,

    /// Human-readable hints, in evaluation order
    pub recommendations: Vec<String>,
}
