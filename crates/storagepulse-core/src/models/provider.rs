//! Provider catalog models

use serde::{Deserialize, Serialize};

/// Operational status of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
    /// Serving normally
    #[default]
    Active,
    /// Degraded but serving
    Warning,
    /// Failing
    Error,
}

/// Qualitative performance trend of a provider or of the fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderTrend {
    /// No notable change
    Stable,
    /// Getting better
    Improving,
    /// Getting worse
    Degrading,
}

/// Where a provider's storage is hosted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Region name (e.g. "us-east-1")
    pub region: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// A cloud storage provider in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    /// Unique identifier (e.g. "aws-s3")
    pub id: String,

    /// Display name
    pub name: String,

    /// Typical request latency in milliseconds
    pub latency_ms: f64,

    /// Monthly cost per storage unit
    pub cost_per_unit: f64,

    /// Availability over the last period, 0 to 100
    pub reliability_pct: f64,

    /// Current status
    #[serde(default)]
    pub status: ProviderStatus,

    /// Hosting location
    #[serde(default)]
    pub location: Option<GeoLocation>,

    /// Predicted trend
    #[serde(default)]
    pub trend: Option<ProviderTrend>,
}

impl ProviderRecord {
    /// Create an active provider without location or trend
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        latency_ms: f64,
        cost_per_unit: f64,
        reliability_pct: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            latency_ms,
            cost_per_unit,
            reliability_pct,
            status: ProviderStatus::Active,
            location: None,
            trend: None,
        }
    }

    /// Set the status
    pub fn with_status(mut self, status: ProviderStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the trend
    pub fn with_trend(mut self, trend: ProviderTrend) -> Self {
        self.trend = Some(trend);
        self
    }

    /// Set the hosting location
    pub fn with_location(mut self, region: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        self.location = Some(GeoLocation {
            region: region.into(),
            latitude,
            longitude,
        });
        self
    }
}

/// Fleet-wide counters that cannot be derived from the provider records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetTotals {
    /// Bytes stored across all providers
    pub total_storage_bytes: u64,

    /// Requests served across all providers in the current period
    pub total_requests: u64,

    /// Month-over-month growth of usage, in percent
    #[serde(default)]
    pub monthly_growth_pct: f64,
}
