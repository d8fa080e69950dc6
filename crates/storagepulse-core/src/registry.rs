//! Provider registry
//!
//! The registry is the authoritative catalog for a session. It is an explicit
//! value handed to whoever needs it, so several independent registries can live
//! side by side (one per test, one per tenant).

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{FleetTotals, ProviderRecord, ProviderStatus, ProviderTrend};

/// In-memory provider catalog.
///
/// Deserialization runs the same validation as [`ProviderRegistry::new`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRegistry")]
pub struct ProviderRegistry {
    providers: Vec<ProviderRecord>,
    totals: FleetTotals,
}

/// Unvalidated catalog document
#[derive(Deserialize)]
struct RawRegistry {
    providers: Vec<ProviderRecord>,
    #[serde(default)]
    totals: FleetTotals,
}

impl TryFrom<RawRegistry> for ProviderRegistry {
    type Error = Error;

    fn try_from(raw: RawRegistry) -> Result<Self> {
        Self::new(raw.providers, raw.totals)
    }
}

impl ProviderRegistry {
    /// Build a registry, validating every record
    pub fn new(providers: Vec<ProviderRecord>, totals: FleetTotals) -> Result<Self> {
        let mut seen = HashSet::with_capacity(providers.len());

        for provider in &providers {
            validate_provider(provider)?;
            if !seen.insert(provider.id.as_str()) {
                return Err(Error::invalid_input(format!(
                    "duplicate provider id '{}'",
                    provider.id
                )));
            }
        }

        if !totals.monthly_growth_pct.is_finite() {
            return Err(Error::invalid_input("monthly growth must be a finite number"));
        }

        debug!(providers = providers.len(), "Provider registry built");

        Ok(Self { providers, totals })
    }

    /// A registry without providers
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON catalog
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawRegistry = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Read a JSON catalog from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// All providers in insertion order
    pub fn list(&self) -> &[ProviderRecord] {
        &self.providers
    }

    /// Look up a provider by id
    pub fn get(&self, id: &str) -> Result<&ProviderRecord> {
        self.providers
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found("Provider", id))
    }

    /// Fleet-wide counters
    pub fn totals(&self) -> &FleetTotals {
        &self.totals
    }

    /// Number of providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the catalog has no providers
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// The built-in demo catalog of fifteen providers
    pub fn seeded() -> Self {
        use ProviderStatus::{Active, Warning};
        use ProviderTrend::{Degrading, Improving, Stable};

        #[rustfmt::skip]
        let rows: [(&str, &str, f64, f64, f64, ProviderTrend, ProviderStatus, &str, f64, f64); 15] = [
            ("aws-s3", "AWS S3", 38.0, 199.0, 99.95, Stable, Active, "us-east-1", 38.9, -77.0),
            ("gcp", "Google Cloud Storage", 41.0, 149.0, 99.97, Improving, Active, "us-central1", 41.3, -95.9),
            ("azure", "Azure Blob Storage", 44.0, 182.0, 99.90, Degrading, Warning, "westeurope", 52.4, 4.9),
            ("do", "DigitalOcean Spaces", 52.0, 99.0, 99.80, Stable, Active, "nyc3", 40.7, -74.0),
            ("alibaba", "Alibaba Cloud OSS", 60.0, 109.0, 99.85, Improving, Active, "cn-hangzhou", 30.3, 120.2),
            ("oracle", "Oracle Cloud Storage", 55.0, 89.0, 99.89, Stable, Active, "us-ashburn-1", 39.0, -77.5),
            ("ibm", "IBM Cloud Object Storage", 49.0, 149.0, 99.91, Degrading, Active, "us-south", 32.8, -96.8),
            ("cloudflare", "Cloudflare R2", 47.0, 109.0, 99.96, Stable, Active, "auto", 37.8, -122.4),
            ("wasabi", "Wasabi Hot Storage", 50.0, 59.0, 99.94, Improving, Active, "eu-central-1", 52.4, 4.9),
            ("backblaze", "Backblaze B2", 57.0, 85.0, 99.93, Stable, Active, "us-west-004", 37.3, -121.9),
            ("linode", "Linode Object Storage", 59.0, 73.0, 99.84, Stable, Active, "ap-south-1", 1.35, 103.8),
            ("vultr", "Vultr Object Storage", 61.0, 68.0, 99.80, Degrading, Warning, "ewr1", 40.7, -74.2),
            ("scaleway", "Scaleway Object Storage", 66.0, 92.0, 99.82, Improving, Active, "fr-par", 48.9, 2.4),
            ("ovh", "OVH Cloud Storage", 69.0, 77.0, 99.86, Stable, Active, "gra", 50.99, 2.1),
            ("hetzner", "Hetzner Storage Box", 65.0, 80.0, 99.79, Stable, Active, "fsn1", 50.5, 12.4),
        ];

        let providers = rows
            .into_iter()
            .map(|(id, name, latency, cost, reliability, trend, status, region, lat, lng)| {
                ProviderRecord::new(id, name, latency, cost, reliability)
                    .with_trend(trend)
                    .with_status(status)
                    .with_location(region, lat, lng)
            })
            .collect();

        Self {
            providers,
            totals: FleetTotals {
                total_storage_bytes: 78_000_000_000,
                total_requests: 1_250_000,
                monthly_growth_pct: 11.8,
            },
        }
    }
}

fn validate_provider(provider: &ProviderRecord) -> Result<()> {
    if provider.id.trim().is_empty() {
        return Err(Error::invalid_input("provider id must not be empty"));
    }
    if !provider.latency_ms.is_finite() || provider.latency_ms < 0.0 {
        return Err(Error::invalid_input(format!(
            "provider '{}' has invalid latency {}",
            provider.id, provider.latency_ms
        )));
    }
    if !provider.cost_per_unit.is_finite() || provider.cost_per_unit < 0.0 {
        return Err(Error::invalid_input(format!(
            "provider '{}' has invalid cost {}",
            provider.id, provider.cost_per_unit
        )));
    }
    if !(0.0..=100.0).contains(&provider.reliability_pct) {
        return Err(Error::invalid_input(format!(
            "provider '{}' has reliability {} outside 0..=100",
            provider.id, provider.reliability_pct
        )));
    }
    Ok(())
}
