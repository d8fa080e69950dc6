//! Metrics data models

use serde::{Deserialize, Serialize};

/// Bytes per gigabyte, decimal
pub const BYTES_PER_GB: f64 = 1e9;

/// Point-in-time aggregate of the fleet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Bytes stored across the fleet
    pub total_storage_bytes: u64,

    /// Sum of the providers' unit costs
    pub total_cost: f64,

    /// Requests served across the fleet
    pub total_requests: u64,

    /// Mean provider latency, 0 for an empty fleet
    pub avg_latency_ms: f64,

    /// Number of providers aggregated
    pub provider_count: usize,

    /// Month-over-month usage growth, in percent
    pub monthly_growth_pct: f64,
}

impl MetricsSnapshot {
    /// Whether the snapshot was taken over an empty fleet
    pub fn is_empty(&self) -> bool {
        self.provider_count == 0
    }

    /// Stored data in decimal gigabytes
    pub fn total_storage_gb(&self) -> f64 {
        self.total_storage_bytes as f64 / BYTES_PER_GB
    }

    /// Average cost per provider
    pub fn avg_cost(&self) -> f64 {
        if self.provider_count == 0 {
            0.0
        } else {
            self.total_cost / self.provider_count as f64
        }
    }
}

/// A provider's share of the fleet cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostShare {
    /// Provider identifier
    pub provider_id: String,

    /// Provider display name
    pub provider_name: String,

    /// Cost attributed to this provider
    pub absolute_cost: f64,

    /// Whole-number percentage of the total cost
    pub percentage_of_total: f64,
}

/// Cost shares of a whole fleet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Total cost
    pub total_cost: f64,

    /// One share per provider, in registry order
    pub shares: Vec<CostShare>,
}

impl CostBreakdown {
    /// Sum of all percentages.
    ///
    /// Each share is rounded independently, so this can be off from 100 by up
    /// to one point per provider.
    pub fn percentage_sum(&self) -> f64 {
        self.shares.iter().map(|s| s.percentage_of_total).sum()
    }

    /// The cheapest provider, first in registry order on ties
    pub fn cheapest(&self) -> Option<&CostShare> {
        self.shares.iter().reduce(|best, s| {
            if s.absolute_cost < best.absolute_cost {
                s
            } else {
                best
            }
        })
    }

    /// The most expensive provider, first in registry order on ties
    pub fn most_expensive(&self) -> Option<&CostShare> {
        self.shares.iter().reduce(|best, s| {
            if s.absolute_cost > best.absolute_cost {
                s
            } else {
                best
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(id: &str, cost: f64) -> CostShare {
        CostShare {
            provider_id: id.to_string(),
            provider_name: id.to_uppercase(),
            absolute_cost: cost,
            percentage_of_total: 0.0,
        }
    }

    #[test]
    fn test_avg_cost() {
        let snapshot = MetricsSnapshot {
            total_cost: 1619.0,
            provider_count: 15,
            ..MetricsSnapshot::default()
        };
        assert!((snapshot.avg_cost() - 1619.0 / 15.0).abs() < 1e-9);
        assert_eq!(MetricsSnapshot::default().avg_cost(), 0.0);
    }

    #[test]
    fn test_extremes_prefer_first_on_ties() {
        let breakdown = CostBreakdown {
            total_cost: 8.0,
            shares: vec![share("a", 2.0), share("b", 2.0), share("c", 4.0)],
        };

        assert_eq!(breakdown.cheapest().map(|s| s.provider_id.as_str()), Some("a"));
        assert_eq!(breakdown.most_expensive().map(|s| s.provider_id.as_str()), Some("c"));
        assert!(CostBreakdown::default().cheapest().is_none());
    }
}
