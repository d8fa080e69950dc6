//! Fleet-wide metrics aggregation

use crate::models::{FleetTotals, MetricsSnapshot, ProviderRecord};

/// Roll the providers up into a snapshot.
///
/// Storage and request counts are fleet-level facts and are copied from
/// `totals`; cost and latency come from the provider records.
pub fn aggregate(providers: &[ProviderRecord], totals: &FleetTotals) -> MetricsSnapshot {
    let total_cost = providers.iter().map(|p| p.cost_per_unit).sum();

    let avg_latency_ms = if providers.is_empty() {
        0.0
    } else {
        providers.iter().map(|p| p.latency_ms).sum::<f64>() / providers.len() as f64
    };

    MetricsSnapshot {
        total_storage_bytes: totals.total_storage_bytes,
        total_cost,
        total_requests: totals.total_requests,
        avg_latency_ms,
        provider_count: providers.len(),
        monthly_growth_pct: totals.monthly_growth_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ProviderRegistry;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_fleet_has_zero_latency() {
        let snapshot = aggregate(&[], &FleetTotals::default());

        assert_eq!(snapshot.avg_latency_ms, 0.0);
        assert_eq!(snapshot.total_cost, 0.0);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_single_provider_latency_is_exact() {
        let providers = [ProviderRecord::new("a", "A", 37.3, 0.02, 99.9)];
        let snapshot = aggregate(&providers, &FleetTotals::default());

        assert_eq!(snapshot.avg_latency_ms, 37.3);
        assert_eq!(snapshot.total_cost, 0.02);
        assert_eq!(snapshot.provider_count, 1);
    }

    #[test]
    fn test_seeded_fleet() {
        let registry = ProviderRegistry::seeded();
        let snapshot = aggregate(registry.list(), registry.totals());

        assert_eq!(snapshot.total_cost, 1619.0);
        assert_eq!(snapshot.total_storage_bytes, 78_000_000_000);
        assert_eq!(snapshot.total_requests, 1_250_000);
        assert_eq!(snapshot.avg_latency_ms, 813.0 / 15.0);
        assert_eq!(snapshot.monthly_growth_pct, 11.8);
    }
}
