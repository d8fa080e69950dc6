//! Alert rule evaluation engine

use tracing::{debug, info};

use crate::config::AlertingConfig;
use crate::models::{
    Alert, AlertType, MetricsSnapshot, ProviderRecord, ProviderStatus, Severity, BYTES_PER_GB,
    FLEET_SCOPE,
};

/// Evaluates the fixed rule set against a fleet.
///
/// Rules run in a fixed order and the resulting alerts keep that order:
/// provider latency, cost growth, budget, storage capacity, provider status.
#[derive(Debug, Clone, Default)]
pub struct AlertEvaluator {
    config: AlertingConfig,
}

impl AlertEvaluator {
    /// Create an evaluator with the given thresholds
    pub fn new(config: AlertingConfig) -> Self {
        Self { config }
    }

    /// Evaluate all rules. Every returned alert is unacknowledged.
    pub fn evaluate(&self, providers: &[ProviderRecord], snapshot: &MetricsSnapshot) -> Vec<Alert> {
        let mut alerts = Vec::new();

        if self.config.latency_alerts {
            self.check_latency(providers, &mut alerts);
        }
        if self.config.cost_alerts {
            self.check_cost_growth(snapshot, &mut alerts);
            self.check_budget(snapshot, &mut alerts);
        }
        self.check_capacity(snapshot, &mut alerts);
        check_status(providers, &mut alerts);

        if alerts.is_empty() {
            debug!(providers = providers.len(), "No alerts raised");
        } else {
            info!(
                count = alerts.len(),
                providers = providers.len(),
                "Alerts raised"
            );
        }

        alerts
    }

    fn check_latency(&self, providers: &[ProviderRecord], alerts: &mut Vec<Alert>) {
        let threshold = self.config.latency_threshold_ms;

        for provider in providers {
            if !self.config.comparison.check(provider.latency_ms, threshold) {
                continue;
            }

            debug!(
                provider = %provider.id,
                latency_ms = provider.latency_ms,
                threshold,
                "Latency breach"
            );

            alerts.push(Alert::new(
                AlertType::Latency,
                Severity::Warning,
                &provider.name,
                format!(
                    "{} latency exceeded threshold of {:.0} ms (current value: {:.1} ms)",
                    provider.name, threshold, provider.latency_ms
                ),
            ));
        }
    }

    fn check_cost_growth(&self, snapshot: &MetricsSnapshot, alerts: &mut Vec<Alert>) {
        let growth = snapshot.monthly_growth_pct;
        if snapshot.is_empty()
            || !self
                .config
                .comparison
                .check(growth, self.config.cost_increase_threshold_pct)
        {
            return;
        }

        let projected = snapshot.total_cost * (1.0 + growth / 100.0);
        alerts.push(Alert::new(
            AlertType::Cost,
            Severity::Info,
            FLEET_SCOPE,
            format!(
                "Predicted cost increase of {growth:.1}% next month (projected: {projected:.2})"
            ),
        ));
    }

    fn check_budget(&self, snapshot: &MetricsSnapshot, alerts: &mut Vec<Alert>) {
        if !self
            .config
            .comparison
            .check(snapshot.total_cost, self.config.monthly_budget) {
            return;
        }

        alerts.push(Alert::new(
            AlertType::Cost,
            Severity::Warning,
            FLEET_SCOPE,
            format!(
                "Monthly cost of {:.2} exceeds the budget of {:.2}",
                snapshot.total_cost, self.config.monthly_budget
            ),
        ));
    }

    fn check_capacity(&self, snapshot: &MetricsSnapshot, alerts: &mut Vec<Alert>) {
        let Some(months) = months_until_capacity(
            snapshot.total_storage_bytes,
            snapshot.monthly_growth_pct,
            self.config.storage_capacity_bytes,
            self.config.capacity_horizon_months,
        ) else {
            return;
        };

        let capacity_gb = self.config.storage_capacity_bytes as f64 / BYTES_PER_GB;
        let message = if months == 0 {
            format!("Storage already exceeds the capacity of {capacity_gb:.0} GB")
        } else {
            format!(
                "Storage is projected to exceed the capacity of {capacity_gb:.0} GB in {months} month(s)"
            )
        };

        alerts.push(Alert::new(
            AlertType::Predictive,
            Severity::Warning,
            FLEET_SCOPE,
            message,
        ));
    }
}

fn check_status(providers: &[ProviderRecord], alerts: &mut Vec<Alert>) {
    for provider in providers {
        let (severity, state) = match provider.status {
            ProviderStatus::Active => continue,
            ProviderStatus::Warning => (Severity::Warning, "degraded"),
            ProviderStatus::Error => (Severity::Error, "failing"),
        };

        alerts.push(Alert::new(
            AlertType::Availability,
            severity,
            &provider.name,
            format!(
                "{} is {} (reliability {:.2}%)",
                provider.name, state, provider.reliability_pct
            ),
        ));
    }
}

/// First month within `horizon` in which compounding growth pushes storage past
/// capacity. `Some(0)` when capacity is already exceeded.
fn months_until_capacity(
    storage_bytes: u64,
    monthly_growth_pct: f64,
    capacity_bytes: u64,
    horizon: u32,
) -> Option<u32> {
    let capacity = capacity_bytes as f64;
    let mut projected = storage_bytes as f64;

    if projected > capacity {
        return Some(0);
    }
    if monthly_growth_pct <= 0.0 || storage_bytes == 0 {
        return None;
    }

    let factor = 1.0 + monthly_growth_pct / 100.0;
    (1..=horizon).find(|_| {
        projected *= factor;
        projected > capacity
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::aggregate;
    use crate::models::{FleetTotals, Operator};
    use crate::registry::ProviderRegistry;
    use pretty_assertions::assert_eq;

    fn seeded_alerts(config: AlertingConfig) -> Vec<Alert> {
        let registry = ProviderRegistry::seeded();
        let snapshot = aggregate(registry.list(), registry.totals());
        AlertEvaluator::new(config).evaluate(registry.list(), &snapshot)
    }

    #[test]
    fn test_seeded_fleet_rule_order() {
        let alerts = seeded_alerts(AlertingConfig::default());

        let kinds: Vec<(AlertType, Severity, &str)> = alerts
            .iter()
            .map(|a| (a.alert_type, a.severity, a.provider.as_str()))
            .collect();

        assert_eq!(
            kinds,
            vec![
                (AlertType::Latency, Severity::Warning, "Vultr Object Storage"),
                (AlertType::Latency, Severity::Warning, "Scaleway Object Storage"),
                (AlertType::Latency, Severity::Warning, "OVH Cloud Storage"),
                (AlertType::Latency, Severity::Warning, "Hetzner Storage Box"),
                (AlertType::Cost, Severity::Info, FLEET_SCOPE),
                (AlertType::Cost, Severity::Warning, FLEET_SCOPE),
                (AlertType::Predictive, Severity::Warning, FLEET_SCOPE),
                (AlertType::Availability, Severity::Warning, "Azure Blob Storage"),
                (AlertType::Availability, Severity::Warning, "Vultr Object Storage"),
            ]
        );
        assert!(alerts.iter().all(|a| !a.acknowledged));
    }

    #[test]
    fn test_messages() {
        let alerts = seeded_alerts(AlertingConfig::default());

        assert_eq!(
            alerts[0].message,
            "Vultr Object Storage latency exceeded threshold of 60 ms (current value: 61.0 ms)"
        );
        assert_eq!(
            alerts[4].message,
            "Predicted cost increase of 11.8% next month (projected: 1810.04)"
        );
        assert_eq!(
            alerts[6].message,
            "Storage is projected to exceed the capacity of 100 GB in 3 month(s)"
        );
    }

    #[test]
    fn test_latency_threshold_is_strict() {
        let providers = [ProviderRecord::new("a", "A", 60.0, 1.0, 99.0)];
        let snapshot = aggregate(&providers, &FleetTotals::default());

        let alerts = AlertEvaluator::default().evaluate(&providers, &snapshot);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_inclusive_comparison_fires_at_threshold() {
        let config = AlertingConfig {
            comparison: Operator::Gte,
            monthly_budget: 2.0,
            ..AlertingConfig::default()
        };
        let providers = [
            ProviderRecord::new("a", "A", 60.0, 1.0, 99.0),
            ProviderRecord::new("b", "B", 59.0, 1.0, 99.0),
        ];
        let snapshot = aggregate(&providers, &FleetTotals::default());

        let alerts = AlertEvaluator::new(config).evaluate(&providers, &snapshot);
        let kinds: Vec<(AlertType, &str)> = alerts
            .iter()
            .map(|a| (a.alert_type, a.provider.as_str()))
            .collect();
        assert_eq!(kinds, vec![(AlertType::Latency, "A"), (AlertType::Cost, FLEET_SCOPE)]);
    }

    #[test]
    fn test_toggles_disable_rules() {
        let config = AlertingConfig {
            latency_alerts: false,
            cost_alerts: false,
            ..AlertingConfig::default()
        };

        let alerts = seeded_alerts(config);
        assert!(alerts
            .iter()
            .all(|a| matches!(a.alert_type, AlertType::Predictive | AlertType::Availability)));
        assert_eq!(alerts.len(), 3);
    }

    #[test]
    fn test_error_status_is_error_severity() {
        let providers =
            [ProviderRecord::new("a", "A", 10.0, 1.0, 42.0).with_status(ProviderStatus::Error)];
        let snapshot = aggregate(&providers, &FleetTotals::default());

        let alerts = AlertEvaluator::default().evaluate(&providers, &snapshot);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Error);
        assert_eq!(alerts[0].message, "A is failing (reliability 42.00%)");
    }

    #[test]
    fn test_empty_fleet_raises_nothing() {
        let alerts = AlertEvaluator::default().evaluate(&[], &MetricsSnapshot::default());
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_months_until_capacity() {
        assert_eq!(months_until_capacity(78, 11.8, 100, 6), Some(3));
        assert_eq!(months_until_capacity(78, 11.8, 100, 2), None);
        assert_eq!(months_until_capacity(120, 0.0, 100, 6), Some(0));
        assert_eq!(months_until_capacity(50, 0.0, 100, 6), None);
        assert_eq!(months_until_capacity(50, -5.0, 100, 6), None);
    }
}
