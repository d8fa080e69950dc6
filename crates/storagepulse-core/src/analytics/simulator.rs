//! What-if scenario simulation
//!
//! Estimates the marginal cost and latency impact of a hypothetical fleet
//! change without touching the registry. Each part of the scenario is evaluated
//! on its own and the impacts are summed.

use tracing::debug;

use crate::config::SimulatorConfig;
use crate::error::{Error, Result};
use crate::models::{MetricsSnapshot, RiskLevel, ScenarioInput, ScenarioResult};
use crate::registry::ProviderRegistry;

use super::round2;

/// Evaluates [`ScenarioInput`]s against a baseline snapshot
#[derive(Debug, Clone, Default)]
pub struct WhatIfSimulator {
    config: SimulatorConfig,
}

impl WhatIfSimulator {
    /// Create a simulator with the given coefficients
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Simulate a scenario.
    ///
    /// `registry` resolves the provider named by `remove_provider`; an unknown
    /// id is reported as [`Error::NotFound`].
    pub fn simulate(
        &self,
        scenario: &ScenarioInput,
        baseline: &MetricsSnapshot,
        registry: &ProviderRegistry,
    ) -> Result<ScenarioResult> {
        validate(scenario)?;

        let mut cost_impact = 0.0;
        let mut latency_impact = 0.0;
        let mut recommendations = Vec::new();

        if let Some(candidate) = &scenario.add_provider {
            cost_impact += candidate.cost_per_unit * self.config.add_cost_multiplier;
            latency_impact -= self.config.add_latency_reduction_ms;
            recommendations.push(format!(
                "Adding {} is expected to reduce average latency by {} ms",
                candidate.name, self.config.add_latency_reduction_ms
            ));
        }

        if let Some(id) = &scenario.remove_provider {
            let provider = registry.get(id)?;
            cost_impact -= provider.cost_per_unit * self.config.remove_cost_multiplier;
            latency_impact += self.config.remove_latency_penalty_ms;
            recommendations.push(format!(
                "Removing {} may increase average latency by {} ms",
                provider.name, self.config.remove_latency_penalty_ms
            ));
        }

        if let Some(pct) = scenario.usage_increase_pct {
            let added = pct / 100.0 * baseline.total_cost;
            cost_impact += added;
            recommendations.push(if added >= 0.0 {
                format!("A {}% usage change adds {:.2} to the monthly cost", pct, round2(added))
            } else {
                format!("A {}% usage change saves {:.2} on the monthly cost", pct, round2(-added))
            });
        }

        let risk = self.classify(cost_impact, baseline.total_cost);

        debug!(
            cost_impact,
            latency_impact,
            ?risk,
            "Simulated scenario"
        );

        Ok(ScenarioResult {
            current_cost: baseline.total_cost,
            projected_cost: baseline.total_cost + cost_impact,
            cost_impact,
            cost_savings: (-cost_impact).max(0.0),
            current_latency: baseline.avg_latency_ms,
            projected_latency: baseline.avg_latency_ms + latency_impact,
            latency_impact,
            risk,
            recommendations,
        })
    }

    /// Risk of a signed cost impact; reductions are always low risk
    fn classify(&self, cost_impact: f64, baseline_cost: f64) -> RiskLevel {
        if cost_impact > self.config.high_risk_ratio * baseline_cost {
            RiskLevel::High
        } else if cost_impact > self.config.medium_risk_ratio * baseline_cost {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

fn validate(scenario: &ScenarioInput) -> Result<()> {
    if let Some(candidate) = &scenario.add_provider {
        if candidate.name.trim().is_empty() {
            return Err(Error::invalid_input("added provider needs a name"));
        }
        if !candidate.cost_per_unit.is_finite() || candidate.cost_per_unit < 0.0 {
            return Err(Error::invalid_input(format!(
                "added provider cost {} must be a non-negative number",
                candidate.cost_per_unit
            )));
        }
        if let Some(latency) = candidate.latency_ms {
            if !latency.is_finite() || latency < 0.0 {
                return Err(Error::invalid_input(format!(
                    "added provider latency {latency} must be a non-negative number"
                )));
            }
        }
    }

    if let Some(pct) = scenario.usage_increase_pct {
        if !pct.is_finite() {
            return Err(Error::invalid_input("usage change must be a finite number"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::aggregate;
    use crate::models::CandidateProvider;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn baseline(total_cost: f64) -> MetricsSnapshot {
        MetricsSnapshot {
            total_storage_bytes: 0,
            total_cost,
            total_requests: 0,
            avg_latency_ms: 50.0,
            provider_count: 3,
            monthly_growth_pct: 0.0,
        }
    }

    #[test]
    fn test_empty_scenario_has_no_impact() {
        let simulator = WhatIfSimulator::default();
        let result = simulator
            .simulate(&ScenarioInput::default(), &baseline(100.0), &ProviderRegistry::empty())
            .unwrap();

        assert_eq!(
            result,
            ScenarioResult {
                current_cost: 100.0,
                projected_cost: 100.0,
                cost_impact: 0.0,
                cost_savings: 0.0,
                current_latency: 50.0,
                projected_latency: 50.0,
                latency_impact: 0.0,
                risk: RiskLevel::Low,
                recommendations: vec![],
            }
        );
    }

    #[test]
    fn test_add_provider() {
        let simulator = WhatIfSimulator::default();
        let scenario = ScenarioInput {
            add_provider: Some(CandidateProvider::new("Tigris", 0.5)),
            ..Default::default()
        };

        let result = simulator
            .simulate(&scenario, &baseline(100.0), &ProviderRegistry::empty())
            .unwrap();

        assert_eq!(result.cost_impact, 5.0);
        assert_eq!(result.projected_cost, 105.0);
        assert_eq!(result.projected_latency, 45.0);
        assert_eq!(result.risk, RiskLevel::Low);
        assert_eq!(
            result.recommendations,
            vec!["Adding Tigris is expected to reduce average latency by 5 ms".to_string()]
        );
    }

    #[test]
    fn test_remove_provider_saves_cost() {
        let registry = ProviderRegistry::seeded();
        let snapshot = aggregate(registry.list(), registry.totals());
        let simulator = WhatIfSimulator::default();
        let scenario = ScenarioInput {
            remove_provider: Some("wasabi".to_string()),
            ..Default::default()
        };

        let result = simulator.simulate(&scenario, &snapshot, &registry).unwrap();

        assert_eq!(result.cost_impact, -590.0);
        assert_eq!(result.cost_savings, 590.0);
        assert_eq!(result.projected_cost, 1029.0);
        assert_eq!(result.latency_impact, 3.0);
        assert_eq!(result.risk, RiskLevel::Low);
        assert!(result.recommendations[0].starts_with("Removing Wasabi Hot Storage"));
    }

    #[test]
    fn test_remove_unknown_provider_is_not_found() {
        let simulator = WhatIfSimulator::default();
        let scenario = ScenarioInput {
            remove_provider: Some("missing".to_string()),
            ..Default::default()
        };

        let result = simulator.simulate(&scenario, &baseline(100.0), &ProviderRegistry::seeded());
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_usage_change_and_combined_effects() {
        let registry = ProviderRegistry::seeded();
        let simulator = WhatIfSimulator::default();
        let scenario = ScenarioInput {
            add_provider: Some(CandidateProvider::new("Tigris", 1.0)),
            remove_provider: Some("ovh".to_string()),
            usage_increase_pct: Some(50.0),
        };

        let result = simulator
            .simulate(&scenario, &baseline(1000.0), &registry)
            .unwrap();

        // +10 for the addition, -770 for the removal, +500 for usage
        assert_eq!(result.cost_impact, -260.0);
        assert_eq!(result.latency_impact, -2.0);
        assert_eq!(result.recommendations.len(), 3);
        assert_eq!(
            result.recommendations[2],
            "A 50% usage change adds 500.00 to the monthly cost"
        );
    }

    #[rstest]
    #[case(20.0, RiskLevel::Medium)]
    #[case(20.0001, RiskLevel::High)]
    #[case(10.0, RiskLevel::Low)]
    #[case(10.5, RiskLevel::Medium)]
    #[case(0.0, RiskLevel::Low)]
    fn test_risk_boundaries(#[case] added_cost: f64, #[case] expected: RiskLevel) {
        let simulator = WhatIfSimulator::default();
        // baseline 1000: high above 200, medium above 100
        let scenario = ScenarioInput {
            add_provider: Some(CandidateProvider::new("Probe", added_cost)),
            ..Default::default()
        };

        let result = simulator
            .simulate(&scenario, &baseline(1000.0), &ProviderRegistry::empty())
            .unwrap();

        assert_eq!(result.risk, expected);
    }

    #[test]
    fn test_negative_usage_lowers_cost() {
        let simulator = WhatIfSimulator::default();
        let scenario = ScenarioInput {
            usage_increase_pct: Some(-25.0),
            ..Default::default()
        };

        let result = simulator
            .simulate(&scenario, &baseline(400.0), &ProviderRegistry::empty())
            .unwrap();

        assert_eq!(result.cost_impact, -100.0);
        assert_eq!(result.cost_savings, 100.0);
        assert_eq!(result.risk, RiskLevel::Low);
        assert_eq!(
            result.recommendations,
            vec!["A -25% usage change saves 100.00 on the monthly cost".to_string()]
        );
    }

    #[test]
    fn test_rejects_malformed_scenario() {
        let simulator = WhatIfSimulator::default();
        let registry = ProviderRegistry::empty();

        let nan_usage = ScenarioInput {
            usage_increase_pct: Some(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(
            simulator.simulate(&nan_usage, &baseline(1.0), &registry),
            Err(Error::InvalidInput(_))
        ));

        let negative_cost = ScenarioInput {
            add_provider: Some(CandidateProvider::new("Bad", -1.0)),
            ..Default::default()
        };
        assert!(simulator
            .simulate(&negative_cost, &baseline(1.0), &registry)
            .is_err());
    }
}
