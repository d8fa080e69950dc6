//! Async facade over the analytics components
//!
//! Consumers talk to an [`AnalyticsEngine`] the way they would talk to a remote
//! API: every query awaits a configurable simulated latency and then returns a
//! fully populated result. The engine owns no external resources, so dropping a
//! pending query needs no cleanup.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::alerting::{self, AlertEvaluator};
use crate::analytics::{self, ForecastGenerator, HeatmapSynthesizer, WhatIfSimulator};
use crate::config::Config;
use crate::error::Result;
use crate::jitter::{JitterSource, RandomJitter};
use crate::models::{
    Alert, CostBreakdown, Forecast, HeatmapCell, HourlyLatency, MetricsSnapshot, ProviderRecord,
    ScenarioInput, ScenarioResult,
};
use crate::registry::ProviderRegistry;

/// Shared handle to the analytics engine. Cloning is cheap.
#[derive(Clone)]
pub struct AnalyticsEngine {
    registry: Arc<ProviderRegistry>,
    jitter: Arc<Mutex<Box<dyn JitterSource>>>,
    latency: Duration,
    forecaster: ForecastGenerator,
    simulator: WhatIfSimulator,
    evaluator: AlertEvaluator,
    synthesizer: HeatmapSynthesizer,
}

impl AnalyticsEngine {
    /// Create an engine over a registry, seeding the RNG from the config.
    ///
    /// The config is validated first; an inconsistent one is [`Error::Config`](crate::Error::Config).
    pub fn new(registry: ProviderRegistry, config: &Config) -> Result<Self> {
        let jitter = RandomJitter::from_seed_option(config.engine.seed);
        Self::with_jitter(registry, config, jitter)
    }

    /// Create an engine with a caller-supplied jitter source
    pub fn with_jitter(
        registry: ProviderRegistry,
        config: &Config,
        jitter: impl JitterSource + 'static,
    ) -> Result<Self> {
        config.validate()?;
        let jitter: Box<dyn JitterSource> = Box::new(jitter);

        Ok(Self {
            registry: Arc::new(registry),
            jitter: Arc::new(Mutex::new(jitter)),
            latency: config.engine.simulated_latency,
            forecaster: ForecastGenerator::new(config.forecast.clone()),
            simulator: WhatIfSimulator::new(config.simulator.clone()),
            evaluator: AlertEvaluator::new(config.alerting.clone()),
            synthesizer: HeatmapSynthesizer::new(config.heatmap.clone()),
        })
    }

    /// The registry this engine reads
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Full provider catalog in registry order
    pub async fn providers(&self) -> Vec<ProviderRecord> {
        self.simulate_latency().await;
        self.registry.list().to_vec()
    }

    /// Fleet-wide metrics
    #[instrument(skip(self))]
    pub async fn metrics(&self) -> MetricsSnapshot {
        self.simulate_latency().await;
        self.snapshot()
    }

    /// Each provider's share of the total cost
    #[instrument(skip(self))]
    pub async fn cost_breakdown(&self) -> CostBreakdown {
        self.simulate_latency().await;
        analytics::cost_breakdown(self.registry.list())
    }

    /// Project cost and storage; `None` uses the configured default horizon
    #[instrument(skip(self))]
    pub async fn forecast(&self, horizon: Option<usize>) -> Result<Forecast> {
        self.simulate_latency().await;

        let horizon = horizon.unwrap_or_else(|| self.forecaster.default_horizon());
        let snapshot = self.snapshot();
        let start = Utc::now().date_naive();

        let mut jitter = self.jitter.lock();
        self.forecaster
            .forecast(&snapshot, horizon, start, jitter.as_mut())
    }

    /// Evaluate a what-if scenario against the current fleet
    #[instrument(skip(self, scenario))]
    pub async fn simulate(&self, scenario: &ScenarioInput) -> Result<ScenarioResult> {
        self.simulate_latency().await;

        let snapshot = self.snapshot();
        self.simulator.simulate(scenario, &snapshot, &self.registry)
    }

    /// Evaluate the alert rules against the current fleet
    #[instrument(skip(self))]
    pub async fn alerts(&self) -> Vec<Alert> {
        self.simulate_latency().await;

        let snapshot = self.snapshot();
        self.evaluator.evaluate(self.registry.list(), &snapshot)
    }

    /// Acknowledge an alert, returning the updated list
    pub async fn acknowledge(&self, alerts: &[Alert], id: Uuid) -> Vec<Alert> {
        self.simulate_latency().await;
        alerting::acknowledge(alerts, id)
    }

    /// Hour-by-provider latency heatmap
    #[instrument(skip(self))]
    pub async fn heatmap(&self) -> Vec<HeatmapCell> {
        self.simulate_latency().await;

        let mut jitter = self.jitter.lock();
        self.synthesizer.heatmap(self.registry.list(), jitter.as_mut())
    }

    /// Per-hour latency of every provider over the last day
    #[instrument(skip(self))]
    pub async fn latency_timeline(&self) -> Vec<HourlyLatency> {
        self.simulate_latency().await;

        let mut jitter = self.jitter.lock();
        self.synthesizer
            .latency_timeline(self.registry.list(), jitter.as_mut())
    }

    fn snapshot(&self) -> MetricsSnapshot {
        analytics::aggregate(self.registry.list(), self.registry.totals())
    }

    async fn simulate_latency(&self) {
        if self.latency.is_zero() {
            return;
        }
        debug!(latency_ms = self.latency.as_millis() as u64, "Simulating API latency");
        tokio::time::sleep(self.latency).await;
    }
}

impl std::fmt::Debug for AnalyticsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsEngine")
            .field("providers", &self.registry.len())
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}
