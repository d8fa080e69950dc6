//! Configuration management for StoragePulse
//!
//! Every tunable constant of the analytics formulas lives here so that the
//! illustrative numbers (jitter magnitudes, risk ratios, diurnal amplitude) can
//! be changed without touching the computations.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Operator;

/// Environment variable prefix, e.g. `STORAGEPULSE__ALERTING__LATENCY_THRESHOLD_MS`
pub const ENV_PREFIX: &str = "STORAGEPULSE";

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine facade configuration
    pub engine: EngineConfig,

    /// Forecast generator configuration
    pub forecast: ForecastConfig,

    /// What-if simulator configuration
    pub simulator: SimulatorConfig,

    /// Alert rule thresholds
    pub alerting: AlertingConfig,

    /// Heatmap synthesizer configuration
    pub heatmap: HeatmapConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from defaults, an optional file and the environment.
    ///
    /// Later sources override earlier ones. The file format is inferred from
    /// its extension (toml, json, yaml).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Default location of the configuration file for the current user
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "storagepulse", "storagepulse")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Reject settings whose bounds contradict each other
    pub fn validate(&self) -> Result<()> {
        self.ensure_finite()?;

        let f = &self.forecast;
        if f.confidence_min > f.confidence_max || f.confidence_max > 100 {
            return Err(Error::config(format!(
                "forecast confidence range {}..={} is not within 0..=100",
                f.confidence_min, f.confidence_max
            )));
        }
        if f.cost_jitter < 0.0 || f.storage_growth_max_bytes < 0.0 {
            return Err(Error::config("forecast jitter bounds must be non-negative"));
        }
        if f.default_horizon > f.max_horizon {
            return Err(Error::config("forecast default_horizon exceeds max_horizon"));
        }

        let s = &self.simulator;
        if s.medium_risk_ratio > s.high_risk_ratio {
            return Err(Error::config(
                "simulator medium_risk_ratio must not exceed high_risk_ratio",
            ));
        }

        let h = &self.heatmap;
        if h.period_hours <= 0.0 {
            return Err(Error::config("heatmap period_hours must be positive"));
        }
        if h.jitter_ms < 0.0 {
            return Err(Error::config("heatmap jitter_ms must be non-negative"));
        }
        if h.min_requests == 0 || h.min_requests >= h.max_requests {
            return Err(Error::config(format!(
                "heatmap request range {}..{} is empty or includes zero",
                h.min_requests, h.max_requests
            )));
        }
        if h.timeline_offset_min > h.timeline_offset_max {
            return Err(Error::config("heatmap timeline offset range is inverted"));
        }

        Ok(())
    }

    /// Reject NaN and infinite numbers, which environment overrides can produce
    fn ensure_finite(&self) -> Result<()> {
        let (f, s, a, h) = (&self.forecast, &self.simulator, &self.alerting, &self.heatmap);
        let fields = [
            ("forecast.cost_jitter", f.cost_jitter),
            ("forecast.storage_growth_max_bytes", f.storage_growth_max_bytes),
            ("forecast.latency_target_ms", f.latency_target_ms),
            ("simulator.add_cost_multiplier", s.add_cost_multiplier),
            ("simulator.remove_cost_multiplier", s.remove_cost_multiplier),
            ("simulator.add_latency_reduction_ms", s.add_latency_reduction_ms),
            ("simulator.remove_latency_penalty_ms", s.remove_latency_penalty_ms),
            ("simulator.high_risk_ratio", s.high_risk_ratio),
            ("simulator.medium_risk_ratio", s.medium_risk_ratio),
            ("alerting.latency_threshold_ms", a.latency_threshold_ms),
            ("alerting.cost_increase_threshold_pct", a.cost_increase_threshold_pct),
            ("alerting.monthly_budget", a.monthly_budget),
            ("heatmap.amplitude_ms", h.amplitude_ms),
            ("heatmap.period_hours", h.period_hours),
            ("heatmap.jitter_ms", h.jitter_ms),
        ];

        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(Error::config(format!("{name} must be finite, got {value}"))),
            None => Ok(()),
        }
    }
}

/// Engine facade configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Delay awaited before every query, emulating a remote API
    #[serde(with = "humantime_serde")]
    pub simulated_latency: Duration,
    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
    /// JSON provider catalog; the built-in seed catalog when absent
    pub catalog_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            simulated_latency: Duration::from_millis(150),
            seed: None,
            catalog_path: None,
        }
    }
}

/// Forecast generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of periods produced when the caller does not ask for one
    pub default_horizon: usize,
    /// Largest accepted horizon
    pub max_horizon: usize,
    /// Bound of the symmetric perturbation applied to the cost
    pub cost_jitter: f64,
    /// Upper bound of the storage growth sample, in bytes
    pub storage_growth_max_bytes: f64,
    /// Lowest confidence percentage
    pub confidence_min: u8,
    /// Highest confidence percentage
    pub confidence_max: u8,
    /// Fleet latency considered on target when labelling the latency trend
    pub latency_target_ms: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_horizon: 6,
            max_horizon: 36,
            cost_jitter: 2.5,
            storage_growth_max_bytes: 1e11,
            confidence_min: 80,
            confidence_max: 99,
            latency_target_ms: 50.0,
        }
    }
}

/// What-if simulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Monthly cost multiplier applied to an added provider's unit cost
    pub add_cost_multiplier: f64,
    /// Monthly cost multiplier applied to a removed provider's unit cost
    pub remove_cost_multiplier: f64,
    /// Fleet latency reduction expected from adding a provider
    pub add_latency_reduction_ms: f64,
    /// Fleet latency increase expected from removing a provider
    pub remove_latency_penalty_ms: f64,
    /// Cost impact above this share of the baseline is high risk
    pub high_risk_ratio: f64,
    /// Cost impact above this share of the baseline is medium risk
    pub medium_risk_ratio: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            add_cost_multiplier: 10.0,
            remove_cost_multiplier: 10.0,
            add_latency_reduction_ms: 5.0,
            remove_latency_penalty_ms: 3.0,
            high_risk_ratio: 0.2,
            medium_risk_ratio: 0.1,
        }
    }
}

/// Alerting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertingConfig {
    /// Provider latency above this raises a latency alert
    pub latency_threshold_ms: f64,
    /// Predicted month-over-month cost growth above this raises a cost alert
    pub cost_increase_threshold_pct: f64,
    /// Monthly fleet cost above this raises a budget alert
    pub monthly_budget: f64,
    /// Total storage capacity of the fleet, in bytes
    pub storage_capacity_bytes: u64,
    /// How many months ahead the capacity projection looks
    pub capacity_horizon_months: u32,
    /// Comparison applied by the latency, cost growth and budget rules
    pub comparison: Operator,
    /// Whether latency alerts are produced
    pub latency_alerts: bool,
    /// Whether cost alerts are produced
    pub cost_alerts: bool,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            latency_threshold_ms: 60.0,
            cost_increase_threshold_pct: 10.0,
            monthly_budget: 1000.0,
            storage_capacity_bytes: 100_000_000_000,
            capacity_horizon_months: 6,
            comparison: Operator::Gt,
            latency_alerts: true,
            cost_alerts: true,
        }
    }
}

/// Heatmap synthesizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Amplitude of the diurnal latency wave
    pub amplitude_ms: f64,
    /// Period of the diurnal wave; peaks and troughs are half a period apart
    pub period_hours: f64,
    /// Bound of the symmetric per-cell latency perturbation
    pub jitter_ms: f64,
    /// Smallest request count of a cell (inclusive)
    pub min_requests: u32,
    /// Largest request count of a cell (exclusive)
    pub max_requests: u32,
    /// Smallest whole-millisecond offset of the 24h latency timeline
    pub timeline_offset_min: i64,
    /// Largest whole-millisecond offset of the 24h latency timeline
    pub timeline_offset_max: i64,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            amplitude_ms: 10.0,
            period_hours: 8.0,
            jitter_ms: 2.5,
            min_requests: 100,
            max_requests: 1100,
            timeline_offset_min: -5,
            timeline_offset_max: 4,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (json or pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
