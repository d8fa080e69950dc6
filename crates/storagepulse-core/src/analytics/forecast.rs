//! Cost and storage forecasting
//!
//! The projection is an illustrative trend-plus-noise series around the current
//! snapshot, not a fitted statistical model. All noise comes from the caller's
//! [`JitterSource`], which keeps every sample within the configured bounds.

use chrono::{Months, NaiveDate};
use tracing::debug;

use crate::config::ForecastConfig;
use crate::error::{Error, Result};
use crate::jitter::JitterSource;
use crate::models::{
    Forecast, ForecastPoint, MetricsSnapshot, ProviderTrend, StorageGrowth, BYTES_PER_GB,
};

use super::round2;

/// Projects cost and storage a number of months ahead
#[derive(Debug, Clone, Default)]
pub struct ForecastGenerator {
    config: ForecastConfig,
}

impl ForecastGenerator {
    /// Create a generator with the given bounds
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Horizon used when the caller does not specify one
    pub fn default_horizon(&self) -> usize {
        self.config.default_horizon
    }

    /// Project `horizon` monthly periods starting the month after `start`.
    ///
    /// An empty fleet yields zero-valued points. A horizon of zero yields an
    /// empty series; one above the configured maximum is rejected.
    pub fn forecast(
        &self,
        snapshot: &MetricsSnapshot,
        horizon: usize,
        start: NaiveDate,
        jitter: &mut dyn JitterSource,
    ) -> Result<Forecast> {
        if horizon > self.config.max_horizon {
            return Err(Error::invalid_input(format!(
                "forecast horizon {} exceeds the maximum of {}",
                horizon, self.config.max_horizon
            )));
        }
        if self.config.confidence_min > self.config.confidence_max {
            return Err(Error::config(format!(
                "forecast confidence range {}..={} is inverted",
                self.config.confidence_min, self.config.confidence_max
            )));
        }

        let growth_max = self.config.storage_growth_max_bytes;
        let mut points = Vec::with_capacity(horizon);
        let mut growth_in_upper_half = false;

        for offset in 1..=horizon {
            let period = month_label(start, offset)?;

            let (predicted_cost, predicted_storage_gb) = if snapshot.is_empty() {
                (0.0, 0)
            } else {
                let cost = round2(snapshot.total_cost + jitter.symmetric(self.config.cost_jitter));
                let growth = jitter.uniform(0.0, growth_max);
                growth_in_upper_half |= growth > growth_max / 2.0;

                let storage_gb =
                    ((snapshot.total_storage_bytes as f64 + growth) / BYTES_PER_GB).round();
                (cost.max(0.0), storage_gb as u64)
            };

            let confidence_pct = u8::try_from(jitter.uniform_int(
                i64::from(self.config.confidence_min),
                i64::from(self.config.confidence_max),
            ))
            .unwrap_or(self.config.confidence_min);

            points.push(ForecastPoint {
                period,
                predicted_cost,
                predicted_storage_gb,
                confidence_pct,
            });
        }

        let storage_growth = if points.is_empty() || snapshot.is_empty() {
            StorageGrowth::None
        } else if growth_in_upper_half {
            StorageGrowth::High
        } else {
            StorageGrowth::Moderate
        };

        let latency_trend = self.latency_trend(snapshot);
        let recommendations = recommendations(snapshot, latency_trend, storage_growth);

        debug!(
            horizon,
            ?latency_trend,
            ?storage_growth,
            "Generated forecast"
        );

        Ok(Forecast {
            points,
            latency_trend,
            storage_growth,
            recommendations,
        })
    }

    /// Direction of fleet latency relative to the configured target
    fn latency_trend(&self, snapshot: &MetricsSnapshot) -> ProviderTrend {
        let target = self.config.latency_target_ms;

        if snapshot.is_empty() {
            ProviderTrend::Stable
        } else if snapshot.avg_latency_ms <= target {
            ProviderTrend::Improving
        } else if snapshot.avg_latency_ms <= target * 1.25 {
            ProviderTrend::Stable
        } else {
            ProviderTrend::Degrading
        }
    }
}

/// Full month name `offset` months after `start`
fn month_label(start: NaiveDate, offset: usize) -> Result<String> {
    u32::try_from(offset)
        .ok()
        .and_then(|months| start.checked_add_months(Months::new(months)))
        .map(|date| date.format("%B").to_string())
        .ok_or_else(|| Error::invalid_input("forecast period is out of the calendar range"))
}

fn recommendations(
    snapshot: &MetricsSnapshot,
    latency_trend: ProviderTrend,
    storage_growth: StorageGrowth,
) -> Vec<String> {
    if snapshot.is_empty() {
        return Vec::new();
    }

    let mut hints = vec![
        "Move infrequently accessed objects to cold storage tiers".to_string(),
        "Consolidate low-volume providers to negotiate volume discounts".to_string(),
    ];

    if storage_growth == StorageGrowth::High {
        hints.push(format!(
            "Storage is growing quickly from {:.1} GB; enable lifecycle expiration policies",
            snapshot.total_storage_gb()
        ));
    }

    if latency_trend == ProviderTrend::Degrading {
        hints.push(format!(
            "Average latency is {:.1} ms; route latency-sensitive workloads to the fastest providers",
            snapshot.avg_latency_ms
        ));
    }

    hints
}
