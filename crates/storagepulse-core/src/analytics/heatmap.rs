//! Hour-by-provider latency synthesis

use std::f64::consts::TAU;

use tracing::debug;

use crate::config::HeatmapConfig;
use crate::jitter::JitterSource;
use crate::models::{HeatmapCell, HourlyLatency, ProviderRecord, HOURS_PER_DAY};

/// Generates latency matrices that follow a diurnal pattern
#[derive(Debug, Clone, Default)]
pub struct HeatmapSynthesizer {
    config: HeatmapConfig,
}

impl HeatmapSynthesizer {
    /// Create a synthesizer with the given wave and noise settings
    pub fn new(config: HeatmapConfig) -> Self {
        Self { config }
    }

    /// Periodic latency offset at an hour of the day
    pub fn diurnal_component(&self, hour: u8) -> f64 {
        self.config.amplitude_ms * (TAU * f64::from(hour) / self.config.period_hours).sin()
    }

    /// One cell per provider and hour: grouped by provider in registry order,
    /// hours ascending within each provider.
    pub fn heatmap(
        &self,
        providers: &[ProviderRecord],
        jitter: &mut dyn JitterSource,
    ) -> Vec<HeatmapCell> {
        let mut cells = Vec::with_capacity(providers.len() * usize::from(HOURS_PER_DAY));

        for provider in providers {
            for hour in 0..HOURS_PER_DAY {
                let latency = provider.latency_ms
                    + self.diurnal_component(hour)
                    + jitter.symmetric(self.config.jitter_ms);

                let request_count = jitter.uniform_int(
                    i64::from(self.config.min_requests),
                    i64::from(self.config.max_requests) - 1,
                );

                cells.push(HeatmapCell {
                    provider: provider.name.clone(),
                    hour,
                    latency_ms: latency.max(0.0),
                    request_count: u32::try_from(request_count)
                        .unwrap_or(self.config.min_requests)
                        .max(1),
                });
            }
        }

        debug!(
            providers = providers.len(),
            cells = cells.len(),
            "Synthesized latency heatmap"
        );

        cells
    }

    /// Latency of every provider for each hour of the last day, with whole
    /// millisecond noise.
    pub fn latency_timeline(
        &self,
        providers: &[ProviderRecord],
        jitter: &mut dyn JitterSource,
    ) -> Vec<HourlyLatency> {
        (0..HOURS_PER_DAY)
            .map(|hour| HourlyLatency {
                time: format!("{hour:02}:00"),
                latencies: providers
                    .iter()
                    .map(|p| {
                        let offset = jitter.uniform_int(
                            self.config.timeline_offset_min,
                            self.config.timeline_offset_max,
                        );
                        (p.id.clone(), (p.latency_ms + offset as f64).max(0.0))
                    })
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::{FixedJitter, RandomJitter};
    use crate::models::LatencyBand;
    use crate::registry::ProviderRegistry;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn providers(n: usize) -> Vec<ProviderRecord> {
        (0..n)
            .map(|i| ProviderRecord::new(format!("p{i}"), format!("Provider {i}"), 40.0, 1.0, 99.0))
            .collect()
    }

    #[test]
    fn test_empty_fleet_yields_no_cells() {
        let synthesizer = HeatmapSynthesizer::default();
        assert!(synthesizer
            .heatmap(&[], &mut RandomJitter::seeded(1))
            .is_empty());
    }

    #[test]
    fn test_single_provider_ordering() {
        let synthesizer = HeatmapSynthesizer::default();
        let cells = synthesizer.heatmap(&providers(1), &mut FixedJitter::midpoint());

        assert_eq!(cells.len(), 24);
        let hours: Vec<u8> = cells.iter().map(|c| c.hour).collect();
        assert_eq!(hours, (0..24).collect::<Vec<u8>>());
        assert!(cells.iter().all(|c| c.provider == "Provider 0"));
    }

    #[test]
    fn test_grouped_by_provider_in_registry_order() {
        let registry = ProviderRegistry::seeded();
        let synthesizer = HeatmapSynthesizer::default();
        let cells = synthesizer.heatmap(registry.list(), &mut RandomJitter::seeded(9));

        assert_eq!(cells.len(), 24 * 15);
        assert_eq!(cells[0].provider, "AWS S3");
        assert_eq!(cells[23].provider, "AWS S3");
        assert_eq!(cells[24].provider, "Google Cloud Storage");
        assert_eq!(cells[24].hour, 0);
    }

    #[test]
    fn test_diurnal_wave_without_noise() {
        let synthesizer = HeatmapSynthesizer::default();
        let cells = synthesizer.heatmap(&providers(1), &mut FixedJitter::midpoint());

        // period 8h: peak at 2h, back to base at 4h, trough at 6h
        assert!((cells[0].latency_ms - 40.0).abs() < 1e-9);
        assert!((cells[2].latency_ms - 50.0).abs() < 1e-9);
        assert!((cells[4].latency_ms - 40.0).abs() < 1e-9);
        assert!((cells[6].latency_ms - 30.0).abs() < 1e-9);
        assert!((cells[10].latency_ms - 50.0).abs() < 1e-9);
        assert_eq!(cells[0].request_count, 600);
    }

    #[test]
    fn test_latency_is_clamped_at_zero() {
        let synthesizer = HeatmapSynthesizer::default();
        let fast = [ProviderRecord::new("edge", "Edge", 0.0, 1.0, 99.0)];

        let cells = synthesizer.heatmap(&fast, &mut FixedJitter::low());
        assert!(cells.iter().all(|c| c.latency_ms >= 0.0));
        assert_eq!(cells[6].latency_ms, 0.0);
        assert_eq!(cells[6].band(), LatencyBand::Excellent);
    }

    #[test]
    fn test_infinite_jitter_does_not_panic() {
        let synthesizer = HeatmapSynthesizer::new(HeatmapConfig {
            jitter_ms: f64::INFINITY,
            ..HeatmapConfig::default()
        });

        let cells = synthesizer.heatmap(&providers(2), &mut RandomJitter::seeded(4));
        assert_eq!(cells.len(), 48);
        assert!(cells.iter().all(|c| c.latency_ms == 0.0));
    }

    #[test]
    fn test_latency_timeline() {
        let synthesizer = HeatmapSynthesizer::default();
        let timeline = synthesizer.latency_timeline(&providers(2), &mut FixedJitter::low());

        assert_eq!(timeline.len(), 24);
        assert_eq!(timeline[0].time, "00:00");
        assert_eq!(timeline[23].time, "23:00");
        assert_eq!(
            timeline[5].latencies,
            vec![("p0".to_string(), 35.0), ("p1".to_string(), 35.0)]
        );
    }

    proptest! {
        #[test]
        fn prop_cell_count_and_bounds(n in 0usize..20, seed in any::<u64>()) {
            let synthesizer = HeatmapSynthesizer::default();
            let cells = synthesizer.heatmap(&providers(n), &mut RandomJitter::seeded(seed));

            prop_assert_eq!(cells.len(), 24 * n);
            for cell in &cells {
                prop_assert!(cell.hour < 24);
                prop_assert!(cell.latency_ms >= 0.0);
                prop_assert!((40.0 - 12.5..=40.0 + 12.5).contains(&cell.latency_ms));
                prop_assert!((100..1100).contains(&cell.request_count));
            }
        }
    }
}
