//! Heatmap data models

use serde::{Deserialize, Serialize};

/// Hours in a day; heatmaps and timelines have one row per hour
pub const HOURS_PER_DAY: u8 = 24;

/// Latency of one provider at one hour of the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    /// Provider display name
    pub provider: String,

    /// Hour of day, 0 to 23
    pub hour: u8,

    /// Synthesized latency, never negative
    pub latency_ms: f64,

    /// Synthesized request volume, always positive
    pub request_count: u32,
}

impl HeatmapCell {
    /// Intensity band of the cell's latency
    pub fn band(&self) -> LatencyBand {
        LatencyBand::classify(self.latency_ms)
    }
}

/// Intensity band used to colour heatmap cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyBand {
    /// Below 30 ms
    Excellent,
    /// 30 to 50 ms
    Good,
    /// 50 to 70 ms
    Fair,
    /// 70 to 90 ms
    Poor,
    /// 90 ms and above
    Critical,
}

impl LatencyBand {
    /// Band of a latency in milliseconds
    pub fn classify(latency_ms: f64) -> Self {
        if latency_ms < 30.0 {
            Self::Excellent
        } else if latency_ms < 50.0 {
            Self::Good
        } else if latency_ms < 70.0 {
            Self::Fair
        } else if latency_ms < 90.0 {
            Self::Poor
        } else {
            Self::Critical
        }
    }
}

/// Latency of every provider at one hour of the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyLatency {
    /// Hour label, "HH:00"
    pub time: String,

    /// (provider id, latency) in registry order
    pub latencies: Vec<(String, f64)>,
}
