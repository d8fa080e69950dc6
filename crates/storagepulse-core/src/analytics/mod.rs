//! Derived analytics over the provider registry
//!
//! Every function here is pure apart from the [`JitterSource`](crate::jitter::JitterSource)
//! it is handed; none of them read or modify global state.

pub mod aggregator;
pub mod cost;
pub mod forecast;
pub mod heatmap;
pub mod simulator;

pub use aggregator::aggregate;
pub use cost::{breakdown, cost_breakdown};
pub use forecast::ForecastGenerator;
pub use heatmap::HeatmapSynthesizer;
pub use simulator::WhatIfSimulator;

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
