//! # StoragePulse
//!
//! Analytics engine for a fleet of cloud storage providers.
//!
//! StoragePulse aggregates per-provider latency, cost and reliability into
//! fleet-wide metrics and derives forecasts, what-if scenarios, alerts and
//! latency heatmaps from them.
//!
//! ## Architecture
//!
//! - **Registry**: Immutable catalog of providers plus fleet-level totals
//! - **Analytics**: Aggregation, cost breakdown, forecasting, simulation, heatmaps
//! - **Alerting**: Threshold rules and copy-on-write acknowledgement
//! - **Engine**: Async facade that simulates API latency over all of the above
//!
//! ## Quick Start
//!
//! ```bash
//! # Fleet overview
//! storagepulse metrics
//!
//! # Six month forecast as JSON
//! storagepulse --format json forecast --horizon 6
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_precision_loss)]

pub mod alerting;
pub mod analytics;
pub mod config;
pub mod engine;
pub mod error;
pub mod jitter;
pub mod models;
pub mod registry;

pub use config::Config;
pub use engine::AnalyticsEngine;
pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::engine::AnalyticsEngine;
    pub use crate::error::{Error, Result};
    pub use crate::jitter::{FixedJitter, JitterSource, RandomJitter};
    pub use crate::models::*;
    pub use crate::registry::ProviderRegistry;
}
