//! Data models for StoragePulse

mod alert;
mod forecast;
mod heatmap;
mod metrics;
mod provider;
mod scenario;

pub use alert::*;
pub use forecast::*;
pub use heatmap::*;
pub use metrics::*;
pub use provider::*;
pub use scenario::*;
