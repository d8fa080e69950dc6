//! Alerting for StoragePulse
//!
//! Evaluates provider and fleet state against threshold rules and manages the
//! acknowledgement of raised alerts.

mod acknowledge;
mod evaluator;

pub use acknowledge::{acknowledge, unacknowledged};
pub use evaluator::AlertEvaluator;
