//! Alert data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scope label of alerts that concern the whole fleet
pub const FLEET_SCOPE: &str = "All Providers";

/// What an alert is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Provider latency above threshold
    Latency,
    /// Cost growth or budget
    Cost,
    /// Projection of a future problem
    Predictive,
    /// Provider status degraded or failing
    Availability,
}

/// Alert severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational
    Info,
    /// Warning
    #[default]
    Warning,
    /// Error
    Error,
}

/// How a value is compared against an alert threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Breach when strictly above the threshold
    #[default]
    Gt,
    /// Breach when at or above the threshold
    Gte,
}

impl Operator {
    /// Check if a value breaches a threshold
    pub fn check(self, value: f64, threshold: f64) -> bool {
        match self {
            Operator::Gt => value > threshold,
            Operator::Gte => value >= threshold,
        }
    }
}

/// A raised alert.
///
/// Alerts are immutable apart from the acknowledgement, which is applied by
/// building a new record rather than mutating a shared one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Unique identifier
    pub id: Uuid,

    /// Kind of alert
    #[serde(rename = "type")]
    pub alert_type: AlertType,

    /// Severity level
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Provider name, or [`FLEET_SCOPE`]
    pub provider: String,

    /// When the alert was raised
    pub created_at: DateTime<Utc>,

    /// Whether a consumer has acknowledged it
    pub acknowledged: bool,
}

impl Alert {
    /// Raise a new, unacknowledged alert
    pub fn new(
        alert_type: AlertType,
        severity: Severity,
        provider: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            alert_type,
            severity,
            message: message.into(),
            provider: provider.into(),
            created_at: Utc::now(),
            acknowledged: false,
        }
    }

    /// The acknowledged version of this alert
    #[must_use]
    pub fn acknowledge(self) -> Self {
        Self {
            acknowledged: true,
            ..self
        }
    }

    /// Whether the alert concerns the whole fleet
    pub fn is_fleet_wide(&self) -> bool {
        self.provider == FLEET_SCOPE
    }
}
