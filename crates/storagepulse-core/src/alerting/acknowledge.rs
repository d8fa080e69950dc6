//! Alert acknowledgement
//!
//! Alert lists may be shared between readers, so acknowledging never mutates a
//! list in place: it produces a new list in which the matching alert has been
//! replaced by its acknowledged copy.

use tracing::debug;
use uuid::Uuid;

use crate::models::Alert;

/// Return a copy of `alerts` with the alert `id` acknowledged.
///
/// Unknown ids and already acknowledged alerts leave the content unchanged.
pub fn acknowledge(alerts: &[Alert], id: Uuid) -> Vec<Alert> {
    let mut matched = false;

    let updated = alerts
        .iter()
        .map(|alert| {
            if alert.id == id {
                matched = true;
                alert.clone().acknowledge()
            } else {
                alert.clone()
            }
        })
        .collect();

    debug!(alert_id = %id, matched, "Acknowledged alert");
    updated
}

/// Alerts still waiting for acknowledgement, in their original order
pub fn unacknowledged(alerts: &[Alert]) -> Vec<&Alert> {
    alerts.iter().filter(|a| !a.acknowledged).collect()
}
