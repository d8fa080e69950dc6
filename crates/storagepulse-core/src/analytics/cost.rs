//! Cost breakdown calculator
//!
//! Attributes the fleet cost to individual providers.

use tracing::debug;

use crate::models::{CostBreakdown, CostShare, ProviderRecord};

/// Each provider's share of the total cost, in registry order.
///
/// Percentages are rounded half-up to whole numbers independently of each
/// other, so the shares of one fleet may add up to slightly more or less than
/// 100. When the total cost is zero every share is 0.
pub fn breakdown(providers: &[ProviderRecord]) -> Vec<CostShare> {
    let total: f64 = providers.iter().map(|p| p.cost_per_unit).sum();

    providers
        .iter()
        .map(|p| CostShare {
            provider_id: p.id.clone(),
            provider_name: p.name.clone(),
            absolute_cost: p.cost_per_unit,
            percentage_of_total: percentage(p.cost_per_unit, total),
        })
        .collect()
}

/// [`breakdown`] together with the total it was computed against
pub fn cost_breakdown(providers: &[ProviderRecord]) -> CostBreakdown {
    let shares = breakdown(providers);
    let total_cost = shares.iter().map(|s| s.absolute_cost).sum();

    let result = CostBreakdown { total_cost, shares };
    debug!(
        providers = result.shares.len(),
        total_cost = result.total_cost,
        percentage_sum = result.percentage_sum(),
        "Computed cost breakdown"
    );
    result
}

fn percentage(part: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    // f64::round rounds half away from zero, which is half-up for costs
    (100.0 * part / total).round()
}
