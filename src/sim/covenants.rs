//! Covenant monitoring

use serde::{Deserialize, Serialize};

use super::state::Deal;
use crate::bounded;
use crate::consts::*;

/// Which covenant a deal tripped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CovenantKind {
    Leverage,
    Coverage,
}

/// Result of testing a deal against its own covenant limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CovenantTest {
    pub breached: bool,
    pub which: Option<CovenantKind>,
    /// Estimated interest coverage used for the coverage test
    pub coverage: f64,
}

/// Whether the deal's combined breach score exceeds the limit
///
/// Score = (0.2 + 0.3 * risk) + leverage turns above 4x * 0.1 + fragility / 1000.
pub fn check_covenants(deal: &Deal, risk_factor: f64) -> bool {
    let breach_threshold = 0.2 + risk_factor * 0.3;
    let leverage_penalty = ((deal.leverage - LEVERAGE_NEUTRAL) * 0.1).max(0.0);
    let fragility_penalty = deal.meters.fragility / 1000.0;

    breach_threshold + leverage_penalty + fragility_penalty > BREACH_LIMIT
}

/// Covenant headroom in percent, clamped to [0, 50]
pub fn calculate_covenant_headroom(deal: &Deal, risk_factor: f64) -> f64 {
    let base_headroom = 20.0;
    let leverage_adj = (5.0 - deal.leverage) * 5.0;
    let execution_adj = (deal.meters.execution - 50.0) / 10.0;
    let risk_adj = -risk_factor * 10.0;

    bounded(
        base_headroom + leverage_adj + execution_adj + risk_adj,
        HEADROOM_MIN_PCT,
        HEADROOM_MAX_PCT,
    )
}

/// Test the deal against its `Lmax` / `Imin` limits
///
/// Leverage is tested first. Coverage is estimated as
/// `2.2 - 0.2 * risk - 0.1 * fragility / 20`.
pub fn check_covenant_limits(deal: &Deal, risk_factor: f64) -> CovenantTest {
    let coverage = 2.2 - 0.2 * risk_factor - 0.1 * (deal.meters.fragility / 20.0);

    let which = if deal.leverage > deal.covenants.l_max {
        Some(CovenantKind::Leverage)
    } else if coverage < deal.covenants.i_min {
        Some(CovenantKind::Coverage)
    } else {
        None
    };

    CovenantTest {
        breached: which.is_some(),
        which,
        coverage,
    }
}
