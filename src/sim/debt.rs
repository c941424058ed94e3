//! Debt pricing
//!
//! Spread is built up from additive components in basis points and floored.
//! Pure arithmetic: no draws, no I/O.

use serde::{Deserialize, Serialize};

use crate::config::LenderPolicy;
use crate::consts::*;

/// Spread build-up, all in basis points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadComponents {
    pub base_spread: f64,
    /// 100 bps per turn of leverage above 4x
    pub leverage_adj: f64,
    /// 2 bps per $mm below a $50mm deal
    pub size_adj: f64,
    pub cov_lite_premium: f64,
    /// 2 bps per point of lender trust below 50 (negative above)
    pub trust_adj: f64,
    /// 100 bps per risk level point
    pub risk_adj: f64,
    /// 25 bps per reputation tier, subtracted
    pub reputation_discount: f64,
}

impl SpreadComponents {
    /// Sum of components before the spread floor
    pub fn total_unfloored(&self) -> f64 {
        self.base_spread
            + self.leverage_adj
            + self.size_adj
            + self.cov_lite_premium
            + self.trust_adj
            + self.risk_adj
            - self.reputation_discount
    }
}

/// Priced debt terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebtQuote {
    /// All-in coupon (base rate plus spread, same units as the base rate)
    pub coupon_rate: f64,
    pub spread_bps: f64,
    pub base_rate: f64,
    /// Original-issue-discount fee, percent of principal
    pub fees_oid_pct: f64,
    pub components: SpreadComponents,
}

/// Price a loan
///
/// `size_mm` is deal size in $mm, `lender_trust` is on the firm's 0-100
/// scale and `risk_level` is the macro `R` indicator. The spread never drops
/// below 150 bps. The lender policy is part of the pricing contract but the
/// current formula does not read it.
#[allow(clippy::too_many_arguments)]
pub fn price_debt(
    base_rate: f64,
    leverage: f64,
    size_mm: f64,
    cov_lite: bool,
    lender_trust: f64,
    risk_level: f64,
    reputation_tier: u32,
    _lender_policy: &LenderPolicy,
) -> DebtQuote {
    let size_adj = if size_mm < SMALL_DEAL_MM {
        ((SMALL_DEAL_MM - size_mm) * 2.0).max(0.0)
    } else {
        0.0
    };

    let components = SpreadComponents {
        base_spread: BASE_SPREAD_BPS,
        leverage_adj: ((leverage - LEVERAGE_NEUTRAL) * 100.0).max(0.0),
        size_adj,
        cov_lite_premium: if cov_lite { COV_LITE_PREMIUM_BPS } else { 0.0 },
        trust_adj: (TRUST_NEUTRAL - lender_trust) * 2.0,
        risk_adj: risk_level * 100.0,
        reputation_discount: reputation_tier as f64 * REPUTATION_DISCOUNT_BPS,
    };

    let raw = components.total_unfloored();
    let spread_bps = raw.max(SPREAD_FLOOR_BPS);
    if spread_bps > raw {
        log::debug!("Spread {:.1} bps floored at {} bps", raw, SPREAD_FLOOR_BPS);
    }

    DebtQuote {
        coupon_rate: base_rate + spread_bps / 10_000.0,
        spread_bps,
        base_rate,
        fees_oid_pct: 1.0 + 0.3 * risk_level,
        components,
    }
}
