//! EBITDA - private-equity management game, simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (PRNG, auctions, debt, covenants, macro, events)
//! - `config`: Typed configuration records supplied by the loader
//! - `error`: Failure kinds surfaced by the core

pub mod config;
pub mod error;
pub mod sim;

pub use error::{ConfigError, SimError};
pub use sim::Prng;

/// Simulation tuning constants
pub mod consts {
    /// Floor for any rival bid (EBITDA multiple)
    pub const RIVAL_BID_FLOOR: f64 = 3.0;
    /// Baseline share of rival bid noise at zero heat
    pub const RIVAL_NOISE_BASE: f64 = 0.4;
    /// Additional share of rival bid noise at full heat
    pub const RIVAL_NOISE_HEAT: f64 = 0.6;
    /// Player must clear the top rival bid by a random margin of up to 1%
    pub const PLAYER_CLEAR_MARGIN: f64 = 0.01;
    /// Player walks when their bid falls below this fraction of the top rival bid
    pub const WALK_AWAY_RATIO: f64 = 0.92;

    /// Debt spread components (basis points)
    pub const BASE_SPREAD_BPS: f64 = 300.0;
    pub const SPREAD_FLOOR_BPS: f64 = 150.0;
    pub const COV_LITE_PREMIUM_BPS: f64 = 75.0;
    pub const REPUTATION_DISCOUNT_BPS: f64 = 25.0;
    /// Leverage turns priced without a premium
    pub const LEVERAGE_NEUTRAL: f64 = 4.0;
    /// Deals below this size (USD mm) pay a size premium
    pub const SMALL_DEAL_MM: f64 = 50.0;
    /// Lender trust level priced without adjustment
    pub const TRUST_NEUTRAL: f64 = 50.0;

    /// Covenant breach trips above this combined score
    pub const BREACH_LIMIT: f64 = 0.4;
    /// Covenant headroom bounds (percent)
    pub const HEADROOM_MIN_PCT: f64 = 0.0;
    pub const HEADROOM_MAX_PCT: f64 = 50.0;

    /// Macro series fallbacks when the scenario has no data
    pub const DEFAULT_FED_FUNDS_PCT: f64 = 2.0;
    pub const DEFAULT_GDP_GROWTH_PCT: f64 = 2.5;
    pub const DEFAULT_CREDIT_SPREAD_BPS: f64 = 200.0;
    /// Market sentiment bounds
    pub const SENTIMENT_MIN: f64 = -2.0;
    pub const SENTIMENT_MAX: f64 = 2.0;
    /// Risk level bounds
    pub const RISK_MIN: f64 = 0.0;
    pub const RISK_MAX: f64 = 3.0;
}

/// Clamp `x` to `[lo, hi]`; a NaN input lands on `hi`
#[inline]
pub fn bounded(x: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(x))
}
