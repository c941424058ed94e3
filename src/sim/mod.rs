//! Deterministic simulation module
//!
//! All game arithmetic lives here. This module must be pure and deterministic:
//! - Seeded `Prng` only, drawn in a fixed order
//! - Stable iteration order (input order for rivals and cards)
//! - No I/O, no clocks, no global state

pub mod auction;
pub mod covenants;
pub mod debt;
pub mod events;
pub mod macro_step;
pub mod prng;
pub mod state;

pub use auction::{AuctionResult, Winner, run_auction};
pub use covenants::{
    CovenantKind, CovenantTest, calculate_covenant_headroom, check_covenant_limits,
    check_covenants,
};
pub use debt::{DebtQuote, SpreadComponents, price_debt};
pub use events::{advance_events, spawn_event_by_id, spawn_event_from_deck};
pub use macro_step::{MacroIndicators, Sector, compute_macro_step};
pub use prng::{Prng, SeedBank};
pub use state::{
    ActiveEvent, Covenants, Deal, DealMeters, DealMetrics, Firm, Fund, GameState, Mode,
};
