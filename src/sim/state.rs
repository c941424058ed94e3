//! Game state and deal records
//!
//! The orchestrator owns `GameState`; the core only reads it, except for
//! `active_events`, which the event engine appends to and prunes.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::EventCard;

/// Difficulty mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Covenant limits written into a deal's debt package
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Covenants {
    /// Maximum leverage (debt / EBITDA)
    #[serde(rename = "Lmax")]
    pub l_max: f64,
    /// Minimum interest coverage (EBITDA / interest)
    #[serde(rename = "Imin")]
    pub i_min: f64,
}

/// Deal financials (USD mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealMetrics {
    pub ebitda: f64,
    pub revenue: f64,
}

/// Deal risk/performance meters, roughly 0-100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealMeters {
    pub fragility: f64,
    pub execution: f64,
    pub momentum: f64,
}

/// An acquisition target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: String,
    pub name: String,
    pub sector: String,
    /// Fair-value EBITDA multiple rivals anchor on
    pub base_multiple: f64,
    /// Multiple the player bids
    pub entry_multiple: f64,
    /// Debt / EBITDA, always positive
    pub leverage: f64,
    pub covenants: Covenants,
    pub public: bool,
    pub metrics: DealMetrics,
    pub meters: DealMeters,
}

/// Firm capabilities and reputation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Firm {
    pub reputation: f64,
    pub lender_trust: f64,
    pub lp_trust: f64,
    pub audit_comfort: f64,
    pub board_gov: f64,
    pub ops_capacity: f64,
    pub culture: f64,
}

/// The fund being deployed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    pub id: String,
    pub vintage: u32,
    pub size: f64,
    pub cash: f64,
    pub undrawn: f64,
    /// Distributions to paid-in capital
    pub dpi: f64,
    /// Residual value to paid-in capital
    pub rvpi: f64,
    /// Total value to paid-in capital
    pub tvpi: f64,
    pub net_irr: f64,
}

/// An event card in play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEvent {
    /// `evt_{day}_{card_id}`
    pub id: String,
    /// Definition, shared with the deck it was drawn from
    pub card: Arc<EventCard>,
    /// Absolute day the event expires on
    pub ends_on_day: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<String>,
}

impl ActiveEvent {
    /// Build the active instance of `card` drawn on `day`
    pub fn from_card(card: Arc<EventCard>, day: u32) -> Self {
        Self {
            id: format!("evt_{}_{}", day, card.id),
            ends_on_day: day.saturating_add(card.timer_days),
            card,
            deal_id: None,
        }
    }

    /// Attach the event to a deal
    pub fn for_deal(mut self, deal_id: impl Into<String>) -> Self {
        self.deal_id = Some(deal_id.into());
        self
    }

    /// Whole days left before expiry (0 once expired)
    pub fn days_remaining(&self, day: u32) -> u32 {
        self.ends_on_day.saturating_sub(day)
    }

    pub fn is_live(&self, day: u32) -> bool {
        self.ends_on_day > day
    }
}

/// Complete game state, owned by the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub mode: Mode,
    pub day: u32,
    pub week: u32,
    pub quarter: u32,
    /// Run seed for reproducibility
    pub seed: u32,
    pub firm: Firm,
    pub fund: Fund,
    pub deals: Vec<Deal>,
    pub active_events: Vec<ActiveEvent>,
    /// Candidate deals not yet closed
    pub pipeline: Vec<Deal>,
    #[serde(default)]
    pub kpis: BTreeMap<String, f64>,
}
