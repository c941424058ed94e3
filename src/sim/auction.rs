//! Deal auction resolution
//!
//! Rivals bid around the deal's base multiple with noise scaled by their
//! indiscipline and market heat. Rivals draw from the generator strictly in
//! input order, two draws each, so rival ordering is part of the replay
//! contract.

use serde::{Deserialize, Serialize};

use super::prng::Prng;
use super::state::Deal;
use crate::config::RivalArchetype;
use crate::consts::*;

/// Who took the deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Player,
    Rival,
    /// Rivals priced the deal out of reach; the player walked
    Walk,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::Player => "player",
            Winner::Rival => "rival",
            Winner::Walk => "walk",
        }
    }
}

/// Outcome of one auction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionResult {
    pub winner: Winner,
    /// EBITDA multiple the auction cleared at
    pub clearing_multiple: f64,
    /// Winning rival, set only when `winner` is `Rival`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rival_id: Option<String>,
    /// Bids in rival order (for display)
    #[serde(default)]
    pub rival_bids: Vec<f64>,
}

/// One rival's bid; consumes two draws (noise, then premium)
fn rival_bid(prng: &mut Prng, deal: &Deal, rival: &RivalArchetype, heat: f64) -> f64 {
    let spread = (1.0 - rival.discipline) * (RIVAL_NOISE_BASE + RIVAL_NOISE_HEAT * heat);
    let noise = spread * prng.range(-1.0, 1.0);
    let premium = prng.range(0.0, 1.0);
    (deal.base_multiple + noise + premium).max(RIVAL_BID_FLOOR)
}

/// Resolve an auction for `deal` against `rivals` at market `heat` (0-1)
///
/// The player bids `deal.entry_multiple`. With no rivals the player wins
/// outright and no draws are consumed. Otherwise each rival consumes two
/// draws; the comparison draw that decides a player win is committed only
/// when the player actually wins.
pub fn run_auction(
    prng: &mut Prng,
    deal: &Deal,
    rivals: &[RivalArchetype],
    heat: f64,
) -> AuctionResult {
    let player_bid = deal.entry_multiple;

    if rivals.is_empty() {
        log::debug!("Auction {}: uncontested at {:.2}x", deal.id, player_bid);
        return AuctionResult {
            winner: Winner::Player,
            clearing_multiple: player_bid,
            rival_id: None,
            rival_bids: Vec::new(),
        };
    }

    let rival_bids: Vec<f64> = rivals
        .iter()
        .map(|rival| {
            let bid = rival_bid(prng, deal, rival, heat);
            log::trace!("Auction {}: rival {} bids {:.4}x", deal.id, rival.id, bid);
            bid
        })
        .collect();

    // First strict maximum wins ties
    let mut top = 0;
    for (i, &bid) in rival_bids.iter().enumerate().skip(1) {
        if bid > rival_bids[top] {
            top = i;
        }
    }
    let max_rival_bid = rival_bids[top];

    let mut probe = *prng;
    let hurdle = max_rival_bid * (1.0 + PLAYER_CLEAR_MARGIN * probe.range(0.0, 1.0));

    let result = if player_bid >= hurdle {
        *prng = probe;
        AuctionResult {
            winner: Winner::Player,
            clearing_multiple: player_bid,
            rival_id: None,
            rival_bids,
        }
    } else if player_bid < max_rival_bid * WALK_AWAY_RATIO {
        AuctionResult {
            winner: Winner::Walk,
            clearing_multiple: max_rival_bid,
            rival_id: None,
            rival_bids,
        }
    } else {
        AuctionResult {
            winner: Winner::Rival,
            clearing_multiple: max_rival_bid,
            rival_id: Some(rivals[top].id.clone()),
            rival_bids,
        }
    };

    log::debug!(
        "Auction {}: {} at {:.2}x (player {:.2}x, top rival {:.2}x)",
        deal.id,
        result.winner.as_str(),
        result.clearing_multiple,
        player_bid,
        max_rival_bid
    );
    result
}
