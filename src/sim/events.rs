//! Event deck draws and expiry

use std::sync::Arc;

use super::prng::Prng;
use super::state::{ActiveEvent, GameState};
use crate::config::EventDeck;
use crate::error::SimError;

/// Draw one card uniformly from `deck` and put it in play on `current_day`
///
/// Consumes one draw. Fails on an empty deck without touching the generator.
pub fn spawn_event_from_deck(
    prng: &mut Prng,
    deck: &EventDeck,
    current_day: u32,
) -> Result<ActiveEvent, SimError> {
    if deck.events.is_empty() {
        return Err(SimError::EmptyInput { what: "event deck" });
    }
    let card = prng.pick(&deck.events)?;
    let event = ActiveEvent::from_card(Arc::clone(card), current_day);
    log::debug!(
        "Day {}: spawned {} (ends day {})",
        current_day,
        event.id,
        event.ends_on_day
    );
    Ok(event)
}

/// Put a specific card in play, optionally tied to a deal
///
/// Returns `None` if the deck has no card with that id. No draws.
pub fn spawn_event_by_id(
    deck: &EventDeck,
    card_id: &str,
    current_day: u32,
    deal_id: Option<&str>,
) -> Option<ActiveEvent> {
    let card = deck.card(card_id)?;
    let mut event = ActiveEvent::from_card(Arc::clone(card), current_day);
    if let Some(deal_id) = deal_id {
        event = event.for_deal(deal_id);
    }
    log::debug!("Day {}: triggered {}", current_day, event.id);
    Some(event)
}

/// Drop events that have run out, keeping the rest in order
///
/// An event is kept only while `ends_on_day > state.day`; one ending today
/// is removed. Returns how many were expired.
pub fn advance_events(state: &mut GameState) -> usize {
    let day = state.day;
    let before = state.active_events.len();
    state.active_events.retain(|event| event.is_live(day));
    let expired = before - state.active_events.len();
    if expired > 0 {
        log::debug!("Day {}: {} event(s) expired", day, expired);
    }
    expired
}
