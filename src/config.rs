//! Typed configuration records
//!
//! Everything here is supplied by the external loader and treated as
//! read-only by the simulation. Documents are parsed from JSON text already
//! in memory; the core never touches the filesystem.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::state::Covenants;

/// A loosely-typed configuration entry
///
/// Stands in for the free-form dictionaries of the config files
/// (coefficient tables, event triggers, fee schedules).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<ConfigValue>),
    Table(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ConfigValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ConfigValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a key when this value is a table
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        match self {
            ConfigValue::Table(t) => t.get(key),
            _ => None,
        }
    }
}

/// Free-form keyed table
pub type ConfigTable = BTreeMap<String, ConfigValue>;

/// A JSON configuration document
pub trait ConfigDocument: DeserializeOwned {
    /// Document name used in errors and logs
    const NAME: &'static str;

    /// Check constraints serde cannot express
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Parse and validate a document from JSON text
    fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        log::debug!("Loaded {} document", Self::NAME);
        Ok(doc)
    }
}

fn ensure_unique<'a>(
    document: &'static str,
    what: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigError::invalid(
                document,
                format!("duplicate {what} `{id}`"),
            ));
        }
    }
    Ok(())
}

// === Difficulty ===

/// Feature gates controlled by difficulty level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyGates {
    pub enable_mezz: bool,
    #[serde(rename = "enable_2L")]
    pub enable_2l: bool,
    pub enable_covlite: bool,
    pub enable_hedging: bool,
    pub enable_antitrust: bool,
    pub enable_hostile: bool,
    pub enable_greenmail: bool,
    pub enable_club_deals: bool,
    pub enable_pacman: bool,
    pub enable_continuation: bool,
    pub enable_cyber: bool,
    pub enable_labor: bool,
}

/// Multipliers that scale with difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyMultipliers {
    pub macro_vol: f64,
    pub rivals_count: u32,
    pub snipe_odds: f64,
    pub spread_adders_bps: f64,
    pub leverage_cap: f64,
    pub covenant_headroom_pct: f64,
    pub info_noise: f64,
    pub crisis_timer_scale: f64,
    pub trust_decay_scale: f64,
    pub score_mult: f64,
}

impl Default for DifficultyMultipliers {
    fn default() -> Self {
        Self {
            macro_vol: 1.0,
            rivals_count: 3,
            snipe_odds: 0.1,
            spread_adders_bps: 100.0,
            leverage_cap: 5.0,
            covenant_headroom_pct: 10.0,
            info_noise: 0.1,
            crisis_timer_scale: 1.0,
            trust_decay_scale: 1.0,
            score_mult: 1.0,
        }
    }
}

/// Complete difficulty configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPack {
    pub id: String,
    pub version: String,
    #[serde(default)]
    pub gates: DifficultyGates,
    #[serde(default)]
    pub multipliers: DifficultyMultipliers,
}

impl ConfigDocument for DifficultyPack {
    const NAME: &'static str = "DifficultyPack";
}

// === Macro scenarios ===

/// Sampling frequency of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Quarterly,
}

/// One named macro series
///
/// A constant reads as a one-element sequence. Nested tables (per-sector
/// series and the like) are carried through but never read as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesData {
    Values(Vec<f64>),
    Constant(f64),
    Nested(BTreeMap<String, SeriesData>),
}

impl SeriesData {
    /// Numeric view of the series, `None` for nested tables
    pub fn values(&self) -> Option<&[f64]> {
        match self {
            SeriesData::Values(v) => Some(v),
            SeriesData::Constant(c) => Some(std::slice::from_ref(c)),
            SeriesData::Nested(_) => None,
        }
    }
}

/// Macro economic scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub scenario_id: String,
    pub start_date: String,
    pub frequency: Frequency,
    pub duration_steps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<Vec<String>>,
    #[serde(default)]
    pub series: BTreeMap<String, SeriesData>,
}

impl Scenario {
    /// Numeric values of a named series, if present and numeric
    pub fn series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).and_then(SeriesData::values)
    }
}

impl ConfigDocument for Scenario {
    const NAME: &'static str = "Scenario";
}

/// Collection of macro scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroManifest {
    pub version: String,
    pub scenarios: Vec<Scenario>,
}

impl MacroManifest {
    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.scenario_id == id)
    }
}

impl ConfigDocument for MacroManifest {
    const NAME: &'static str = "MacroManifest";

    fn validate(&self) -> Result<(), ConfigError> {
        ensure_unique(
            Self::NAME,
            "scenario id",
            self.scenarios.iter().map(|s| s.scenario_id.as_str()),
        )
    }
}

/// Economic coefficient tables, passed through to the macro step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomyCoeffs {
    pub version: String,
    #[serde(default)]
    pub macro_to_game: ConfigTable,
    #[serde(default)]
    pub pricing: ConfigTable,
    #[serde(default)]
    pub defaults: ConfigTable,
}

impl ConfigDocument for EconomyCoeffs {
    const NAME: &'static str = "EconomyCoeffs";
}

// === Rivals ===

/// Rival sniping probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnipeOdds {
    pub base: f64,
    pub hot_sector_bonus: f64,
}

/// AI rival behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RivalArchetype {
    pub id: String,
    pub snipe_odds: SnipeOdds,
    pub hostile_pref: f64,
    pub leak_rate: f64,
    /// 0 = undisciplined (noisy bids), 1 = bids at fair value
    pub discipline: f64,
    pub legal_aggressiveness: f64,
}

impl RivalArchetype {
    fn check(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.discipline) {
            return Err(ConfigError::invalid(
                "RivalArchetype",
                format!(
                    "rival `{}` discipline {} outside [0, 1]",
                    self.id, self.discipline
                ),
            ));
        }
        Ok(())
    }
}

impl ConfigDocument for RivalArchetype {
    const NAME: &'static str = "RivalArchetype";

    fn validate(&self) -> Result<(), ConfigError> {
        self.check()
    }
}

/// The rival archetypes file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RivalRoster {
    pub version: String,
    pub archetypes: Vec<RivalArchetype>,
}

impl ConfigDocument for RivalRoster {
    const NAME: &'static str = "RivalRoster";

    fn validate(&self) -> Result<(), ConfigError> {
        ensure_unique(
            Self::NAME,
            "rival id",
            self.archetypes.iter().map(|r| r.id.as_str()),
        )?;
        self.archetypes.iter().try_for_each(RivalArchetype::check)
    }
}

// === Lenders ===

/// Lender flexibility band for one reputation/trust tier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexBand {
    pub base: f64,
    pub reputation_adj: f64,
    pub trust_adj: f64,
}

/// Default covenant levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CovDefaults {
    #[serde(rename = "Lmax")]
    pub l_max: f64,
    #[serde(rename = "Imin")]
    pub i_min: f64,
}

impl Default for CovDefaults {
    fn default() -> Self {
        Self {
            l_max: 5.0,
            i_min: 1.25,
        }
    }
}

/// Lender behaviour and pricing policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LenderPolicy {
    pub version: String,
    #[serde(default)]
    pub trust_memory: ConfigTable,
    #[serde(default)]
    pub flex_bands: BTreeMap<String, FlexBand>,
    #[serde(default)]
    pub amend_fee_schedule: ConfigTable,
    #[serde(default)]
    pub cov_defaults: CovDefaults,
}

impl LenderPolicy {
    /// Covenant package a lender writes when the deal specifies none
    pub fn default_covenants(&self) -> Covenants {
        Covenants {
            l_max: self.cov_defaults.l_max,
            i_min: self.cov_defaults.i_min,
        }
    }
}

impl ConfigDocument for LenderPolicy {
    const NAME: &'static str = "LenderPolicy";
}

// === LPs ===

/// Limited partner persona
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpPersona {
    pub id: String,
    pub patience: f64,
    pub fee_sensitivity: f64,
    pub esg_strictness: f64,
    #[serde(default)]
    pub side_letters: ConfigTable,
}

/// The LP personas file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpRoster {
    pub version: String,
    pub personas: Vec<LpPersona>,
}

impl ConfigDocument for LpRoster {
    const NAME: &'static str = "LpRoster";
}

// === Events ===

/// Event card rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// Player choice on an event card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventChoice {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reqs: Option<ConfigTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<ConfigTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_event: Option<String>,
}

/// Event card definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCard {
    pub id: String,
    pub rarity: Rarity,
    /// Trigger predicate, evaluated by the orchestrator
    #[serde(default)]
    pub trigger: ConfigTable,
    /// Days the event stays open once drawn
    pub timer_days: u32,
    pub text: String,
    #[serde(default)]
    pub choices: Vec<EventChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touches: Option<Vec<String>>,
}

/// Draw pool of event cards
///
/// Cards are shared with every `ActiveEvent` drawn from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDeck {
    pub version: String,
    pub events: Vec<Arc<EventCard>>,
}

impl EventDeck {
    pub fn card(&self, id: &str) -> Option<&Arc<EventCard>> {
        self.events.iter().find(|c| c.id == id)
    }
}

impl ConfigDocument for EventDeck {
    const NAME: &'static str = "EventDeck";

    fn validate(&self) -> Result<(), ConfigError> {
        ensure_unique(
            Self::NAME,
            "card id",
            self.events.iter().map(|c| c.id.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK_JSON: &str = r#"{
        "version": "1",
        "events": [
            {
                "id": "hostile_bid",
                "rarity": "rare",
                "trigger": { "min_day": 30, "requires_public": true },
                "timer_days": 7,
                "text": "A rival launches a hostile bid.",
                "choices": [
                    { "id": "fight", "label": "Fight it", "effects": { "reputation": 2 } },
                    { "id": "fold", "label": "Stand down" }
                ],
                "touches": ["reputation"]
            },
            {
                "id": "audit",
                "rarity": "common",
                "timer_days": 3,
                "text": "Auditors arrive."
            }
        ]
    }"#;

    #[test]
    fn test_parse_event_deck() {
        let deck = EventDeck::from_json_str(DECK_JSON).unwrap();
        assert_eq!(deck.events.len(), 2);

        let card = deck.card("hostile_bid").unwrap();
        assert_eq!(card.rarity, Rarity::Rare);
        assert_eq!(card.timer_days, 7);
        assert_eq!(card.trigger["min_day"], ConfigValue::Number(30.0));
        assert_eq!(card.trigger["requires_public"].as_flag(), Some(true));
        assert_eq!(card.choices[1].effects, None);

        let audit = deck.card("audit").unwrap();
        assert!(audit.trigger.is_empty());
        assert!(audit.choices.is_empty());
        assert!(deck.card("missing").is_none());
    }

    #[test]
    fn test_duplicate_card_ids_rejected() {
        let json = r#"{ "version": "1", "events": [
            { "id": "a", "rarity": "common", "timer_days": 1, "text": "x" },
            { "id": "a", "rarity": "rare", "timer_days": 2, "text": "y" }
        ] }"#;
        let err = EventDeck::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { document: "EventDeck", .. }));
    }

    #[test]
    fn test_unknown_rarity_is_malformed() {
        let json = r#"{ "version": "1", "events": [
            { "id": "a", "rarity": "mythic", "timer_days": 1, "text": "x" }
        ] }"#;
        assert!(matches!(
            EventDeck::from_json_str(json),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_scenario_series_shapes() {
        let json = r#"{
            "scenario_id": "gfc",
            "start_date": "2008-01-01",
            "frequency": "monthly",
            "duration_steps": 24,
            "series": {
                "fed_funds_rate_pct": [4.25, 3.0, 2.25],
                "gdp_growth_pct": 1.5,
                "base_sector_multiple": { "technology": [9.0, 8.5] }
            }
        }"#;
        let scenario = Scenario::from_json_str(json).unwrap();
        assert_eq!(scenario.frequency, Frequency::Monthly);
        assert_eq!(scenario.dates, None);
        assert_eq!(scenario.series("fed_funds_rate_pct"), Some(&[4.25, 3.0, 2.25][..]));
        assert_eq!(scenario.series("gdp_growth_pct"), Some(&[1.5][..]));
        assert_eq!(scenario.series("base_sector_multiple"), None);
        assert_eq!(scenario.series("credit_spread_bps"), None);
    }

    #[test]
    fn test_manifest_lookup_and_uniqueness() {
        let json = r#"{ "version": "1", "scenarios": [
            { "scenario_id": "base", "start_date": "2020-01-01", "frequency": "weekly", "duration_steps": 10 },
            { "scenario_id": "stress", "start_date": "2020-01-01", "frequency": "quarterly", "duration_steps": 8 }
        ] }"#;
        let manifest = MacroManifest::from_json_str(json).unwrap();
        assert_eq!(manifest.scenario("stress").unwrap().duration_steps, 8);
        assert!(manifest.scenario("boom").is_none());

        let dup = json.replace("\"stress\"", "\"base\"");
        assert!(MacroManifest::from_json_str(&dup).is_err());
    }

    #[test]
    fn test_difficulty_defaults() {
        let pack =
            DifficultyPack::from_json_str(r#"{ "id": "easy", "version": "1", "gates": { "enable_2L": true } }"#)
                .unwrap();
        assert!(pack.gates.enable_2l);
        assert!(!pack.gates.enable_mezz);
        assert_eq!(pack.multipliers, DifficultyMultipliers::default());
        assert_eq!(pack.multipliers.rivals_count, 3);
        assert_eq!(pack.multipliers.leverage_cap, 5.0);
    }

    #[test]
    fn test_rival_discipline_validated() {
        let json = r#"{ "version": "1", "archetypes": [
            { "id": "cowboy", "snipe_odds": { "base": 0.2, "hot_sector_bonus": 0.1 },
              "hostile_pref": 0.5, "leak_rate": 0.3, "discipline": 1.4, "legal_aggressiveness": 0.2 }
        ] }"#;
        let err = RivalRoster::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("cowboy"));

        let ok = json.replace("1.4", "0.4");
        let roster = RivalRoster::from_json_str(&ok).unwrap();
        assert_eq!(roster.archetypes[0].discipline, 0.4);
    }

    #[test]
    fn test_lender_policy_defaults() {
        let policy = LenderPolicy::from_json_str(
            r#"{ "version": "2", "flex_bands": { "tier1": { "base": 25 } },
                 "amend_fee_schedule": { "waiver": { "bps": 50 } } }"#,
        )
        .unwrap();
        assert_eq!(policy.cov_defaults, CovDefaults::default());
        assert_eq!(policy.flex_bands["tier1"].base, 25.0);
        assert_eq!(policy.flex_bands["tier1"].trust_adj, 0.0);
        assert_eq!(
            policy.amend_fee_schedule["waiver"].get("bps").and_then(ConfigValue::as_number),
            Some(50.0)
        );

        let cov = policy.default_covenants();
        assert_eq!(cov.l_max, 5.0);
        assert_eq!(cov.i_min, 1.25);
    }

    #[test]
    fn test_economy_coeffs_mixed_values() {
        let coeffs = EconomyCoeffs::from_json_str(
            r#"{ "version": "1",
                 "macro_to_game": { "sentiment_gain": 0.5, "label": "v1", "curve": [1, 2, 3] },
                 "pricing": { "enabled": false } }"#,
        )
        .unwrap();
        assert_eq!(coeffs.macro_to_game["sentiment_gain"].as_number(), Some(0.5));
        assert_eq!(coeffs.macro_to_game["label"].as_text(), Some("v1"));
        assert!(matches!(coeffs.macro_to_game["curve"], ConfigValue::List(ref v) if v.len() == 3));
        assert_eq!(coeffs.pricing["enabled"].as_flag(), Some(false));
        assert!(coeffs.defaults.is_empty());
    }
}
