//! Macro step: scenario series to market indicators
//!
//! Pure lookup plus arithmetic. Missing or empty series fall back to fixed
//! defaults instead of failing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bounded;
use crate::config::{EconomyCoeffs, Scenario};
use crate::consts::*;

pub const FED_FUNDS_SERIES: &str = "fed_funds_rate_pct";
pub const GDP_GROWTH_SERIES: &str = "gdp_growth_pct";
pub const CREDIT_SPREAD_SERIES: &str = "credit_spread_bps";

/// Sectors with a tracked base multiple
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Technology,
    Healthcare,
    Industrials,
    Consumer,
    Financial,
    Energy,
    Materials,
    RealEstate,
    Utilities,
}

impl Sector {
    pub const ALL: [Sector; 9] = [
        Sector::Technology,
        Sector::Healthcare,
        Sector::Industrials,
        Sector::Consumer,
        Sector::Financial,
        Sector::Energy,
        Sector::Materials,
        Sector::RealEstate,
        Sector::Utilities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Technology => "technology",
            Sector::Healthcare => "healthcare",
            Sector::Industrials => "industrials",
            Sector::Consumer => "consumer",
            Sector::Financial => "financial",
            Sector::Energy => "energy",
            Sector::Materials => "materials",
            Sector::RealEstate => "real_estate",
            Sector::Utilities => "utilities",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Sector::ALL.into_iter().find(|sector| sector.as_str() == s)
    }

    /// EBITDA multiple at neutral sentiment
    pub fn base_multiple(&self) -> f64 {
        match self {
            Sector::Technology => 8.5,
            Sector::Healthcare => 7.0,
            Sector::Industrials => 6.5,
            Sector::Consumer => 7.5,
            Sector::Financial => 5.5,
            Sector::Energy => 6.0,
            Sector::Materials => 5.8,
            Sector::RealEstate => 6.2,
            Sector::Utilities => 5.0,
        }
    }

    /// Multiple turns gained per point of market sentiment
    pub fn sentiment_sensitivity(&self) -> f64 {
        match self {
            Sector::Technology => 0.5,
            Sector::Healthcare => 0.3,
            Sector::Industrials => 0.4,
            Sector::Consumer => 0.3,
            Sector::Financial => 0.6,
            Sector::Energy => 0.7,
            Sector::Materials => 0.5,
            Sector::RealEstate => 0.4,
            Sector::Utilities => 0.2,
        }
    }
}

/// Market indicators for one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroIndicators {
    /// Market sentiment, [-2, 2]
    #[serde(rename = "M")]
    pub m: f64,
    /// Risk level, [0, 3]
    #[serde(rename = "R")]
    pub r: f64,
    pub fed_funds_rate: f64,
    pub gdp_growth: f64,
    pub credit_spread: f64,
    #[serde(rename = "baseSectorMultiple")]
    pub base_sector_multiple: BTreeMap<Sector, f64>,
}

impl MacroIndicators {
    pub fn sector_multiple(&self, sector: Sector) -> f64 {
        self.base_sector_multiple
            .get(&sector)
            .copied()
            .unwrap_or_else(|| sector.base_multiple())
    }
}

fn series_value(scenario: &Scenario, name: &str, index: usize, default: f64) -> f64 {
    match scenario.series(name) {
        Some(values) if !values.is_empty() => values[index.min(values.len() - 1)],
        _ => {
            log::debug!(
                "Scenario {}: no `{}` data, using {}",
                scenario.scenario_id,
                name,
                default
            );
            default
        }
    }
}

/// Compute market indicators for `step`
///
/// The step index is clamped to the fed funds series length (steps past the
/// end hold the last value); every other series is clamped to its own
/// length as well.
pub fn compute_macro_step(scenario: &Scenario, _economy: &EconomyCoeffs, step: usize) -> MacroIndicators {
    let index = match scenario.series(FED_FUNDS_SERIES) {
        Some(values) if !values.is_empty() => step.min(values.len() - 1),
        _ => 0,
    };

    let fed_funds_rate = series_value(scenario, FED_FUNDS_SERIES, index, DEFAULT_FED_FUNDS_PCT);
    let gdp_growth = series_value(scenario, GDP_GROWTH_SERIES, index, DEFAULT_GDP_GROWTH_PCT);
    let credit_spread =
        series_value(scenario, CREDIT_SPREAD_SERIES, index, DEFAULT_CREDIT_SPREAD_BPS);

    let m = bounded((gdp_growth - 1.0) / 3.0, SENTIMENT_MIN, SENTIMENT_MAX);
    let r = bounded(credit_spread / 300.0, RISK_MIN, RISK_MAX);

    let base_sector_multiple = Sector::ALL
        .into_iter()
        .map(|sector| (sector, sector.base_multiple() + m * sector.sentiment_sensitivity()))
        .collect();

    MacroIndicators {
        m,
        r,
        fed_funds_rate,
        gdp_growth,
        credit_spread,
        base_sector_multiple,
    }
}
