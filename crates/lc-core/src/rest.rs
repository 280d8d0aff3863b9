//! Rest-check information derived from season and weather.
//!
//! Pure derivation, no randomness: recomputed whenever the season or the
//! current weather changes.

use serde::{Deserialize, Serialize};

use crate::content::RestTables;
use crate::weather::Weather;

/// One rest DC row for a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestDc {
    /// Camp quality, e.g. "Exposed camp".
    pub camp: String,
    /// The DC text, e.g. "DC 12".
    pub dc: String,
}

/// A rest modifier triggered by a weather effect tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherModifier {
    /// The weather effect tag that triggers this rule.
    pub effect: String,
    /// Human-readable rule text.
    pub description: String,
    /// The modifier, e.g. "+2".
    pub modifier: String,
}

/// An always-listed situational rest modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SituationalModifier {
    /// The situation, e.g. "No fire".
    pub situation: String,
    /// The modifier, e.g. "+1".
    pub modifier: String,
}

/// Rest-check information for the current season and weather.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestInfo {
    /// The season's DC rows (empty if the season has none).
    pub rest_dcs: Vec<RestDc>,
    /// Weather modifiers whose trigger effect is in the current weather.
    pub weather_modifiers: Vec<WeatherModifier>,
    /// The full situational modifier list, unfiltered.
    pub situational_modifiers: Vec<SituationalModifier>,
}

/// Derive rest info for `season` under `weather`.
///
/// Weather modifiers are filtered to those whose trigger effect appears in
/// the current weather's effect list; no weather (or no effects) means no
/// weather modifiers.
pub fn derive_rest_info(
    season: &str,
    weather: Option<&Weather>,
    tables: &RestTables,
) -> RestInfo {
    let rest_dcs = tables.rest_dcs.get(season).cloned().unwrap_or_default();

    let weather_modifiers = match weather {
        Some(w) if !w.effects.is_empty() => tables
            .weather_modifiers
            .iter()
            .filter(|m| w.effects.contains(&m.effect))
            .cloned()
            .collect(),
        _ => Vec::new(),
    };

    RestInfo {
        rest_dcs,
        weather_modifiers,
        situational_modifiers: tables.situational_modifiers.clone(),
    }
}
