//! Weather results and the carry-over weather generator.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::content::Compendium;
use crate::weighted::weighted_choice;

/// Sentinel row label in the weather-by-season grid meaning "keep
/// yesterday's weather". It has no definition of its own.
pub const NO_CHANGE: &str = "No Change";

/// Weather generation retries "No Change" this many times on day 1 before
/// falling back to [`Weather::clear`].
const MAX_ATTEMPTS: u32 = 100;

/// Weather conditions for one day.
///
/// Each day's weather is an independent value: a "No Change" outcome copies
/// the previous day's name and effects rather than aliasing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weather {
    /// Weather name, `None` only before anything was generated.
    pub name: Option<String>,
    /// Effect tags, matched against rest-check weather modifiers.
    pub effects: Vec<String>,
}

impl Weather {
    /// The deterministic fallback used when a season has no selectable
    /// weather or the retry budget runs out.
    pub fn clear() -> Self {
        Self {
            name: Some("Clear".to_string()),
            effects: Vec::new(),
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            None => write!(f, "No weather generated"),
            Some(name) if self.effects.is_empty() => write!(f, "{name}"),
            Some(name) => write!(f, "{name} ({})", self.effects.join(", ")),
        }
    }
}

/// Generate weather for a day.
///
/// Selects from the season's positive-weight entries. A "No Change" result
/// copies `previous`; on day 1 (`previous` is `None`) it is re-rolled. If
/// the season has no positive weights, or the attempt budget is exhausted,
/// the result is the [`Weather::clear`] fallback — a defined degraded mode,
/// never an error.
pub fn roll_weather(
    season: &str,
    previous: Option<&Weather>,
    tables: &Compendium,
    rng: &mut StdRng,
) -> Weather {
    let Some(weights) = tables.season_weights().column(season) else {
        log::warn!("season \"{season}\" missing from the weather grid");
        return Weather::clear();
    };

    for attempt in 1..=MAX_ATTEMPTS {
        let selected = match weighted_choice(&weights, rng) {
            Ok(name) => name,
            Err(_) => {
                log::warn!("no selectable weather for season \"{season}\"");
                return Weather::clear();
            }
        };

        if selected == NO_CHANGE {
            match previous {
                None => {
                    log::debug!("attempt {attempt}: \"No Change\" on day 1, re-rolling");
                    continue;
                }
                Some(prev) => {
                    log::info!("weather: No Change (keeping {:?})", prev.name);
                    return Weather {
                        name: prev.name.clone(),
                        effects: prev.effects.clone(),
                    };
                }
            }
        }

        // An undefined weather name keeps its label but has no effects.
        let effects = tables
            .weather(selected)
            .map(|def| def.effects.clone())
            .unwrap_or_default();
        log::info!("weather: {selected}");
        return Weather {
            name: Some(selected.to_string()),
            effects,
        };
    }

    log::warn!("weather generation exhausted {MAX_ATTEMPTS} attempts, defaulting to Clear");
    Weather::clear()
}
