//! Encounter results and the overland/site encounter generators.
//!
//! Generation never fails: any lookup miss degrades to the empty "no
//! encounter" result and is logged. The caller always gets a valid
//! [`Encounter`].

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::content::Compendium;
use crate::percent::parse_percentage;
use crate::tables::{TimeSlot, Watch};
use crate::weighted::weighted_choice;

/// A single encounter occurrence, or the absence of one.
///
/// `name == None` means "no encounter"; in that state the sparks are empty
/// and the other fields are `None`. A populated encounter carries the full
/// static definition plus the time label it was rolled for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    /// Encounter name, or `None` for "no encounter".
    pub name: Option<String>,
    /// The watch or time-slot label this was rolled for.
    pub time: Option<String>,
    /// Ordered GM prompt strings.
    pub sparks: Vec<String>,
    /// GM-facing description.
    pub description: Option<String>,
    /// Habitat tag.
    pub habitat: Option<String>,
}

impl Encounter {
    /// The "no encounter" value.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether an actual encounter was generated.
    pub fn is_encounter(&self) -> bool {
        self.name.is_some()
    }
}

impl std::fmt::Display for Encounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.name, &self.time) {
            (Some(name), Some(time)) => write!(f, "{name} at {time}"),
            (Some(name), None) => write!(f, "{name}"),
            _ => write!(f, "No Encounter"),
        }
    }
}

/// Roll an overland encounter for one watch.
///
/// When an overlay is present, an independent 50/50 coin picks the active
/// zone (base or overlay) for this call only; the choice is re-rolled on
/// every regeneration. The active zone's encounter chance gates whether
/// anything appears at all, then the 3D weight grid drives selection.
pub fn roll_overland_encounter(
    zone: &str,
    overlay: Option<&str>,
    watch: Watch,
    tables: &Compendium,
    rng: &mut StdRng,
) -> Encounter {
    let active = match overlay {
        Some(ov) if rng.random_bool(0.5) => ov,
        _ => zone,
    };

    let Some(chance) = encounter_chance(active, tables) else {
        return Encounter::empty();
    };

    let roll: f64 = rng.random();
    if roll > chance {
        log::debug!("{watch}: no encounter (rolled {roll:.2} > {chance:.2})");
        return Encounter::empty();
    }

    let Some(weights) = tables.watch_weights().column(active, watch) else {
        log::warn!("zone \"{active}\" missing from the encounter weight grid");
        return Encounter::empty();
    };

    pick_and_populate(&weights, watch.label(), tables, rng)
}

/// Roll a site encounter for one time slot.
///
/// Same gate-then-select structure as the overland roll, but against the
/// 2D zone-only grid — no watch dimension, no overlay.
pub fn roll_site_encounter(
    zone: &str,
    slot: TimeSlot,
    tables: &Compendium,
    rng: &mut StdRng,
) -> Encounter {
    let Some(chance) = encounter_chance(zone, tables) else {
        return Encounter::empty();
    };

    let roll: f64 = rng.random();
    if roll > chance {
        log::debug!("{slot}: no encounter (rolled {roll:.2} > {chance:.2})");
        return Encounter::empty();
    }

    let Some(weights) = tables.zone_weights().column(zone) else {
        log::warn!("zone \"{zone}\" missing from the encounter weight grid");
        return Encounter::empty();
    };

    pick_and_populate(&weights, slot.label(), tables, rng)
}

fn encounter_chance(zone: &str, tables: &Compendium) -> Option<f64> {
    let Some(def) = tables.zone(zone) else {
        log::warn!("unknown zone \"{zone}\"");
        return None;
    };
    match parse_percentage(&def.encounter_chance) {
        Ok(chance) => Some(chance),
        Err(e) => {
            log::warn!("zone \"{zone}\" encounter chance: {e}");
            None
        }
    }
}

fn pick_and_populate(
    weights: &[(String, f64)],
    time_label: &str,
    tables: &Compendium,
    rng: &mut StdRng,
) -> Encounter {
    let selected = match weighted_choice(weights, rng) {
        Ok(name) => name,
        Err(_) => {
            log::debug!("{time_label}: no encounters with positive weight here");
            return Encounter::empty();
        }
    };

    let Some(def) = tables.encounter(selected) else {
        log::warn!("selected encounter \"{selected}\" has no definition");
        return Encounter::empty();
    };

    log::info!("{time_label} encounter: {selected}");
    Encounter {
        name: Some(def.name.clone()),
        time: Some(time_label.to_string()),
        sparks: def.sparks.clone(),
        description: Some(def.description.clone()),
        habitat: Some(def.habitat.clone()),
    }
}
