//! The overland session state machine.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::content::Compendium;
use crate::encounter::{Encounter, roll_overland_encounter};
use crate::rest::{RestInfo, derive_rest_info};
use crate::tables::Watch;
use crate::weather::{Weather, roll_weather};

/// One overland travel session: day counter, current weather, encounters
/// for the six watches, and derived rest info.
///
/// Weather is always regenerated before rest info, since rest info depends
/// on the current weather's effect tags.
pub struct OverlandSession {
    day: u32,
    weather: Option<Weather>,
    encounters: [Encounter; 6],
    rest_info: Option<RestInfo>,
    zone: String,
    overlay: Option<String>,
    season: String,
    rng: StdRng,
}

impl OverlandSession {
    /// Create a fresh session at day 0 with nothing generated.
    pub fn new(zone: impl Into<String>, season: impl Into<String>, seed: u64) -> Self {
        Self {
            day: 0,
            weather: None,
            encounters: Default::default(),
            rest_info: None,
            zone: zone.into(),
            overlay: None,
            season: season.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Days elapsed.
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Current weather, if a day has been generated.
    pub fn weather(&self) -> Option<&Weather> {
        self.weather.as_ref()
    }

    /// The encounter for a watch.
    pub fn encounter(&self, watch: Watch) -> &Encounter {
        &self.encounters[watch.index()]
    }

    /// Rest info for the current season and weather.
    pub fn rest_info(&self) -> Option<&RestInfo> {
        self.rest_info.as_ref()
    }

    /// The selected base zone.
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// The selected overlay zone, if any.
    pub fn overlay(&self) -> Option<&str> {
        self.overlay.as_deref()
    }

    /// The selected season.
    pub fn season(&self) -> &str {
        &self.season
    }

    /// Select a base zone. Takes effect on the next generation.
    pub fn set_zone(&mut self, zone: impl Into<String>) {
        self.zone = zone.into();
    }

    /// Select or clear the overlay zone.
    pub fn set_overlay(&mut self, overlay: Option<String>) {
        self.overlay = overlay;
    }

    /// Select a season. Takes effect on the next generation.
    pub fn set_season(&mut self, season: impl Into<String>) {
        self.season = season.into();
    }

    /// Return to day 0 with no weather, encounters, or rest info.
    pub fn reset(&mut self) {
        self.day = 0;
        self.weather = None;
        self.encounters = Default::default();
        self.rest_info = None;
        log::info!("overland reset to day 0");
    }

    /// Advance to the next day and generate all content.
    pub fn new_day(&mut self, tables: &Compendium) {
        self.day += 1;
        log::info!("overland: day {}", self.day);
        self.generate_all(tables);
    }

    /// Regenerate the current day's content without advancing the counter.
    pub fn regenerate_day(&mut self, tables: &Compendium) {
        log::info!("overland: regenerating day {}", self.day);
        self.generate_all(tables);
    }

    /// Regenerate only one watch's encounter using the current zone and
    /// overlay selection. Weather, rest info, and other watches are
    /// untouched.
    pub fn regenerate_watch(&mut self, watch: Watch, tables: &Compendium) {
        self.encounters[watch.index()] = roll_overland_encounter(
            &self.zone,
            self.overlay.as_deref(),
            watch,
            tables,
            &mut self.rng,
        );
    }

    /// Regenerate only the weather using the current season, then recompute
    /// rest info. Encounters are untouched.
    pub fn regenerate_weather(&mut self, tables: &Compendium) {
        self.generate_weather(tables);
        self.generate_rest_info(tables);
    }

    fn generate_all(&mut self, tables: &Compendium) {
        self.generate_weather(tables);
        for watch in Watch::ALL {
            self.regenerate_watch(watch, tables);
        }
        self.generate_rest_info(tables);
    }

    fn generate_weather(&mut self, tables: &Compendium) {
        let previous = self.weather.clone();
        self.weather = Some(roll_weather(
            &self.season,
            previous.as_ref(),
            tables,
            &mut self.rng,
        ));
    }

    fn generate_rest_info(&mut self, tables: &Compendium) {
        self.rest_info = Some(derive_rest_info(
            &self.season,
            self.weather.as_ref(),
            tables.rest(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{EncounterDef, RestTables, WeatherDef, ZoneDef, ZoneKind};
    use crate::rest::{RestDc, WeatherModifier};
    use crate::tables::WeightGrid;
    use crate::weather::NO_CHANGE;
    use std::collections::BTreeMap;

    fn fixture() -> Compendium {
        let zones = vec![
            ZoneDef {
                name: "Forest".into(),
                kinds: vec![ZoneKind::Overland],
                encounter_chance: "100%".into(),
            },
            ZoneDef {
                name: "Hills".into(),
                kinds: vec![ZoneKind::Overland],
                encounter_chance: "100%".into(),
            },
        ];
        let all_watches: BTreeMap<Watch, String> =
            Watch::ALL.iter().map(|w| (*w, "100%".to_string())).collect();
        let encounters = vec![
            EncounterDef {
                name: "Wolves".into(),
                description: "A hungry pack.".into(),
                habitat: "forest".into(),
                sparks: vec!["Distant howling".into()],
                watch_chances: all_watches.clone(),
            },
            EncounterDef {
                name: "Bandits".into(),
                description: "Toll collectors.".into(),
                habitat: "roads".into(),
                sparks: vec!["A felled tree".into()],
                watch_chances: all_watches.clone(),
            },
            EncounterDef {
                name: "Pilgrims".into(),
                description: "A quiet procession.".into(),
                habitat: "roads".into(),
                sparks: vec!["Chanting on the wind".into()],
                watch_chances: all_watches,
            },
        ];
        let zone_weights = WeightGrid::new(
            vec!["Wolves".into(), "Bandits".into(), "Pilgrims".into()],
            vec!["Forest".into(), "Hills".into()],
            vec![vec![2.0, 1.0], vec![1.0, 2.0], vec![1.0, 1.0]],
        )
        .unwrap();
        let season_weights = WeightGrid::new(
            vec![NO_CHANGE.into(), "Snow".into(), "Clear Skies".into()],
            vec!["Winter".into(), "Summer".into()],
            vec![vec![2.0, 2.0], vec![3.0, 0.0], vec![1.0, 3.0]],
        )
        .unwrap();
        let weathers = vec![
            WeatherDef {
                name: "Snow".into(),
                effects: vec!["Cold".into()],
            },
            WeatherDef { name: "Clear Skies".into(), effects: vec![] },
        ];
        let mut rest = RestTables {
            rest_dcs: Default::default(),
            weather_modifiers: vec![WeatherModifier {
                effect: "Cold".into(),
                description: "Freezing night".into(),
                modifier: "+2".into(),
            }],
            situational_modifiers: vec![],
        };
        rest.rest_dcs.insert(
            "Winter".into(),
            vec![RestDc { camp: "Exposed camp".into(), dc: "DC 14".into() }],
        );
        Compendium::new(zones, encounters, weathers, rest, zone_weights, season_weights)
    }

    fn session() -> OverlandSession {
        OverlandSession::new("Forest", "Winter", 42)
    }

    #[test]
    fn fresh_session_is_blank() {
        let s = session();
        assert_eq!(s.day(), 0);
        assert!(s.weather().is_none());
        assert!(s.rest_info().is_none());
        for w in Watch::ALL {
            assert!(!s.encounter(w).is_encounter());
        }
    }

    #[test]
    fn two_days_end_to_end() {
        let tables = fixture();
        let mut s = session();
        s.new_day(&tables);
        s.new_day(&tables);

        assert_eq!(s.day(), 2);
        assert!(s.weather().unwrap().name.is_some());
        assert!(s.rest_info().is_some());
        for w in Watch::ALL {
            // 100% chance and positive weights everywhere: all populated.
            assert!(s.encounter(w).is_encounter());
            assert_eq!(s.encounter(w).time.as_deref(), Some(w.label()));
        }
    }

    #[test]
    fn regenerate_day_keeps_counter() {
        let tables = fixture();
        let mut s = session();
        s.new_day(&tables);
        s.regenerate_day(&tables);
        assert_eq!(s.day(), 1);
        assert!(s.weather().is_some());
    }

    #[test]
    fn regenerate_watch_touches_only_that_watch() {
        let tables = fixture();
        let mut s = session();
        s.new_day(&tables);

        let weather_before = s.weather().cloned();
        let rest_before = s.rest_info().cloned();
        let others: Vec<Encounter> = Watch::ALL
            .iter()
            .filter(|w| **w != Watch::Dusk)
            .map(|w| s.encounter(*w).clone())
            .collect();

        s.regenerate_watch(Watch::Dusk, &tables);

        assert_eq!(s.weather().cloned(), weather_before);
        assert_eq!(s.rest_info().cloned(), rest_before);
        let others_after: Vec<Encounter> = Watch::ALL
            .iter()
            .filter(|w| **w != Watch::Dusk)
            .map(|w| s.encounter(*w).clone())
            .collect();
        assert_eq!(others, others_after);
    }

    #[test]
    fn regenerate_weather_recomputes_rest_info() {
        let tables = fixture();
        let mut s = session();
        s.new_day(&tables);

        // Force a known weather state, then regenerate until it changes.
        for _ in 0..50 {
            s.regenerate_weather(&tables);
            let has_cold = s
                .weather()
                .is_some_and(|w| w.effects.contains(&"Cold".to_string()));
            let mods = &s.rest_info().unwrap().weather_modifiers;
            if has_cold {
                assert_eq!(mods.len(), 1);
            } else {
                assert!(mods.is_empty());
            }
        }
    }

    #[test]
    fn reset_clears_everything() {
        let tables = fixture();
        let mut s = session();
        s.new_day(&tables);
        s.reset();
        assert_eq!(s.day(), 0);
        assert!(s.weather().is_none());
        assert!(s.rest_info().is_none());
        for w in Watch::ALL {
            assert!(!s.encounter(w).is_encounter());
        }
    }

    #[test]
    fn rest_dcs_follow_season() {
        let tables = fixture();
        let mut s = session();
        s.new_day(&tables);
        assert_eq!(s.rest_info().unwrap().rest_dcs.len(), 1);

        s.set_season("Summer");
        s.regenerate_day(&tables);
        assert!(s.rest_info().unwrap().rest_dcs.is_empty());
    }

    #[test]
    fn deterministic_for_a_seed() {
        let tables = fixture();
        let mut a = OverlandSession::new("Forest", "Winter", 7);
        let mut b = OverlandSession::new("Forest", "Winter", 7);
        a.new_day(&tables);
        b.new_day(&tables);
        assert_eq!(a.weather().cloned(), b.weather().cloned());
        for w in Watch::ALL {
            assert_eq!(a.encounter(w), b.encounter(w));
        }
    }
}
