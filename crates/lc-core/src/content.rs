//! Static content definitions and the [`Compendium`] that bundles them.
//!
//! These are the structures an external loader fills from data files. The
//! engine never mutates them; generation reads them through the compendium's
//! lookup methods.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::percent::parse_percentage;
use crate::rest::{RestDc, SituationalModifier, WeatherModifier};
use crate::tables::{Watch, WatchGrid, WeightGrid};
use crate::weather::NO_CHANGE;

/// How a zone can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    /// Base zone for overland travel.
    Overland,
    /// Secondary zone blended into an overland zone at 50% per roll.
    Overlay,
    /// Zone for site (dungeon) exploration.
    Site,
}

/// A travel zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneDef {
    /// Zone name, the key used by the weight grids.
    pub name: String,
    /// The modes this zone is valid for.
    pub kinds: Vec<ZoneKind>,
    /// Chance of any encounter per roll, as a percentage string ("35%").
    pub encounter_chance: String,
}

/// An encounter's static definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterDef {
    /// Encounter name, the key used by the weight grids.
    pub name: String,
    /// GM-facing description.
    pub description: String,
    /// Habitat tag, e.g. "forest".
    pub habitat: String,
    /// Ordered prompt strings for running the encounter.
    pub sparks: Vec<String>,
    /// Percentage string per watch scaling the zone weight, e.g. "30%".
    /// Watches absent from the map contribute weight 0.
    #[serde(rename = "watch", default)]
    pub watch_chances: BTreeMap<Watch, String>,
}

impl EncounterDef {
    /// The fraction this encounter's zone weight is scaled by for `watch`.
    ///
    /// Missing or unparsable percentages count as 0 (and are logged), so a
    /// bad cell can never make an encounter fail to generate elsewhere.
    pub fn watch_fraction(&self, watch: Watch) -> f64 {
        let Some(raw) = self.watch_chances.get(&watch) else {
            return 0.0;
        };
        match parse_percentage(raw) {
            Ok(f) => f,
            Err(e) => {
                log::warn!("encounter \"{}\", watch {watch}: {e}", self.name);
                0.0
            }
        }
    }
}

/// A weather type's static definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherDef {
    /// Weather name, the key used by the weather-by-season grid.
    pub name: String,
    /// Effect tags, matched against rest-check weather modifiers.
    pub effects: Vec<String>,
}

/// Rest-check tables: DCs per season plus modifier rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestTables {
    /// Season name to that season's DC rows.
    pub rest_dcs: BTreeMap<String, Vec<RestDc>>,
    /// Modifier rules triggered by weather effect tags.
    pub weather_modifiers: Vec<WeatherModifier>,
    /// Always-applicable situational modifiers.
    pub situational_modifiers: Vec<SituationalModifier>,
}

/// Everything the generators need, assembled once at load time.
#[derive(Debug, Clone)]
pub struct Compendium {
    zones: Vec<ZoneDef>,
    encounters: Vec<EncounterDef>,
    weathers: Vec<WeatherDef>,
    rest: RestTables,
    zone_weights: WeightGrid,
    season_weights: WeightGrid,
    watch_weights: WatchGrid,
    seasons: Vec<String>,
}

impl Compendium {
    /// Assemble a compendium, deriving the 3D watch grid and the season
    /// list (the weather grid's columns).
    pub fn new(
        zones: Vec<ZoneDef>,
        encounters: Vec<EncounterDef>,
        weathers: Vec<WeatherDef>,
        rest: RestTables,
        zone_weights: WeightGrid,
        season_weights: WeightGrid,
    ) -> Self {
        let watch_weights = WatchGrid::derive(&zone_weights, &encounters);
        let seasons = season_weights.columns().to_vec();
        Self {
            zones,
            encounters,
            weathers,
            rest,
            zone_weights,
            season_weights,
            watch_weights,
            seasons,
        }
    }

    /// Look up a zone by name.
    pub fn zone(&self, name: &str) -> Option<&ZoneDef> {
        self.zones.iter().find(|z| z.name == name)
    }

    /// Look up an encounter definition by name.
    pub fn encounter(&self, name: &str) -> Option<&EncounterDef> {
        self.encounters.iter().find(|e| e.name == name)
    }

    /// Look up a weather definition by name.
    pub fn weather(&self, name: &str) -> Option<&WeatherDef> {
        self.weathers.iter().find(|w| w.name == name)
    }

    /// All zones.
    pub fn zones(&self) -> &[ZoneDef] {
        &self.zones
    }

    /// All encounter definitions.
    pub fn encounters(&self) -> &[EncounterDef] {
        &self.encounters
    }

    /// All weather definitions.
    pub fn weathers(&self) -> &[WeatherDef] {
        &self.weathers
    }

    /// Zone names valid as overland base zones.
    pub fn overland_zones(&self) -> Vec<&str> {
        self.zones_of_kind(ZoneKind::Overland)
    }

    /// Zone names valid as overland overlays.
    pub fn overlay_zones(&self) -> Vec<&str> {
        self.zones_of_kind(ZoneKind::Overlay)
    }

    /// Zone names valid for site mode.
    pub fn site_zones(&self) -> Vec<&str> {
        self.zones_of_kind(ZoneKind::Site)
    }

    fn zones_of_kind(&self, kind: ZoneKind) -> Vec<&str> {
        self.zones
            .iter()
            .filter(|z| z.kinds.contains(&kind))
            .map(|z| z.name.as_str())
            .collect()
    }

    /// Season names, in the weather grid's column order.
    pub fn seasons(&self) -> &[String] {
        &self.seasons
    }

    /// The rest-check tables.
    pub fn rest(&self) -> &RestTables {
        &self.rest
    }

    /// The 2D encounter-by-zone weight grid.
    pub fn zone_weights(&self) -> &WeightGrid {
        &self.zone_weights
    }

    /// The 2D weather-by-season weight grid.
    pub fn season_weights(&self) -> &WeightGrid {
        &self.season_weights
    }

    /// The derived 3D encounter-by-zone-by-watch grid.
    pub fn watch_weights(&self) -> &WatchGrid {
        &self.watch_weights
    }

    /// Cross-reference checks between the weight grids and the definition
    /// tables.
    ///
    /// These are warnings, not errors: a dangling reference means some
    /// cells can never produce a populated result, but generation still
    /// degrades safely at roll time.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for name in self.zone_weights.rows() {
            if self.encounter(name).is_none() {
                issues.push(format!(
                    "encounter \"{name}\" has zone weights but no definition"
                ));
            }
        }
        for name in self.zone_weights.columns() {
            if self.zone(name).is_none() {
                issues.push(format!("zone \"{name}\" has weights but no definition"));
            }
        }
        for name in self.season_weights.rows() {
            if name != NO_CHANGE && self.weather(name).is_none() {
                issues.push(format!(
                    "weather \"{name}\" has season weights but no definition"
                ));
            }
        }
        for season in self.rest.rest_dcs.keys() {
            if !self.seasons.contains(season) {
                issues.push(format!(
                    "rest DCs for season \"{season}\" not in the season list"
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> Compendium {
        let zones = vec![ZoneDef {
            name: "Forest".into(),
            kinds: vec![ZoneKind::Overland],
            encounter_chance: "50%".into(),
        }];
        let encounters = vec![EncounterDef {
            name: "Wolves".into(),
            description: "A hungry pack.".into(),
            habitat: "forest".into(),
            sparks: vec!["Tracks in the mud".into()],
            watch_chances: BTreeMap::new(),
        }];
        let weathers = vec![WeatherDef {
            name: "Clear".into(),
            effects: vec![],
        }];
        let zone_weights = WeightGrid::new(
            vec!["Wolves".into(), "Phantom".into()],
            vec!["Forest".into(), "Ruins".into()],
            vec![vec![1.0, 0.0], vec![0.5, 0.5]],
        )
        .unwrap();
        let season_weights = WeightGrid::new(
            vec!["Clear".into(), "Sleet".into()],
            vec!["Winter".into()],
            vec![vec![3.0], vec![1.0]],
        )
        .unwrap();
        let mut rest = RestTables::default();
        rest.rest_dcs.insert("Autumn".into(), vec![]);
        Compendium::new(zones, encounters, weathers, rest, zone_weights, season_weights)
    }

    #[test]
    fn seasons_come_from_weather_grid_columns() {
        assert_eq!(minimal().seasons(), ["Winter"]);
    }

    #[test]
    fn zone_kind_filters() {
        let c = minimal();
        assert_eq!(c.overland_zones(), ["Forest"]);
        assert!(c.overlay_zones().is_empty());
        assert!(c.site_zones().is_empty());
    }

    #[test]
    fn validate_reports_dangling_references() {
        let issues = minimal().validate();
        assert_eq!(issues.len(), 4);
        assert!(issues.iter().any(|i| i.contains("\"Phantom\"")));
        assert!(issues.iter().any(|i| i.contains("\"Ruins\"")));
        assert!(issues.iter().any(|i| i.contains("\"Sleet\"")));
        assert!(issues.iter().any(|i| i.contains("\"Autumn\"")));
    }

    #[test]
    fn no_change_row_is_not_a_dangling_weather() {
        let season_weights = WeightGrid::new(
            vec![NO_CHANGE.into(), "Clear".into()],
            vec!["Winter".into()],
            vec![vec![1.0], vec![1.0]],
        )
        .unwrap();
        let zone_weights =
            WeightGrid::new(vec![], vec![], vec![]).unwrap();
        let c = Compendium::new(
            vec![],
            vec![],
            vec![WeatherDef { name: "Clear".into(), effects: vec![] }],
            RestTables::default(),
            zone_weights,
            season_weights,
        );
        assert!(c.validate().is_empty());
    }

    #[test]
    fn watch_fraction_handles_bad_cells() {
        let mut chances = BTreeMap::new();
        chances.insert(Watch::Dawn, "25%".to_string());
        chances.insert(Watch::Dusk, "bogus".to_string());
        let def = EncounterDef {
            name: "Wolves".into(),
            description: String::new(),
            habitat: String::new(),
            sparks: vec![],
            watch_chances: chances,
        };
        assert_eq!(def.watch_fraction(Watch::Dawn), 0.25);
        assert_eq!(def.watch_fraction(Watch::Dusk), 0.0);
        assert_eq!(def.watch_fraction(Watch::Morning), 0.0);
    }
}
