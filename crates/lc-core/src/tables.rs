//! Labelled weight grids and the closed label sets for watches and time
//! slots.
//!
//! Zone, encounter, and weather names are open vocabularies from data files
//! and stay as strings. Watch periods and site time slots are fixed sets and
//! get enums.

use serde::{Deserialize, Serialize};

use crate::content::EncounterDef;
use crate::error::{CoreError, CoreResult};

/// One of the six overland time-of-day periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Watch {
    /// First light.
    #[serde(rename = "dawn")]
    Dawn,
    /// Morning travel hours.
    #[serde(rename = "morning")]
    Morning,
    /// Midday through afternoon.
    #[serde(rename = "afternoon")]
    Afternoon,
    /// Fading light.
    #[serde(rename = "dusk")]
    Dusk,
    /// First half of the night.
    #[serde(rename = "early night")]
    EarlyNight,
    /// Second half of the night.
    #[serde(rename = "late night")]
    LateNight,
}

impl Watch {
    /// All watches in day order.
    pub const ALL: [Watch; 6] = [
        Watch::Dawn,
        Watch::Morning,
        Watch::Afternoon,
        Watch::Dusk,
        Watch::EarlyNight,
        Watch::LateNight,
    ];

    /// Display label, e.g. "Early Night".
    pub fn label(self) -> &'static str {
        match self {
            Watch::Dawn => "Dawn",
            Watch::Morning => "Morning",
            Watch::Afternoon => "Afternoon",
            Watch::Dusk => "Dusk",
            Watch::EarlyNight => "Early Night",
            Watch::LateNight => "Late Night",
        }
    }

    /// Parse a watch from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], " ").trim() {
            "dawn" => Some(Watch::Dawn),
            "morning" => Some(Watch::Morning),
            "afternoon" => Some(Watch::Afternoon),
            "dusk" => Some(Watch::Dusk),
            "early night" | "early" => Some(Watch::EarlyNight),
            "late night" | "late" => Some(Watch::LateNight),
            _ => None,
        }
    }

    /// Position in [`Watch::ALL`].
    pub fn index(self) -> usize {
        match self {
            Watch::Dawn => 0,
            Watch::Morning => 1,
            Watch::Afternoon => 2,
            Watch::Dusk => 3,
            Watch::EarlyNight => 4,
            Watch::LateNight => 5,
        }
    }
}

impl std::fmt::Display for Watch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One of the six site-mode offsets from the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeSlot {
    /// This turn.
    Current,
    /// Ten minutes ahead.
    Plus10,
    /// Twenty minutes ahead.
    Plus20,
    /// Thirty minutes ahead.
    Plus30,
    /// Forty minutes ahead.
    Plus40,
    /// Fifty minutes ahead.
    Plus50,
}

impl TimeSlot {
    /// All slots from the current turn outward.
    pub const ALL: [TimeSlot; 6] = [
        TimeSlot::Current,
        TimeSlot::Plus10,
        TimeSlot::Plus20,
        TimeSlot::Plus30,
        TimeSlot::Plus40,
        TimeSlot::Plus50,
    ];

    /// Display label, e.g. "30 minutes".
    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Current => "Current",
            TimeSlot::Plus10 => "10 minutes",
            TimeSlot::Plus20 => "20 minutes",
            TimeSlot::Plus30 => "30 minutes",
            TimeSlot::Plus40 => "40 minutes",
            TimeSlot::Plus50 => "50 minutes",
        }
    }

    /// Parse a slot from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace("minutes", "").replace('+', " ").trim() {
            "current" | "now" => Some(TimeSlot::Current),
            "10" => Some(TimeSlot::Plus10),
            "20" => Some(TimeSlot::Plus20),
            "30" => Some(TimeSlot::Plus30),
            "40" => Some(TimeSlot::Plus40),
            "50" => Some(TimeSlot::Plus50),
            _ => None,
        }
    }

    /// Position in [`TimeSlot::ALL`].
    pub fn index(self) -> usize {
        match self {
            TimeSlot::Current => 0,
            TimeSlot::Plus10 => 1,
            TimeSlot::Plus20 => 2,
            TimeSlot::Plus30 => 3,
            TimeSlot::Plus40 => 4,
            TimeSlot::Plus50 => 5,
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A 2D weight grid keyed by row and column labels.
///
/// Rows keep their insertion order; [`WeightGrid::column`] emits entries in
/// that order, which is what makes weighted selection deterministic for a
/// given table. All cells are non-negative; a 0 cell means "never selectable
/// here."
#[derive(Debug, Clone)]
pub struct WeightGrid {
    rows: Vec<String>,
    columns: Vec<String>,
    // Row-major: cells[row * columns.len() + col].
    cells: Vec<f64>,
}

impl WeightGrid {
    /// Build a grid from labels and row-major cell rows.
    ///
    /// Negative cells are clamped to 0 with a warning; a row count or row
    /// length mismatch is a [`CoreError::GridShape`] error.
    pub fn new(
        rows: Vec<String>,
        columns: Vec<String>,
        cell_rows: Vec<Vec<f64>>,
    ) -> CoreResult<Self> {
        if cell_rows.len() != rows.len() {
            return Err(CoreError::GridShape(format!(
                "{} cell rows for {} row labels",
                cell_rows.len(),
                rows.len()
            )));
        }
        let mut cells = Vec::with_capacity(rows.len() * columns.len());
        for (label, row) in rows.iter().zip(&cell_rows) {
            if row.len() != columns.len() {
                return Err(CoreError::GridShape(format!(
                    "row \"{label}\" has {} cells for {} columns",
                    row.len(),
                    columns.len()
                )));
            }
            for &cell in row {
                if cell < 0.0 {
                    log::warn!("negative weight {cell} in row \"{label}\" clamped to 0");
                }
                cells.push(cell.max(0.0));
            }
        }
        Ok(Self { rows, columns, cells })
    }

    /// Row labels in insertion order.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Column labels in insertion order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Look up a single cell by labels.
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.rows.iter().position(|l| l == row)?;
        let c = self.columns.iter().position(|l| l == column)?;
        Some(self.cells[r * self.columns.len() + c])
    }

    /// All (row label, weight) entries for one column, in row order.
    ///
    /// Returns `None` when the column label is unknown.
    pub fn column(&self, column: &str) -> Option<Vec<(String, f64)>> {
        let c = self.columns.iter().position(|l| l == column)?;
        Some(
            self.rows
                .iter()
                .enumerate()
                .map(|(r, label)| (label.clone(), self.cells[r * self.columns.len() + c]))
                .collect(),
        )
    }
}

/// The derived 3D encounter weight grid: encounter x zone x watch.
///
/// Each cell is the encounter's 2D zone weight multiplied by its per-watch
/// percentage, computed once when the [`Compendium`](crate::Compendium) is
/// assembled.
#[derive(Debug, Clone)]
pub struct WatchGrid {
    encounters: Vec<String>,
    zones: Vec<String>,
    // [encounter][zone][watch], flattened.
    cells: Vec<f64>,
}

impl WatchGrid {
    /// Derive the 3D grid from the 2D encounter-by-zone grid and each
    /// encounter's per-watch percentage strings.
    ///
    /// Encounters missing from `defs`, or with unparsable watch
    /// percentages, contribute weight 0 for the affected cells and are
    /// logged once per miss.
    pub fn derive(zone_weights: &WeightGrid, defs: &[EncounterDef]) -> Self {
        let encounters = zone_weights.rows().to_vec();
        let zones = zone_weights.columns().to_vec();
        let mut cells = Vec::with_capacity(encounters.len() * zones.len() * 6);

        for encounter in &encounters {
            let def = defs.iter().find(|d| &d.name == encounter);
            if def.is_none() {
                log::warn!("encounter \"{encounter}\" has weights but no definition; watch weights set to 0");
            }
            for zone in &zones {
                let zone_weight = zone_weights.get(encounter, zone).unwrap_or(0.0);
                for watch in Watch::ALL {
                    let pct = def.map_or(0.0, |d| d.watch_fraction(watch));
                    cells.push(zone_weight * pct);
                }
            }
        }

        Self { encounters, zones, cells }
    }

    /// Encounter labels in insertion order.
    pub fn encounters(&self) -> &[String] {
        &self.encounters
    }

    /// Look up a single cell by labels.
    pub fn get(&self, encounter: &str, zone: &str, watch: Watch) -> Option<f64> {
        let e = self.encounters.iter().position(|l| l == encounter)?;
        let z = self.zones.iter().position(|l| l == zone)?;
        Some(self.cells[(e * self.zones.len() + z) * 6 + watch.index()])
    }

    /// All (encounter, weight) entries for one zone and watch, in encounter
    /// order. Returns `None` when the zone label is unknown.
    pub fn column(&self, zone: &str, watch: Watch) -> Option<Vec<(String, f64)>> {
        let z = self.zones.iter().position(|l| l == zone)?;
        Some(
            self.encounters
                .iter()
                .enumerate()
                .map(|(e, label)| {
                    (
                        label.clone(),
                        self.cells[(e * self.zones.len() + z) * 6 + watch.index()],
                    )
                })
                .collect(),
        )
    }
}
