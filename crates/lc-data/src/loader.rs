//! Loading a content directory into a [`Compendium`].
//!
//! The directory's `manifest.json` names the individual data files so a
//! campaign can swap tables without renaming anything. Weight grids are
//! dense: every row carries a cell for every column.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use lc_core::{
    Calendar, Compendium, EncounterDef, RestTables, WeatherDef, WeightGrid, ZoneDef,
};

use crate::error::{DataError, DataResult};

/// The manifest at the root of a content directory.
#[derive(Debug, Deserialize)]
struct Manifest {
    zones: String,
    encounters: String,
    weathers: String,
    rest_checks: String,
    encounter_weights: String,
    weather_weights: String,
    #[serde(default)]
    calendar: Option<String>,
}

/// On-disk shape of a weight grid.
#[derive(Debug, Deserialize)]
struct RawGrid {
    rows: Vec<String>,
    columns: Vec<String>,
    cells: Vec<Vec<f64>>,
}

/// Everything loaded from a content directory.
pub struct DataSet {
    /// The assembled content tables.
    pub compendium: Compendium,
    /// Cross-reference validation warnings (already logged).
    pub warnings: Vec<String>,
    /// The calendar, when the manifest names one and the file holds months.
    pub calendar: Option<Calendar>,
    /// Where the calendar file lives, for the persistence store.
    pub calendar_path: Option<PathBuf>,
}

/// Load a content directory.
///
/// Missing or malformed files are fatal. Cross-reference issues between
/// the weight grids and the definition tables are returned as warnings and
/// logged, but do not fail the load.
pub fn load_dir(dir: &Path) -> DataResult<DataSet> {
    let manifest: Manifest = read_json(&dir.join("manifest.json"))?;

    let zones: Vec<ZoneDef> = read_json(&dir.join(&manifest.zones))?;
    let encounters: Vec<EncounterDef> = read_json(&dir.join(&manifest.encounters))?;
    let weathers: Vec<WeatherDef> = read_json(&dir.join(&manifest.weathers))?;
    let rest: RestTables = read_json(&dir.join(&manifest.rest_checks))?;
    let zone_weights = read_grid(&dir.join(&manifest.encounter_weights))?;
    let season_weights = read_grid(&dir.join(&manifest.weather_weights))?;

    let (calendar, calendar_path) = match &manifest.calendar {
        Some(name) => {
            let path = dir.join(name);
            (load_calendar(&path)?, Some(path))
        }
        None => (None, None),
    };

    let compendium = Compendium::new(
        zones,
        encounters,
        weathers,
        rest,
        zone_weights,
        season_weights,
    );
    let warnings = compendium.validate();
    for warning in &warnings {
        log::warn!("{}: {warning}", dir.display());
    }
    log::info!(
        "loaded {}: {} zones, {} encounters, {} weathers",
        dir.display(),
        compendium.zones().len(),
        compendium.encounters().len(),
        compendium.weathers().len(),
    );

    Ok(DataSet { compendium, warnings, calendar, calendar_path })
}

/// Load an optional calendar file.
///
/// A missing file, a blank file, or a calendar without months all mean
/// "no calendar tracking" and yield `None`; only unreadable or malformed
/// content is an error.
pub fn load_calendar(path: &Path) -> DataResult<Option<Calendar>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("no calendar file at {}", path.display());
            return Ok(None);
        }
        Err(source) => return Err(DataError::Io { path: path.into(), source }),
    };
    if text.trim().is_empty() {
        log::info!("calendar file {} is blank", path.display());
        return Ok(None);
    }
    let calendar: Calendar = serde_json::from_str(&text)
        .map_err(|source| DataError::Json { path: path.into(), source })?;
    if calendar.months.is_empty() {
        log::info!("calendar file {} has no months; tracking disabled", path.display());
        return Ok(None);
    }
    Ok(Some(calendar))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> DataResult<T> {
    let text = fs::read_to_string(path)
        .map_err(|source| DataError::Io { path: path.into(), source })?;
    serde_json::from_str(&text)
        .map_err(|source| DataError::Json { path: path.into(), source })
}

fn read_grid(path: &Path) -> DataResult<WeightGrid> {
    let raw: RawGrid = read_json(path)?;
    WeightGrid::new(raw.rows, raw.columns, raw.cells).map_err(|e| DataError::Invalid {
        path: path.into(),
        message: e.to_string(),
    })
}
