//! Persisting the calendar's mutable fields back to its file.

use std::fs;
use std::path::PathBuf;

use serde_json::{Value, json};

use lc_core::{CalendarDate, CalendarStore, PersistError};

/// A [`CalendarStore`] that rewrites the calendar JSON file in place.
///
/// Each save is a read-modify-write: the file is re-read, only the mutable
/// fields are replaced, and the whole document is written back, so keys the
/// engine does not know about survive. Concurrent external edits are
/// last-write-wins.
#[derive(Debug)]
pub struct JsonCalendarStore {
    path: PathBuf,
}

impl JsonCalendarStore {
    /// Create a store writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn update(&self, apply: impl FnOnce(&mut Value)) -> Result<(), PersistError> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| PersistError(format!("cannot read {}: {e}", self.path.display())))?;
        let mut doc: Value = serde_json::from_str(&text)
            .map_err(|e| PersistError(format!("cannot parse {}: {e}", self.path.display())))?;
        if !doc.is_object() {
            return Err(PersistError(format!(
                "{} is not a JSON object",
                self.path.display()
            )));
        }
        apply(&mut doc);
        let out = serde_json::to_string_pretty(&doc)
            .map_err(|e| PersistError(format!("cannot serialize calendar: {e}")))?;
        fs::write(&self.path, out)
            .map_err(|e| PersistError(format!("cannot write {}: {e}", self.path.display())))
    }
}

impl CalendarStore for JsonCalendarStore {
    fn save_date(&mut self, date: CalendarDate) -> Result<(), PersistError> {
        self.update(|doc| {
            doc["current_date"] = json!({ "month": date.month, "day": date.day });
        })
    }

    fn save_lunar(&mut self, day: u32, blood_moon: bool) -> Result<(), PersistError> {
        self.update(|doc| {
            doc["lunar_day"] = json!(day);
            doc["blood_moon_active"] = json!(blood_moon);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CALENDAR: &str = r#"{
  "months": [ { "name": "Thaw", "season": "Spring", "days": 30 } ],
  "current_date": { "month": 1, "day": 1 },
  "lunar_cycle_length": 32,
  "lunar_day": 1,
  "blood_moon_chance": "5%",
  "custom_note": "kept as-is"
}"#;

    fn store() -> (TempDir, JsonCalendarStore) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("calendar.json");
        fs::write(&path, CALENDAR).unwrap();
        (tmp, JsonCalendarStore::new(path))
    }

    #[test]
    fn save_date_updates_only_the_date() {
        let (tmp, mut store) = store();
        store.save_date(CalendarDate { month: 1, day: 14 }).unwrap();

        let doc: Value = serde_json::from_str(
            &fs::read_to_string(tmp.path().join("calendar.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(doc["current_date"]["day"], 14);
        assert_eq!(doc["lunar_day"], 1);
        // Unknown keys survive the rewrite.
        assert_eq!(doc["custom_note"], "kept as-is");
    }

    #[test]
    fn save_lunar_updates_day_and_flag() {
        let (tmp, mut store) = store();
        store.save_lunar(17, true).unwrap();

        let doc: Value = serde_json::from_str(
            &fs::read_to_string(tmp.path().join("calendar.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(doc["lunar_day"], 17);
        assert_eq!(doc["blood_moon_active"], true);
        assert_eq!(doc["current_date"]["day"], 1);
    }

    #[test]
    fn missing_file_is_a_persist_error() {
        let tmp = TempDir::new().unwrap();
        let mut store = JsonCalendarStore::new(tmp.path().join("absent.json"));
        assert!(store.save_date(CalendarDate { month: 1, day: 1 }).is_err());
    }

    #[test]
    fn reloaded_calendar_reflects_saves() {
        let (tmp, mut store) = store();
        store.save_date(CalendarDate { month: 1, day: 9 }).unwrap();
        store.save_lunar(5, false).unwrap();

        let cal = crate::loader::load_calendar(&tmp.path().join("calendar.json"))
            .unwrap()
            .unwrap();
        assert_eq!(cal.current_date, Some(CalendarDate { month: 1, day: 9 }));
        assert_eq!(cal.lunar_day, Some(5));
    }
}
