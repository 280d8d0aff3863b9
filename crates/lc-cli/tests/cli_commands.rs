//! End-to-end tests for the lantern binary.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

/// Create a temp directory with a complete content pack.
fn content_dir(with_calendar: bool) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    let calendar_entry = if with_calendar {
        ",\n  \"calendar\": \"calendar.json\""
    } else {
        ""
    };
    write(
        dir,
        "manifest.json",
        &format!(
            r#"{{
  "zones": "zones.json",
  "encounters": "encounters.json",
  "weathers": "weathers.json",
  "rest_checks": "rest_checks.json",
  "encounter_weights": "encounter_weights.json",
  "weather_weights": "weather_weights.json"{calendar_entry}
}}"#
        ),
    );
    write(
        dir,
        "zones.json",
        r#"[
  { "name": "Mirkwald", "kinds": ["Overland"], "encounter_chance": "100%" },
  { "name": "Barrow", "kinds": ["Site"], "encounter_chance": "100%" }
]"#,
    );
    write(
        dir,
        "encounters.json",
        r#"[
  {
    "name": "Wolf Pack",
    "description": "Lean and bold from a hard winter.",
    "habitat": "forest",
    "sparks": ["Fresh tracks", "A carcass in the brush"],
    "watch": {
      "dawn": "100%", "morning": "100%", "afternoon": "100%",
      "dusk": "100%", "early night": "100%", "late night": "100%"
    }
  }
]"#,
    );
    write(
        dir,
        "weathers.json",
        r#"[ { "name": "Drizzle", "effects": ["Wet"] } ]"#,
    );
    write(
        dir,
        "rest_checks.json",
        r#"{
  "rest_dcs": { "Autumn": [ { "camp": "Exposed camp", "dc": "DC 12" } ] },
  "weather_modifiers": [
    { "effect": "Wet", "description": "Soaked bedrolls", "modifier": "+1" }
  ],
  "situational_modifiers": []
}"#,
    );
    write(
        dir,
        "encounter_weights.json",
        r#"{
  "rows": ["Wolf Pack"],
  "columns": ["Mirkwald", "Barrow"],
  "cells": [[2.0, 1.0]]
}"#,
    );
    write(
        dir,
        "weather_weights.json",
        r#"{
  "rows": ["No Change", "Drizzle"],
  "columns": ["Autumn"],
  "cells": [[1.0], [3.0]]
}"#,
    );
    if with_calendar {
        write(
            dir,
            "calendar.json",
            r#"{
  "months": [
    { "name": "Harvestmoon", "season": "Autumn", "days": 30 },
    { "name": "Frostfall", "season": "Autumn", "days": 30 }
  ],
  "holidays": [
    { "month": "Harvestmoon", "day": 2, "name": "Lantern Night", "description": "Lights on the river." }
  ],
  "days_per_week": 7,
  "current_date": { "month": 1, "day": 1 },
  "lunar_cycle_length": 32,
  "lunar_day": 1,
  "blood_moon_chance": "0%",
  "blood_moon_active": false
}"#,
        );
    }
    tmp
}

fn lantern() -> Command {
    Command::cargo_bin("lantern").unwrap()
}

#[test]
fn check_reports_a_clean_pack() {
    let dir = content_dir(false);
    lantern()
        .args(["check", "--data"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 zones"))
        .stdout(predicate::str::contains("All cross-references check out"));
}

#[test]
fn check_fails_on_missing_directory() {
    let dir = TempDir::new().unwrap();
    lantern()
        .args(["check", "--data"])
        .arg(dir.path().join("nowhere"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn check_prints_dangling_reference_warnings() {
    let dir = content_dir(false);
    write(
        dir.path(),
        "encounter_weights.json",
        r#"{ "rows": ["Wolf Pack", "Ghost"], "columns": ["Mirkwald", "Barrow"], "cells": [[2.0, 1.0], [1.0, 1.0]] }"#,
    );
    lantern()
        .args(["check", "--data"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Ghost"))
        .stdout(predicate::str::contains("1 warning"));
}

#[test]
fn tables_lists_the_content() {
    let dir = content_dir(false);
    lantern()
        .args(["tables", "--data"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Mirkwald"))
        .stdout(predicate::str::contains("Wolf Pack"))
        .stdout(predicate::str::contains("Drizzle"))
        .stdout(predicate::str::contains("Seasons: Autumn"));
}

#[test]
fn play_generates_a_day_and_quits() {
    let dir = content_dir(false);
    lantern()
        .args(["play", "--seed", "7", "--data"])
        .arg(dir.path())
        .write_stdin("day\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 1"))
        .stdout(predicate::str::contains("Safe travels."));
}

#[test]
fn play_reports_user_errors_and_continues() {
    let dir = content_dir(false);
    lantern()
        .args(["play", "--data"])
        .arg(dir.path())
        .write_stdin("zone Atlantis\nday\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("no overland zone named \"Atlantis\""))
        .stdout(predicate::str::contains("Day 1"));
}

#[test]
fn play_day_advances_the_calendar_file() {
    let dir = content_dir(true);
    lantern()
        .args(["play", "--data"])
        .arg(dir.path())
        .write_stdin("day\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2nd of Harvestmoon"))
        .stdout(predicate::str::contains("Lantern Night"));

    // The date change is persisted back into the calendar file.
    let saved = fs::read_to_string(dir.path().join("calendar.json")).unwrap();
    assert!(saved.contains("\"day\": 2"));
}

#[test]
fn play_site_mode_turns_and_timers() {
    let dir = content_dir(false);
    lantern()
        .args(["play", "--data"])
        .arg(dir.path())
        .write_stdin("mode site\nturn\ntimer add 60 torch\ntimers\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("10 minutes in Barrow"))
        .stdout(predicate::str::contains("60 minutes: torch"));
}

#[test]
fn play_moon_commands_move_the_phase() {
    let dir = content_dir(true);
    lantern()
        .args(["play", "--data"])
        .arg(dir.path())
        .write_stdin("moon 4\ndate\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Full Moon"));
}
