//! The interactive play session: command dispatch over the overland and
//! site sessions and the almanac.
//!
//! User-input problems come back as `Err(String)` and are printed by the
//! REPL loop; they never touch session state.

use colored::Colorize;

use lc_core::{
    Almanac, Compendium, NullStore, OverlandSession, SiteSession, TimeSlot, Timer, Watch,
};
use lc_data::{DataSet, JsonCalendarStore};

/// Which session the mode-dependent commands address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Overland,
    Site,
}

/// The interactive session state: both play modes, the content tables, and
/// the optional almanac.
pub struct App {
    tables: Compendium,
    mode: Mode,
    overland: OverlandSession,
    site: SiteSession,
    almanac: Option<Almanac>,
}

impl App {
    /// Build an app from loaded data. The site window is generated
    /// immediately; the overland session stays blank until the first `day`.
    pub fn new(data: DataSet, seed: u64) -> Self {
        let tables = data.compendium;
        let zone = first_or_empty(&tables.overland_zones());
        let site_zone = first_or_empty(&tables.site_zones());

        let almanac = data.calendar.map(|calendar| {
            let store: Box<dyn lc_core::CalendarStore> = match &data.calendar_path {
                Some(path) => Box::new(JsonCalendarStore::new(path)),
                None => Box::new(NullStore),
            };
            Almanac::new(calendar, store, seed.wrapping_add(2))
        });

        // A dated calendar decides the starting season; otherwise the first
        // season column.
        let season = almanac
            .as_ref()
            .and_then(|a| a.current_season().map(str::to_owned))
            .or_else(|| tables.seasons().first().cloned())
            .unwrap_or_default();

        let overland = OverlandSession::new(zone, season, seed);
        let mut site = SiteSession::new(site_zone, seed.wrapping_add(1));
        site.reset(&tables);

        Self {
            tables,
            mode: Mode::Overland,
            overland,
            site,
            almanac,
        }
    }

    /// Handle one line of input and return the text to print.
    pub fn process(&mut self, input: &str) -> Result<String, String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "mode" => self.do_mode(rest),
            "zone" => self.do_zone(rest),
            "overlay" => self.do_overlay(rest),
            "season" => self.do_season(rest),
            "day" => self.do_day(),
            "turn" => self.do_turn(),
            "regen" => self.do_regen(rest),
            "timer" => self.do_timer(rest),
            "timers" => Ok(self.render_timers()),
            "date" => self.do_date(),
            "advance" => self.do_advance(rest),
            "moon" => self.do_moon(rest),
            "status" => Ok(self.render_status()),
            "help" => Ok(help_text()),
            "quit" | "q" => Ok("Safe travels.".to_string()),
            _ => Err(format!("unknown command \"{cmd}\" (try 'help')")),
        }
    }

    fn do_mode(&mut self, rest: &str) -> Result<String, String> {
        self.mode = match rest.to_lowercase().as_str() {
            "overland" => Mode::Overland,
            "site" => Mode::Site,
            _ => return Err("usage: mode overland|site".into()),
        };
        Ok(format!("Mode: {}", mode_name(self.mode)))
    }

    fn do_zone(&mut self, rest: &str) -> Result<String, String> {
        if rest.is_empty() {
            return Err("usage: zone <name>".into());
        }
        match self.mode {
            Mode::Overland => {
                let name = self
                    .find_zone(rest, &self.tables.overland_zones())
                    .ok_or_else(|| format!("no overland zone named \"{rest}\""))?;
                self.overland.set_zone(name.clone());
                Ok(format!("Overland zone: {name}"))
            }
            Mode::Site => {
                let name = self
                    .find_zone(rest, &self.tables.site_zones())
                    .ok_or_else(|| format!("no site zone named \"{rest}\""))?;
                self.site.set_zone(name.clone());
                Ok(format!("Site zone: {name}"))
            }
        }
    }

    fn do_overlay(&mut self, rest: &str) -> Result<String, String> {
        if rest.is_empty() {
            return Err("usage: overlay <name>|off".into());
        }
        if rest.eq_ignore_ascii_case("off") || rest.eq_ignore_ascii_case("none") {
            self.overland.set_overlay(None);
            return Ok("Overlay cleared.".to_string());
        }
        let name = self
            .find_zone(rest, &self.tables.overlay_zones())
            .ok_or_else(|| format!("no overlay zone named \"{rest}\""))?;
        self.overland.set_overlay(Some(name.clone()));
        Ok(format!("Overlay zone: {name}"))
    }

    fn do_season(&mut self, rest: &str) -> Result<String, String> {
        let season = self
            .tables
            .seasons()
            .iter()
            .find(|s| s.eq_ignore_ascii_case(rest))
            .cloned()
            .ok_or_else(|| {
                format!(
                    "no season named \"{rest}\" (have: {})",
                    self.tables.seasons().join(", ")
                )
            })?;
        self.overland.set_season(season.clone());
        Ok(format!("Season: {season}"))
    }

    fn do_day(&mut self) -> Result<String, String> {
        let mut notes = Vec::new();
        if let Some(almanac) = &mut self.almanac {
            if almanac.calendar().current_date.is_some() {
                almanac.advance_date(1).map_err(|e| e.to_string())?;
                if almanac.lunar_enabled() {
                    almanac.advance_lunar(1).map_err(|e| e.to_string())?;
                }
                if let Some(s) = almanac.date_string() {
                    notes.push(format!("Date: {s}"));
                }
                if let Some(h) = almanac.current_holiday() {
                    notes.push(format!("{} {}", "Holiday:".cyan(), h.name));
                }
                if let Ok(phase) = almanac.lunar_phase() {
                    let mut line = format!("Moon: {} {phase}", phase.icon());
                    if almanac.blood_moon_active() {
                        line.push_str(&format!(" — {}", "BLOOD MOON".red().bold()));
                    }
                    notes.push(line);
                }
                // Travel weather follows the calendar's season.
                if let Some(season) = almanac.current_season() {
                    self.overland.set_season(season.to_owned());
                }
            }
        }

        self.overland.new_day(&self.tables);
        let mut out = self.render_overland();
        for note in notes {
            out.push('\n');
            out.push_str(&note);
        }
        Ok(out)
    }

    fn do_turn(&mut self) -> Result<String, String> {
        if self.mode != Mode::Site {
            return Err("'turn' only makes sense in site mode".into());
        }
        self.site.new_turn(&self.tables);
        Ok(self.render_site())
    }

    fn do_regen(&mut self, rest: &str) -> Result<String, String> {
        match self.mode {
            Mode::Overland => {
                if rest.is_empty() {
                    self.overland.regenerate_day(&self.tables);
                    Ok(self.render_overland())
                } else if rest.eq_ignore_ascii_case("weather") {
                    self.overland.regenerate_weather(&self.tables);
                    Ok(self.render_overland())
                } else if let Some(watch) = Watch::parse(rest) {
                    self.overland.regenerate_watch(watch, &self.tables);
                    Ok(format!(
                        "{}: {}",
                        watch.label().bold(),
                        self.overland.encounter(watch)
                    ))
                } else {
                    Err(format!("usage: regen [weather|<watch>], got \"{rest}\""))
                }
            }
            Mode::Site => {
                if rest.is_empty() {
                    self.site.regenerate_turn(&self.tables);
                    Ok(self.render_site())
                } else if let Some(slot) = TimeSlot::parse(rest) {
                    self.site.regenerate_slot(slot, &self.tables);
                    Ok(format!("{}: {}", slot.label().bold(), self.site.slot(slot)))
                } else {
                    Err(format!("usage: regen [<slot>], got \"{rest}\""))
                }
            }
        }
    }

    fn do_timer(&mut self, rest: &str) -> Result<String, String> {
        let parts: Vec<&str> = rest.splitn(2, ' ').collect();
        match parts.first().map(|s| s.to_lowercase()).as_deref() {
            Some("add") => {
                let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");
                let (minutes, name) = rest
                    .split_once(' ')
                    .ok_or("usage: timer add <minutes> <name>")?;
                let minutes: i32 = minutes
                    .parse()
                    .map_err(|_| format!("\"{minutes}\" is not a number of minutes"))?;
                self.site.add_timer(name.trim(), minutes);
                Ok(self.render_timers())
            }
            Some("del") => {
                let index: usize = parts
                    .get(1)
                    .and_then(|s| s.trim().parse().ok())
                    .ok_or("usage: timer del <number>")?;
                // Displayed numbers are 1-based.
                let removed = index
                    .checked_sub(1)
                    .ok_or("usage: timer del <number>".to_string())
                    .and_then(|i| self.site.delete_timer(i).map_err(|e| e.to_string()))?;
                Ok(format!("Removed timer \"{}\".", removed.name))
            }
            _ => Err("usage: timer add <minutes> <name> | timer del <number>".into()),
        }
    }

    fn do_date(&mut self) -> Result<String, String> {
        let almanac = self.almanac.as_ref().ok_or("no calendar is loaded")?;
        let mut lines = Vec::new();
        match almanac.date_string() {
            Some(s) => lines.push(format!("Date: {s}")),
            None => lines.push("No current date set.".to_string()),
        }
        if let Some(season) = almanac.current_season() {
            lines.push(format!("Season: {season}"));
        }
        if let Some(h) = almanac.current_holiday() {
            lines.push(format!("Holiday: {} — {}", h.name, h.description));
        }
        if let Ok(phase) = almanac.lunar_phase() {
            let day = almanac.lunar_day().map_err(|e| e.to_string())?;
            let mut line = format!("Moon: {} {phase} (day {day})", phase.icon());
            if almanac.blood_moon_active() {
                line.push_str(&format!(" — {}", "BLOOD MOON".red().bold()));
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }

    fn do_advance(&mut self, rest: &str) -> Result<String, String> {
        let days: u32 = rest
            .parse()
            .map_err(|_| "usage: advance <days>".to_string())?;
        let almanac = self.almanac.as_mut().ok_or("no calendar is loaded")?;
        almanac.advance_date(days).map_err(|e| e.to_string())?;
        if almanac.lunar_enabled() {
            almanac
                .advance_lunar(i64::from(days))
                .map_err(|e| e.to_string())?;
        }
        if let Some(season) = almanac.current_season() {
            self.overland.set_season(season.to_owned());
        }
        self.do_date()
    }

    fn do_moon(&mut self, rest: &str) -> Result<String, String> {
        let almanac = self.almanac.as_mut().ok_or("no calendar is loaded")?;
        let phase = match rest {
            "+" => almanac.advance_lunar(1),
            "-" => almanac.advance_lunar(-1),
            _ => {
                let index: usize = rest
                    .parse()
                    .map_err(|_| "usage: moon +|-|<phase 0-7>".to_string())?;
                almanac.set_lunar_phase(index)
            }
        }
        .map_err(|e| e.to_string())?;

        let day = almanac.lunar_day().map_err(|e| e.to_string())?;
        let mut out = format!("Moon: {} {phase} (day {day})", phase.icon());
        if almanac.blood_moon_active() {
            out.push_str(&format!(" — {}", "BLOOD MOON".red().bold()));
        }
        Ok(out)
    }

    fn render_status(&self) -> String {
        let mut lines = vec![format!("Mode: {}", mode_name(self.mode))];
        match self.mode {
            Mode::Overland => {
                lines.push(format!(
                    "Zone: {}{} | Season: {} | Day {}",
                    self.overland.zone(),
                    self.overland
                        .overlay()
                        .map(|o| format!(" (+{o})"))
                        .unwrap_or_default(),
                    self.overland.season(),
                    self.overland.day(),
                ));
                if self.overland.day() > 0 {
                    lines.push(self.render_overland());
                }
            }
            Mode::Site => {
                lines.push(format!(
                    "Zone: {} | {}",
                    self.site.zone(),
                    self.site.time_display(),
                ));
                lines.push(self.render_site());
            }
        }
        lines.join("\n")
    }

    fn render_overland(&self) -> String {
        let mut lines = vec![format!("{} Day {}", "Overland".bold(), self.overland.day())];
        if let Some(weather) = self.overland.weather() {
            lines.push(format!("Weather: {weather}"));
        }
        for watch in Watch::ALL {
            let enc = self.overland.encounter(watch);
            let line = if enc.is_encounter() {
                let name = enc.name.clone().unwrap_or_default();
                let mut s = format!("  {:<12} {}", watch.label(), name.bold());
                for (i, spark) in enc.sparks.iter().enumerate() {
                    s.push_str(&format!("\n{:>16}{}. {spark}", "", i + 1));
                }
                s
            } else {
                format!("  {:<12} {}", watch.label(), "—".dimmed())
            };
            lines.push(line);
        }
        if let Some(rest) = self.overland.rest_info() {
            if !rest.rest_dcs.is_empty() {
                lines.push("Rest DCs:".to_string());
                for dc in &rest.rest_dcs {
                    lines.push(format!("  {:<20} {}", dc.camp, dc.dc));
                }
            }
            for m in &rest.weather_modifiers {
                lines.push(format!("  {} {} ({})", m.modifier, m.description, m.effect));
            }
            for m in &rest.situational_modifiers {
                lines.push(format!("  {} {}", m.modifier, m.situation));
            }
        }
        lines.join("\n")
    }

    fn render_site(&self) -> String {
        let mut lines = vec![format!(
            "{} {} in {}",
            "Site".bold(),
            self.site.time_display(),
            self.site.zone(),
        )];
        for slot in TimeSlot::ALL {
            let enc = self.site.slot(slot);
            let text = if enc.is_encounter() {
                enc.name.clone().unwrap_or_default()
            } else {
                "—".to_string()
            };
            lines.push(format!("  {:<12} {text}", slot.label()));
        }
        let timers = self.site.timers();
        if !timers.is_empty() {
            lines.push("Timers:".to_string());
            for (i, t) in timers.iter().enumerate() {
                lines.push(format!("  {}. {t}", i + 1));
            }
        }
        lines.join("\n")
    }

    fn render_timers(&self) -> String {
        let timers: &[Timer] = self.site.timers();
        if timers.is_empty() {
            return "No timers running.".to_string();
        }
        timers
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{}. {t}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn find_zone(&self, name: &str, valid: &[&str]) -> Option<String> {
        valid
            .iter()
            .find(|z| z.eq_ignore_ascii_case(name))
            .map(|z| (*z).to_string())
    }
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Overland => "overland",
        Mode::Site => "site",
    }
}

fn first_or_empty<'a>(names: &[&'a str]) -> &'a str {
    names.first().copied().unwrap_or("")
}

fn help_text() -> String {
    [
        "mode overland|site        switch play mode",
        "zone <name>               select the active zone for the mode",
        "overlay <name>|off        blend a second overland zone (50% per roll)",
        "season <name>             set the travel season",
        "day                       new overland day (advances the calendar too)",
        "regen [weather|<watch>]   reroll the day, just weather, or one watch",
        "turn                      next site turn (+10 minutes)",
        "regen [<slot>]            site mode: reroll the window or one slot",
        "timer add <min> <name>    start a countdown timer",
        "timer del <number>        remove a timer",
        "timers                    list timers",
        "date                      show date, season, holiday, moon",
        "advance <days>            advance the calendar",
        "moon +|-|<phase 0-7>      move or set the lunar phase",
        "status                    show the current state",
        "quit                      leave",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_core::{
        EncounterDef, RestTables, WeatherDef, WeightGrid, ZoneDef, ZoneKind,
    };
    use std::collections::BTreeMap;

    fn dataset() -> DataSet {
        let zones = vec![
            ZoneDef {
                name: "Forest".into(),
                kinds: vec![ZoneKind::Overland],
                encounter_chance: "100%".into(),
            },
            ZoneDef {
                name: "Old Road".into(),
                kinds: vec![ZoneKind::Overlay],
                encounter_chance: "100%".into(),
            },
            ZoneDef {
                name: "Crypt".into(),
                kinds: vec![ZoneKind::Site],
                encounter_chance: "100%".into(),
            },
        ];
        let all_watches: BTreeMap<_, _> = Watch::ALL
            .iter()
            .map(|w| (*w, "100%".to_string()))
            .collect();
        let encounters = vec![EncounterDef {
            name: "Wolves".into(),
            description: "A hungry pack.".into(),
            habitat: "forest".into(),
            sparks: vec!["Distant howling".into()],
            watch_chances: all_watches,
        }];
        let zone_weights = WeightGrid::new(
            vec!["Wolves".into()],
            vec!["Forest".into(), "Old Road".into(), "Crypt".into()],
            vec![vec![1.0, 1.0, 1.0]],
        )
        .unwrap();
        let season_weights = WeightGrid::new(
            vec!["Rain".into()],
            vec!["Spring".into()],
            vec![vec![1.0]],
        )
        .unwrap();
        let compendium = lc_core::Compendium::new(
            zones,
            encounters,
            vec![WeatherDef { name: "Rain".into(), effects: vec!["Wet".into()] }],
            RestTables::default(),
            zone_weights,
            season_weights,
        );
        DataSet {
            compendium,
            warnings: vec![],
            calendar: None,
            calendar_path: None,
        }
    }

    fn app() -> App {
        App::new(dataset(), 42)
    }

    #[test]
    fn defaults_come_from_the_data() {
        let a = app();
        assert_eq!(a.overland.zone(), "Forest");
        assert_eq!(a.overland.season(), "Spring");
        assert_eq!(a.site.zone(), "Crypt");
    }

    #[test]
    fn day_generates_a_full_day() {
        let mut a = app();
        let out = a.process("day").unwrap();
        assert_eq!(a.overland.day(), 1);
        assert!(out.contains("Day 1"));
        assert!(out.contains("Rain"));
    }

    #[test]
    fn unknown_commands_and_zones_are_user_errors() {
        let mut a = app();
        assert!(a.process("frobnicate").is_err());
        assert!(a.process("zone Atlantis").is_err());
        // State untouched.
        assert_eq!(a.overland.zone(), "Forest");
    }

    #[test]
    fn zone_selection_is_mode_dependent() {
        let mut a = app();
        // "Crypt" is a site zone, invalid while in overland mode.
        assert!(a.process("zone Crypt").is_err());
        a.process("mode site").unwrap();
        a.process("zone crypt").unwrap();
        assert_eq!(a.site.zone(), "Crypt");
    }

    #[test]
    fn turn_requires_site_mode() {
        let mut a = app();
        assert!(a.process("turn").is_err());
        a.process("mode site").unwrap();
        assert!(a.process("turn").is_ok());
        assert_eq!(a.site.minutes(), 10);
    }

    #[test]
    fn timers_round_trip_through_commands() {
        let mut a = app();
        a.process("mode site").unwrap();
        a.process("timer add 60 torch").unwrap();
        assert_eq!(a.site.timers().len(), 1);
        assert!(a.process("timers").unwrap().contains("torch"));
        a.process("timer del 1").unwrap();
        assert!(a.site.timers().is_empty());
        assert!(a.process("timer del 1").is_err());
        assert!(a.process("timer add sixty torch").is_err());
    }

    #[test]
    fn calendar_commands_without_calendar_fail_cleanly() {
        let mut a = app();
        assert!(a.process("date").is_err());
        assert!(a.process("advance 3").is_err());
        assert!(a.process("moon +").is_err());
    }

    #[test]
    fn overlay_set_and_clear() {
        let mut a = app();
        a.process("overlay old road").unwrap();
        assert_eq!(a.overland.overlay(), Some("Old Road"));
        a.process("overlay off").unwrap();
        assert_eq!(a.overland.overlay(), None);
    }
}
