//! The almanac: calendar state transitions plus injected persistence.
//!
//! The [`Calendar`] is pure data and arithmetic; the almanac layers the
//! mutations on top and pushes every date or lunar change to a
//! [`CalendarStore`]. Persistence is best effort: a failed write is logged
//! and the in-memory state is kept, never rolled back.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::calendar::{Calendar, CalendarDate, Holiday};
use crate::error::{CoreError, CoreResult};
use crate::lunar::MoonPhase;
use crate::percent::parse_percentage;

/// A calendar persistence failure. Reported, never fatal.
#[derive(Debug, Error)]
#[error("calendar persistence failed: {0}")]
pub struct PersistError(pub String);

/// Storage for the mutable calendar fields.
///
/// Implementations write the tracked date and lunar state somewhere
/// durable; everything else in the calendar is read-only and never saved.
pub trait CalendarStore {
    /// Persist the current date.
    fn save_date(&mut self, date: CalendarDate) -> Result<(), PersistError>;
    /// Persist the lunar day and blood-moon flag.
    fn save_lunar(&mut self, day: u32, blood_moon: bool) -> Result<(), PersistError>;
}

/// A store that keeps nothing. Used when no calendar file is on disk.
#[derive(Debug, Default)]
pub struct NullStore;

impl CalendarStore for NullStore {
    fn save_date(&mut self, _date: CalendarDate) -> Result<(), PersistError> {
        Ok(())
    }

    fn save_lunar(&mut self, _day: u32, _blood_moon: bool) -> Result<(), PersistError> {
        Ok(())
    }
}

/// A calendar plus the store its changes are written to.
pub struct Almanac {
    calendar: Calendar,
    store: Box<dyn CalendarStore>,
    rng: StdRng,
}

impl Almanac {
    /// Wrap a calendar and a store. If lunar tracking is enabled but no
    /// lunar day is recorded, the day defaults to 1.
    pub fn new(calendar: Calendar, store: Box<dyn CalendarStore>, seed: u64) -> Self {
        let mut almanac = Self {
            calendar,
            store,
            rng: StdRng::seed_from_u64(seed),
        };
        almanac.initialize_lunar_day();
        almanac
    }

    /// The wrapped calendar.
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Whether lunar tracking is enabled.
    pub fn lunar_enabled(&self) -> bool {
        self.calendar.lunar_cycle_length.is_some()
    }

    /// Whether the current full moon is a blood moon.
    pub fn blood_moon_active(&self) -> bool {
        self.calendar.blood_moon_active
    }

    /// The season of the current date, if a date is set.
    pub fn current_season(&self) -> Option<&str> {
        self.calendar
            .current_date
            .and_then(|d| self.calendar.season_of(d))
    }

    /// The current date formatted for display, if a date is set.
    pub fn date_string(&self) -> Option<String> {
        self.calendar
            .current_date
            .and_then(|d| self.calendar.format_date(d))
    }

    /// The holiday on the current date, if any.
    pub fn current_holiday(&self) -> Option<&Holiday> {
        self.calendar
            .current_date
            .and_then(|d| self.calendar.holiday_on(d))
    }

    /// Set the current date and persist it.
    pub fn set_date(&mut self, date: CalendarDate) -> CoreResult<()> {
        self.calendar.validate_date(date)?;
        self.calendar.current_date = Some(date);
        self.persist_date(date);
        Ok(())
    }

    /// Advance the current date by `days`, wrapping month lengths and
    /// cycling past the last month. The new date is persisted.
    ///
    /// Fails with [`CoreError::NoCurrentDate`] if no date has been set.
    pub fn advance_date(&mut self, days: u32) -> CoreResult<CalendarDate> {
        let current = self.calendar.current_date.ok_or(CoreError::NoCurrentDate)?;
        let next = self.calendar.advanced(current, days)?;
        self.calendar.current_date = Some(next);
        log::info!("date advanced by {days} to month {} day {}", next.month, next.day);
        self.persist_date(next);
        Ok(next)
    }

    /// The current lunar phase.
    pub fn lunar_phase(&self) -> CoreResult<MoonPhase> {
        let cycle = self.cycle_length()?;
        let day = self.calendar.lunar_day.unwrap_or(1);
        Ok(MoonPhase::from_day(day, cycle))
    }

    /// The current 1-based lunar day.
    pub fn lunar_day(&self) -> CoreResult<u32> {
        self.cycle_length()?;
        Ok(self.calendar.lunar_day.unwrap_or(1))
    }

    /// Move the lunar day by `delta` days, wrapping modulo the cycle in
    /// either direction, and persist the new lunar state.
    ///
    /// Crossing into the full-moon phase rolls the blood-moon chance once;
    /// moving within the full-moon phase keeps the existing result; leaving
    /// it always clears the flag.
    pub fn advance_lunar(&mut self, delta: i64) -> CoreResult<MoonPhase> {
        let cycle = self.cycle_length()?;
        let day = self.calendar.lunar_day.unwrap_or(1);
        let before = MoonPhase::from_day(day, cycle);

        let span = i64::from(cycle);
        let next = (i64::from(day) - 1 + delta).rem_euclid(span) as u32 + 1;
        let after = MoonPhase::from_day(next, cycle);

        self.calendar.lunar_day = Some(next);
        self.on_phase_change(before, after);
        self.persist_lunar();
        Ok(after)
    }

    /// Jump the lunar day to the first day of the phase at `index`.
    ///
    /// Jumping to the full-moon phase always re-rolls the blood moon; any
    /// other target clears it. An invalid index changes nothing.
    pub fn set_lunar_phase(&mut self, index: usize) -> CoreResult<MoonPhase> {
        let cycle = self.cycle_length()?;
        let phase = MoonPhase::from_index(index).ok_or(CoreError::PhaseIndex(index))?;

        self.calendar.lunar_day = Some(phase.first_day(cycle));
        self.calendar.blood_moon_active =
            phase == MoonPhase::FullMoon && self.roll_blood_moon();
        self.persist_lunar();
        Ok(phase)
    }

    /// Default the lunar day to 1 when tracking is enabled but no day is
    /// recorded.
    pub fn initialize_lunar_day(&mut self) {
        if self.calendar.lunar_cycle_length.is_some() && self.calendar.lunar_day.is_none()
        {
            self.calendar.lunar_day = Some(1);
        }
    }

    fn cycle_length(&self) -> CoreResult<u32> {
        self.calendar.lunar_cycle_length.ok_or(CoreError::LunarDisabled)
    }

    fn on_phase_change(&mut self, before: MoonPhase, after: MoonPhase) {
        if after == MoonPhase::FullMoon && before != MoonPhase::FullMoon {
            self.calendar.blood_moon_active = self.roll_blood_moon();
            if self.calendar.blood_moon_active {
                log::info!("blood moon rises");
            }
        } else if after != MoonPhase::FullMoon {
            self.calendar.blood_moon_active = false;
        }
    }

    fn roll_blood_moon(&mut self) -> bool {
        let chance = match parse_percentage(&self.calendar.blood_moon_chance) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("blood moon chance: {e}");
                0.0
            }
        };
        self.rng.random::<f64>() < chance
    }

    fn persist_date(&mut self, date: CalendarDate) {
        if let Err(e) = self.store.save_date(date) {
            log::warn!("{e}");
        }
    }

    fn persist_lunar(&mut self) {
        let day = self.calendar.lunar_day.unwrap_or(1);
        let blood_moon = self.calendar.blood_moon_active;
        if let Err(e) = self.store.save_lunar(day, blood_moon) {
            log::warn!("{e}");
        }
    }
}
