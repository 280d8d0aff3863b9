//! The fantasy calendar: months, seasons, holidays, and date arithmetic.
//!
//! Calendars are perpetual: there is no year, and advancing past the last
//! month wraps back to the first. The calendar itself is pure data plus
//! arithmetic; mutation and persistence are orchestrated by the
//! [`Almanac`](crate::Almanac).

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// One month of the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    /// Month name, e.g. "Frostfall".
    pub name: String,
    /// The season this month belongs to; must match a season column of the
    /// weather grid for weather generation to follow the date.
    pub season: String,
    /// Number of days in the month.
    pub days: u32,
}

/// A fixed holiday, keyed by month name and day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The month the holiday falls in, by name.
    pub month: String,
    /// Day of the month, 1-based.
    pub day: u32,
    /// Holiday name.
    pub name: String,
    /// GM-facing description.
    #[serde(default)]
    pub description: String,
}

/// A calendar date: 1-based month index and 1-based day of month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    /// Month index into the month list, 1-based.
    pub month: u32,
    /// Day of the month, 1-based.
    pub day: u32,
}

/// The calendar definition plus its mutable current state.
///
/// `current_date` and the lunar fields are the only parts that change at
/// runtime; everything else is loaded once and read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    /// Months in year order.
    pub months: Vec<Month>,
    /// Holiday list; at most one holiday per date.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Days per week, used for display grouping.
    #[serde(default = "default_days_per_week")]
    pub days_per_week: u32,
    /// The tracked date, if one has been set.
    #[serde(default)]
    pub current_date: Option<CalendarDate>,
    /// Length of the lunar cycle in days; `None` disables lunar tracking.
    #[serde(default)]
    pub lunar_cycle_length: Option<u32>,
    /// Current 1-based lunar day, when lunar tracking is enabled.
    #[serde(default)]
    pub lunar_day: Option<u32>,
    /// Chance a full moon is a blood moon, as a percentage string ("5%").
    #[serde(default)]
    pub blood_moon_chance: String,
    /// Whether the current full moon is a blood moon.
    #[serde(default)]
    pub blood_moon_active: bool,
}

fn default_days_per_week() -> u32 {
    7
}

impl Calendar {
    /// Look up a month by 1-based index.
    pub fn month(&self, index: u32) -> Option<&Month> {
        index
            .checked_sub(1)
            .and_then(|i| self.months.get(i as usize))
    }

    /// Check that a date names an existing month and a day within it.
    pub fn validate_date(&self, date: CalendarDate) -> CoreResult<()> {
        match self.month(date.month) {
            Some(m) if date.day >= 1 && date.day <= m.days => Ok(()),
            _ => Err(CoreError::InvalidDate {
                month: date.month,
                day: date.day,
            }),
        }
    }

    /// The date `days` days after `date`, wrapping month lengths and
    /// cycling past the last month back to the first.
    ///
    /// The calendar is cyclic, so `days` is reduced modulo the full year
    /// length first; arbitrarily large advances cannot overflow or walk
    /// more than one cycle of months.
    pub fn advanced(&self, date: CalendarDate, days: u32) -> CoreResult<CalendarDate> {
        self.validate_date(date)?;
        // validate_date implies months is non-empty and the current month
        // has at least one day, so the cycle length is never zero.
        let cycle: u64 = self.months.iter().map(|m| u64::from(m.days)).sum();
        let mut month = date.month;
        let mut day = u64::from(date.day) + u64::from(days) % cycle;
        let mut len = u64::from(self.months[(month - 1) as usize].days);
        while day > len {
            day -= len;
            month = if month == self.months.len() as u32 { 1 } else { month + 1 };
            len = u64::from(self.months[(month - 1) as usize].days);
        }
        Ok(CalendarDate { month, day: day as u32 })
    }

    /// The season of the month containing `date`.
    pub fn season_of(&self, date: CalendarDate) -> Option<&str> {
        self.month(date.month).map(|m| m.season.as_str())
    }

    /// The holiday falling on `date`, if any.
    pub fn holiday_on(&self, date: CalendarDate) -> Option<&Holiday> {
        let month = self.month(date.month)?;
        self.holidays
            .iter()
            .find(|h| h.month == month.name && h.day == date.day)
    }

    /// Format a date as "14th of Frostfall".
    pub fn format_date(&self, date: CalendarDate) -> Option<String> {
        self.month(date.month)
            .map(|m| format!("{} of {}", ordinal(date.day), m.name))
    }
}

/// Ordinal form of a day number: "1st", "2nd", "3rd", "11th", "22nd".
fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, 11) | (2, 12) | (3, 13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
