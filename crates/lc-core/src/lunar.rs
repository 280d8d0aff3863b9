//! Lunar phases.
//!
//! A lunar cycle of any length is divided into 8 equal phases; phase
//! index 4 is the full moon. Day and phase arithmetic lives here; blood-moon
//! state belongs to the [`Almanac`](crate::Almanac), which owns the roll.

/// One of the eight lunar phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoonPhase {
    /// Phase 0.
    NewMoon,
    /// Phase 1.
    WaxingCrescent,
    /// Phase 2.
    FirstQuarter,
    /// Phase 3.
    WaxingGibbous,
    /// Phase 4.
    FullMoon,
    /// Phase 5.
    WaningGibbous,
    /// Phase 6.
    LastQuarter,
    /// Phase 7.
    WaningCrescent,
}

impl MoonPhase {
    /// All phases in cycle order.
    pub const ALL: [MoonPhase; 8] = [
        MoonPhase::NewMoon,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::FullMoon,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }

    /// Icon for terminal display.
    pub fn icon(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "\u{1F311}",
            MoonPhase::WaxingCrescent => "\u{1F312}",
            MoonPhase::FirstQuarter => "\u{1F313}",
            MoonPhase::WaxingGibbous => "\u{1F314}",
            MoonPhase::FullMoon => "\u{1F315}",
            MoonPhase::WaningGibbous => "\u{1F316}",
            MoonPhase::LastQuarter => "\u{1F317}",
            MoonPhase::WaningCrescent => "\u{1F318}",
        }
    }

    /// Position in [`MoonPhase::ALL`].
    pub fn index(self) -> usize {
        match self {
            MoonPhase::NewMoon => 0,
            MoonPhase::WaxingCrescent => 1,
            MoonPhase::FirstQuarter => 2,
            MoonPhase::WaxingGibbous => 3,
            MoonPhase::FullMoon => 4,
            MoonPhase::WaningGibbous => 5,
            MoonPhase::LastQuarter => 6,
            MoonPhase::WaningCrescent => 7,
        }
    }

    /// Phase from a 0-based index.
    pub fn from_index(index: usize) -> Option<Self> {
        MoonPhase::ALL.get(index).copied()
    }

    /// The phase containing a 1-based lunar day in a cycle of
    /// `cycle_length` days.
    ///
    /// The cycle is split into 8 equal spans; rounding at the top end is
    /// clamped into the last phase.
    pub fn from_day(day: u32, cycle_length: u32) -> Self {
        let span = f64::from(cycle_length) / 8.0;
        let index = (f64::from(day.saturating_sub(1)) / span).floor() as usize;
        MoonPhase::ALL[index.min(7)]
    }

    /// The first 1-based lunar day of this phase in a cycle of
    /// `cycle_length` days.
    pub fn first_day(self, cycle_length: u32) -> u32 {
        let span = f64::from(cycle_length) / 8.0;
        // Smallest integer day with (day - 1) >= index * span.
        (self.index() as f64 * span).ceil() as u32 + 1
    }
}

impl std::fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
