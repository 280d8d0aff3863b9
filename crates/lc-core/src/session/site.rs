//! The site session state machine.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::content::Compendium;
use crate::encounter::{Encounter, roll_site_encounter};
use crate::error::{CoreError, CoreResult};
use crate::tables::TimeSlot;
use crate::timer::Timer;

/// Minutes added per site turn, and the amount each timer ticks down.
const TURN_MINUTES: i32 = 10;

/// One site exploration session: elapsed minutes, a sliding six-slot
/// encounter window, per-slot expansion flags, and a countdown timer list.
///
/// On each turn the window slides: `Current` takes `+10`'s content and so
/// on, with a fresh encounter rolled for the new `+50`. Expansion flags
/// shift in lockstep so an expanded upcoming encounter stays expanded as it
/// approaches.
pub struct SiteSession {
    minutes: u32,
    window: [Encounter; 6],
    expanded: [bool; 6],
    timers: Vec<Timer>,
    zone: String,
    rng: StdRng,
}

impl SiteSession {
    /// Create a session with an empty window. Call
    /// [`SiteSession::reset`] to populate the initial window.
    pub fn new(zone: impl Into<String>, seed: u64) -> Self {
        Self {
            minutes: 0,
            window: Default::default(),
            expanded: [false; 6],
            timers: Vec::new(),
            zone: zone.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Minutes elapsed since reset.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Elapsed time formatted for display.
    pub fn time_display(&self) -> String {
        format_time_display(self.minutes)
    }

    /// The encounter in a slot.
    pub fn slot(&self, slot: TimeSlot) -> &Encounter {
        &self.window[slot.index()]
    }

    /// Active timers, sorted ascending by remaining duration.
    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    /// The selected site zone.
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Select a site zone. Takes effect on the next generation.
    pub fn set_zone(&mut self, zone: impl Into<String>) {
        self.zone = zone.into();
    }

    /// Whether a slot's details are expanded in the presentation layer.
    pub fn is_expanded(&self, slot: TimeSlot) -> bool {
        self.expanded[slot.index()]
    }

    /// Set a slot's expansion flag.
    pub fn set_expanded(&mut self, slot: TimeSlot, expanded: bool) {
        self.expanded[slot.index()] = expanded;
    }

    /// Reset to 0 minutes: timers cleared, expansion flags cleared,
    /// `Current` forced empty, and the five future slots freshly generated.
    pub fn reset(&mut self, tables: &Compendium) {
        self.minutes = 0;
        self.timers.clear();
        self.expanded = [false; 6];
        self.window[0] = Encounter::empty();
        for slot in &TimeSlot::ALL[1..] {
            self.window[slot.index()] =
                roll_site_encounter(&self.zone, *slot, tables, &mut self.rng);
        }
        log::info!("site reset to 0 minutes");
    }

    /// Advance one turn: +10 minutes, timers ticked down (expired ones
    /// dropped), window and expansion flags shifted forward, and a fresh
    /// encounter rolled into `+50`.
    pub fn new_turn(&mut self, tables: &Compendium) {
        self.minutes += TURN_MINUTES as u32;
        log::info!("site: {} minutes", self.minutes);

        for timer in &mut self.timers {
            timer.tick(TURN_MINUTES);
            if timer.is_expired() {
                log::info!("timer expired: {}", timer.name);
            }
        }
        self.timers.retain(|t| !t.is_expired());

        self.window.rotate_left(1);
        self.window[5] =
            roll_site_encounter(&self.zone, TimeSlot::Plus50, tables, &mut self.rng);

        self.expanded.rotate_left(1);
        self.expanded[5] = false;
    }

    /// Regenerate all six slots in place, `Current` included. Minutes and
    /// timers are untouched; expansion flags are cleared.
    pub fn regenerate_turn(&mut self, tables: &Compendium) {
        log::info!("site: regenerating turn at {} minutes", self.minutes);
        self.expanded = [false; 6];
        for slot in TimeSlot::ALL {
            self.window[slot.index()] =
                roll_site_encounter(&self.zone, slot, tables, &mut self.rng);
        }
    }

    /// Regenerate a single slot using the current zone.
    pub fn regenerate_slot(&mut self, slot: TimeSlot, tables: &Compendium) {
        self.window[slot.index()] =
            roll_site_encounter(&self.zone, slot, tables, &mut self.rng);
    }

    /// Add a timer. Negative durations clamp to 0; the list is re-sorted
    /// ascending by remaining duration.
    pub fn add_timer(&mut self, name: impl Into<String>, duration: i32) {
        let timer = Timer::new(name, duration);
        log::info!("timer added: {} ({} minutes)", timer.name, timer.remaining);
        self.timers.push(timer);
        self.timers.sort_by_key(|t| t.remaining);
    }

    /// Delete a timer by list position. An out-of-range index is an error
    /// and changes nothing.
    pub fn delete_timer(&mut self, index: usize) -> CoreResult<Timer> {
        if index >= self.timers.len() {
            return Err(CoreError::TimerIndex(index));
        }
        let timer = self.timers.remove(index);
        log::info!("timer deleted: {}", timer.name);
        Ok(timer)
    }
}

/// Format elapsed site time.
///
/// Up to 50 minutes it is plain; past that the hour breakdown is appended:
/// `format_time_display(130) == "130 minutes (2 hours 10 minutes)"`.
pub fn format_time_display(minutes: u32) -> String {
    if minutes <= 50 {
        return format!("{minutes} minutes");
    }
    let hours = minutes / 60;
    let rem = minutes % 60;
    format!(
        "{minutes} minutes ({hours} hour{} {rem} minute{})",
        if hours == 1 { "" } else { "s" },
        if rem == 1 { "" } else { "s" },
    )
}
