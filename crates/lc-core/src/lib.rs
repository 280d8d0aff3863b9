//! Core generation engine for Lanterncrawl, a content-generation aid for
//! tabletop game masters.
//!
//! This crate is pure domain logic: weighted random selection, probability
//! tables, encounter/weather/rest generation, the overland and site session
//! state machines, and a fantasy calendar with lunar phases. It performs no
//! file I/O — data arrives as a [`Compendium`] built by an external loader,
//! and calendar persistence goes through the injected [`CalendarStore`]
//! trait.

/// Calendar engine wiring a [`Calendar`] to an injected storage capability.
pub mod almanac;
/// Months, holidays, and date arithmetic with cyclic month wrapping.
pub mod calendar;
/// Static zone/encounter/weather/rest definitions and the [`Compendium`].
pub mod content;
/// Encounter results and the overland/site encounter generators.
pub mod encounter;
/// Error types used throughout the crate.
pub mod error;
/// Lunar phases and blood-moon state.
pub mod lunar;
/// Percentage-string parsing.
pub mod percent;
/// Rest-check information derived from season and weather.
pub mod rest;
/// Overland and site session state machines.
pub mod session;
/// Labelled weight grids and the closed watch/time-slot label sets.
pub mod tables;
/// Countdown timers for site play.
pub mod timer;
/// Weather results and the carry-over weather generator.
pub mod weather;
/// Weighted random selection over label/weight entries.
pub mod weighted;

pub use almanac::{Almanac, CalendarStore, NullStore, PersistError};
pub use calendar::{Calendar, CalendarDate, Holiday, Month};
pub use content::{Compendium, EncounterDef, RestTables, WeatherDef, ZoneDef, ZoneKind};
pub use encounter::Encounter;
pub use error::{CoreError, CoreResult};
pub use lunar::MoonPhase;
pub use percent::parse_percentage;
pub use rest::RestInfo;
pub use session::overland::OverlandSession;
pub use session::site::{SiteSession, format_time_display};
pub use tables::{TimeSlot, Watch, WatchGrid, WeightGrid};
pub use timer::Timer;
pub use weather::{NO_CHANGE, Weather};
pub use weighted::weighted_choice;
