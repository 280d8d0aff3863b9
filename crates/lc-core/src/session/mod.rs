//! Overland and site session state machines.
//!
//! Sessions own the mutable play state (counters, generated content, a
//! seeded RNG) and borrow the read-only [`Compendium`](crate::Compendium)
//! per operation. There are no hidden globals; the application root owns
//! the sessions and passes them wherever they are needed.

/// Overland travel: day counter, daily weather, six watch encounters.
pub mod overland;
/// Site exploration: elapsed minutes, sliding encounter window, timers.
pub mod site;
