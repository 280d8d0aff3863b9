//! Weighted random selection.
//!
//! The selector walks entries in slice order accumulating weight, so given
//! the same table and the same draw it always returns the same label. Tables
//! preserve their insertion order for exactly this reason.

use rand::Rng;
use rand::rngs::StdRng;

use crate::error::{CoreError, CoreResult};

/// Select one label from `entries` with probability proportional to its
/// weight among the strictly-positive entries.
///
/// Entries with weight `<= 0` are never selected. Returns
/// [`CoreError::EmptyDistribution`] if no entry has positive weight,
/// including an empty slice.
pub fn weighted_choice<'a>(
    entries: &'a [(String, f64)],
    rng: &mut StdRng,
) -> CoreResult<&'a str> {
    let total: f64 = entries.iter().filter(|(_, w)| *w > 0.0).map(|(_, w)| w).sum();
    if total <= 0.0 {
        return Err(CoreError::EmptyDistribution);
    }

    let draw = rng.random_range(0.0..=total);

    let mut cumulative = 0.0;
    let mut last = None;
    for (label, weight) in entries {
        if *weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last = Some(label.as_str());
        if draw <= cumulative {
            return Ok(label);
        }
    }

    // Floating-point accumulation can leave the draw a hair above the final
    // cumulative sum; the last positive entry absorbs it.
    last.ok_or(CoreError::EmptyDistribution)
}
