//! Percentage-string parsing.

use crate::error::{CoreError, CoreResult};

/// Parse a percentage string into a fraction in `[0.0, 1.0]`.
///
/// Accepts surrounding whitespace and an optional trailing `%` (itself
/// allowed to be preceded by whitespace). Values outside 0-100 are clamped.
///
/// ```
/// use lc_core::parse_percentage;
///
/// assert_eq!(parse_percentage("15%").unwrap(), 0.15);
/// assert_eq!(parse_percentage(" 100 % ").unwrap(), 1.0);
/// assert_eq!(parse_percentage("150%").unwrap(), 1.0);
/// assert!(parse_percentage("abc").is_err());
/// ```
pub fn parse_percentage(s: &str) -> CoreResult<f64> {
    let cleaned = s.trim().strip_suffix('%').unwrap_or(s.trim()).trim();
    let value: f64 = cleaned
        .parse()
        .map_err(|_| CoreError::InvalidPercentage(s.to_string()))?;
    Ok((value / 100.0).clamp(0.0, 1.0))
}
