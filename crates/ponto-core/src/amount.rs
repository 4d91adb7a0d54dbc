//! Currency amount normalization.
//!
//! The UI hands over amounts as locale-formatted major-unit strings
//! (`"15,50"` or `"15.50"`). Everything sent to the provider is an integer
//! string in minor units (cents). IEEE-754 double parsing is acceptable here:
//! inputs are bounded 2-decimal currency values and the rounding step is
//! explicit, so no precision is lost (see tests).

use crate::error::{CoreError, Result};

/// Fixed default charge in minor units ("100" = one major unit), used when a
/// tenant's profile sets `use_fixed_amount`.
pub const FIXED_AMOUNT_MINOR: &str = "100";

/// Convert a major-unit amount string to an integer minor-unit string.
///
/// The first decimal comma is normalized to a decimal point before parsing,
/// then the value is multiplied by 100 and rounded half-to-nearest.
///
/// # Errors
///
/// Returns `CoreError::InvalidAmount` if the string does not parse or the
/// parsed value is not positive.
pub fn to_minor_units(amount_major: &str) -> Result<String> {
    let normalized = amount_major.replacen(',', ".", 1);
    let value: f64 = normalized
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidAmount(format!("not a number: {amount_major:?}")))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(CoreError::InvalidAmount(format!(
            "amount must be positive: {amount_major:?}"
        )));
    }

    let cents = (value * 100.0).round() as i64;
    Ok(cents.to_string())
}

/// The fixed-amount-mode charge in minor units. No user input is consulted.
#[must_use]
pub fn fixed_minor_units() -> String {
    FIXED_AMOUNT_MINOR.to_string()
}
