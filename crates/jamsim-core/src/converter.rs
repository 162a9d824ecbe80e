//! Cost/capacity conversion
//!
//! Holding an endorsed HTLC for longer occupies a protected slot for longer,
//! so the reputation surplus needed to endorse an amount grows with the hold
//! duration. `capacity` and `cost` are exact inverses over the same `K, C`:
//!
//! ```text
//! capacity(surplus, hold) = surplus * K / (hold * C)
//! cost(amount, hold)      = amount * hold * C / K
//! ```

use crate::errors::{JamSimError, Result};
use serde::{Deserialize, Serialize};

/// Symmetric conversion between reputation and endorsable capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Converter {
    numerator: u64,
    denominator: u64,
    max_hold: u64,
}

impl Converter {
    /// Create a converter for constants `K = numerator`, `C = denominator`.
    pub fn new(numerator: u64, denominator: u64, max_hold: u64) -> Self {
        Self {
            numerator,
            denominator,
            max_hold,
        }
    }

    /// Reject hold durations that leave the divisor at zero or exceed the
    /// protocol maximum.
    pub fn check_hold(&self, hold: u64) -> Result<()> {
        if hold == 0 || hold > self.max_hold || self.denominator == 0 || self.numerator == 0 {
            return Err(JamSimError::hold_duration(hold, self.max_hold));
        }
        Ok(())
    }

    /// Amount that a reputation `surplus` above threshold can get endorsed
    /// when each HTLC is held for `hold`.
    pub fn capacity(&self, surplus: u64, hold: u64) -> Result<u64> {
        self.check_hold(hold)?;
        let scaled = u128::from(surplus) * u128::from(self.numerator);
        let divisor = u128::from(hold) * u128::from(self.denominator);
        Ok(saturate(Some(scaled / divisor)))
    }

    /// Reputation that endorsing `amount` for `hold` costs, which is also the
    /// penalty applied when that HTLC is used to slow jam.
    pub fn cost(&self, amount: u64, hold: u64) -> Result<u64> {
        self.check_hold(hold)?;
        let scaled = (u128::from(amount) * u128::from(hold))
            .checked_mul(u128::from(self.denominator))
            .map(|v| v / u128::from(self.numerator));
        Ok(saturate(scaled))
    }
}

fn saturate(value: Option<u128>) -> u64 {
    value
        .and_then(|v| u64::try_from(v).ok())
        .unwrap_or(u64::MAX)
}
