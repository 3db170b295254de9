use crate::error::{Error, Result};

/// Empirical tuning constants for the coefficient computation.
///
/// The defaults reproduce the calibrated values: a 20 bit output guard, a 30
/// bit guard inside the zeta computation and a two-regime power law for the
/// number of terms. The power law has been checked up to roughly 15000 bits.
#[derive(Debug, Clone, PartialEq)]
pub struct TaylorConfig {
    pub output_guard_bits: u32,
    pub zeta_guard_bits: u32,
    pub low_exponent: f64,
    pub high_exponent: f64,
    /// Precisions at or above this use `high_exponent`
    pub regime_threshold: u32,
    /// Largest precision the power law was checked against
    pub validated_precision: u32,
}

impl Default for TaylorConfig {
    fn default() -> Self {
        TaylorConfig {
            output_guard_bits: 20,
            zeta_guard_bits: 30,
            low_exponent: 0.76,
            high_exponent: 0.787,
            regime_threshold: 1000,
            validated_precision: 15000,
        }
    }
}

impl TaylorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.output_guard_bits == 0 || self.zeta_guard_bits == 0 {
            return Err(Error::InvalidConfig {
                reason: "guard margins must be at least one bit".to_string(),
            });
        }
        for (name, exponent) in [
            ("low_exponent", self.low_exponent),
            ("high_exponent", self.high_exponent),
        ] {
            if !exponent.is_finite() || exponent <= 0.0 {
                return Err(Error::InvalidConfig {
                    reason: format!("{} must be positive, got {}", name, exponent),
                });
            }
        }
        Ok(())
    }

    /// Number of Taylor terms needed so that the series error stays below one
    /// unit in the last bit of `prec` for arguments within 0.5 of the
    /// expansion point.
    pub fn truncation_length(&self, prec: u32) -> usize {
        let exponent = if prec < self.regime_threshold {
            self.low_exponent
        } else {
            self.high_exponent
        };
        ((prec as f64).powf(exponent) + 2.0) as usize
    }

    /// Working precision of the recurrence
    pub fn working_precision(&self, prec: u32) -> u32 {
        prec + self.output_guard_bits
    }
}
