use crate::bernoulli::even_bernoulli_numbers;
use rug::float::{Constant, Special};
use rug::{Float, Rational};
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// The constants the zeta and coefficient computations draw from the
/// arbitrary precision layer. Every value is produced at an explicit
/// precision in bits.
pub trait ConstantSource: Send + Sync {
    fn pi(&self, prec: u32) -> Float;

    /// Euler-Mascheroni constant
    fn euler(&self, prec: u32) -> Float;

    /// Signed Bernoulli number `B_n` with `B_1 = -1/2`.
    fn bernoulli(&self, n: u32, prec: u32) -> Float;

    fn exp(&self, x: &Float, prec: u32) -> Float;
}

/// MPFR backed constants. Bernoulli numbers are kept as exact rationals in a
/// table that grows as larger indices are requested.
pub struct MpfrConstants {
    even_bernoulli: Mutex<Vec<Rational>>,
}

impl MpfrConstants {
    pub fn new() -> Self {
        MpfrConstants {
            even_bernoulli: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MpfrConstants {
    fn default() -> Self {
        MpfrConstants::new()
    }
}

impl fmt::Debug for MpfrConstants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self
            .even_bernoulli
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("MpfrConstants")
            .field("cached_bernoulli", &cached)
            .finish()
    }
}

impl ConstantSource for MpfrConstants {
    fn pi(&self, prec: u32) -> Float {
        Float::with_val(prec, Constant::Pi)
    }

    fn euler(&self, prec: u32) -> Float {
        Float::with_val(prec, Constant::Euler)
    }

    fn bernoulli(&self, n: u32, prec: u32) -> Float {
        match n {
            0 => return Float::with_val(prec, 1),
            1 => return Float::with_val(prec, -0.5),
            n if n % 2 == 1 => return Float::with_val(prec, Special::Zero),
            _ => {}
        }
        let k = (n / 2) as usize;
        let mut table = self
            .even_bernoulli
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if table.len() <= k {
            // Doubling keeps a sweep over increasing n at O(n^2) total work
            let m = k.max(2 * table.len());
            debug!("extending Bernoulli table to B_{}", 2 * m);
            *table = even_bernoulli_numbers(m);
        }
        Float::with_val(prec, &table[k])
    }

    fn exp(&self, x: &Float, prec: u32) -> Float {
        Float::with_val(prec, x.exp_ref())
    }
}
