use crate::error::{Error, Result};
use num_traits::ToPrimitive;
use rug::{Float, Integer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A real number `raw / 2^wp` carried as an arbitrary precision integer
/// together with its scale.
///
/// Arithmetic between two values requires both to be at the same `wp`; a
/// mismatch is an internal invariant violation and panics. Use
/// [`Fixed::rescale`] to move between scales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixed {
    raw: Integer,
    wp: u32,
}

impl Fixed {
    pub fn from_raw(raw: Integer, wp: u32) -> Self {
        Fixed { raw, wp }
    }

    pub fn zero(wp: u32) -> Self {
        Fixed {
            raw: Integer::new(),
            wp,
        }
    }

    pub fn one(wp: u32) -> Self {
        Fixed {
            raw: Integer::from(1) << wp,
            wp,
        }
    }

    /// Converts `x` to the nearest fixed-point value at or below it.
    pub fn from_float(x: &Float, wp: u32, what: &'static str) -> Result<Self> {
        let (man, exp) = x.to_integer_exp().ok_or(Error::NonFinite { what })?;
        let shift = exp as i64 + wp as i64;
        let raw = if shift >= 0 {
            man << shift as u32
        } else {
            man >> (-shift) as u32
        };
        Ok(Fixed { raw, wp })
    }

    pub fn from_f64(x: f64, wp: u32) -> Result<Self> {
        Fixed::from_float(&Float::with_val(64, x), wp, "f64 input")
    }

    pub fn raw(&self) -> &Integer {
        &self.raw
    }

    pub fn wp(&self) -> u32 {
        self.wp
    }

    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// Re-expresses the value at scale `2^wp`, rounding down when bits are
    /// dropped.
    pub fn rescale(self, wp: u32) -> Self {
        let raw = if wp >= self.wp {
            self.raw << (wp - self.wp)
        } else {
            self.raw >> (self.wp - wp)
        };
        Fixed { raw, wp }
    }

    pub fn mul_int(&self, rhs: i64) -> Self {
        Fixed {
            raw: self.raw.clone() * rhs,
            wp: self.wp,
        }
    }

    /// Floor division by a nonzero integer.
    pub fn div_floor<D: Into<Integer>>(&self, divisor: D) -> Self {
        let divisor = divisor.into();
        assert!(divisor != 0, "fixed-point division by zero");
        let (quotient, _) = self.raw.clone().div_rem_floor(divisor);
        Fixed {
            raw: quotient,
            wp: self.wp,
        }
    }

    /// `1 / self`, rounded down.
    pub fn recip(&self) -> Self {
        assert!(self.raw != 0, "reciprocal of zero");
        let numerator = Integer::from(1) << (2 * self.wp);
        let (quotient, _) = numerator.div_rem_floor(self.raw.clone());
        Fixed {
            raw: quotient,
            wp: self.wp,
        }
    }

    pub fn to_float(&self, prec: u32) -> Float {
        Float::with_val(prec, &self.raw) >> self.wp
    }

    fn check_scale(&self, rhs: &Fixed) {
        assert_eq!(
            self.wp, rhs.wp,
            "fixed-point scale mismatch: 2^{} vs 2^{}",
            self.wp, rhs.wp
        );
    }
}

impl Add<&Fixed> for Fixed {
    type Output = Fixed;

    fn add(mut self, rhs: &Fixed) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<&Fixed> for Fixed {
    fn add_assign(&mut self, rhs: &Fixed) {
        self.check_scale(rhs);
        self.raw += &rhs.raw;
    }
}

impl Sub<&Fixed> for Fixed {
    type Output = Fixed;

    fn sub(mut self, rhs: &Fixed) -> Self::Output {
        self -= rhs;
        self
    }
}

impl SubAssign<&Fixed> for Fixed {
    fn sub_assign(&mut self, rhs: &Fixed) {
        self.check_scale(rhs);
        self.raw -= &rhs.raw;
    }
}

/// Product rounded down to the common scale.
impl Mul<&Fixed> for &Fixed {
    type Output = Fixed;

    fn mul(self, rhs: &Fixed) -> Self::Output {
        self.check_scale(rhs);
        Fixed {
            raw: Integer::from(&self.raw * &rhs.raw) >> self.wp,
            wp: self.wp,
        }
    }
}

impl Neg for Fixed {
    type Output = Fixed;

    fn neg(self) -> Self::Output {
        Fixed {
            raw: -self.raw,
            wp: self.wp,
        }
    }
}

impl ToPrimitive for Fixed {
    fn to_i64(&self) -> Option<i64> {
        Integer::from(&self.raw >> self.wp).to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        Integer::from(&self.raw >> self.wp).to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.to_float(64).to_f64())
    }
}

impl fmt::LowerHex for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.raw, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn float_conversion_rounds_down() {
        let x = Fixed::from_f64(-0.75, 4).unwrap();
        assert_eq!(*x.raw(), -12);
        let third = Float::with_val(64, 1) / 3u32;
        let y = Fixed::from_float(&third, 8, "1/3").unwrap();
        assert_eq!(*y.raw(), 85);
    }

    #[test]
    fn non_finite_is_an_error() {
        let nan = Float::with_val(53, f64::NAN);
        assert_eq!(
            Fixed::from_float(&nan, 10, "nan"),
            Err(Error::NonFinite { what: "nan" })
        );
    }

    #[test]
    fn product_keeps_scale() {
        let a = Fixed::from_f64(1.5, 32).unwrap();
        let b = Fixed::from_f64(-2.25, 32).unwrap();
        let c = &a * &b;
        assert_eq!(c.wp(), 32);
        assert_relative_eq!(c.to_f64().unwrap(), -3.375);
    }

    #[test]
    fn floor_division() {
        let a = Fixed::from_raw(Integer::from(-7), 0);
        assert_eq!(*a.div_floor(2).raw(), -4);
        assert_eq!(*a.div_floor(-2).raw(), 3);
        assert_eq!(*a.div_floor(&Integer::from(7)).raw(), -1);
    }

    #[test]
    fn reciprocal() {
        let four = Fixed::from_f64(4.0, 16).unwrap();
        assert_eq!(four.recip(), Fixed::from_f64(0.25, 16).unwrap());
    }

    #[test]
    fn rescale_both_ways() {
        let a = Fixed::one(10).rescale(20);
        assert_eq!(a, Fixed::one(20));
        let b = Fixed::from_raw(Integer::from(-3), 2).rescale(1);
        assert_eq!(*b.raw(), -2);
    }

    #[test]
    #[should_panic(expected = "scale mismatch")]
    fn mixing_scales_panics() {
        let _ = Fixed::one(10) + &Fixed::one(11);
    }
}
