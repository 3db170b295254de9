use crate::config::TaylorConfig;
use crate::constants::ConstantSource;
use crate::error::{Error, Result};
use crate::fixed::Fixed;
use rug::ops::Pow;
use rug::{Float, Integer};
use tracing::{debug, trace};

/// Fixed-point approximations to `zeta(0), zeta(2), .., zeta(n+1)` at scale
/// `2^wp`. The returned vector has `n + 2` entries; entry 1 (the pole) is left
/// at zero and never read by the coefficient recurrence.
///
/// Even values come from the Bernoulli closed form. Odd values start from the
/// rapidly converging sums over `1/(k^s (exp(2 pi k) - 1))` and are completed
/// by Ramanujan-type identities that express the remaining part through
/// products of even zeta values divided by pi. All intermediate work carries
/// `config.zeta_guard_bits` extra bits.
pub fn zeta_array(
    n: usize,
    wp: u32,
    config: &TaylorConfig,
    constants: &dyn ConstantSource,
) -> Result<Vec<Fixed>> {
    if wp == 0 {
        return Err(Error::ZeroPrecision);
    }
    if n == 0 {
        return Err(Error::TooFewTerms {
            terms: n,
            required: 1,
        });
    }
    let zp = wp + config.zeta_guard_bits;
    let mut zeta = vec![Fixed::zero(zp); n + 2];
    zeta[0] = -Fixed::one(zp).div_floor(2);

    let pi = Fixed::from_float(&constants.pi(zp + 8), zp, "pi")?;
    let terms = exponential_terms(zp, &pi, constants)?;
    debug!(n, wp, zp, exponential_terms = terms.len(), "computing zeta array");

    for s in (3..=n).step_by(2) {
        zeta[s] = -exponential_sum(s, zp, &terms).mul_int(2);
        trace!(s, "exponential sum done");
    }

    even_zeta_values(&mut zeta, n, zp, constants)?;

    let reciprocal_pi = pi.recip();
    for s in (3..=n).step_by(4) {
        let u = (s - 3) / 4;
        let mut sum = zeta[4 * u + 4].mul_int((4 * u + 7) as i64).div_floor(4);
        for k in 1..=u {
            sum -= &(&zeta[4 * k] * &zeta[4 * u + 4 - 4 * k]);
        }
        zeta[s] += &(&sum.mul_int(2) * &reciprocal_pi);
    }
    for s in (5..=n).step_by(4) {
        let u = (s - 1) / 4;
        if u == 0 {
            continue;
        }
        let mut sum = zeta[4 * u + 2].mul_int((2 * u + 1) as i64);
        for k in 1..=2 * u {
            let sign = if k % 2 == 0 { 1 } else { -1 };
            sum += &(&zeta[2 * k].mul_int(sign * 2 * k as i64) * &zeta[4 * u + 2 - 2 * k]);
        }
        zeta[s] += &(&sum * &reciprocal_pi).div_floor(2 * u as i64);
    }

    Ok(zeta.into_iter().map(|z| z.rescale(wp)).collect())
}

/// Pairs `(1/(e^(2 pi k) - 1), pi k e^(2 pi k)/(e^(2 pi k) - 1)^2)` for
/// `k = 1, 2, ..` at scale `2^wp`.
///
/// Term `k` is only needed to `wp - 9k` bits since it decays like
/// `e^(-2 pi k)`; the list ends when that drops below one bit, which also
/// bounds every sum over it.
fn exponential_terms(
    wp: u32,
    pi: &Fixed,
    constants: &dyn ConstantSource,
) -> Result<Vec<(Fixed, Fixed)>> {
    let two_pi = constants.pi(wp) << 1u32;
    let exp_2pi = constants.exp(&two_pi, wp);
    let mut exp_2pi_k = exp_2pi.clone();
    let mut terms = Vec::new();
    for k in 1_i64.. {
        let tp = wp as i64 - 9 * k;
        if tp < 1 {
            break;
        }
        let tp = tp as u32;
        let q1 = Float::with_val(tp, &exp_2pi_k - 1u32).recip();
        let q2 = Float::with_val(tp, q1.square_ref()) * &exp_2pi_k;
        let q1 = Fixed::from_float(&q1, wp, "1/(exp(2 pi k) - 1)")?;
        let q2 = Fixed::from_float(&q2, wp, "exp(2 pi k)/(exp(2 pi k) - 1)^2")?;
        terms.push((q1, &q2.mul_int(k) * pi));
        exp_2pi_k = Float::with_val(wp, &exp_2pi_k * &exp_2pi);
    }
    Ok(terms)
}

/// `sum_k c_k / k^s` where `c_k` depends on `s mod 4`, stopping at the first
/// term below `2^-wp`.
fn exponential_sum(s: usize, wp: u32, terms: &[(Fixed, Fixed)]) -> Fixed {
    let mut sum = Fixed::zero(wp);
    for (k, (q1, q2)) in (1_u32..).zip(terms) {
        let numerator = if s % 4 == 3 {
            q1.clone()
        } else {
            q1.clone() + &q2.div_floor(((s - 1) / 4) as i64)
        };
        let term = numerator.div_floor(Integer::from(k).pow(s as u32));
        if term.is_zero() {
            break;
        }
        sum += &term;
    }
    sum
}

/// `zeta(s) = |B_s| (2 pi)^s / (2 s!)` for even `s` in `2..=n+1`.
fn even_zeta_values(
    zeta: &mut [Fixed],
    n: usize,
    wp: u32,
    constants: &dyn ConstantSource,
) -> Result<()> {
    let two_pi = constants.pi(wp) << 1u32;
    let two_pi_squared = Float::with_val(wp, two_pi.square_ref());
    let mut pi_pow = Float::with_val(wp, &two_pi_squared / 4u32);
    for s in (2..n + 2).step_by(2) {
        let b = constants.bernoulli(s as u32, wp).abs();
        let z = Float::with_val(wp, &b * &pi_pow);
        zeta[s] = Fixed::from_float(&z, wp, "even zeta value")?;
        pi_pow = Float::with_val(wp, &pi_pow * &two_pi_squared) / ((s + 1) * (s + 2)) as u64;
    }
    Ok(())
}
