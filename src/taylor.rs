use crate::config::TaylorConfig;
use crate::constants::ConstantSource;
use crate::error::{Error, Result};
use crate::fixed::Fixed;
use crate::zeta::zeta_array;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Taylor coefficients `A_k` of `1/gamma(x)` about `x = 0` at scale
/// `2^prec`, stored highest degree first.
///
/// `A_0 = 0`, `A_1 = 1`, `A_2` is Euler's constant, and
/// `1/gamma(1 + t) = sum_{k >= 1} A_k t^(k-1)`, which is accurate to `prec`
/// bits for `|t| <= 1/2` with the stored number of terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaylorCoefficients {
    prec: u32,
    coeffs: Vec<Fixed>,
}

impl TaylorCoefficients {
    pub fn prec(&self) -> u32 {
        self.prec
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Highest degree first, the order Horner's scheme consumes them in.
    pub fn as_slice(&self) -> &[Fixed] {
        &self.coeffs
    }

    pub fn ascending(&self) -> impl Iterator<Item = &Fixed> + '_ {
        self.coeffs.iter().rev()
    }

    /// Coefficients of `1/gamma(1 + t)`, highest degree first: every entry
    /// except the trailing constant term of `1/gamma(x)`, which is always zero.
    pub fn shifted(&self) -> &[Fixed] {
        self.coeffs.split_last().map_or(&[][..], |(_, rest)| rest)
    }

    /// `1/gamma(1 + t)` at scale `2^prec`. `t` is rescaled to `2^prec` first.
    pub fn reciprocal_gamma_1p(&self, t: &Fixed) -> Fixed {
        let t = t.clone().rescale(self.prec);
        self.shifted()
            .iter()
            .fold(Fixed::zero(self.prec), |acc, c| &acc * &t + c)
    }

    /// Writes the precision on the first line followed by the coefficients of
    /// `1/gamma(1 + t)` in hexadecimal, one per line, constant term first.
    /// Line `k + 1` holds the coefficient of `t^k`.
    pub fn write_table<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{}", self.prec)?;
        for c in self.shifted().iter().rev() {
            writeln!(writer, "{:x}", c)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| Error::Encoding {
            reason: e.to_string(),
        })
    }

    /// Decodes a table written by [`TaylorCoefficients::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let table: TaylorCoefficients =
            bincode::deserialize(bytes).map_err(|e| Error::Encoding {
                reason: e.to_string(),
            })?;
        if let Some(c) = table.coeffs.iter().find(|c| c.wp() != table.prec) {
            return Err(Error::Encoding {
                reason: format!(
                    "coefficient at scale 2^{} in a {} bit table",
                    c.wp(),
                    table.prec
                ),
            });
        }
        Ok(table)
    }
}

/// Computes the coefficient table for `prec` bits without consulting any
/// cache.
pub fn gamma_taylor_coefficients(
    prec: u32,
    config: &TaylorConfig,
    constants: &dyn ConstantSource,
) -> Result<TaylorCoefficients> {
    if prec == 0 {
        return Err(Error::ZeroPrecision);
    }
    config.validate()?;
    if prec > config.validated_precision {
        warn!(
            "precision {} exceeds the validated range of {} bits, accuracy is unverified",
            prec, config.validated_precision
        );
    }
    let n = config.truncation_length(prec);
    if n < 3 {
        return Err(Error::TooFewTerms {
            terms: n,
            required: 3,
        });
    }
    let wp = config.working_precision(prec);
    debug!(prec, n, wp, "computing gamma Taylor coefficients");

    let zeta = zeta_array(n, wp, config, constants)?;
    let mut a = vec![Fixed::zero(wp); n];
    a[1] = Fixed::one(wp);
    a[2] = Fixed::from_float(&constants.euler(wp + 8), wp, "Euler's constant")?;
    for k in 3..n {
        let mut sum = &(-a[2].clone()) * &a[k - 1];
        for j in 2..k {
            let z = if j % 2 == 0 {
                zeta[j].clone()
            } else {
                -zeta[j].clone()
            };
            sum += &(&z * &a[k - j]);
        }
        a[k] = sum.div_floor(1 - k as i64);
    }

    let coeffs = a.into_iter().rev().map(|c| c.rescale(prec)).collect_vec();
    Ok(TaylorCoefficients { prec, coeffs })
}
