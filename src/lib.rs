//! Taylor coefficients of `1/gamma(x)` at arbitrary binary precision, along
//! with the array of integer zeta values their recurrence is built from.
//!
//! All values are fixed-point: see [`Fixed`].

pub mod bernoulli;
pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod fixed;
pub mod taylor;
pub mod tracing;
pub mod zeta;

pub use cache::GammaTaylorCache;
pub use config::TaylorConfig;
pub use constants::{ConstantSource, MpfrConstants};
pub use error::{Error, Result};
pub use fixed::Fixed;
pub use taylor::{gamma_taylor_coefficients, TaylorCoefficients};
pub use zeta::zeta_array;
