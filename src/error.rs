use thiserror::Error;

/// Result type alias using the crate's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the zeta and Taylor coefficient computations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A precision (requested or working) of zero bits
    #[error("precision must be at least one bit")]
    ZeroPrecision,

    /// Not enough terms for the requested computation
    #[error("at least {required} terms are required, got {terms}")]
    TooFewTerms {
        /// Number of terms asked for
        terms: usize,
        /// Minimum the computation accepts
        required: usize,
    },

    /// A floating value headed for fixed-point conversion was NaN or infinite
    #[error("non-finite value while computing {what}")]
    NonFinite {
        /// The quantity being converted
        what: &'static str,
    },

    /// A stored coefficient table could not be encoded or decoded
    #[error("coefficient table encoding: {reason}")]
    Encoding {
        /// Underlying failure
        reason: String,
    },

    /// Configuration rejected by `TaylorConfig::validate`
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected
        reason: String,
    },
}
