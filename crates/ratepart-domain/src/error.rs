//! Error types for the domain layer

use thiserror::Error;

/// Errors raised while building domain values
///
/// The partitioner itself never fails; these only come from constructing
/// its inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// No rates were supplied
    #[error("Rate file contains no rates")]
    EmptyRates,

    /// A non-blank line could not be read as a finite rate
    #[error("Invalid rate on line {line}: '{content}'")]
    InvalidRate {
        /// 1-based line number in the source text
        line: usize,
        /// The offending line, trimmed
        content: String,
    },

    /// A rate value was NaN or infinite
    #[error("Rate for site {site} is not a finite number: {value}")]
    NonFiniteRate {
        /// 1-based site index
        site: usize,
        /// The rejected value
        value: f64,
    },

    /// Division factor below the permitted minimum
    #[error("Division factor {0} is below the minimum of 1.1")]
    DivisionFactorTooSmall(f64),
}
