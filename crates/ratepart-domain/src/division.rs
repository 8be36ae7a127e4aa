//! Division factor module

use crate::DomainError;
use std::fmt;

/// Amount added to the divisor per partition number after the first
pub const DIVISOR_STEP: f64 = 0.3;

/// Tuning constant controlling how fast partition spans shrink
///
/// Larger factors give narrower first partitions. Values below
/// [`DivisionFactor::MIN`] are rejected.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DivisionFactor(f64);

impl DivisionFactor {
    /// Smallest accepted factor
    pub const MIN: f64 = 1.1;

    /// Create a division factor
    ///
    /// # Errors
    /// Returns [`DomainError::DivisionFactorTooSmall`] if the value is below
    /// 1.1 or is not a finite number.
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value < Self::MIN {
            return Err(DomainError::DivisionFactorTooSmall(value));
        }
        Ok(Self(value))
    }

    /// Raw factor value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Divisor used for partition number `p`
    ///
    /// The first partition divides by the factor alone; later ones add
    /// `p * DIVISOR_STEP`.
    pub fn divisor_for(&self, partition: usize) -> f64 {
        if partition <= 1 {
            self.0
        } else {
            self.0 + partition as f64 * DIVISOR_STEP
        }
    }
}

impl fmt::Display for DivisionFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
