//! Rate sequence module - one substitution rate per alignment site

use crate::DomainError;
use std::str::FromStr;

/// Ordered per-site rates, as produced by TIGER (`-rl`) or r8s
///
/// Site identity is the 1-based position in this sequence. The sequence is
/// never empty and never changes once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSequence {
    values: Vec<f64>,
    max: f64,
    min: f64,
}

impl RateSequence {
    /// Create a rate sequence from values in site order
    ///
    /// # Errors
    /// Returns [`DomainError::EmptyRates`] for an empty vector and
    /// [`DomainError::NonFiniteRate`] if any value is NaN or infinite.
    pub fn new(values: Vec<f64>) -> Result<Self, DomainError> {
        if values.is_empty() {
            return Err(DomainError::EmptyRates);
        }

        if let Some((idx, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(DomainError::NonFiniteRate { site: idx + 1, value });
        }

        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);

        Ok(Self { values, max, min })
    }

    /// Parse a rate file body: one value per line, blank lines skipped
    ///
    /// # Examples
    ///
    /// ```
    /// use ratepart_domain::RateSequence;
    ///
    /// let rates = RateSequence::parse("1.0\n\n0.5\n  0.25  \n").unwrap();
    /// assert_eq!(rates.values(), &[1.0, 0.5, 0.25]);
    /// ```
    ///
    /// # Errors
    /// Any non-blank line that is not a finite float is fatal; it is never
    /// silently skipped.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let mut values = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => values.push(value),
                _ => {
                    return Err(DomainError::InvalidRate {
                        line: idx + 1,
                        content: trimmed.to_string(),
                    })
                }
            }
        }

        Self::new(values)
    }

    /// Number of sites
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for the usual `len`/`is_empty` pairing
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw rates in site order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Highest rate (slowest evolving site)
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Lowest rate (fastest evolving site)
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Distance between the highest and lowest rate
    pub fn spread(&self) -> f64 {
        self.max - self.min
    }

    /// Iterate `(site, rate)` pairs with 1-based site numbers
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().enumerate().map(|(idx, &rate)| (idx + 1, rate))
    }

    /// Rate at a 1-based site, if it exists
    pub fn rate_at(&self, site: usize) -> Option<f64> {
        site.checked_sub(1).and_then(|idx| self.values.get(idx).copied())
    }
}

impl FromStr for RateSequence {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
