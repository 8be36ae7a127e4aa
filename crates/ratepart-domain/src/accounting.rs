//! Site accounting - checks that every site landed in exactly one partition
//!
//! A mismatch is never fatal. It can only come from rates sitting exactly on
//! a band boundary that no later band picks up, or from the partition cap
//! being reached before the cutoff.

use crate::{Partition, RateSequence};
use std::fmt;

/// Why a site ended up in no partition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissReason {
    /// The rate equals the (exclusive) lower bound of this partition and
    /// the following partition excluded it as its upper bound
    BoundaryTie {
        /// Index of the partition whose lower bound the rate sits on
        partition: usize,
    },

    /// The partition cap was hit before any band reached this rate
    Unreached,
}

/// A site that was not assigned to any partition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissedSite {
    /// 1-based site index
    pub site: usize,
    /// The site's rate
    pub rate: f64,
    /// Cause of the miss
    pub reason: MissReason,
}

/// Assigned site count disagrees with the number of imported sites
#[derive(Debug, Clone, PartialEq)]
pub struct AccountingMismatch {
    /// Sites counted across all partitions
    pub assigned: usize,
    /// Sites imported
    pub total: usize,
    /// Sites in no partition
    pub missed: Vec<MissedSite>,
    /// Sites in more than one partition
    pub duplicated: Vec<usize>,
}

impl fmt::Display for AccountingMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total sites partitioned is not identical to imported sites!:{} vs {}",
            self.assigned, self.total
        )
    }
}

/// Compare partition membership against the full site set `1..=N`
///
/// Returns `None` when every site appears exactly once.
pub fn audit(rates: &RateSequence, partitions: &[Partition]) -> Option<AccountingMismatch> {
    let total = rates.len();
    let mut hits = vec![0usize; total];
    let mut assigned = 0;

    for partition in partitions {
        assigned += partition.site_count();
        for &site in &partition.sites {
            if let Some(count) = site.checked_sub(1).and_then(|idx| hits.get_mut(idx)) {
                *count += 1;
            }
        }
    }

    let missed: Vec<MissedSite> = hits
        .iter()
        .enumerate()
        .filter(|(_, count)| **count == 0)
        .map(|(idx, _)| {
            let rate = rates.values()[idx];
            MissedSite {
                site: idx + 1,
                rate,
                reason: miss_reason(rate, partitions),
            }
        })
        .collect();

    let duplicated: Vec<usize> = hits
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 1)
        .map(|(idx, _)| idx + 1)
        .collect();

    if assigned == total && missed.is_empty() && duplicated.is_empty() {
        return None;
    }

    Some(AccountingMismatch {
        assigned,
        total,
        missed,
        duplicated,
    })
}

fn miss_reason(rate: f64, partitions: &[Partition]) -> MissReason {
    partitions
        .iter()
        .find(|p| !p.is_final() && p.lower_bound == rate)
        .map(|p| MissReason::BoundaryTie { partition: p.index })
        .unwrap_or(MissReason::Unreached)
}
