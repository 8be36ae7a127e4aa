//! Partitioner - greedy, geometrically shrinking binning of rate space
//!
//! Bands are cut from the highest rate (slowest sites) downward. Each band's
//! span is the distance from its upper bound to the global minimum rate,
//! divided by a divisor that grows with the partition number, so partitions
//! get narrower toward the fast-evolving end. Once no more than
//! [`CUTOFF_FRACTION`] of the sites remain unassigned, everything left is
//! swept into one final partition.

use crate::accounting::{self, AccountingMismatch};
use crate::{DivisionFactor, Partition, PartitionKind, RateSequence};

/// Share of sites below which the final catch-all partition is created
pub const CUTOFF_FRACTION: f64 = 0.1;

/// Upper limit on partition numbers, guarding against degenerate input
/// (e.g. every site sharing one rate) that never reaches the cutoff
pub const MAX_PARTITIONS: usize = 99;

/// Result of one partitioning run
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionRun {
    /// Partitions in creation order (strictly decreasing upper bound)
    pub partitions: Vec<Partition>,
    /// Highest rate in the input
    pub max_rate: f64,
    /// Lowest rate in the input
    pub min_rate: f64,
    /// `max_rate - min_rate`
    pub spread: f64,
    /// Number of imported sites (N)
    pub site_count: usize,
    /// `0.1 * N`, in site units
    pub cutoff: f64,
    /// Factor the run used
    pub division_factor: DivisionFactor,
    /// Sites counted across all partitions
    pub assigned_count: usize,
    /// Set when the assigned sites are not exactly `1..=N`
    pub mismatch: Option<AccountingMismatch>,
}

impl PartitionRun {
    /// Whether every site was assigned exactly once
    pub fn is_balanced(&self) -> bool {
        self.mismatch.is_none()
    }

    /// Number of partitions created, empty ones included
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Partitions that received at least one site
    pub fn non_empty(&self) -> impl Iterator<Item = &Partition> {
        self.partitions.iter().filter(|p| !p.is_empty())
    }

    /// Whether the loop stopped at the cutoff rather than at the cap
    pub fn reached_cutoff(&self) -> bool {
        self.partitions.last().is_some_and(Partition::is_final)
    }
}

/// Partition `rates` with the default cap of [`MAX_PARTITIONS`]
///
/// # Examples
///
/// ```
/// use ratepart_domain::{partition, DivisionFactor, RateSequence};
///
/// let rates = RateSequence::new(vec![1.0, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1]).unwrap();
/// let run = partition(&rates, DivisionFactor::new(2.5).unwrap());
///
/// assert_eq!(run.partitions[0].sites, vec![1, 2, 3, 4]);
/// assert_eq!(run.partitions[1].sites, vec![5, 6]);
/// assert!(run.is_balanced());
/// ```
pub fn partition(rates: &RateSequence, factor: DivisionFactor) -> PartitionRun {
    partition_with_cap(rates, factor, MAX_PARTITIONS)
}

/// Partition `rates`, creating at most `max_partitions` partitions
///
/// Never fails. An assigned count that differs from N is recorded in
/// [`PartitionRun::mismatch`] instead.
pub fn partition_with_cap(
    rates: &RateSequence,
    factor: DivisionFactor,
    max_partitions: usize,
) -> PartitionRun {
    let site_count = rates.len();
    let max_rate = rates.max();
    let min_rate = rates.min();
    let cutoff = site_count as f64 * CUTOFF_FRACTION;

    let mut upper = max_rate;
    let mut assigned_count = 0;
    let mut partitions = Vec::new();

    for index in 1..=max_partitions {
        let remaining = site_count.saturating_sub(assigned_count);

        // Cutoff is checked before the kind of partition is chosen
        let (kind, lower) = if remaining as f64 <= cutoff {
            (PartitionKind::Final, min_rate)
        } else {
            let kind = if index == 1 {
                PartitionKind::First
            } else {
                PartitionKind::Middle
            };
            (kind, upper - (upper - min_rate) / factor.divisor_for(index))
        };

        let sites: Vec<usize> = rates
            .iter()
            .filter(|&(_, rate)| kind.selects(rate, upper, lower))
            .map(|(site, _)| site)
            .collect();

        assigned_count += sites.len();
        partitions.push(Partition {
            index,
            upper_bound: upper,
            lower_bound: lower,
            kind,
            sites,
        });

        if kind == PartitionKind::Final {
            break;
        }
        upper = lower;
    }

    let mismatch = if assigned_count != site_count {
        accounting::audit(rates, &partitions)
    } else {
        None
    };

    PartitionRun {
        partitions,
        max_rate,
        min_rate,
        spread: max_rate - min_rate,
        site_count,
        cutoff,
        division_factor: factor,
        assigned_count,
        mismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::MissReason;

    fn descending() -> RateSequence {
        RateSequence::new(vec![1.0, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1]).unwrap()
    }

    fn factor(value: f64) -> DivisionFactor {
        DivisionFactor::new(value).unwrap()
    }

    #[test]
    fn test_first_partition() {
        let run = partition(&descending(), factor(2.5));
        let first = &run.partitions[0];

        assert_eq!(first.index, 1);
        assert_eq!(first.kind, PartitionKind::First);
        assert_eq!(first.upper_bound, 1.0);
        assert!((first.lower_bound - 0.64).abs() < 1e-12);
        assert_eq!(first.sites, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_second_partition() {
        let run = partition(&descending(), factor(2.5));
        let second = &run.partitions[1];

        assert_eq!(second.kind, PartitionKind::Middle);
        assert!((second.upper_bound - 0.64).abs() < 1e-12);
        let expected = 0.64 - (0.64 - 0.1) / (2.5 + 2.0 * 0.3);
        assert!((second.lower_bound - expected).abs() < 1e-12);
        assert!((second.lower_bound - 0.465806).abs() < 1e-6);
        assert_eq!(second.sites, vec![5, 6]);
    }

    #[test]
    fn test_full_descending_run() {
        let run = partition(&descending(), factor(2.5));

        let sites: Vec<Vec<usize>> = run.partitions.iter().map(|p| p.sites.clone()).collect();
        assert_eq!(
            sites,
            vec![vec![1, 2, 3, 4], vec![5, 6], vec![7], vec![8], vec![], vec![], vec![9], vec![10]]
        );
        assert_eq!(run.partition_count(), 8);
        assert_eq!(run.non_empty().count(), 6);
        assert!(run.reached_cutoff());
        assert!(run.is_balanced());
        assert_eq!(run.assigned_count, 10);
        assert_eq!(run.cutoff, 1.0);
        assert_eq!(run.spread, 0.9);
    }

    #[test]
    fn test_final_partition_takes_minimum() {
        let run = partition(&descending(), factor(2.5));
        let last = run.partitions.last().unwrap();

        assert!(last.is_final());
        assert_eq!(last.lower_bound, 0.1);
        assert_eq!(last.sites, vec![10]);
    }

    #[test]
    fn test_bounds_chain() {
        let run = partition(&descending(), factor(1.35));
        for pair in run.partitions.windows(2) {
            assert_eq!(pair[0].lower_bound, pair[1].upper_bound);
            assert!(pair[0].upper_bound > pair[0].lower_bound);
        }
    }

    #[test]
    fn test_site_on_boundary_goes_to_next_partition() {
        // Factor 2 puts the first lower bound exactly on 0.5
        let mut values = vec![1.0; 8];
        values.extend([0.5, 0.3, 0.2, 0.1, 0.05, 0.0]);
        let rates = RateSequence::new(values).unwrap();
        let run = partition(&rates, factor(2.0));

        assert_eq!(run.partitions[0].lower_bound, 0.5);
        assert!(!run.partitions[0].sites.contains(&9));
        assert!(run.partitions[1].sites.contains(&9));
        assert!(run.is_balanced());
    }

    #[test]
    fn test_boundary_tie_into_final_is_reported() {
        // 18 sites are taken by partition 1, leaving 2 <= cutoff of 2. The
        // site sitting on 0.5 is excluded on both sides.
        let mut values = vec![1.0; 18];
        values.extend([0.5, 0.0]);
        let rates = RateSequence::new(values).unwrap();
        let run = partition(&rates, factor(2.0));

        assert_eq!(run.partition_count(), 2);
        assert_eq!(run.partitions[1].sites, vec![20]);
        assert_eq!(run.assigned_count, 19);

        let mismatch = run.mismatch.as_ref().unwrap();
        assert_eq!(mismatch.assigned, 19);
        assert_eq!(mismatch.total, 20);
        assert_eq!(mismatch.missed.len(), 1);
        assert_eq!(mismatch.missed[0].site, 19);
        assert_eq!(mismatch.missed[0].reason, MissReason::BoundaryTie { partition: 1 });
    }

    #[test]
    fn test_uniform_rates_hit_cap() {
        let rates = RateSequence::new(vec![0.7; 5]).unwrap();
        let run = partition(&rates, factor(1.5));

        assert_eq!(run.partition_count(), MAX_PARTITIONS);
        assert!(!run.reached_cutoff());
        assert!(run.partitions.iter().all(Partition::is_empty));
        assert_eq!(run.assigned_count, 0);
        assert_eq!(run.mismatch.as_ref().unwrap().missed.len(), 5);
    }

    #[test]
    fn test_single_site() {
        let rates = RateSequence::new(vec![0.42]).unwrap();
        let run = partition_with_cap(&rates, factor(2.0), 3);

        assert_eq!(run.partition_count(), 3);
        assert!(!run.is_balanced());
    }

    #[test]
    fn test_custom_cap() {
        let run = partition_with_cap(&descending(), factor(2.5), 2);
        assert_eq!(run.partition_count(), 2);
        assert_eq!(run.assigned_count, 6);
        let mismatch = run.mismatch.unwrap();
        assert_eq!(mismatch.missed.len(), 4);
        assert!(mismatch.missed.iter().all(|m| m.reason == MissReason::Unreached));
    }
}
