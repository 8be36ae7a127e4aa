//! Partition module - one rate band and the sites that fall inside it

/// Which selection rule produced a partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionKind {
    /// Partition 1: span divided by the factor alone
    First,

    /// Any later partition created before the cutoff is reached
    Middle,

    /// Catch-all partition created once few enough sites remain
    Final,
}

impl PartitionKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PartitionKind::First => "first",
            PartitionKind::Middle => "middle",
            PartitionKind::Final => "final",
        }
    }

    /// Whether a rate falls inside `(lower, upper]` or, for the final
    /// partition, `[lower, upper)`
    ///
    /// Every band but the last leaves its lower bound to the next band. The
    /// last one takes its lower bound so the minimum-rate site is captured.
    pub fn selects(&self, rate: f64, upper: f64, lower: f64) -> bool {
        match self {
            PartitionKind::Final => upper > rate && rate >= lower,
            PartitionKind::First | PartitionKind::Middle => upper >= rate && rate > lower,
        }
    }
}

/// A contiguous band of rate space and the sites whose rate lies in it
///
/// Partitions are created in strictly decreasing order of upper bound; the
/// lower bound of partition `k` is the upper bound of partition `k + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// 1-based creation order
    pub index: usize,

    /// Upper rate bound
    pub upper_bound: f64,

    /// Lower rate bound
    pub lower_bound: f64,

    /// Selection rule used
    pub kind: PartitionKind,

    /// 1-based site indices, ascending
    pub sites: Vec<usize>,
}

impl Partition {
    /// Number of sites in the band
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Whether no site fell in the band
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Whether this is the catch-all partition
    pub fn is_final(&self) -> bool {
        self.kind == PartitionKind::Final
    }

    /// Whether a rate would be selected by this partition's interval
    pub fn contains_rate(&self, rate: f64) -> bool {
        self.kind.selects(rate, self.upper_bound, self.lower_bound)
    }
}
