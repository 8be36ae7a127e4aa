//! Rate Partitions Domain Layer
//!
//! Pure partitioning logic for per-site substitution rates. Takes the rates
//! of an alignment (one value per column, in column order) and cuts rate
//! space into bands, from the slowest sites down to the fastest.
//!
//! ## Key Concepts
//!
//! - **Site**: one alignment column, identified by its 1-based position
//! - **Rate**: higher values are slower (1 = invariant), lower values faster
//! - **Division factor**: how quickly successive band spans shrink (>= 1.1)
//! - **Partition**: a band of rate space plus the sites inside it
//! - **Cutoff**: once at most 10% of sites are left, they all go in one last band
//!
//! ## Architecture
//!
//! No I/O happens here. Reading rate files, rendering scheme blocks and
//! writing reports live in `ratepart-cli`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accounting;
pub mod division;
pub mod error;
pub mod partition;
pub mod partitioner;
pub mod rates;

// Re-exports for convenience
pub use accounting::{AccountingMismatch, MissReason, MissedSite};
pub use division::DivisionFactor;
pub use error::DomainError;
pub use partition::{Partition, PartitionKind};
pub use partitioner::{partition, partition_with_cap, PartitionRun};
pub use rates::RateSequence;
