//! Catalog transformations: merging candidate batches, reclassifying records
//! between partitions, splitting a master file, pruning, cleanup and audits.
//!
//! Each operation has a pure form working on in-memory records and, where it
//! touches files, an `*_in_dir` / `*_dir` form that loads partitions, runs it
//! and writes the changed partitions back.

pub mod audit;
pub mod cleanup;
pub mod error;
pub mod merge;
pub mod prune;
pub mod reclassify;
pub mod split;

pub use audit::{Finding, audit};
pub use cleanup::{
    CleanupReport, CleanupSummary, FieldFix, PartitionDuplicate, clean_partition, cleanup_dir, fix_partitions_in_dir,
};
pub use error::ImportError;
pub use merge::{
    DedupIndex, DedupeOutcome, Duplicate, MergeOutcome, SkipReason, Skipped, dedupe,
    find_duplicates, merge,
};
pub use prune::{PruneOutcome, prune, prune_in_dir};
pub use reclassify::{
    Moved, PartitionCount, ReclassifyOutcome, SkippedMove, reclassify, reclassify_in_dir,
};
pub use split::{PartitionMerge, SplitPlan, SplitReport, split_by_category, split_into_dir};
