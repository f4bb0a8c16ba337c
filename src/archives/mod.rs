//! Archive list presentation helpers.
//!
//! Pure, synchronous partitioning and ordering of archive lists for the
//! dashboard view: fixed age buckets relative to a caller-supplied reference
//! instant, and a stable sort by creation time.

mod grouping;

pub use grouping::{
    classify_archive, group_archives, sort_archives, GroupedArchives, SortOrder, TimeBucket,
};
