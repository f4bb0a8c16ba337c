//! Time bucketing and sorting for archive lists.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::models::Archive;

/// Age buckets for the archive list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBucket {
    /// Created on the reference calendar day.
    Today,
    /// Created on the calendar day before the reference.
    Yesterday,
    /// Fewer than 7 whole days before the reference.
    Last7Days,
    /// Fewer than 30 whole days before the reference.
    Last30Days,
    /// Everything else, including unparseable timestamps.
    Older,
}

impl TimeBucket {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            TimeBucket::Today => "Today",
            TimeBucket::Yesterday => "Yesterday",
            TimeBucket::Last7Days => "Last 7 days",
            TimeBucket::Last30Days => "Last 30 days",
            TimeBucket::Older => "Older",
        }
    }

    /// All buckets in display order.
    pub fn all() -> &'static [TimeBucket] {
        &[
            TimeBucket::Today,
            TimeBucket::Yesterday,
            TimeBucket::Last7Days,
            TimeBucket::Last30Days,
            TimeBucket::Older,
        ]
    }
}

/// Sort direction for archive lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    #[default]
    Descending,
}

/// Archives partitioned into age buckets, input order preserved per bucket.
#[derive(Debug, Clone, Default)]
pub struct GroupedArchives {
    /// Archives created on the reference day.
    pub today: Vec<Archive>,
    /// Archives created the day before.
    pub yesterday: Vec<Archive>,
    /// Archives under 7 days old.
    pub last_7_days: Vec<Archive>,
    /// Archives under 30 days old.
    pub last_30_days: Vec<Archive>,
    /// Everything older or undatable.
    pub older: Vec<Archive>,
}

impl GroupedArchives {
    /// Archives in one bucket.
    pub fn bucket(&self, bucket: TimeBucket) -> &[Archive] {
        match bucket {
            TimeBucket::Today => &self.today,
            TimeBucket::Yesterday => &self.yesterday,
            TimeBucket::Last7Days => &self.last_7_days,
            TimeBucket::Last30Days => &self.last_30_days,
            TimeBucket::Older => &self.older,
        }
    }

    /// Total archive count across buckets.
    pub fn len(&self) -> usize {
        TimeBucket::all()
            .iter()
            .map(|b| self.bucket(*b).len())
            .sum()
    }

    /// True when every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse a borg archive timestamp. Borg emits ISO 8601, usually without a
/// zone; some backends normalize to RFC 3339.
fn parse_archive_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(with_zone) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_zone.naive_utc());
    }
    raw.parse::<NaiveDateTime>().ok()
}

/// Classify one archive timestamp against a reference instant.
///
/// Today and yesterday are calendar-day comparisons; the remaining buckets
/// use whole elapsed days, so 6 days 23 hours is still `Last7Days` while
/// exactly 7 days is `Last30Days`. A timestamp that fails to parse
/// classifies as `Older` rather than erroring.
pub fn classify_archive(start: &str, reference: DateTime<Utc>) -> TimeBucket {
    let Some(start) = parse_archive_timestamp(start) else {
        return TimeBucket::Older;
    };
    let reference = reference.naive_utc();

    if start.date() == reference.date() {
        return TimeBucket::Today;
    }
    if reference.date().pred_opt() == Some(start.date()) {
        return TimeBucket::Yesterday;
    }

    let elapsed_days = (reference - start).num_days();
    if elapsed_days < 7 {
        TimeBucket::Last7Days
    } else if elapsed_days < 30 {
        TimeBucket::Last30Days
    } else {
        TimeBucket::Older
    }
}

/// Partition archives into age buckets relative to `reference`.
pub fn group_archives(archives: Vec<Archive>, reference: DateTime<Utc>) -> GroupedArchives {
    let mut grouped = GroupedArchives::default();
    for archive in archives {
        match classify_archive(&archive.start, reference) {
            TimeBucket::Today => grouped.today.push(archive),
            TimeBucket::Yesterday => grouped.yesterday.push(archive),
            TimeBucket::Last7Days => grouped.last_7_days.push(archive),
            TimeBucket::Last30Days => grouped.last_30_days.push(archive),
            TimeBucket::Older => grouped.older.push(archive),
        }
    }
    grouped
}

/// Stable sort by creation time. Unparseable timestamps order before every
/// parseable one, so they surface at the top of an ascending list instead
/// of disappearing mid-sequence.
pub fn sort_archives(archives: &mut [Archive], order: SortOrder) {
    archives.sort_by(|a, b| {
        let ordering = parse_archive_timestamp(&a.start).cmp(&parse_archive_timestamp(&b.start));
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}
