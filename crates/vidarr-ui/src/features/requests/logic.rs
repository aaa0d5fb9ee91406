//! Request status classification.
//!
//! # Design
//! - One classification function; every call site (stat tiles, badges,
//!   filter predicates) routes through it so the buckets can never drift
//!   apart.
//! - Membership sets are fixed and case-insensitive; anything unknown maps
//!   to the `Requested` fallback, which is displayed but never counted in
//!   the numeric stat tiles.

/// Classification buckets for free-text request status strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusBucket {
    /// Fully available in the library.
    Available,
    /// Partially available.
    Partial,
    /// Waiting for approval or queued.
    Pending,
    /// Being downloaded or post-processed.
    Processing,
    /// Denied, failed, or removed.
    Failed,
    /// Fallback display bucket for unknown statuses.
    Requested,
}

impl StatusBucket {
    /// Buckets shown as numeric stat tiles, in tile order. The `Requested`
    /// fallback is deliberately absent.
    pub const STAT_TILES: [Self; 5] = [
        Self::Available,
        Self::Partial,
        Self::Pending,
        Self::Processing,
        Self::Failed,
    ];

    /// Translation key for the bucket label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Available => "status.available",
            Self::Partial => "status.partial",
            Self::Pending => "status.pending",
            Self::Processing => "status.processing",
            Self::Failed => "status.failed",
            Self::Requested => "status.requested",
        }
    }

    /// Badge styling class for the bucket.
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Available => "badge badge-success",
            Self::Partial => "badge badge-info",
            Self::Pending => "badge badge-warning",
            Self::Processing => "badge badge-primary",
            Self::Failed => "badge badge-error",
            Self::Requested => "badge badge-ghost",
        }
    }

    /// Stable key used for per-tab pagination state.
    #[must_use]
    pub const fn tab_key(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Partial => "partial",
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Failed => "failed",
            Self::Requested => "requested",
        }
    }
}

/// Classify a free-text status string into exactly one bucket.
#[must_use]
pub fn classify_status(status: &str) -> StatusBucket {
    match status.trim().to_ascii_lowercase().as_str() {
        "available" | "completed" => StatusBucket::Available,
        "partially_available" => StatusBucket::Partial,
        "pending" | "queued" | "submitted" => StatusBucket::Pending,
        "downloading" | "processing" => StatusBucket::Processing,
        "denied" | "failed" | "removed" => StatusBucket::Failed,
        _ => StatusBucket::Requested,
    }
}

/// Numeric stat-tile counts over a request collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Count of available requests.
    pub available: u32,
    /// Count of partially available requests.
    pub partial: u32,
    /// Count of pending requests.
    pub pending: u32,
    /// Count of processing requests.
    pub processing: u32,
    /// Count of failed requests.
    pub failed: u32,
}

impl StatusCounts {
    /// Tally statuses through [`classify_status`]. Unknown statuses land in
    /// the `Requested` fallback and are not counted.
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            match classify_status(status) {
                StatusBucket::Available => counts.available += 1,
                StatusBucket::Partial => counts.partial += 1,
                StatusBucket::Pending => counts.pending += 1,
                StatusBucket::Processing => counts.processing += 1,
                StatusBucket::Failed => counts.failed += 1,
                StatusBucket::Requested => {}
            }
        }
        counts
    }

    /// Count for one tile bucket.
    #[must_use]
    pub const fn for_bucket(&self, bucket: StatusBucket) -> u32 {
        match bucket {
            StatusBucket::Available => self.available,
            StatusBucket::Partial => self.partial,
            StatusBucket::Pending => self.pending,
            StatusBucket::Processing => self.processing,
            StatusBucket::Failed => self.failed,
            StatusBucket::Requested => 0,
        }
    }
}

/// Filter predicate over request statuses, backed by the same buckets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// No filtering.
    #[default]
    All,
    /// Only statuses classifying into the given bucket.
    Bucket(StatusBucket),
}

impl StatusFilter {
    /// Whether `status` passes the filter.
    #[must_use]
    pub fn matches(self, status: &str) -> bool {
        match self {
            Self::All => true,
            Self::Bucket(bucket) => classify_status(status) == bucket,
        }
    }

    /// Stable key used for per-tab pagination state.
    #[must_use]
    pub const fn tab_key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Bucket(bucket) => bucket.tab_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: [(&str, StatusBucket); 13] = [
        ("available", StatusBucket::Available),
        ("completed", StatusBucket::Available),
        ("partially_available", StatusBucket::Partial),
        ("pending", StatusBucket::Pending),
        ("queued", StatusBucket::Pending),
        ("submitted", StatusBucket::Pending),
        ("downloading", StatusBucket::Processing),
        ("processing", StatusBucket::Processing),
        ("denied", StatusBucket::Failed),
        ("failed", StatusBucket::Failed),
        ("removed", StatusBucket::Failed),
        ("approved", StatusBucket::Requested),
        ("", StatusBucket::Requested),
    ];

    #[test]
    fn classification_is_case_insensitive_and_fixed() {
        for (status, bucket) in KNOWN {
            assert_eq!(classify_status(status), bucket, "status {status:?}");
            assert_eq!(
                classify_status(&status.to_ascii_uppercase()),
                bucket,
                "status {status:?} uppercased"
            );
        }
        assert_eq!(classify_status("  Pending "), StatusBucket::Pending);
    }

    #[test]
    fn every_call_site_agrees_on_bucket_assignment() {
        // Stat tiles, filter predicates, and badge rendering must bucket a
        // status identically; all three route through classify_status.
        for (status, bucket) in KNOWN {
            let counts = StatusCounts::tally([status]);
            let counted = StatusBucket::STAT_TILES
                .iter()
                .find(|tile| counts.for_bucket(**tile) == 1)
                .copied();
            let expected_tile = if bucket == StatusBucket::Requested {
                None
            } else {
                Some(bucket)
            };
            assert_eq!(counted, expected_tile, "tile bucket for {status:?}");

            assert!(
                StatusFilter::Bucket(bucket).matches(status),
                "filter bucket for {status:?}"
            );
            assert_eq!(
                classify_status(status).badge_class(),
                bucket.badge_class(),
                "badge bucket for {status:?}"
            );
        }
    }

    #[test]
    fn fallback_statuses_are_displayed_but_not_counted() {
        let counts = StatusCounts::tally(["approved", "available"]);
        assert_eq!(counts.available, 1);
        let total: u32 = StatusBucket::STAT_TILES
            .iter()
            .map(|tile| counts.for_bucket(*tile))
            .sum();
        assert_eq!(total, 1, "unknown status must not be counted in tiles");
        assert_eq!(classify_status("approved").label_key(), "status.requested");
    }

    #[test]
    fn all_filter_passes_everything() {
        assert!(StatusFilter::All.matches("anything"));
        assert!(!StatusFilter::Bucket(StatusBucket::Failed).matches("available"));
    }
}
