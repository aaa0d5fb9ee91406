//! Pure pagination/filter state for the dashboard grids.
//!
//! # Design
//! - The requests grid keys its page index per filter tab, so switching
//!   tabs preserves each tab's position.
//! - The recently-added grid uses a plain pager; changing its filter resets
//!   the page to zero.
//! - Both grids paginate the *filtered* collection, never the raw one.

use crate::core::pagination::{Pager, TabbedPager, page_count};
use crate::features::requests::logic::StatusFilter;
use vidarr_api_models::{LibraryItem, MediaRequest, MediaType};

/// Requests-grid state: filter tabs with per-tab page memory.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestsPanelState {
    /// Active filter tab.
    pub filter: StatusFilter,
    pager: TabbedPager,
}

impl RequestsPanelState {
    /// Grid paging `page_size` requests per page.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: StatusFilter::All,
            pager: TabbedPager::new(page_size),
        }
    }

    /// Switch filter tabs. Each tab keeps its own page index.
    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Move the active tab to `page`.
    pub fn set_page(&mut self, page: usize) {
        self.pager.set_page(self.filter.tab_key(), page);
    }

    /// The active tab's requests, filtered then paged, plus the page index
    /// and page count for the pager controls.
    #[must_use]
    pub fn paged<'a>(&self, requests: &'a [MediaRequest]) -> PagedRequests<'a> {
        let filtered: Vec<&'a MediaRequest> = requests
            .iter()
            .filter(|request| self.filter.matches(&request.status))
            .collect();
        let tab = self.filter.tab_key();
        let pages = page_count(filtered.len(), self.pager.page_size());
        let page = self.pager.page(tab, filtered.len());
        let items = self.pager.slice(tab, &filtered).to_vec();
        PagedRequests { items, page, pages }
    }
}

/// One page of filtered requests.
#[derive(Clone, Debug, PartialEq)]
pub struct PagedRequests<'a> {
    /// Requests visible on the current page.
    pub items: Vec<&'a MediaRequest>,
    /// Clamped page index.
    pub page: usize,
    /// Total pages for the filtered collection.
    pub pages: usize,
}

/// Recently-added grid state: optional media-type filter, plain pager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentlyAddedState {
    /// Active media-type filter; `None` shows everything.
    pub filter: Option<MediaType>,
    pager: Pager,
}

impl RecentlyAddedState {
    /// Grid paging `page_size` items per page.
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        Self {
            filter: None,
            pager: Pager::new(page_size),
        }
    }

    /// Change the media-type filter; the page index resets to zero.
    pub const fn set_filter(&mut self, filter: Option<MediaType>) {
        self.filter = filter;
        self.pager.reset();
    }

    /// Move to `page`.
    pub const fn set_page(&mut self, page: usize) {
        self.pager.set_page(page);
    }

    /// The filtered, paged items plus pager coordinates.
    #[must_use]
    pub fn paged<'a>(&self, items: &'a [LibraryItem]) -> (Vec<&'a LibraryItem>, usize, usize) {
        let filtered: Vec<&'a LibraryItem> = items
            .iter()
            .filter(|item| self.filter.is_none_or(|filter| item.media_type == filter))
            .collect();
        let pages = page_count(filtered.len(), self.pager.page_size());
        let page = self.pager.page(filtered.len());
        (self.pager.slice(&filtered).to_vec(), page, pages)
    }
}

/// Label key for a library item's numeric availability constant. Unknown
/// values fall back to the `Requested` display label, mirroring the status
/// string classification.
#[must_use]
pub const fn media_status_label_key(media_status: i32) -> &'static str {
    use vidarr_api_models::media_status;
    match media_status {
        media_status::AVAILABLE => "status.available",
        media_status::PARTIALLY_AVAILABLE => "status.partial",
        media_status::DOWNLOADING | media_status::PROCESSING => "status.processing",
        media_status::PENDING => "status.pending",
        _ => "status.requested",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::requests::logic::{StatusBucket, StatusCounts, classify_status};
    use chrono::{TimeZone, Utc};

    fn request(id: i64, status: &str) -> MediaRequest {
        MediaRequest {
            id,
            tmdb_id: id * 100,
            title: format!("title {id}"),
            media_type: MediaType::Tv,
            status: status.to_string(),
            requested_by: "user".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn thirteen_requests() -> Vec<MediaRequest> {
        // Four pending among thirteen total.
        let statuses = [
            "available", "pending", "downloading", "queued", "failed", "available", "submitted",
            "processing", "denied", "pending", "completed", "removed", "approved",
        ];
        statuses
            .iter()
            .enumerate()
            .map(|(index, status)| request(index as i64 + 1, status))
            .collect()
    }

    #[test]
    fn pending_filter_pages_the_filtered_set() {
        let requests = thirteen_requests();
        let mut state = RequestsPanelState::new(6);
        state.set_filter(StatusFilter::Bucket(StatusBucket::Pending));
        let paged = state.paged(&requests);
        assert_eq!(paged.items.len(), 4, "page 0 holds exactly the filtered items");
        assert_eq!(paged.pages, 1);
        assert_eq!(paged.page, 0);
        let ids: Vec<i64> = paged.items.iter().map(|request| request.id).collect();
        assert_eq!(ids, vec![2, 4, 7, 10]);
    }

    #[test]
    fn tile_counts_and_filter_predicate_agree() {
        let requests = thirteen_requests();
        let counts =
            StatusCounts::tally(requests.iter().map(|request| request.status.as_str()));
        for bucket in StatusBucket::STAT_TILES {
            let mut state = RequestsPanelState::new(100);
            state.set_filter(StatusFilter::Bucket(bucket));
            let filtered = state.paged(&requests).items.len() as u32;
            assert_eq!(
                counts.for_bucket(bucket),
                filtered,
                "tile and filter disagree for {bucket:?}"
            );
        }
    }

    #[test]
    fn switching_tabs_preserves_each_tabs_page() {
        let requests: Vec<MediaRequest> =
            (0..20).map(|id| request(id, "available")).collect();
        let mut state = RequestsPanelState::new(6);
        state.set_page(2);
        state.set_filter(StatusFilter::Bucket(StatusBucket::Pending));
        assert_eq!(state.paged(&requests).page, 0);
        state.set_filter(StatusFilter::All);
        assert_eq!(state.paged(&requests).page, 2, "tab position preserved");
    }

    #[test]
    fn shrinking_results_clamp_the_page_index() {
        let mut requests: Vec<MediaRequest> =
            (0..20).map(|id| request(id, "available")).collect();
        let mut state = RequestsPanelState::new(6);
        state.set_page(3);
        assert_eq!(state.paged(&requests).page, 3);
        requests.truncate(5);
        let paged = state.paged(&requests);
        assert_eq!(paged.pages, 1);
        assert_eq!(paged.page, 0);
        assert_eq!(paged.items.len(), 5);
    }

    #[test]
    fn media_status_labels_match_the_string_buckets() {
        use vidarr_api_models::media_status;
        // The int-enum labels and the string classification must agree on
        // the shared vocabulary.
        assert_eq!(
            media_status_label_key(media_status::AVAILABLE),
            classify_status("available").label_key()
        );
        assert_eq!(
            media_status_label_key(media_status::PARTIALLY_AVAILABLE),
            classify_status("partially_available").label_key()
        );
        assert_eq!(
            media_status_label_key(media_status::DOWNLOADING),
            classify_status("downloading").label_key()
        );
        assert_eq!(media_status_label_key(-1), "status.requested");
    }

    #[test]
    fn recently_added_filter_change_resets_the_page() {
        let items: Vec<LibraryItem> = (0..12)
            .map(|id| LibraryItem {
                id,
                title: format!("item {id}"),
                poster_url: None,
                media_status: vidarr_api_models::media_status::AVAILABLE,
                media_type: if id % 2 == 0 { MediaType::Movie } else { MediaType::Tv },
            })
            .collect();
        let mut state = RecentlyAddedState::new(4);
        state.set_page(2);
        let (_, page, _) = state.paged(&items);
        assert_eq!(page, 2);
        state.set_filter(Some(MediaType::Movie));
        let (movies, page, pages) = state.paged(&items);
        assert_eq!(page, 0, "filter change resets the page");
        assert_eq!(pages, 2);
        assert_eq!(movies.len(), 4);
        assert!(movies.iter().all(|item| item.media_type == MediaType::Movie));
    }
}
