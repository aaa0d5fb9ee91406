//! Bounded season-detail prefetching for the request wizard.
//!
//! # Design
//! - A fixed pool of workers pulls season numbers from a shared queue, so
//!   opening a 24-season show never fires two dozen simultaneous requests.
//! - The pool holds one `AbortController`; closing the modal aborts every
//!   in-flight season fetch, and a resolution that arrives after the abort
//!   is ignored.
//! - Queue/slot bookkeeping is pure so the concurrency bound is testable
//!   natively.

use std::collections::{BTreeSet, VecDeque};

/// Number of concurrent season-detail fetches.
pub const PREFETCH_CONCURRENCY: usize = 3;

/// Shared work queue with a fixed concurrency bound.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefetchQueue {
    pending: VecDeque<u32>,
    active: BTreeSet<u32>,
    limit: usize,
}

impl PrefetchQueue {
    /// Queue bounded to `limit` concurrent items.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            active: BTreeSet::new(),
            limit,
        }
    }

    /// Add seasons to the back of the queue, skipping duplicates.
    pub fn enqueue(&mut self, seasons: impl IntoIterator<Item = u32>) {
        for season in seasons {
            if !self.pending.contains(&season) && !self.active.contains(&season) {
                self.pending.push_back(season);
            }
        }
    }

    /// Claim the next season, or `None` when the queue is drained or the
    /// concurrency limit is reached.
    pub fn next(&mut self) -> Option<u32> {
        if self.active.len() >= self.limit {
            return None;
        }
        let season = self.pending.pop_front()?;
        self.active.insert(season);
        Some(season)
    }

    /// Release a claimed season, freeing a worker slot.
    pub fn complete(&mut self, season: u32) {
        self.active.remove(&season);
    }

    /// Whether nothing is queued or running.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.active.is_empty()
    }

    /// Number of currently claimed seasons.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(target_arch = "wasm32")]
mod pool {
    use super::{PREFETCH_CONCURRENCY, PrefetchQueue};
    use crate::services::api::ApiClient;
    use gloo::console;
    use std::cell::RefCell;
    use std::rc::Rc;
    use vidarr_api_models::Episode;
    use web_sys::AbortController;
    use yew::Callback;

    /// Running prefetch pool for one wizard session.
    pub(crate) struct PrefetchPool {
        controller: AbortController,
    }

    impl PrefetchPool {
        /// Start workers fetching season details for `tmdb_id`. Each season
        /// resolves through `on_result` with `None` on a failed prefetch;
        /// failures are best-effort and only logged.
        pub(crate) fn start(
            client: Rc<ApiClient>,
            tmdb_id: i64,
            seasons: Vec<u32>,
            on_result: Callback<(u32, Option<Vec<Episode>>)>,
        ) -> Option<Self> {
            let controller = AbortController::new().ok()?;
            let queue = Rc::new(RefCell::new(PrefetchQueue::new(PREFETCH_CONCURRENCY)));
            queue.borrow_mut().enqueue(seasons);

            for _ in 0..PREFETCH_CONCURRENCY {
                let client = client.clone();
                let queue = queue.clone();
                let signal = controller.signal();
                let on_result = on_result.clone();
                yew::platform::spawn_local(async move {
                    loop {
                        if signal.aborted() {
                            break;
                        }
                        let Some(season) = queue.borrow_mut().next() else {
                            break;
                        };
                        let path =
                            format!("/api/v1/tv/{tmdb_id}/season/{season}");
                        let result = client
                            .get_json_with_signal::<Vec<Episode>>(&path, &signal)
                            .await;
                        if signal.aborted() {
                            // Superseded resolution: the modal closed while
                            // this fetch was in flight.
                            break;
                        }
                        match result {
                            Ok(episodes) => on_result.emit((season, Some(episodes))),
                            Err(err) => {
                                console::warn!("season prefetch failed", season, err.to_string());
                                on_result.emit((season, None));
                            }
                        }
                        queue.borrow_mut().complete(season);
                    }
                });
            }
            Some(Self { controller })
        }

        /// Abort every in-flight season fetch.
        pub(crate) fn abort(&self) {
            self.controller.abort();
        }
    }

    impl Drop for PrefetchPool {
        fn drop(&mut self) {
            self.abort();
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) use pool::PrefetchPool;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concurrency_is_bounded() {
        let mut queue = PrefetchQueue::new(3);
        queue.enqueue(1..=24);
        let mut claimed = Vec::new();
        while let Some(season) = queue.next() {
            claimed.push(season);
        }
        assert_eq!(claimed, vec![1, 2, 3], "only three claims before a slot frees");
        assert_eq!(queue.active_count(), 3);

        queue.complete(2);
        assert_eq!(queue.next(), Some(4));
        assert_eq!(queue.active_count(), 3);
    }

    #[test]
    fn enqueue_skips_duplicates() {
        let mut queue = PrefetchQueue::new(3);
        queue.enqueue([5, 5, 6]);
        queue.next();
        queue.enqueue([5, 6, 7]);
        assert_eq!(queue.next(), Some(6));
        assert_eq!(queue.next(), Some(7));
        assert_eq!(queue.next(), None);
    }

    #[test]
    fn queue_reports_idle_only_when_fully_drained() {
        let mut queue = PrefetchQueue::new(2);
        assert!(queue.is_idle());
        queue.enqueue([1]);
        assert!(!queue.is_idle());
        let season = queue.next().expect("one queued");
        assert!(!queue.is_idle());
        queue.complete(season);
        assert!(queue.is_idle());
    }
}
