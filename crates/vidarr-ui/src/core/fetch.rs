//! Stale-while-revalidate fetch cache keyed by request URL.
//!
//! # Design
//! - One registry entry per URL; multiple subscribers share one cached value
//!   and at most one in-flight request.
//! - A failed revalidation records the error but keeps the last-known data.
//! - `mutate` (and cross-key invalidation) re-fetches immediately and
//!   notifies every subscriber of the key.
//! - The registry is pure and natively testable; polling and focus
//!   revalidation are layered on by the wasm hook.

use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use yew::Callback;

/// Options recognised by [`use_fetch`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Poll interval in milliseconds; zero disables polling.
    pub refresh_interval_ms: u32,
    /// Re-fetch when the window regains focus.
    pub revalidate_on_focus: bool,
}

/// Read-only view of one cache entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FetchSnapshot {
    /// Last successfully fetched value, if any.
    pub data: Option<Rc<Value>>,
    /// Error from the most recent failed revalidation.
    pub error: Option<String>,
    /// Whether a request for this key is currently in flight.
    pub in_flight: bool,
}

#[derive(Default)]
struct FetchEntry {
    data: Option<Rc<Value>>,
    error: Option<String>,
    in_flight: bool,
    listeners: Vec<(u64, Callback<()>)>,
}

/// Shared cache of fetched values keyed by request URL.
#[derive(Default)]
pub struct FetchRegistry {
    entries: HashMap<String, FetchEntry>,
    next_subscriber: u64,
}

impl FetchRegistry {
    /// Current state for `key`.
    #[must_use]
    pub fn snapshot(&self, key: &str) -> FetchSnapshot {
        self.entries
            .get(key)
            .map(|entry| FetchSnapshot {
                data: entry.data.clone(),
                error: entry.error.clone(),
                in_flight: entry.in_flight,
            })
            .unwrap_or_default()
    }

    /// Try to start a request for `key`. Returns `false` when one is already
    /// in flight, guaranteeing at most one concurrent request per key.
    pub fn begin(&mut self, key: &str) -> bool {
        let entry = self.entries.entry(key.to_string()).or_default();
        if entry.in_flight {
            return false;
        }
        entry.in_flight = true;
        true
    }

    /// Record a successful fetch and return the subscribers to notify.
    pub fn succeed(&mut self, key: &str, value: Value) -> Vec<Callback<()>> {
        let entry = self.entries.entry(key.to_string()).or_default();
        entry.data = Some(Rc::new(value));
        entry.error = None;
        entry.in_flight = false;
        entry.listeners.iter().map(|(_, cb)| cb.clone()).collect()
    }

    /// Record a failed fetch. Last-known data is kept so subscribers can
    /// keep rendering stale values alongside the error.
    pub fn fail(&mut self, key: &str, message: String) -> Vec<Callback<()>> {
        let entry = self.entries.entry(key.to_string()).or_default();
        entry.error = Some(message);
        entry.in_flight = false;
        entry.listeners.iter().map(|(_, cb)| cb.clone()).collect()
    }

    /// Register a subscriber for `key`; returns its unsubscribe token.
    pub fn subscribe(&mut self, key: &str, callback: Callback<()>) -> u64 {
        self.next_subscriber += 1;
        let id = self.next_subscriber;
        self.entries
            .entry(key.to_string())
            .or_default()
            .listeners
            .push((id, callback));
        id
    }

    /// Remove a subscriber previously added with [`Self::subscribe`].
    pub fn unsubscribe(&mut self, key: &str, id: u64) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.listeners.retain(|(listener, _)| *listener != id);
        }
    }

    /// Keys currently known to the registry that match `pred`. Used by
    /// mutations that must invalidate several endpoints at once.
    pub fn keys_matching(&self, pred: impl Fn(&str) -> bool) -> Vec<String> {
        self.entries
            .keys()
            .filter(|key| pred(key))
            .cloned()
            .collect()
    }
}

thread_local! {
    static REGISTRY: RefCell<FetchRegistry> = RefCell::new(FetchRegistry::default());
}

/// Run `f` against the process-wide registry.
pub fn with_registry<R>(f: impl FnOnce(&mut FetchRegistry) -> R) -> R {
    REGISTRY.with(|registry| f(&mut registry.borrow_mut()))
}

#[cfg(target_arch = "wasm32")]
mod hook {
    use super::{FetchOptions, with_registry};
    use gloo::events::EventListener;
    use gloo::utils::window;
    use gloo_timers::callback::Interval;
    use serde::de::DeserializeOwned;
    use serde_json::Value;
    use std::rc::Rc;
    use yew::prelude::*;

    /// State handle returned by [`use_fetch`].
    pub(crate) struct FetchHandle<T> {
        /// Deserialized cached value, possibly stale.
        pub data: Option<Rc<T>>,
        /// Error from the most recent failed revalidation.
        pub error: Option<String>,
        /// True while the first fetch for the key is outstanding.
        pub is_loading: bool,
        /// Trigger an immediate re-fetch of the key.
        pub mutate: Callback<()>,
    }

    /// Re-fetch `key` now unless a request for it is already in flight.
    pub(crate) fn revalidate(key: &str) {
        if !with_registry(|registry| registry.begin(key)) {
            return;
        }
        let key = key.to_string();
        yew::platform::spawn_local(async move {
            let result = fetch_value(&key).await;
            let listeners = match result {
                Ok(value) => with_registry(|registry| registry.succeed(&key, value)),
                Err(message) => with_registry(|registry| registry.fail(&key, message)),
            };
            for listener in listeners {
                listener.emit(());
            }
        });
    }

    /// Re-fetch every cached key matching `pred`. Mutations that affect
    /// several endpoints enumerate them explicitly through this predicate.
    pub(crate) fn invalidate_where(pred: impl Fn(&str) -> bool) {
        let keys = with_registry(|registry| registry.keys_matching(pred));
        for key in keys {
            revalidate(&key);
        }
    }

    async fn fetch_value(key: &str) -> Result<Value, String> {
        let url = format!("{}{}", crate::services::api::api_base_url(), key);
        let response = gloo_net::http::Request::get(&url)
            .credentials(web_sys::RequestCredentials::Include)
            .send()
            .await
            .map_err(|err| err.to_string())?;
        if !response.ok() {
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map_or_else(|| format!("HTTP {}", response.status()), str::to_string);
            return Err(message);
        }
        response.json::<Value>().await.map_err(|err| err.to_string())
    }

    /// Revalidating fetch hook: cache key = URL path, `None` disables.
    #[hook]
    pub(crate) fn use_fetch<T>(key: Option<String>, options: FetchOptions) -> FetchHandle<T>
    where
        T: DeserializeOwned + 'static,
    {
        let update = use_force_update();

        {
            let update = update.clone();
            use_effect_with_deps(
                move |deps: &(Option<String>, FetchOptions)| {
                    let (key, options) = deps.clone();
                    let mut subscription = None;
                    let mut poll = None;
                    let mut focus = None;
                    if let Some(key) = key {
                        let id = with_registry(|registry| {
                            registry.subscribe(
                                &key,
                                Callback::from(move |()| update.force_update()),
                            )
                        });
                        subscription = Some((key.clone(), id));
                        let snapshot = with_registry(|registry| registry.snapshot(&key));
                        if snapshot.data.is_none() && !snapshot.in_flight {
                            revalidate(&key);
                        }
                        if options.refresh_interval_ms > 0 {
                            let poll_key = key.clone();
                            poll = Some(Interval::new(options.refresh_interval_ms, move || {
                                revalidate(&poll_key);
                            }));
                        }
                        if options.revalidate_on_focus {
                            let focus_key = key.clone();
                            focus = Some(EventListener::new(&window(), "focus", move |_| {
                                revalidate(&focus_key);
                            }));
                        }
                    }
                    move || {
                        if let Some((key, id)) = subscription {
                            with_registry(|registry| registry.unsubscribe(&key, id));
                        }
                        drop(poll);
                        drop(focus);
                    }
                },
                (key.clone(), options),
            );
        }

        let snapshot = key
            .as_deref()
            .map(|key| with_registry(|registry| registry.snapshot(key)))
            .unwrap_or_default();
        let data = snapshot
            .data
            .as_ref()
            .and_then(|value| serde_json::from_value::<T>((**value).clone()).ok())
            .map(Rc::new);
        let is_loading = snapshot.in_flight && data.is_none();
        let mutate = Callback::from(move |()| {
            if let Some(key) = key.as_deref() {
                revalidate(key);
            }
        });

        FetchHandle {
            data,
            error: snapshot.error,
            is_loading,
            mutate,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) use hook::{FetchHandle, invalidate_where, revalidate, use_fetch};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn begin_allows_one_in_flight_request_per_key() {
        let mut registry = FetchRegistry::default();
        assert!(registry.begin("/api/v1/requests"));
        assert!(!registry.begin("/api/v1/requests"));
        assert!(registry.begin("/api/v1/lists"));
        registry.succeed("/api/v1/requests", json!([]));
        assert!(registry.begin("/api/v1/requests"));
    }

    #[test]
    fn failure_keeps_last_known_data() {
        let mut registry = FetchRegistry::default();
        registry.begin("/k");
        registry.succeed("/k", json!({"value": 1}));
        registry.begin("/k");
        registry.fail("/k", "boom".to_string());
        let snapshot = registry.snapshot("/k");
        assert_eq!(snapshot.error.as_deref(), Some("boom"));
        assert_eq!(*snapshot.data.expect("stale data kept"), json!({"value": 1}));
        assert!(!snapshot.in_flight);
    }

    #[test]
    fn success_clears_a_previous_error() {
        let mut registry = FetchRegistry::default();
        registry.fail("/k", "boom".to_string());
        registry.succeed("/k", json!(2));
        assert_eq!(registry.snapshot("/k").error, None);
    }

    #[test]
    fn subscribers_are_notified_until_unsubscribed() {
        use std::cell::Cell;

        let mut registry = FetchRegistry::default();
        let hits = Rc::new(Cell::new(0u32));
        let id = {
            let hits = hits.clone();
            registry.subscribe("/k", Callback::from(move |()| hits.set(hits.get() + 1)))
        };
        for listener in registry.succeed("/k", json!(1)) {
            listener.emit(());
        }
        assert_eq!(hits.get(), 1);
        registry.unsubscribe("/k", id);
        for listener in registry.fail("/k", "x".to_string()) {
            listener.emit(());
        }
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn keys_matching_selects_affected_endpoints() {
        let mut registry = FetchRegistry::default();
        registry.begin("/api/v1/lists");
        registry.begin("/api/v1/lists/5/items");
        registry.begin("/api/v1/social/feed");
        let mut keys = registry.keys_matching(|key| key.starts_with("/api/v1/lists"));
        keys.sort();
        assert_eq!(keys, vec!["/api/v1/lists", "/api/v1/lists/5/items"]);
    }
}
