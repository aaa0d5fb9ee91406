//! Backup list state and the persisted validation cache.
//!
//! # Design
//! - Validation results are the one piece of state that outlives a
//!   component: they persist in browser storage keyed by archive name.
//! - The cache is pruned on every successful list fetch so a stale badge
//!   for a deleted archive can never render.
//! - Storage access sits behind a trait, keeping the prune invariant
//!   testable natively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vidarr_api_models::{Backup, BackupValidation};

/// Cached validation result for one archive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedValidation {
    /// Whether the archive validated cleanly.
    pub valid: bool,
    /// Failure detail when invalid.
    #[serde(default)]
    pub detail: Option<String>,
    /// When the validation ran.
    pub checked_at: DateTime<Utc>,
}

impl CachedValidation {
    /// Cache entry from a validation response.
    #[must_use]
    pub fn from_response(validation: &BackupValidation, checked_at: DateTime<Utc>) -> Self {
        Self {
            valid: validation.valid,
            detail: validation.detail.clone(),
            checked_at,
        }
    }
}

/// Validation cache keyed by archive name.
pub type ValidationCache = BTreeMap<String, CachedValidation>;

/// Persistence boundary for the validation cache.
pub trait ValidationStore {
    /// Load the cache; an absent or corrupt blob is an empty cache.
    fn load(&self) -> ValidationCache;
    /// Persist the cache.
    fn save(&self, cache: &ValidationCache);
}

/// Drop cached entries for archives no longer on the server and persist the
/// result. Returns the pruned cache for rendering.
pub fn prune_to_server(store: &dyn ValidationStore, backups: &[Backup]) -> ValidationCache {
    let mut cache = store.load();
    cache.retain(|name, _| backups.iter().any(|backup| backup.name == *name));
    store.save(&cache);
    cache
}

/// Record a fresh validation result and persist the cache.
pub fn record_validation(
    store: &dyn ValidationStore,
    name: &str,
    entry: CachedValidation,
) -> ValidationCache {
    let mut cache = store.load();
    cache.insert(name.to_string(), entry);
    store.save(&cache);
    cache
}

/// Human-friendly archive size.
#[must_use]
pub fn size_label(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;
    if bytes >= GIB {
        let hundredths = bytes.saturating_mul(100) / GIB;
        format!("{}.{:02} GB", hundredths / 100, hundredths % 100)
    } else if bytes >= MIB {
        format!("{} MB", bytes / MIB)
    } else if bytes >= KIB {
        format!("{} KB", bytes / KIB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(target_arch = "wasm32")]
mod storage {
    use super::{ValidationCache, ValidationStore};
    use gloo::console;
    use gloo::storage::{LocalStorage, Storage};

    const CACHE_KEY: &str = "vidarr.backup_validation";

    /// Browser-local validation store.
    #[derive(Clone, Copy, Debug, Default)]
    pub(crate) struct LocalValidationStore;

    impl ValidationStore for LocalValidationStore {
        fn load(&self) -> ValidationCache {
            LocalStorage::get::<ValidationCache>(CACHE_KEY).unwrap_or_default()
        }

        fn save(&self, cache: &ValidationCache) {
            if let Err(err) = LocalStorage::set(CACHE_KEY, cache) {
                console::error!("storage operation failed", CACHE_KEY, err.to_string());
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) use storage::LocalValidationStore;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryStore {
        cache: RefCell<ValidationCache>,
    }

    impl ValidationStore for MemoryStore {
        fn load(&self) -> ValidationCache {
            self.cache.borrow().clone()
        }

        fn save(&self, cache: &ValidationCache) {
            *self.cache.borrow_mut() = cache.clone();
        }
    }

    fn backup(name: &str) -> Backup {
        Backup {
            name: name.to_string(),
            size_bytes: 42 * 1024 * 1024,
            created_at: Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 6).unwrap(),
        }
    }

    fn valid_entry() -> CachedValidation {
        CachedValidation {
            valid: true,
            detail: None,
            checked_at: Utc.with_ymd_and_hms(2026, 2, 3, 5, 0, 0).unwrap(),
        }
    }

    #[test]
    fn deleted_archives_lose_their_cached_badge() {
        let store = MemoryStore::default();
        record_validation(&store, "X", valid_entry());
        record_validation(&store, "Y", valid_entry());

        // "X" was deleted server-side; the next list fetch prunes it.
        let cache = prune_to_server(&store, &[backup("Y")]);
        assert!(!cache.contains_key("X"), "no badge for a deleted archive");
        assert!(cache.contains_key("Y"));

        // The prune persisted: a later load stays clean even if "X" was
        // previously marked valid.
        assert!(!store.load().contains_key("X"));
    }

    #[test]
    fn recording_overwrites_previous_results() {
        let store = MemoryStore::default();
        record_validation(&store, "X", valid_entry());
        let failed = CachedValidation {
            valid: false,
            detail: Some("truncated archive".to_string()),
            checked_at: Utc.with_ymd_and_hms(2026, 2, 4, 0, 0, 0).unwrap(),
        };
        let cache = record_validation(&store, "X", failed.clone());
        assert_eq!(cache.get("X"), Some(&failed));
    }

    #[test]
    fn size_labels_pick_sensible_units() {
        assert_eq!(size_label(512), "512 B");
        assert_eq!(size_label(8 * 1024), "8 KB");
        assert_eq!(size_label(42 * 1024 * 1024), "42 MB");
        assert_eq!(size_label(3 * 1024 * 1024 * 1024 / 2), "1.50 GB");
    }
}
