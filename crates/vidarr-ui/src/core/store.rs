//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Slices stay small so reducers remain predictable: the session slice is
//!   written once at boot, the toast slice by any feature reporting outcome.

use std::rc::Rc;
use vidarr_api_models::PortalUser;
use yewdux::prelude::Dispatch;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Session bootstrap state.
    pub session: SessionSlice,
    /// Toast queue.
    pub toasts: ToastsSlice,
}

/// Session state populated from `/api/v1/auth/session` at boot.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SessionSlice {
    /// Authenticated user, once the bootstrap call resolves.
    pub user: Option<Rc<PortalUser>>,
    /// Bootstrap error, shown when the session call fails outright.
    pub error: Option<String>,
    /// True until the bootstrap call resolves either way.
    pub loading: bool,
}

/// Toast severity, mapped to badge styling by the toast host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Operation succeeded.
    Success,
    /// Secondary notice (partial results, already-applied).
    Info,
    /// Operation failed.
    Error,
}

/// One toast entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic identifier used for dismissal.
    pub id: u64,
    /// Severity.
    pub kind: ToastKind,
    /// Message text, already localised.
    pub message: String,
}

/// Toast queue slice.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ToastsSlice {
    /// Visible toasts in arrival order.
    pub items: Vec<Toast>,
    next_id: u64,
}

/// Append a toast and return its id.
pub fn push_toast(store: &mut AppStore, kind: ToastKind, message: impl Into<String>) -> u64 {
    let slice = &mut store.toasts;
    slice.next_id += 1;
    let id = slice.next_id;
    slice.items.push(Toast {
        id,
        kind,
        message: message.into(),
    });
    id
}

/// Remove a toast by id; unknown ids are ignored.
pub fn dismiss_toast(store: &mut AppStore, id: u64) {
    store.toasts.items.retain(|toast| toast.id != id);
}

/// Convenience dispatcher for the global store.
#[must_use]
pub fn app_dispatch() -> Dispatch<AppStore> {
    Dispatch::<AppStore>::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_ids_are_monotonic_and_dismissable() {
        let mut store = AppStore::default();
        let first = push_toast(&mut store, ToastKind::Success, "requested 3 episodes");
        let second = push_toast(&mut store, ToastKind::Info, "2 were skipped");
        assert!(second > first);
        assert_eq!(store.toasts.items.len(), 2);

        dismiss_toast(&mut store, first);
        assert_eq!(store.toasts.items.len(), 1);
        assert_eq!(store.toasts.items[0].id, second);

        dismiss_toast(&mut store, 999);
        assert_eq!(store.toasts.items.len(), 1);
    }

    #[test]
    fn partial_success_keeps_two_distinct_toasts() {
        let mut store = AppStore::default();
        push_toast(&mut store, ToastKind::Success, "Requested 3 episodes");
        push_toast(&mut store, ToastKind::Info, "Skipped 2 episodes");
        let kinds: Vec<ToastKind> = store.toasts.items.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![ToastKind::Success, ToastKind::Info]);
    }
}
