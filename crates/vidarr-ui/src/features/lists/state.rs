//! List form and add-to-list session state.
//!
//! # Design
//! - Form inputs stay strings for lossless editing; validation runs before
//!   any network call and surfaces inline, never as a toast.
//! - The add-to-list modal tracks membership per session: lists known to
//!   contain the item (pre-loaded flags or a detected 409) stay
//!   non-selectable for the rest of the session without a re-fetch.

use serde::Serialize;
use std::collections::BTreeSet;

/// Mutable create/edit list form state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListFormState {
    /// List name entered in the editor.
    pub name: String,
    /// Optional description.
    pub description: String,
    /// Whether the list is publicly shareable.
    pub is_public: bool,
}

/// Validated create/update payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListPayload {
    /// Trimmed list name.
    pub name: String,
    /// Trimmed description, omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the list is publicly shareable.
    pub is_public: bool,
}

impl ListFormState {
    /// Build form state from an existing list.
    #[must_use]
    pub fn from_list(list: &vidarr_api_models::CustomList) -> Self {
        Self {
            name: list.name.clone(),
            description: list.description.clone().unwrap_or_default(),
            is_public: list.is_public,
        }
    }

    /// Validate the form into a payload.
    ///
    /// # Errors
    /// Returns the inline-field translation key when the name is empty;
    /// nothing is sent over the network in that case.
    pub fn validate(&self) -> Result<ListPayload, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("lists.name_required");
        }
        let description = self.description.trim();
        Ok(ListPayload {
            name: name.to_string(),
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
            is_public: self.is_public,
        })
    }
}

/// Membership state for one add-to-list modal session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddToListSession {
    containing: BTreeSet<i64>,
    added: BTreeSet<i64>,
}

impl AddToListSession {
    /// Seed the session with the lists already containing the item, as
    /// reported by the lists fetch.
    #[must_use]
    pub fn new(containing_list_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            containing: containing_list_ids.into_iter().collect(),
            added: BTreeSet::new(),
        }
    }

    /// Whether a list may still be offered as a target.
    #[must_use]
    pub fn is_selectable(&self, list_id: i64) -> bool {
        !self.containing.contains(&list_id) && !self.added.contains(&list_id)
    }

    /// Whether the item was added to this list during the session.
    #[must_use]
    pub fn was_added(&self, list_id: i64) -> bool {
        self.added.contains(&list_id)
    }

    /// Mark a list as containing the item, after a successful add or a 409
    /// that revealed an existing membership. No re-fetch is required.
    pub fn mark_added(&mut self, list_id: i64) {
        self.added.insert(list_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_blocks_submission_inline() {
        let form = ListFormState {
            name: "   ".to_string(),
            ..ListFormState::default()
        };
        assert_eq!(form.validate(), Err("lists.name_required"));

        let form = ListFormState {
            name: " Horror nights ".to_string(),
            description: String::new(),
            is_public: true,
        };
        let payload = form.validate().expect("valid form");
        assert_eq!(payload.name, "Horror nights");
        assert_eq!(payload.description, None);
        assert!(payload.is_public);
    }

    #[test]
    fn preloaded_memberships_disable_without_a_fetch() {
        let session = AddToListSession::new([5]);
        assert!(!session.is_selectable(5), "pre-loaded membership disables");
        assert!(session.is_selectable(6));
    }

    #[test]
    fn added_lists_stay_unselectable_for_the_session() {
        let mut session = AddToListSession::new([]);
        assert!(session.is_selectable(3));
        // Success or detected duplicate (409) both mark the list.
        session.mark_added(3);
        assert!(!session.is_selectable(3));
        assert!(session.was_added(3));
        assert!(!session.was_added(4));
    }
}
