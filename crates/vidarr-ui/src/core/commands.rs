//! Typed command bus for cross-tree UI triggers.
//!
//! # Design
//! - Replaces ambient `window.dispatchEvent` patterns with an explicit,
//!   typed publish/subscribe channel.
//! - Subscriptions are owned: dropping the guard unsubscribes, so a closed
//!   component can never receive a stale command.

use std::cell::RefCell;
use std::collections::HashMap;
use vidarr_api_models::MediaType;
use yew::Callback;

/// Commands any component may publish for shell-level handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiCommand {
    /// Open the create-list modal.
    OpenCreateListModal,
    /// Open the add-to-list modal for a title.
    OpenAddToList {
        /// TMDB identifier of the title.
        tmdb_id: i64,
        /// Movie or TV title.
        media_type: MediaType,
    },
    /// Open the episode-request wizard for a series.
    OpenRequestWizard {
        /// TMDB identifier of the series.
        tmdb_id: i64,
        /// Display title for the wizard header.
        title: String,
    },
}

#[derive(Default)]
struct CommandBus {
    subscribers: HashMap<u64, Callback<UiCommand>>,
    next_id: u64,
}

thread_local! {
    static BUS: RefCell<CommandBus> = RefCell::new(CommandBus::default());
}

/// Subscription handle; dropping it unsubscribes.
#[derive(Debug)]
pub struct CommandGuard {
    id: u64,
}

impl Drop for CommandGuard {
    fn drop(&mut self) {
        BUS.with(|bus| {
            bus.borrow_mut().subscribers.remove(&self.id);
        });
    }
}

/// Subscribe to every published [`UiCommand`].
#[must_use]
pub fn subscribe(callback: Callback<UiCommand>) -> CommandGuard {
    BUS.with(|bus| {
        let mut bus = bus.borrow_mut();
        bus.next_id += 1;
        let id = bus.next_id;
        bus.subscribers.insert(id, callback);
        CommandGuard { id }
    })
}

/// Publish a command to every live subscriber.
pub fn publish(command: &UiCommand) {
    let subscribers: Vec<Callback<UiCommand>> =
        BUS.with(|bus| bus.borrow().subscribers.values().cloned().collect());
    for subscriber in subscribers {
        subscriber.emit(command.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn published_commands_reach_live_subscribers_only() {
        let seen: Rc<RefCell<Vec<UiCommand>>> = Rc::default();
        let guard = {
            let seen = seen.clone();
            subscribe(Callback::from(move |command| {
                seen.borrow_mut().push(command);
            }))
        };
        publish(&UiCommand::OpenCreateListModal);
        assert_eq!(seen.borrow().len(), 1);

        drop(guard);
        publish(&UiCommand::OpenCreateListModal);
        assert_eq!(seen.borrow().len(), 1, "dropped guard must unsubscribe");
    }

    #[test]
    fn commands_carry_their_payloads() {
        let seen: Rc<RefCell<Vec<UiCommand>>> = Rc::default();
        let _guard = {
            let seen = seen.clone();
            subscribe(Callback::from(move |command| {
                seen.borrow_mut().push(command);
            }))
        };
        publish(&UiCommand::OpenAddToList {
            tmdb_id: 550,
            media_type: MediaType::Movie,
        });
        assert_eq!(
            seen.borrow()[0],
            UiCommand::OpenAddToList {
                tmdb_id: 550,
                media_type: MediaType::Movie,
            }
        );
    }
}
