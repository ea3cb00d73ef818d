//! View Flows
//!
//! Each flow owns an `ApiClient` and mutates a state container from
//! [`crate::state`]. A UI layer typically clones its state, runs the flow
//! against the clone and merges the result back with `merge_from`, so only
//! the fields the flow touched are written. When two different actions
//! overlap, the last response to land wins for the fields both touched.

mod auth;
mod public;
mod users;

pub use auth::{AuthFlow, DELETE_ACCOUNT_PROMPT};
pub use public::PublicInfoLoader;
pub use users::{DELETE_USER_PROMPT, UsersFlow};

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Interactive yes/no prompt guarding destructive actions
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What happened to a requested action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// The action ran (successfully or not) and the state was updated
    Done,
    /// The user declined the confirmation prompt; nothing was sent
    Declined,
    /// The same action is already in flight; nothing was sent
    Duplicate,
}

impl Outcome {
    /// Whether the caller should publish the mutated state
    pub const fn changed_state(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// User actions that may have a request outstanding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Restore,
    Submit,
    UpdateProfile,
    DeleteAccount,
    LoadUsers,
    SaveUser,
    DeleteUser,
}

/// Per-action de-duplication
///
/// A second trigger of an action that is still outstanding is refused.
/// Distinct actions never block each other.
#[derive(Clone, Debug, Default)]
pub struct InFlight {
    active: Rc<RefCell<HashSet<Action>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an action; `None` if it is already running
    pub fn try_begin(&self, action: Action) -> Option<Ticket> {
        if self.active.borrow_mut().insert(action) {
            Some(Ticket {
                active: Rc::clone(&self.active),
                action,
            })
        } else {
            tracing::debug!(?action, "dropping duplicate request");
            None
        }
    }

    pub fn is_active(&self, action: Action) -> bool {
        self.active.borrow().contains(&action)
    }
}

/// Releases its action when dropped
#[derive(Debug)]
pub struct Ticket {
    active: Rc<RefCell<HashSet<Action>>>,
    action: Action,
}

impl Drop for Ticket {
    fn drop(&mut self) {
        self.active.borrow_mut().remove(&self.action);
    }
}
