//! Users CRUD Flow
//!
//! One shared form for create and edit. Every mutation is followed by a full
//! reload of the list; nothing is patched locally.

use super::{Action, Confirm, InFlight, Outcome};
use crate::client::ApiClient;
use crate::error::Result;
use crate::model::{NewUser, UserPatch};
use crate::state::UsersState;
use crate::validate;

pub const DELETE_USER_PROMPT: &str = "Delete this user?";

const MSG_CREATED: &str = "User created.";
const MSG_UPDATED: &str = "User updated.";
const MSG_DELETED: &str = "User deleted.";

#[derive(Clone, Debug)]
pub struct UsersFlow {
    api: ApiClient,
    in_flight: InFlight,
}

impl UsersFlow {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            in_flight: InFlight::new(),
        }
    }

    /// Fetch the full list
    pub async fn load(&self, state: &mut UsersState) -> Outcome {
        let Some(_ticket) = self.in_flight.try_begin(Action::LoadUsers) else {
            return Outcome::Duplicate;
        };
        state.begin();
        self.reload(state).await;
        state.loading = false;
        Outcome::Done
    }

    /// Create, or update when a row is being edited, then reload
    pub async fn submit(&self, state: &mut UsersState) -> Outcome {
        let Some(_ticket) = self.in_flight.try_begin(Action::SaveUser) else {
            return Outcome::Duplicate;
        };
        state.begin();
        state.status = None;

        match self.save(state).await {
            Ok(message) => {
                state.cancel_edit();
                state.status = Some(message.into());
                self.reload(state).await;
            }
            Err(e) => state.error = Some(e.user_message()),
        }

        state.loading = false;
        Outcome::Done
    }

    async fn save(&self, state: &UsersState) -> Result<&'static str> {
        let form = &state.form;
        validate::user_name(&form.name)?;
        validate::email(&form.email)?;

        let name = form.name.trim().to_string();
        let email = form.email.trim().to_string();
        let city = form.city.trim().to_string();

        if let Some(id) = state.editing_id.as_deref() {
            let patch = UserPatch {
                name: Some(name),
                email: Some(email),
                city: Some(city),
            };
            let updated = self.api.update_user(id, &patch).await?;
            tracing::info!(id = %updated.id, "user updated");
            Ok(MSG_UPDATED)
        } else {
            let created = self.api.create_user(&NewUser { name, email, city }).await?;
            tracing::info!(id = %created.id, "user created");
            Ok(MSG_CREATED)
        }
    }

    /// Delete a row after the user confirms, then reload
    pub async fn delete(&self, state: &mut UsersState, id: &str, confirm: &dyn Confirm) -> Outcome {
        if !confirm.confirm(DELETE_USER_PROMPT) {
            return Outcome::Declined;
        }
        let Some(_ticket) = self.in_flight.try_begin(Action::DeleteUser) else {
            return Outcome::Duplicate;
        };
        state.begin();
        state.status = None;

        match self.api.delete_user(id).await {
            Ok(()) => {
                if state.editing_id.as_deref() == Some(id) {
                    state.cancel_edit();
                }
                state.status = Some(MSG_DELETED.into());
                tracing::info!(id, "user deleted");
                self.reload(state).await;
            }
            Err(e) => state.error = Some(e.user_message()),
        }

        state.loading = false;
        Outcome::Done
    }

    async fn reload(&self, state: &mut UsersState) {
        match self.api.list_users().await {
            Ok(users) => {
                state.users = users;
                state.error = None;
            }
            Err(e) => state.error = Some(e.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::config::ApiConfig;
    use crate::model::UserRecord;
    use crate::transport::{Method, MockTransport};

    fn row(id: &str, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "email": format!("{}@example.org", name.to_lowercase()),
            "city": "Satara",
            "createdAt": "2026-02-11T08:30:00+00:00",
        })
    }

    fn flow(mock: &Rc<MockTransport>) -> UsersFlow {
        UsersFlow::new(ApiClient::new(ApiConfig::default(), mock.clone()))
    }

    #[tokio::test]
    async fn test_load_populates_list() {
        let mock = Rc::new(MockTransport::new().respond(
            Method::Get,
            "/api/users",
            200,
            json!([row("a1", "Ravi"), row("b2", "Meena")]),
        ));
        let mut state = UsersState::default();

        let _ = flow(&mock).load(&mut state).await;

        assert_eq!(state.users.len(), 2);
        assert_eq!(state.users[1].name, "Meena");
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_load_failure_sets_error() {
        let mock = Rc::new(MockTransport::new().fail(Method::Get, "/api/users", "connection refused"));
        let mut state = UsersState::default();

        let _ = flow(&mock).load(&mut state).await;

        assert!(state.users.is_empty());
        assert_eq!(
            state.error.as_deref(),
            Some("Unable to reach the server. Please try again.")
        );
    }

    #[tokio::test]
    async fn test_create_posts_and_reloads() {
        let mock = Rc::new(
            MockTransport::new()
                .respond(Method::Post, "/api/users", 201, row("c3", "Kiran"))
                .respond(Method::Get, "/api/users", 200, json!([row("c3", "Kiran")])),
        );
        let mut state = UsersState::default();
        state.form.name = " Kiran ".into();
        state.form.email = "kiran@example.org".into();

        let _ = flow(&mock).submit(&mut state).await;

        let sent = mock.last(Method::Post, "/api/users").unwrap();
        assert_eq!(
            sent.json_body(),
            Some(json!({ "name": "Kiran", "email": "kiran@example.org", "city": "" }))
        );
        assert_eq!(mock.calls(Method::Get, "/api/users"), 1);
        assert_eq!(state.users.len(), 1);
        assert_eq!(state.status.as_deref(), Some(MSG_CREATED));
        assert_eq!(state.form.name, "");
    }

    #[tokio::test]
    async fn test_edit_submits_update_to_that_id() {
        let mock = Rc::new(
            MockTransport::new()
                .respond(Method::Get, "/api/users", 200, json!([row("a1", "Ravi")]))
                .respond(Method::Get, "/api/users", 200, json!([row("a1", "Ravindra")]))
                .respond(Method::Put, "/api/users/a1", 200, row("a1", "Ravindra")),
        );
        let flow = flow(&mock);
        let mut state = UsersState::default();
        let _ = flow.load(&mut state).await;

        let selected: UserRecord = state.users[0].clone();
        state.begin_edit(&selected);
        assert_eq!(state.form.name, "Ravi");
        state.form.name = "Ravindra".into();

        let _ = flow.submit(&mut state).await;

        assert_eq!(mock.calls(Method::Put, "/api/users/a1"), 1);
        assert_eq!(mock.calls(Method::Post, "/api/users"), 0);
        let sent = mock.last(Method::Put, "/api/users/a1").unwrap();
        assert_eq!(sent.json_body().unwrap()["name"], "Ravindra");
        assert!(!state.is_editing());
        assert_eq!(state.form.name, "");
        assert_eq!(mock.calls(Method::Get, "/api/users"), 2);
        assert_eq!(state.users[0].name, "Ravindra");
        assert_eq!(state.status.as_deref(), Some(MSG_UPDATED));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form() {
        let mock = Rc::new(MockTransport::new().respond(
            Method::Post,
            "/api/users",
            409,
            json!({ "detail": "Email already exists" }),
        ));
        let mut state = UsersState::default();
        state.form.name = "Ravi".into();
        state.form.email = "ravi@example.org".into();

        let _ = flow(&mock).submit(&mut state).await;

        assert_eq!(state.error.as_deref(), Some("Email already exists"));
        assert_eq!(state.form.name, "Ravi");
        assert_eq!(mock.calls(Method::Get, "/api/users"), 0);
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let mock = Rc::new(MockTransport::new());
        let mut state = UsersState::default();

        let outcome = flow(&mock).delete(&mut state, "a1", &|_: &str| false).await;

        assert_eq!(outcome, Outcome::Declined);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_delete_then_single_reload() {
        let mock = Rc::new(
            MockTransport::new()
                .respond_raw(Method::Delete, "/api/users/a1", 204, "")
                .respond(Method::Get, "/api/users", 200, json!([])),
        );
        let mut state = UsersState::default();
        state.begin_edit(&UserRecord {
            id: "a1".into(),
            name: "Ravi".into(),
            email: "ravi@example.org".into(),
            city: String::new(),
            created_at: None,
        });

        let outcome = flow(&mock).delete(&mut state, "a1", &|_: &str| true).await;

        assert_eq!(outcome, Outcome::Done);
        assert_eq!(mock.requests().len(), 2);
        assert_eq!(mock.calls(Method::Delete, "/api/users/a1"), 1);
        assert_eq!(mock.calls(Method::Get, "/api/users"), 1);
        assert!(!state.is_editing());
        assert_eq!(state.status.as_deref(), Some(MSG_DELETED));
    }

    #[tokio::test]
    async fn test_delete_merged_into_busy_view() {
        let mock = Rc::new(
            MockTransport::new()
                .respond_raw(Method::Delete, "/api/users/a1", 204, "")
                .respond(Method::Get, "/api/users", 200, json!([row("b2", "Meena")])),
        );
        let mut view = UsersState::default();
        view.begin();
        assert!(view.loading);

        let before = view.clone();
        let mut after = before.clone();
        let _ = flow(&mock).delete(&mut after, "a1", &|_: &str| true).await;
        view.form.city = "Nashik".into();
        view.merge_from(&before, after);

        assert!(!view.loading);
        assert_eq!(view.users.len(), 1);
        assert_eq!(view.status.as_deref(), Some(MSG_DELETED));
        assert_eq!(view.form.city, "Nashik");
    }

    #[tokio::test]
    async fn test_duplicate_save_is_dropped() {
        let mock = Rc::new(
            MockTransport::with_latency()
                .respond(Method::Post, "/api/users", 201, row("c3", "Kiran"))
                .respond(Method::Get, "/api/users", 200, json!([row("c3", "Kiran")])),
        );
        let flow = flow(&mock);
        let mut first = UsersState::default();
        first.form.name = "Kiran".into();
        first.form.email = "kiran@example.org".into();
        let mut second = first.clone();

        let (a, b) = futures::join!(flow.submit(&mut first), flow.submit(&mut second));

        assert_eq!((a, b), (Outcome::Done, Outcome::Duplicate));
        assert_eq!(mock.calls(Method::Post, "/api/users"), 1);
    }
}
