//! Auth / Profile Flow
//!
//! anonymous -> (login) -> authenticated -> (logout | delete | rejected token) -> anonymous

use std::rc::Rc;

use super::{Action, Confirm, InFlight, Outcome};
use crate::client::ApiClient;
use crate::error::Result;
use crate::model::{LoginRequest, RegisterRequest, UpdateMeRequest};
use crate::state::{AuthMode, AuthState, ProfileForm};
use crate::storage::TokenStore;
use crate::validate;

pub const DELETE_ACCOUNT_PROMPT: &str = "Delete your account permanently?";

const MSG_REGISTERED: &str = "Registration successful. Please login.";
const MSG_LOGGED_IN: &str = "Login successful.";
const MSG_PROFILE_UPDATED: &str = "Profile updated successfully.";
const MSG_ACCOUNT_DELETED: &str = "Account deleted.";
const MSG_LOGGED_OUT: &str = "Logged out.";
const MSG_NOT_SIGNED_IN: &str = "Please login to continue.";

/// Login, registration and profile management
#[derive(Clone)]
pub struct AuthFlow {
    api: ApiClient,
    store: Rc<dyn TokenStore>,
    in_flight: InFlight,
}

impl AuthFlow {
    pub fn new(api: ApiClient, store: Rc<dyn TokenStore>) -> Self {
        Self {
            api,
            store,
            in_flight: InFlight::new(),
        }
    }

    /// Starting state: anonymous, holding whatever token was stored
    pub fn initial_state(&self) -> AuthState {
        AuthState::with_token(self.store.load().filter(|t| !t.is_empty()))
    }

    /// Confirm the held token by fetching the current identity.
    ///
    /// Any failure drops the session silently.
    pub async fn restore(&self, state: &mut AuthState) -> Outcome {
        let Some(_ticket) = self.in_flight.try_begin(Action::Restore) else {
            return Outcome::Duplicate;
        };
        self.load_identity(state).await;
        Outcome::Done
    }

    pub fn set_mode(state: &mut AuthState, mode: AuthMode) {
        state.mode = mode;
    }

    /// Submit the login or registration form, depending on the mode
    pub async fn submit(&self, state: &mut AuthState) -> Outcome {
        let Some(_ticket) = self.in_flight.try_begin(Action::Submit) else {
            return Outcome::Duplicate;
        };
        state.begin();

        let result = match state.mode {
            AuthMode::Register => self.register(state).await,
            AuthMode::Login => self.login(state).await,
        };
        if let Err(e) = result {
            state.message = Some(e.user_message());
        }

        state.loading = false;
        Outcome::Done
    }

    async fn register(&self, state: &mut AuthState) -> Result<()> {
        let form = &state.form;
        validate::full_name(&form.full_name)?;
        validate::email(&form.email)?;
        validate::password(&form.password)?;

        let body = RegisterRequest {
            role: form.role,
            full_name: form.full_name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password.clone(),
        };
        self.api.register(&body).await?;

        tracing::info!(role = %body.role, "registered new account");
        state.message = Some(MSG_REGISTERED.into());
        state.mode = AuthMode::Login;
        state.form.password.clear();
        Ok(())
    }

    async fn login(&self, state: &mut AuthState) -> Result<()> {
        let form = &state.form;
        validate::email(&form.email)?;
        validate::password(&form.password)?;

        let body = LoginRequest {
            role: form.role,
            email: form.email.trim().to_string(),
            password: form.password.clone(),
        };
        let token = self.api.login(&body).await?.access_token;

        self.persist(&token);
        state.token = Some(token);
        state.message = Some(MSG_LOGGED_IN.into());
        tracing::info!(role = %body.role, "logged in");

        self.load_identity(state).await;
        Ok(())
    }

    /// Save name and/or password changes. Only changed fields are sent.
    pub async fn update_profile(&self, state: &mut AuthState) -> Outcome {
        let Some(_ticket) = self.in_flight.try_begin(Action::UpdateProfile) else {
            return Outcome::Duplicate;
        };
        state.begin();

        if let Err(e) = self.save_profile(state).await {
            state.message = Some(e.user_message());
        }

        state.loading = false;
        Outcome::Done
    }

    async fn save_profile(&self, state: &mut AuthState) -> Result<()> {
        let Some(token) = state.token.clone() else {
            state.message = Some(MSG_NOT_SIGNED_IN.into());
            return Ok(());
        };

        let body = profile_changes(state);
        if let Some(name) = &body.full_name {
            validate::full_name(name)?;
        }
        if let Some(password) = &body.password {
            validate::password(password)?;
        }

        let updated = self.api.update_me(&token, &body).await?;
        state.me = Some(updated);
        state.profile.password.clear();
        state.message = Some(MSG_PROFILE_UPDATED.into());
        Ok(())
    }

    /// Delete the signed-in account after the user confirms
    pub async fn delete_account(&self, state: &mut AuthState, confirm: &dyn Confirm) -> Outcome {
        if !confirm.confirm(DELETE_ACCOUNT_PROMPT) {
            return Outcome::Declined;
        }
        let Some(_ticket) = self.in_flight.try_begin(Action::DeleteAccount) else {
            return Outcome::Duplicate;
        };
        state.begin();

        match state.token.clone() {
            None => state.message = Some(MSG_NOT_SIGNED_IN.into()),
            Some(token) => match self.api.delete_me(&token).await {
                Ok(_) => {
                    self.forget(&token);
                    state.sign_out();
                    state.profile = ProfileForm::default();
                    state.message = Some(MSG_ACCOUNT_DELETED.into());
                    tracing::info!("account deleted");
                }
                Err(e) => state.message = Some(e.user_message()),
            },
        }

        state.loading = false;
        Outcome::Done
    }

    /// End the session locally. No request is made.
    pub fn logout(&self, state: &mut AuthState) {
        if let Some(token) = state.token.as_deref() {
            self.forget(token);
        }
        state.sign_out();
        state.profile = ProfileForm::default();
        state.message = Some(MSG_LOGGED_OUT.into());
        tracing::info!("logged out");
    }

    async fn load_identity(&self, state: &mut AuthState) {
        let Some(token) = state.token.clone() else {
            state.me = None;
            return;
        };

        match self.api.me(&token).await {
            Ok(me) => {
                state.profile.full_name.clone_from(&me.full_name);
                state.me = Some(me);
            }
            Err(e) => {
                tracing::warn!("stored session rejected: {}", e);
                self.forget(&token);
                state.sign_out();
            }
        }
    }

    fn persist(&self, token: &str) {
        if let Err(e) = self.store.save(token) {
            tracing::warn!("could not persist session token: {}", e);
        }
    }

    /// Clear the stored token, unless a newer session has replaced it
    fn forget(&self, token: &str) {
        if self.store.load().is_some_and(|stored| stored != token) {
            return;
        }
        if let Err(e) = self.store.clear() {
            tracing::warn!("could not clear session token: {}", e);
        }
    }
}

/// Build an update carrying only what the user actually changed
fn profile_changes(state: &AuthState) -> UpdateMeRequest {
    let current = state.me.as_ref().map(|me| me.full_name.as_str());
    let name = state.profile.full_name.trim();

    UpdateMeRequest {
        full_name: (!name.is_empty() && Some(name) != current).then(|| name.to_string()),
        password: (!state.profile.password.is_empty()).then(|| state.profile.password.clone()),
    }
}
