//! View State
//!
//! Plain, cloneable containers for what each view shows. Flows mutate them;
//! the UI layer only reads them and writes form fields.

use crate::model::{Branding, Health, Role, UserProfile, UserRecord};

/// Top-level pages
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Home,
    Auth,
    Users,
}

impl Page {
    pub const ALL: [Self; 3] = [Self::Home, Self::Auth, Self::Users];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Auth => "/auth",
            Self::Users => "/users",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Auth => "Login / Register",
            Self::Users => "Users",
        }
    }
}

// ============================================================================
// Public info
// ============================================================================

pub const FALLBACK_NAME: &str = "GramSaarthi";
pub const FALLBACK_TAGLINE: &str = "Loading vision...";
pub const FALLBACK_DESCRIPTION: &str = "Connecting communities with transparent digital governance.";
pub const FALLBACK_STATUS: &str = "checking";

/// Branding and backend health, fetched once at mount
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublicInfo {
    pub branding: Option<Branding>,
    pub health: Option<Health>,
    pub error: Option<String>,
}

impl PublicInfo {
    pub fn name(&self) -> &str {
        self.branding
            .as_ref()
            .and_then(|b| b.name.as_deref())
            .unwrap_or(FALLBACK_NAME)
    }

    pub fn tagline(&self) -> &str {
        self.branding
            .as_ref()
            .and_then(|b| b.tagline.as_deref())
            .unwrap_or(FALLBACK_TAGLINE)
    }

    pub fn description(&self) -> &str {
        self.branding
            .as_ref()
            .and_then(|b| b.description.as_deref())
            .unwrap_or(FALLBACK_DESCRIPTION)
    }

    pub fn status(&self) -> &str {
        self.health
            .as_ref()
            .and_then(|h| h.status.as_deref())
            .unwrap_or(FALLBACK_STATUS)
    }
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Login / register form fields
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub role: Role,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Profile edit form fields
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub full_name: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub mode: AuthMode,
    pub form: AuthForm,
    pub profile: ProfileForm,
    /// Bearer token for the current session
    pub token: Option<String>,
    /// Identity confirmed by `/auth/me`
    pub me: Option<UserProfile>,
    /// Last status line shown under the forms
    pub message: Option<String>,
    pub loading: bool,
}

impl AuthState {
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    pub const fn is_authenticated(&self) -> bool {
        self.me.is_some()
    }

    pub fn role_label(&self) -> Option<&'static str> {
        self.me.as_ref().map(|me| me.role.label())
    }

    pub const fn submit_label(&self) -> &'static str {
        match (self.loading, self.mode) {
            (true, _) => "Please wait...",
            (false, AuthMode::Login) => "Login",
            (false, AuthMode::Register) => "Register",
        }
    }

    /// Mark a request as started from the UI before the flow runs
    pub fn begin(&mut self) {
        self.loading = true;
        self.message = None;
    }

    /// Drop the session entirely
    pub fn sign_out(&mut self) {
        self.token = None;
        self.me = None;
    }

    /// Apply what a flow changed between `before` and `after`, leaving
    /// every other field as it is now.
    ///
    /// Session fields are only applied while the session the flow started
    /// from is still current, so a late answer for an old token cannot undo
    /// a newer login.
    pub fn merge_from(&mut self, before: &Self, after: Self) {
        if self.token == before.token {
            take_changed(&mut self.token, &before.token, after.token);
            take_changed(&mut self.me, &before.me, after.me);
        }

        take_changed(&mut self.mode, &before.mode, after.mode);
        take_changed(&mut self.form.role, &before.form.role, after.form.role);
        take_changed(&mut self.form.full_name, &before.form.full_name, after.form.full_name);
        take_changed(&mut self.form.email, &before.form.email, after.form.email);
        take_changed(&mut self.form.password, &before.form.password, after.form.password);
        take_changed(&mut self.profile.full_name, &before.profile.full_name, after.profile.full_name);
        take_changed(&mut self.profile.password, &before.profile.password, after.profile.password);
        take_changed(&mut self.message, &before.message, after.message);
        take_changed(&mut self.loading, &before.loading, after.loading);
    }
}

/// Overwrite `current` only if the flow moved the field away from `before`
fn take_changed<T: PartialEq>(current: &mut T, before: &T, after: T) {
    if after != *before {
        *current = after;
    }
}

// ============================================================================
// Users CRUD
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub city: String,
}

impl From<&UserRecord> for UserForm {
    fn from(record: &UserRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            city: record.city.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsersState {
    pub users: Vec<UserRecord>,
    pub form: UserForm,
    /// Set while the shared form edits an existing record
    pub editing_id: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub status: Option<String>,
}

impl UsersState {
    /// Pre-fill the form from a row and switch to edit mode
    pub fn begin_edit(&mut self, record: &UserRecord) {
        self.form = UserForm::from(record);
        self.editing_id = Some(record.id.clone());
        self.status = None;
    }

    pub fn cancel_edit(&mut self) {
        self.form = UserForm::default();
        self.editing_id = None;
    }

    pub const fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub const fn submit_label(&self) -> &'static str {
        match (self.loading, self.editing_id.is_some()) {
            (true, _) => "Saving...",
            (false, true) => "Update User",
            (false, false) => "Create User",
        }
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply what a flow changed between `before` and `after`, leaving
    /// every other field as it is now.
    pub fn merge_from(&mut self, before: &Self, after: Self) {
        take_changed(&mut self.users, &before.users, after.users);
        take_changed(&mut self.form.name, &before.form.name, after.form.name);
        take_changed(&mut self.form.email, &before.form.email, after.form.email);
        take_changed(&mut self.form.city, &before.form.city, after.form.city);
        take_changed(&mut self.editing_id, &before.editing_id, after.editing_id);
        take_changed(&mut self.loading, &before.loading, after.loading);
        take_changed(&mut self.error, &before.error, after.error);
        take_changed(&mut self.status, &before.status, after.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_info_fallbacks() {
        let info = PublicInfo::default();
        assert_eq!(info.name(), FALLBACK_NAME);
        assert_eq!(info.tagline(), FALLBACK_TAGLINE);
        assert_eq!(info.description(), FALLBACK_DESCRIPTION);
        assert_eq!(info.status(), FALLBACK_STATUS);
    }

    #[test]
    fn test_partial_branding_keeps_fallbacks() {
        let info = PublicInfo {
            branding: Some(Branding {
                name: Some("GramSaarthi Pune".into()),
                ..Branding::default()
            }),
            ..PublicInfo::default()
        };
        assert_eq!(info.name(), "GramSaarthi Pune");
        assert_eq!(info.tagline(), FALLBACK_TAGLINE);
    }

    #[test]
    fn test_submit_labels() {
        let mut state = AuthState::default();
        assert_eq!(state.submit_label(), "Login");
        state.mode = AuthMode::Register;
        assert_eq!(state.submit_label(), "Register");
        state.begin();
        assert_eq!(state.submit_label(), "Please wait...");
    }

    #[test]
    fn test_edit_mode_round_trip() {
        let record = UserRecord {
            id: "u1".into(),
            name: "Meena".into(),
            email: "meena@example.org".into(),
            city: "Nashik".into(),
            created_at: None,
        };
        let mut state = UsersState::default();

        state.begin_edit(&record);
        assert!(state.is_editing());
        assert_eq!(state.form.city, "Nashik");
        assert_eq!(state.submit_label(), "Update User");

        state.cancel_edit();
        assert!(!state.is_editing());
        assert_eq!(state.form, UserForm::default());
    }

    fn profile(name: &str) -> UserProfile {
        UserProfile {
            role: Role::RuralUser,
            email: "asha@example.org".into(),
            full_name: name.into(),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_auth_merge_keeps_concurrent_typing() {
        let mut before = AuthState::with_token(Some("jwt-1".into()));
        before.begin();

        // The user switched mode and typed while the identity check ran
        let mut current = before.clone();
        current.mode = AuthMode::Register;
        current.form.email = "new@example.org".into();

        let mut after = before.clone();
        after.me = Some(profile("Asha Devi"));
        after.profile.full_name = "Asha Devi".into();
        after.loading = false;

        current.merge_from(&before, after);

        assert!(current.is_authenticated());
        assert!(!current.loading);
        assert_eq!(current.mode, AuthMode::Register);
        assert_eq!(current.form.email, "new@example.org");
        assert_eq!(current.profile.full_name, "Asha Devi");
    }

    #[test]
    fn test_stale_rejection_does_not_undo_newer_login() {
        let stale_before = AuthState::with_token(Some("expired".into()));

        // A login completed while the old check was pending
        let mut current = stale_before.clone();
        current.token = Some("fresh".into());
        current.me = Some(profile("Asha Devi"));
        current.message = Some("Login successful.".into());

        let mut stale_after = stale_before.clone();
        stale_after.sign_out();

        current.merge_from(&stale_before, stale_after);

        assert_eq!(current.token.as_deref(), Some("fresh"));
        assert!(current.is_authenticated());
        assert_eq!(current.message.as_deref(), Some("Login successful."));
    }

    #[test]
    fn test_users_merge_applies_only_flow_changes() {
        let mut before = UsersState::default();
        before.begin();

        let mut current = before.clone();
        current.form.name = "Typed meanwhile".into();

        let mut after = before.clone();
        after.users = vec![UserRecord {
            id: "a1".into(),
            name: "Ravi".into(),
            email: "ravi@example.org".into(),
            city: String::new(),
            created_at: None,
        }];
        after.loading = false;

        current.merge_from(&before, after);

        assert_eq!(current.users.len(), 1);
        assert!(!current.loading);
        assert_eq!(current.form.name, "Typed meanwhile");
    }

    #[test]
    fn test_page_paths() {
        assert_eq!(Page::default(), Page::Home);
        assert_eq!(Page::Users.path(), "/users");
        assert_eq!(Page::Auth.title(), "Login / Register");
    }
}
