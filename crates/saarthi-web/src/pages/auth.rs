//! Auth Page
//!
//! Login / registration form and, once signed in, the profile panel.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use saarthi_core::flow::DELETE_ACCOUNT_PROMPT;
use saarthi_core::{AuthFlow, AuthMode, AuthState, Confirm, Role};

use crate::app::ServicesHandle;
use crate::browser::BrowserConfirm;
use crate::components::StatusLine;

#[component]
pub fn AuthPage(services: ServicesHandle, auth: RwSignal<AuthState>) -> impl IntoView {
    let loading = move || auth.with(|s| s.loading);
    let is_mode = move |mode: AuthMode| auth.with(|s| s.mode == mode);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let flow = services.with_value(|s| s.auth.clone());
        auth.update(AuthState::begin);
        let before = auth.get_untracked();
        let mut snapshot = before.clone();
        spawn_local(async move {
            if flow.submit(&mut snapshot).await.changed_state() {
                auth.update(|current| current.merge_from(&before, snapshot));
            }
        });
    };

    view! {
        <section class="auth-wrap">
            <p class="kicker">"Secure Access"</p>
            <h1>"Role-Based Access"</h1>
            <p class="tagline">"Choose your role and continue."</p>

            <div class="mode-switch">
                <button
                    class="mini-btn"
                    class:active=move || is_mode(AuthMode::Login)
                    on:click=move |_| auth.update(|s| AuthFlow::set_mode(s, AuthMode::Login))
                >
                    "Login"
                </button>
                <button
                    class="mini-btn"
                    class:active=move || is_mode(AuthMode::Register)
                    on:click=move |_| auth.update(|s| AuthFlow::set_mode(s, AuthMode::Register))
                >
                    "Register"
                </button>
            </div>

            <form class="auth-form" on:submit=submit>
                <label>
                    "Role"
                    <select
                        prop:value=move || auth.with(|s| s.form.role.as_str())
                        on:change=move |ev| {
                            if let Ok(role) = event_target_value(&ev).parse::<Role>() {
                                auth.update(|s| s.form.role = role);
                            }
                        }
                    >
                        {Role::ALL
                            .into_iter()
                            .map(|role| view! { <option value=role.as_str()>{role.label()}</option> })
                            .collect_view()}
                    </select>
                </label>

                <Show when=move || is_mode(AuthMode::Register)>
                    <label>
                        "Full Name"
                        <input
                            placeholder="Enter your name"
                            required
                            minlength="2"
                            prop:value=move || auth.with(|s| s.form.full_name.clone())
                            on:input=move |ev| auth.update(|s| s.form.full_name = event_target_value(&ev))
                        />
                    </label>
                </Show>

                <label>
                    "Email"
                    <input
                        type="email"
                        placeholder="name@example.com"
                        required
                        prop:value=move || auth.with(|s| s.form.email.clone())
                        on:input=move |ev| auth.update(|s| s.form.email = event_target_value(&ev))
                    />
                </label>

                <label>
                    "Password"
                    <input
                        type="password"
                        placeholder="Minimum 8 characters"
                        required
                        minlength="8"
                        prop:value=move || auth.with(|s| s.form.password.clone())
                        on:input=move |ev| auth.update(|s| s.form.password = event_target_value(&ev))
                    />
                </label>

                <button class="submit-btn" type="submit" disabled=loading>
                    {move || auth.with(AuthState::submit_label)}
                </button>
            </form>

            <Show when=move || auth.with(AuthState::is_authenticated)>
                <ProfilePanel services=services auth=auth />
            </Show>

            <StatusLine message=Signal::derive(move || auth.with(|s| s.message.clone())) />
        </section>
    }
}

#[component]
fn ProfilePanel(services: ServicesHandle, auth: RwSignal<AuthState>) -> impl IntoView {
    let loading = move || auth.with(|s| s.loading);

    let update = move |ev: SubmitEvent| {
        ev.prevent_default();
        let flow = services.with_value(|s| s.auth.clone());
        auth.update(AuthState::begin);
        let before = auth.get_untracked();
        let mut snapshot = before.clone();
        spawn_local(async move {
            if flow.update_profile(&mut snapshot).await.changed_state() {
                auth.update(|current| current.merge_from(&before, snapshot));
            }
        });
    };

    let delete = move |_| {
        if !BrowserConfirm.confirm(DELETE_ACCOUNT_PROMPT) {
            return;
        }
        let flow = services.with_value(|s| s.auth.clone());
        auth.update(AuthState::begin);
        let before = auth.get_untracked();
        let mut snapshot = before.clone();
        spawn_local(async move {
            // Already confirmed above, before the buttons were disabled
            if flow.delete_account(&mut snapshot, &|_: &str| true).await.changed_state() {
                auth.update(|current| current.merge_from(&before, snapshot));
            }
        });
    };

    let member_since = move || {
        auth.with(|s| {
            s.me.as_ref()
                .and_then(|me| me.created_at)
                .map(|at| format!("Member since {}", at.format("%d %b %Y")))
        })
    };

    view! {
        <section class="profile-panel">
            <h2>"Your Profile"</h2>
            <p>
                "Signed in as " <strong>{move || auth.with(|s| s.role_label().unwrap_or_default())}</strong>
            </p>
            <p class="small-line">{move || auth.with(|s| s.me.as_ref().map(|me| me.email.clone()))}</p>
            <p class="small-line">{member_since}</p>

            <form class="auth-form" on:submit=update>
                <label>
                    "Full Name"
                    <input
                        placeholder="Update full name"
                        prop:value=move || auth.with(|s| s.profile.full_name.clone())
                        on:input=move |ev| auth.update(|s| s.profile.full_name = event_target_value(&ev))
                    />
                </label>
                <label>
                    "New Password"
                    <input
                        type="password"
                        placeholder="Leave blank to keep current password"
                        prop:value=move || auth.with(|s| s.profile.password.clone())
                        on:input=move |ev| auth.update(|s| s.profile.password = event_target_value(&ev))
                    />
                </label>
                <button class="submit-btn" type="submit" disabled=loading>
                    "Update Profile"
                </button>
            </form>

            <button class="danger-btn" on:click=delete disabled=loading>
                "Delete Account"
            </button>
        </section>
    }
}
