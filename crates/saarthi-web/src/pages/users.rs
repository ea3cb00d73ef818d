//! Users Page
//!
//! CRUD table with one shared create/edit form.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use saarthi_core::flow::DELETE_USER_PROMPT;
use saarthi_core::{Confirm, UserRecord, UsersFlow, UsersState};

use crate::app::ServicesHandle;
use crate::browser::BrowserConfirm;
use crate::components::StatusLine;

#[component]
pub fn UsersPage(services: ServicesHandle) -> impl IntoView {
    let users = RwSignal::new(UsersState::default());
    let loading = move || users.with(|s| s.loading);
    let flow = move || services.with_value(|s| s.users.clone());

    let refresh = move || {
        let flow: UsersFlow = flow();
        users.update(UsersState::begin);
        let before = users.get_untracked();
        let mut snapshot = before.clone();
        spawn_local(async move {
            if flow.load(&mut snapshot).await.changed_state() {
                users.update(|current| current.merge_from(&before, snapshot));
            }
        });
    };

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let flow = flow();
        users.update(UsersState::begin);
        let before = users.get_untracked();
        let mut snapshot = before.clone();
        spawn_local(async move {
            if flow.submit(&mut snapshot).await.changed_state() {
                users.update(|current| current.merge_from(&before, snapshot));
            }
        });
    };

    let delete = move |id: String| {
        if !BrowserConfirm.confirm(DELETE_USER_PROMPT) {
            return;
        }
        let flow = flow();
        users.update(UsersState::begin);
        let before = users.get_untracked();
        let mut snapshot = before.clone();
        spawn_local(async move {
            // Already confirmed above, before the buttons were disabled
            if flow.delete(&mut snapshot, &id, &|_: &str| true).await.changed_state() {
                users.update(|current| current.merge_from(&before, snapshot));
            }
        });
    };

    refresh();

    view! {
        <section class="users-wrap">
            <p class="kicker">"Directory"</p>
            <h1>"Users"</h1>

            <form class="auth-form" on:submit=submit>
                <label>
                    "Name"
                    <input
                        placeholder="Full name"
                        required
                        minlength="2"
                        maxlength="80"
                        prop:value=move || users.with(|s| s.form.name.clone())
                        on:input=move |ev| users.update(|s| s.form.name = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Email"
                    <input
                        type="email"
                        placeholder="name@example.com"
                        required
                        prop:value=move || users.with(|s| s.form.email.clone())
                        on:input=move |ev| users.update(|s| s.form.email = event_target_value(&ev))
                    />
                </label>
                <label>
                    "City"
                    <input
                        placeholder="Optional"
                        prop:value=move || users.with(|s| s.form.city.clone())
                        on:input=move |ev| users.update(|s| s.form.city = event_target_value(&ev))
                    />
                </label>

                <div class="form-actions">
                    <button class="submit-btn" type="submit" disabled=loading>
                        {move || users.with(UsersState::submit_label)}
                    </button>
                    <Show when=move || users.with(UsersState::is_editing)>
                        <button class="mini-btn" type="button" on:click=move |_| users.update(UsersState::cancel_edit)>
                            "Cancel"
                        </button>
                    </Show>
                    <button class="mini-btn" type="button" disabled=loading on:click=move |_| refresh()>
                        "Refresh"
                    </button>
                </div>
            </form>

            <StatusLine class="error" message=Signal::derive(move || users.with(|s| s.error.clone())) />
            <StatusLine message=Signal::derive(move || users.with(|s| s.status.clone())) />

            <table class="users-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"City"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || users.with(|s| s.users.clone())
                        key=|user| (user.id.clone(), user.name.clone(), user.email.clone(), user.city.clone())
                        children=move |user: UserRecord| {
                            let id = user.id.clone();
                            let editing = {
                                let id = id.clone();
                                move || users.with(|s| s.editing_id.as_deref() == Some(id.as_str()))
                            };
                            let record = user.clone();
                            view! {
                                <tr class:editing=editing>
                                    <td>{user.name}</td>
                                    <td>{user.email}</td>
                                    <td>{user.city}</td>
                                    <td class="row-actions">
                                        <button
                                            class="mini-btn"
                                            disabled=loading
                                            on:click=move |_| users.update(|s| s.begin_edit(&record))
                                        >
                                            "Edit"
                                        </button>
                                        <button
                                            class="danger-btn"
                                            disabled=loading
                                            on:click=move |_| delete(id.clone())
                                        >
                                            "Delete"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <Show when=move || users.with(|s| s.users.is_empty() && !s.loading)>
                <p class="small-line">"No users yet."</p>
            </Show>
        </section>
    }
}
