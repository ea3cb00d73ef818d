//! UI Components

use leptos::prelude::*;
use leptos_router::components::A;
use saarthi_core::{AuthState, Page};

use crate::app::ServicesHandle;

/// Top navigation with the signed-in user and a logout button
#[component]
pub fn NavBar(services: ServicesHandle, auth: RwSignal<AuthState>) -> impl IntoView {
    let logout = move |_| {
        let flow = services.with_value(|s| s.auth.clone());
        auth.update(|state| flow.logout(state));
    };

    view! {
        <nav class="navbar">
            {Page::ALL
                .into_iter()
                .map(|page| view! { <A href=page.path()>{page.title()}</A> })
                .collect_view()}
            <Show when=move || auth.with(AuthState::is_authenticated)>
                <div class="nav-user">
                    <span>
                        {move || auth.with(|s| s.me.as_ref().map(|me| me.full_name.clone()))}
                    </span>
                    <button class="mini-btn" on:click=logout>"Logout"</button>
                </div>
            </Show>
        </nav>
    }
}

/// Optional status line; renders nothing when empty
#[component]
pub fn StatusLine(message: Signal<Option<String>>, #[prop(optional)] class: &'static str) -> impl IntoView {
    let class = if class.is_empty() { "status-msg" } else { class };

    move || message.get().map(|text| view! { <p class=class>{text}</p> })
}
