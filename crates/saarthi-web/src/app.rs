//! Main App Component

use std::rc::Rc;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;
use leptos_router::{components::*, path};
use saarthi_core::{ApiClient, ApiConfig, AuthFlow, AuthState, PublicInfo, PublicInfoLoader, UsersFlow};

use crate::browser::LocalTokenStore;
use crate::components::NavBar;
use crate::pages::{AuthPage, HomePage, UsersPage};

/// API base URL, fixed when the bundle is built
const API_BASE_URL: Option<&str> = option_env!("SAARTHI_API_BASE_URL");

/// Flows shared by every page. They hold `Rc`s, so they live in
/// thread-local reactive storage.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthFlow,
    pub users: UsersFlow,
    pub public: PublicInfoLoader,
}

pub type ServicesHandle = StoredValue<Services, LocalStorage>;

impl Services {
    fn from_config(config: ApiConfig) -> Self {
        let store = Rc::new(LocalTokenStore::new(config.token_key.clone()));
        let api: ApiClient = saarthi_runtime::connect(config);

        Self {
            auth: AuthFlow::new(api.clone(), store),
            users: UsersFlow::new(api.clone()),
            public: PublicInfoLoader::new(api),
        }
    }
}

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let config = API_BASE_URL.map_or_else(ApiConfig::default, ApiConfig::new);
    tracing::info!(base_url = %config.base_url, "starting portal");

    let services: ServicesHandle = StoredValue::new_local(Services::from_config(config));
    let auth = RwSignal::new(services.with_value(|s| s.auth.initial_state()));
    let info = RwSignal::new(PublicInfo::default());

    // One public fetch and one identity check per page load
    let public = services.with_value(|s| s.public.clone());
    spawn_local(async move {
        info.set(public.load().await);
    });
    restore_session(services, auth);

    view! {
        <Router>
            <div class="page">
                <div class="bg-orb orb-1"></div>
                <div class="bg-orb orb-2"></div>

                <main class="card">
                    <NavBar services=services auth=auth />
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=move || view! { <HomePage info=info /> } />
                        <Route path=path!("/auth") view=move || view! { <AuthPage services=services auth=auth /> } />
                        <Route path=path!("/users") view=move || view! { <UsersPage services=services /> } />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

/// Check the stored token once; a rejected token silently signs out
fn restore_session(services: ServicesHandle, auth: RwSignal<AuthState>) {
    if auth.with_untracked(|s| s.token.is_none()) {
        return;
    }

    let flow = services.with_value(|s| s.auth.clone());
    let before = auth.get_untracked();
    let mut snapshot = before.clone();
    spawn_local(async move {
        if flow.restore(&mut snapshot).await.changed_state() {
            auth.update(|current| current.merge_from(&before, snapshot));
        }
    });
}
