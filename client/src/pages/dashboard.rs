//! Dashboard page: the authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected by `AuthGuard`; renders whoever the session store holds and
//! offers logout.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::AppGateway;
use crate::util::auth::LOGIN_PATH;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let gateway = expect_context::<AppGateway>();
    let auth = gateway.session().state();
    let navigate = use_navigate();

    let on_logout = move |_| {
        gateway.logout();
        navigate(LOGIN_PATH, NavigateOptions::default());
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>"Dashboard"</h1>
                <button class="logout-button" on:click=on_logout>"Log out"</button>
            </header>
            <Show
                when=move || auth.get().is_authenticated
                fallback=|| view! { <p class="dashboard-muted">"Checking session..."</p> }
            >
                <p class="dashboard-user">
                    "Signed in as "
                    <strong>{move || auth.get().user.map(|u| u.username).unwrap_or_default()}</strong>
                    " ("
                    {move || auth.get().user.map(|u| u.role).unwrap_or_default()}
                    ")"
                </p>
                <Show when=move || auth.get().has_role("admin")>
                    <span class="badge badge--admin">"Administrator"</span>
                </Show>
            </Show>
        </div>
    }
}
