//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::api::ApiVerifier;
use crate::pages::{dashboard::DashboardPage, login::LoginPage};
use crate::state::gateway::AuthGateway;
use crate::state::session::SessionStore;
use crate::util::auth::AuthGuard;

/// Gateway type provided through context.
pub type AppGateway = AuthGateway<ApiVerifier>;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the one session store for this client and provides it, plus the
/// gateway that mutates it, to every route.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionStore::browser();
    provide_context(AuthGateway::new(session.clone(), ApiVerifier));
    provide_context(session);

    view! {
        <Stylesheet id="leptos" href="/pkg/bm-auth.css"/>
        <Title text="Sign In"/>

        <Router>
            <AuthGuard/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=DashboardPage/>
            </Routes>
        </Router>
    }
}
