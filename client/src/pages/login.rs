//! Login page: username + password against the auth gateway.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::app::AppGateway;

const MISSING_INPUT_MESSAGE: &str = "Enter both username and password.";
#[cfg(feature = "hydrate")]
const FAILED_LOGIN_MESSAGE: &str = "Invalid username or password";

/// Trim and require both fields before calling the gateway.
fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    let password = password.trim();
    if username.is_empty() || password.is_empty() {
        return Err(MISSING_INPUT_MESSAGE);
    }
    Ok((username.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let gateway = expect_context::<AppGateway>();
    let auth = gateway.session().state();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.get_untracked().loading {
            return;
        }
        let (username_value, password_value) = match validate_login_input(&username.get(), &password.get()) {
            Ok(values) => values,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let gateway = gateway.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                if gateway.login(&username_value, &password_value).await {
                    password.set(String::new());
                    navigate(crate::util::auth::HOME_PATH, leptos_router::NavigateOptions::default());
                } else {
                    info.set(FAILED_LOGIN_MESSAGE.to_owned());
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username_value, password_value);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Sign In"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || auth.get().loading>
                        {move || if auth.get().loading { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
