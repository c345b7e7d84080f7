//! Login page view with email/password form.

use dioxus::prelude::*;
use tracing::error;
use ui::{use_activity_log, use_auth, use_services, AuthState, LogLevel};

const LOGIN_FAILED: &str = "Login failed. Please check your email and password.";

/// Login page component. `query` carries the preserved destination.
#[component]
pub fn Login(query: String) -> Element {
    let services = use_services();
    let mut auth = use_auth();
    let log = use_activity_log();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut failure = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    // If already logged in, continue to the destination
    if services.session.is_authenticated() {
        nav.replace(services.gate.after_login(&query));
        return rsx! {};
    }

    // e.g. "Registration successful!" from the register page
    let notice = log()
        .entries
        .last()
        .filter(|e| e.level == LogLevel::Success)
        .map(|e| e.message.clone());

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        let query = query.clone();
        spawn(async move {
            if submitting() {
                return;
            }
            failure.set(None);

            let e = email().trim().to_string();
            let p = password();
            if e.is_empty() || !e.contains('@') {
                failure.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if p.len() < 6 {
                failure.set(Some("Password must be at least 6 characters".to_string()));
                return;
            }

            submitting.set(true);
            match services.client.login(&e, &p).await {
                Ok(_) => {
                    let online = auth.peek().online;
                    auth.set(AuthState::from_session(&services.session.session(), online));
                    nav.replace(services.gate.after_login(&query));
                }
                Err(err) => {
                    error!("Login failed: {err}");
                    failure.set(Some(LOGIN_FAILED.to_string()));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",

            h1 { "Sign in" }

            if let Some(message) = notice {
                div { class: "auth-notice", "{message}" }
            }

            form {
                onsubmit: handle_login,
                class: "auth-form",

                if let Some(err) = failure() {
                    div { class: "auth-error", "{err}" }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "auth-switch",
                "No account yet? "
                Link { to: "/register", "Create account" }
            }
        }
    }
}
