//! Registration page view with username/email/password form.

use dioxus::prelude::*;
use tracing::{error, info};
use ui::{use_activity_log, use_services, Notice, Notifier};

const REGISTER_FAILED: &str = "Registration failed. Please check the data and try again.";
const REGISTERED: &str = "Registration successful! You can now log in.";

/// Register page component.
#[component]
pub fn Register() -> Element {
    let services = use_services();
    let log = use_activity_log();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut failure = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        spawn(async move {
            failure.set(None);

            let u = username().trim().to_string();
            let e = email().trim().to_string();
            let p = password();

            if u.is_empty() {
                failure.set(Some("Username is required".to_string()));
                return;
            }
            if e.is_empty() || !e.contains('@') {
                failure.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if p.len() < 6 {
                failure.set(Some("Password must be at least 6 characters".to_string()));
                return;
            }

            submitting.set(true);
            match services.client.register(&u, &e, &p).await {
                Ok(response) => {
                    info!("Registered {u}: {}", response.message);
                    log.notify(Notice::success(REGISTERED));
                    nav.replace(services.config.routes.login.clone());
                }
                Err(err) => {
                    error!("Registration failed: {err}");
                    failure.set(Some(REGISTER_FAILED.to_string()));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",

            h1 { "Create Account" }

            form {
                onsubmit: handle_register,
                class: "auth-form",

                if let Some(err) = failure() {
                    div { class: "auth-error", "{err}" }
                }

                input {
                    r#type: "text",
                    placeholder: "Username",
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Password (min 6 characters)",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Creating account..." } else { "Sign up" }
                }
            }

            p {
                class: "auth-switch",
                "Already have an account? "
                Link { to: "/login", "Sign in" }
            }
        }
    }
}
