use dioxus::prelude::*;

use store::ClientConfig;
use ui::{ActivityLog, AuthProvider, Services};
use views::{Login, Protected, Register, Tasks};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login?:..query")]
    Login { query: String },
    #[route("/register")]
    Register {},
    #[layout(Protected)]
        #[route("/tasks")]
        Tasks {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

const EMBEDDED_CONFIG: &str = include_str!("../client.toml");

fn main() {
    dioxus::launch(App);
}

/// Embedded `client.toml`, with the API location overridable at build time.
fn load_config() -> ClientConfig {
    let mut config = match ClientConfig::from_toml(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid embedded {}: {e}", ClientConfig::filename());
            ClientConfig::default()
        }
    };
    if let Some(url) = option_env!("TASKS_API_URL") {
        config.api.base_url = url.to_string();
    }
    config
}

#[component]
fn App() -> Element {
    use_context_provider(|| Services::new(load_config()));
    use_context_provider(|| Signal::new(ActivityLog::default()));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to the login page
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Login { query: String::new() });
    rsx! {}
}

/// Unknown paths land on the login page
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::debug!("No route for /{}", segments.join("/"));
    nav.replace(Route::Login { query: String::new() });
    rsx! {}
}
