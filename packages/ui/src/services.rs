//! Shared client services for all platforms.
//!
//! [`Services`] bundles the session handle, the API client and the route gate
//! built from one [`ClientConfig`]. It is provided once as context by the app
//! shell and cloned out with [`use_services`]. Every clone shares the same
//! backing store.
//!
//! Session storage is platform-appropriate:
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStorageStore`]
//! - **WASM without `web`**: in-memory via [`store::MemoryStore`]
//! - **Native**: filesystem via [`store::FileStore`] under `<data_dir>/tasks/`

use std::rc::Rc;

use api::{ApiClient, HttpTransport};
use dioxus::prelude::*;
use store::{ClientConfig, SessionKeys, SessionStore};

use crate::activity_log::{use_activity_log, ActivityLog};
use crate::guard::RouteGate;
use crate::task_list::{TaskList, TaskListState};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStorageStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStore = store::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = store::FileStore;

pub type AppClient = ApiClient<HttpTransport, PlatformStore>;
pub type AppTaskList = TaskList<HttpTransport, PlatformStore, Signal<ActivityLog>>;

/// Create the platform-appropriate key-value store.
pub fn make_platform_store() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("tasks");
        store::FileStore::new(base)
    }
}

/// Create a session store using the configured key names.
pub fn make_session_store(config: &ClientConfig) -> SessionStore<PlatformStore> {
    SessionStore::with_keys(
        make_platform_store(),
        SessionKeys::from(config.storage.clone()),
    )
}

#[derive(Clone)]
pub struct Services {
    pub config: ClientConfig,
    pub session: SessionStore<PlatformStore>,
    pub client: AppClient,
    pub gate: RouteGate<PlatformStore>,
}

impl Services {
    pub fn new(config: ClientConfig) -> Self {
        let session = make_session_store(&config);
        let client = ApiClient::new(HttpTransport::new(), session.clone(), &config.api);
        let gate = RouteGate::new(session.clone(), config.routes.clone());
        Self {
            config,
            session,
            client,
            gate,
        }
    }
}

pub fn use_services() -> Services {
    use_context::<Services>()
}

/// Task list controller for the current component, reporting notices to the
/// activity log. The returned signal mirrors the controller's state.
pub fn use_task_list() -> (Rc<AppTaskList>, Signal<TaskListState>) {
    let services = use_services();
    let log = use_activity_log();
    let state = use_signal(TaskListState::default);
    let list = use_hook(move || {
        Rc::new(
            TaskList::new(services.client.clone(), log).on_change(move |snapshot| {
                let mut state = state;
                state.set(snapshot.clone());
            }),
        )
    });
    (list, state)
}
