pub mod config;
pub mod models;
pub mod session;

mod kv;
pub use kv::{KeyValueStore, StorageError};

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use config::{ApiConfig, ClientConfig, RoutesConfig, StorageConfig};
pub use models::{Session, Task, UserInfo};
pub use session::{SessionKeys, SessionStore};
