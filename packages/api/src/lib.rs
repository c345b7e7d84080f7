//! # API crate — client side of the task API
//!
//! Everything the browser client needs to talk to the task backend:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`request`] | [`ApiRequest`] / [`ApiResponse`] values passed between layers |
//! | [`attachment`] | [`AuthAttachment`], the bearer-token request policy |
//! | [`transport`] | [`Transport`] seam and the `reqwest`-backed [`HttpTransport`] |
//! | [`client`] | [`ApiClient`], one method per remote call |
//! | [`models`] | Wire bodies of the remote contract |
//! | `mock` | [`MockTransport`] (feature `testing`) |

pub mod attachment;
pub mod client;
mod error;
pub mod models;
pub mod request;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod mock;

pub use attachment::{AuthAttachment, RequestPolicy};
pub use client::ApiClient;
pub use error::ApiError;
pub use models::{CreatedTask, LoginResponse, MessageResponse};
pub use request::{ApiRequest, ApiResponse};
pub use transport::{HttpTransport, Transport};

pub use reqwest::Method;

#[cfg(any(test, feature = "testing"))]
pub use mock::{MockTransport, PendingReply};

pub use store::{Task, UserInfo};
