//! The seam between the API client and the network.

use std::future::Future;

use tracing::debug;

use crate::error::ApiError;
use crate::request::{ApiRequest, ApiResponse};

/// Async interface for sending a fully prepared request.
///
/// A settled response is `Ok` whatever its status; `Err` means no response
/// arrived at all.
pub trait Transport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ApiError>>;
}

/// `reqwest`-backed transport. Uses `fetch` on wasm32 and hyper natively.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self.client.request(request.method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}
