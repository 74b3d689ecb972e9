// ============================================================================
// HTTP - transport seam. gloo-net in the browser, anything else elsewhere.
// ============================================================================

use futures::future::LocalBoxFuture;
use serde::Serialize;
use serde_json::Value;

use crate::error::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, FetchError> {
        let body = serde_json::to_value(body).map_err(|e| FetchError::Serialize(e.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport only: no retries, no timeout beyond the platform default.
pub trait HttpClient {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, FetchError>>;
}

#[cfg(target_arch = "wasm32")]
pub use gloo::GlooHttpClient;

#[cfg(target_arch = "wasm32")]
mod gloo {
    use futures::future::{FutureExt, LocalBoxFuture};
    use gloo_net::http::{Request, RequestBuilder};
    use web_sys::RequestCredentials;

    use super::{HttpClient, HttpRequest, HttpResponse, Method};
    use crate::error::FetchError;

    /// `fetch` with `credentials: include`; the services authenticate with
    /// cookies.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct GlooHttpClient;

    impl HttpClient for GlooHttpClient {
        fn send(
            &self,
            request: HttpRequest,
        ) -> LocalBoxFuture<'static, Result<HttpResponse, FetchError>> {
            async move {
                let builder: RequestBuilder = match request.method {
                    Method::Get => Request::get(&request.url),
                    Method::Post => Request::post(&request.url),
                    Method::Put => Request::put(&request.url),
                    Method::Delete => Request::delete(&request.url),
                }
                .credentials(RequestCredentials::Include);

                let response = match request.body {
                    Some(ref body) => builder
                        .json(body)
                        .map_err(|e| FetchError::Serialize(e.to_string()))?
                        .send()
                        .await,
                    None => builder.send().await,
                }
                .map_err(|e| FetchError::Network(e.to_string()))?;

                let status = response.status();
                let body = response
                    .text()
                    .await
                    .map_err(|e| FetchError::Network(e.to_string()))?;

                Ok(HttpResponse { status, body })
            }
            .boxed_local()
        }
    }
}
