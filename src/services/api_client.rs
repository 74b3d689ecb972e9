// ============================================================================
// API CLIENT - HTTP only, no state
// ============================================================================
// URL building per service lives in the *_service.rs files next to this one.
// ============================================================================

use futures::future::FutureExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::rc::Rc;

use super::http::{HttpClient, HttpRequest, HttpResponse};
use crate::cache::Fetcher;
use crate::config::ServiceUrls;
use crate::error::FetchError;
use crate::models::ApiMessage;

#[derive(Clone)]
pub struct ApiClient {
    http: Rc<dyn HttpClient>,
    urls: Rc<ServiceUrls>,
}

impl ApiClient {
    pub fn new(http: Rc<dyn HttpClient>, urls: ServiceUrls) -> Self {
        Self {
            http,
            urls: Rc::new(urls.normalized()),
        }
    }

    pub fn urls(&self) -> &ServiceUrls {
        &self.urls
    }

    /// Sends `request` and decodes the body as JSON. An empty 2xx body is
    /// `Value::Null`.
    pub async fn execute(&self, request: HttpRequest) -> Result<Value, FetchError> {
        let method = request.method;
        let url = request.url.clone();

        let response = self.http.send(request).await.map_err(|e| {
            log::error!("❌ {} {} failed: {}", method.as_str(), url, e);
            e
        })?;

        decode_response(response)
    }

    pub async fn execute_as<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, FetchError> {
        let value = self.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Mutation endpoints answer `{ success, message }`.
    pub async fn send_message(&self, request: HttpRequest) -> Result<Option<String>, FetchError> {
        self.execute_as::<ApiMessage>(request).await?.into_result()
    }

    /// Cache fetcher replaying `request` on every revalidation.
    pub fn fetcher(&self, request: HttpRequest) -> Fetcher {
        let client = self.clone();
        Rc::new(move || {
            let client = client.clone();
            let request = request.clone();
            async move { client.execute(request).await }.boxed_local()
        })
    }
}

fn decode_response(response: HttpResponse) -> Result<Value, FetchError> {
    if !response.ok() {
        return Err(FetchError::Http {
            status: response.status,
            message: error_message(&response),
        });
    }

    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// `message` from a JSON error body, else the raw text.
fn error_message(response: &HttpResponse) -> String {
    let from_json = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_owned));

    match from_json {
        Some(message) => message,
        None if !response.body.trim().is_empty() => response.body.trim().to_string(),
        None => format!("request failed with status {}", response.status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::MockHttp;
    use futures::executor::block_on;
    use serde_json::json;

    fn client(http: &Rc<MockHttp>) -> ApiClient {
        ApiClient::new(http.clone(), ServiceUrls::default())
    }

    #[test]
    fn non_2xx_carries_the_service_message() {
        let http = MockHttp::new();
        http.respond_get(
            "http://tasks.test/tasks/t9",
            404,
            json!({ "success": false, "message": "Task not found" }),
        );

        let err = block_on(client(&http).execute(HttpRequest::get("http://tasks.test/tasks/t9")))
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Http {
                status: 404,
                message: "Task not found".into()
            }
        );
    }

    #[test]
    fn plain_text_error_bodies_are_kept() {
        let response = HttpResponse {
            status: 502,
            body: "Bad Gateway\n".into(),
        };
        assert_eq!(error_message(&response), "Bad Gateway");

        let empty = HttpResponse {
            status: 500,
            body: String::new(),
        };
        assert_eq!(error_message(&empty), "request failed with status 500");
    }

    #[test]
    fn empty_success_body_decodes_as_null() {
        let response = HttpResponse {
            status: 204,
            body: String::new(),
        };
        assert_eq!(decode_response(response), Ok(Value::Null));
    }

    #[test]
    fn rejected_message_is_an_error() {
        let http = MockHttp::new();
        http.respond_get(
            "http://users.test/ping",
            200,
            json!({ "success": false, "message": "Not allowed" }),
        );

        let result = block_on(client(&http).send_message(HttpRequest::get("http://users.test/ping")));
        assert_eq!(result, Err(FetchError::Rejected("Not allowed".into())));
    }

    #[test]
    fn fetcher_sends_a_fresh_request_per_call() {
        let http = MockHttp::new();
        http.respond_get("http://users.test/users", 200, json!({ "success": true, "users": [] }));
        let fetcher = client(&http).fetcher(HttpRequest::get("http://users.test/users"));

        block_on(fetcher()).unwrap();
        block_on(fetcher()).unwrap();
        assert_eq!(http.calls_to("http://users.test/users"), 2);
    }
}
