//! Scripted `HttpClient` for unit tests.

use futures::future::{self, FutureExt, LocalBoxFuture};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

use super::http::{HttpClient, HttpRequest, HttpResponse, Method};
use crate::error::FetchError;

#[derive(Default)]
pub(crate) struct MockHttp {
    routes: RefCell<Vec<(Method, String, HttpResponse)>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockHttp {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Later registrations for the same route win.
    pub fn respond(&self, method: Method, url: &str, status: u16, body: Value) {
        self.routes.borrow_mut().push((
            method,
            url.to_string(),
            HttpResponse {
                status,
                body: body.to_string(),
            },
        ));
    }

    pub fn respond_get(&self, url: &str, status: u16, body: Value) {
        self.respond(Method::Get, url, status, body);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|r| r.url == url).count()
    }
}

impl HttpClient for MockHttp {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, FetchError>> {
        let response = self
            .routes
            .borrow()
            .iter()
            .rev()
            .find(|(method, url, _)| *method == request.method && *url == request.url)
            .map(|(_, _, response)| response.clone());
        self.requests.borrow_mut().push(request.clone());

        let result = response.ok_or_else(|| {
            FetchError::Network(format!("no route for {} {}", request.method.as_str(), request.url))
        });
        future::ready(result).boxed_local()
    }
}
