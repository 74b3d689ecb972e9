pub mod api_client;
pub mod http;
pub mod notification_service;
pub mod project_service;
pub mod task_service;
pub mod user_service;

#[cfg(test)]
pub(crate) mod testing;

pub use api_client::ApiClient;
pub use http::{HttpClient, HttpRequest, HttpResponse, Method};
pub use project_service::PROJECTS_BY_TYPE;

#[cfg(target_arch = "wasm32")]
pub use http::GlooHttpClient;
