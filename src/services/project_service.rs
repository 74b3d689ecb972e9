use super::api_client::ApiClient;
use super::http::HttpRequest;
use crate::cache::ResourceKey;
use crate::error::FetchError;
use crate::models::{NewProject, ProjectUpdate, ProjectsByTypeRequest};

/// First element of every paginated project-list key.
pub const PROJECTS_BY_TYPE: &str = "projects-by-type";

impl ApiClient {
    pub fn projects_url(&self) -> String {
        format!("{}/projects", self.urls().project)
    }

    pub fn project_url(&self, id: &str) -> String {
        format!("{}/projects/{}", self.urls().project, urlencoding::encode(id))
    }

    pub fn supervisor_projects_url(&self, supervisor_id: &str) -> String {
        format!(
            "{}/projects/supervisor/{}",
            self.urls().project,
            urlencoding::encode(supervisor_id)
        )
    }

    /// The list is a POST, so its key is a tuple rather than the URL.
    pub fn projects_by_type_key(project_type: &str, page: Option<u32>) -> ResourceKey {
        let page = page.map(|p| p.to_string()).unwrap_or_default();
        ResourceKey::tuple([PROJECTS_BY_TYPE, project_type, page.as_str()])
    }

    pub fn projects_by_type_request(
        &self,
        project_type: &str,
        page: Option<u32>,
    ) -> Result<HttpRequest, FetchError> {
        HttpRequest::post(format!("{}/projects/byType", self.urls().project)).json(
            &ProjectsByTypeRequest {
                project_type: project_type.to_string(),
                page,
            },
        )
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<Option<String>, FetchError> {
        log::info!("📁 Creating project {}", project.title);
        let request = HttpRequest::post(self.projects_url()).json(project)?;
        self.send_message(request).await
    }

    pub async fn update_project(
        &self,
        id: &str,
        update: &ProjectUpdate,
    ) -> Result<Option<String>, FetchError> {
        let request = HttpRequest::put(self.project_url(id)).json(update)?;
        self.send_message(request).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<Option<String>, FetchError> {
        log::info!("🗑️ Deleting project {}", id);
        self.send_message(HttpRequest::delete(self.project_url(id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceUrls;
    use crate::services::http::Method;
    use crate::services::testing::MockHttp;
    use futures::executor::block_on;
    use serde_json::json;

    fn api(http: &std::rc::Rc<MockHttp>) -> ApiClient {
        ApiClient::new(
            http.clone(),
            ServiceUrls {
                project: "http://projects.test/api".into(),
                ..ServiceUrls::default()
            },
        )
    }

    #[test]
    fn by_type_key_and_body_carry_type_and_page() {
        let http = MockHttp::new();
        let key = ApiClient::projects_by_type_key("series", Some(2));
        assert_eq!(key.kind(), Some(PROJECTS_BY_TYPE));
        assert_ne!(key, ApiClient::projects_by_type_key("series", Some(3)));

        let request = api(&http).projects_by_type_request("series", Some(2)).unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "http://projects.test/api/projects/byType");
        assert_eq!(request.body, Some(json!({ "type": "series", "page": 2 })));
    }

    #[test]
    fn delete_reports_the_service_message() {
        let http = MockHttp::new();
        http.respond(
            Method::Delete,
            "http://projects.test/api/projects/p7",
            200,
            json!({ "success": true, "message": "Project deleted" }),
        );

        let message = block_on(api(&http).delete_project("p7")).unwrap();
        assert_eq!(message.as_deref(), Some("Project deleted"));
    }

    #[test]
    fn update_sends_only_the_changed_fields() {
        let http = MockHttp::new();
        http.respond(
            Method::Put,
            "http://projects.test/api/projects/p7",
            200,
            json!({ "success": true, "message": "Project updated" }),
        );
        let update = ProjectUpdate {
            status: Some("in review".into()),
            ..ProjectUpdate::default()
        };

        let message = block_on(api(&http).update_project("p7", &update)).unwrap();
        assert_eq!(message.as_deref(), Some("Project updated"));
        assert_eq!(
            http.last_request().unwrap().body,
            Some(json!({ "status": "in review" }))
        );
    }

    #[test]
    fn create_project_surfaces_http_failures() {
        let http = MockHttp::new();
        http.respond(
            Method::Post,
            "http://projects.test/api/projects",
            400,
            json!({ "message": "title is required" }),
        );
        let project = NewProject {
            title: String::new(),
            description: String::new(),
            project_type: "film".into(),
            supervisor_id: None,
            deadline: None,
        };

        let err = block_on(api(&http).create_project(&project)).unwrap_err();
        assert_eq!(err.status(), Some(400));
    }
}
