use super::api_client::ApiClient;
use super::http::HttpRequest;
use crate::error::FetchError;
use crate::models::{NewSubtask, TaskStatusUpdate};

impl ApiClient {
    pub fn task_url(&self, id: &str) -> String {
        format!("{}/tasks/{}", self.urls().task, urlencoding::encode(id))
    }

    pub fn project_tasks_url(&self, project_id: &str) -> String {
        format!(
            "{}/tasks/project/{}",
            self.urls().task,
            urlencoding::encode(project_id)
        )
    }

    pub fn user_tasks_url(&self, user_id: &str) -> String {
        format!("{}/tasks/user/{}", self.urls().task, urlencoding::encode(user_id))
    }

    pub fn subtasks_url(&self, task_id: &str) -> String {
        format!(
            "{}/subtasks/task/{}",
            self.urls().task,
            urlencoding::encode(task_id)
        )
    }

    /// 404 when the user has no task activity that month.
    pub fn monthly_stats_url(&self, user_id: &str, year: i32, month: u32) -> String {
        format!(
            "{}/tasks/stats/{}/{}/{}",
            self.urls().task,
            urlencoding::encode(user_id),
            year,
            month
        )
    }

    pub async fn update_task_status(&self, id: &str, status: &str) -> Result<Option<String>, FetchError> {
        log::info!("📝 Task {} -> {}", id, status);
        let request = HttpRequest::put(format!("{}/status", self.task_url(id))).json(&TaskStatusUpdate {
            status: status.to_string(),
        })?;
        self.send_message(request).await
    }

    pub async fn create_subtask(&self, subtask: &NewSubtask) -> Result<Option<String>, FetchError> {
        let request = HttpRequest::post(format!("{}/subtasks", self.urls().task)).json(subtask)?;
        self.send_message(request).await
    }
}
