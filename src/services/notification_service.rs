use super::api_client::ApiClient;
use super::http::HttpRequest;
use crate::error::FetchError;

impl ApiClient {
    pub fn notifications_url(&self, user_id: &str) -> String {
        format!(
            "{}/notifications/user/{}",
            self.urls().notification,
            urlencoding::encode(user_id)
        )
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<Option<String>, FetchError> {
        let url = format!(
            "{}/notifications/{}/read",
            self.urls().notification,
            urlencoding::encode(id)
        );
        self.send_message(HttpRequest::put(url)).await
    }
}
