// ============================================================================
// USER SERVICE - auth and profile endpoints
// ============================================================================

use serde::{Deserialize, Serialize};

use super::api_client::ApiClient;
use super::http::HttpRequest;
use crate::error::FetchError;
use crate::models::{Role, User, UserEnvelope, UserUpdate};

impl ApiClient {
    pub fn users_url(&self) -> String {
        format!("{}/users", self.urls().user)
    }

    pub fn user_url(&self, id: &str) -> String {
        format!("{}/users/{}", self.urls().user, urlencoding::encode(id))
    }

    /// Role names contain spaces ("Voice-over Artist").
    pub fn users_by_role_url(&self, role: Role) -> String {
        format!(
            "{}/users/role/{}",
            self.urls().user,
            urlencoding::encode(role.as_str())
        )
    }

    /// Cookie-based login. The returned profile is what the session store
    /// persists.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, FetchError> {
        let url = format!("{}/auth/login", self.urls().user);
        let request = HttpRequest::post(url).json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;

        log::info!("🔐 Signing in {}", email);

        let response: LoginResponse = self.execute_as(request).await?;
        match response {
            LoginResponse {
                success: true,
                user: Some(user),
                ..
            } => {
                log::info!("✅ Signed in as {} ({})", user.name, user.role);
                Ok(user)
            }
            LoginResponse { message, .. } => Err(FetchError::Rejected(
                message.unwrap_or_else(|| "invalid credentials".to_string()),
            )),
        }
    }

    pub async fn logout(&self) -> Result<(), FetchError> {
        let url = format!("{}/auth/logout", self.urls().user);
        self.send_message(HttpRequest::post(url)).await?;
        log::info!("👋 Signed out");
        Ok(())
    }

    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<User, FetchError> {
        let request = HttpRequest::put(self.user_url(id)).json(update)?;
        let envelope: UserEnvelope = self.execute_as(request).await?;
        if !envelope.success {
            return Err(FetchError::Rejected(format!("update of user {} refused", id)));
        }
        Ok(envelope.user)
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    success: bool,
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    message: Option<String>,
}
