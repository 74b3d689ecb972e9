use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// `{ success, message }` returned by every mutation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiMessage {
    /// `Err(FetchError::Rejected)` when the service reported `success: false`.
    pub fn into_result(self) -> Result<Option<String>, FetchError> {
        if self.success {
            Ok(self.message)
        } else {
            Err(FetchError::Rejected(
                self.message
                    .unwrap_or_else(|| "request was not accepted".to_string()),
            ))
        }
    }
}
