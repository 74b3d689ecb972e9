use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Film, series, documentary... free-form upstream.
    #[serde(rename = "type", default)]
    pub project_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "supervisorId", alias = "supervisor_id", default)]
    pub supervisor_id: Option<String>,
    #[serde(default)]
    pub source_language: Option<String>,
    #[serde(default)]
    pub target_language: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(rename = "createdAt", alias = "created_at", default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEnvelope {
    pub success: bool,
    pub project: Project,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Response of `POST /projects/byType`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPage {
    pub projects: Vec<Project>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectsByTypeRequest {
    #[serde(rename = "type")]
    pub project_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: String,
    #[serde(rename = "supervisorId", skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}
