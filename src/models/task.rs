use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "projectId", alias = "project_id", default)]
    pub project_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// translation, voice-over, mixing, editing...
    #[serde(rename = "type", default)]
    pub task_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "assignedTo", alias = "assigned_to", default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(rename = "createdAt", alias = "created_at", default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "taskId", alias = "task_id", default)]
    pub task_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "assignedTo", alias = "assigned_to", default)]
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEnvelope {
    pub success: bool,
    pub task: Task,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TasksEnvelope {
    pub success: bool,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtasksEnvelope {
    pub success: bool,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStatusUpdate {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSubtask {
    #[serde(rename = "taskId")]
    pub task_id: String,
    pub title: String,
    #[serde(rename = "assignedTo", skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

impl TasksEnvelope {
    pub fn with_status<'a>(&'a self, status: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |task| task.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tasks_accept_either_id_spelling() {
        let envelope: TasksEnvelope = serde_json::from_value(json!({
            "success": true,
            "tasks": [
                { "_id": "t1", "title": "Translate reel 1", "status": "completed" },
                { "id": "t2", "title": "Record reel 1", "status": "pending", "assignedTo": "u-7" }
            ]
        }))
        .unwrap();

        assert_eq!(envelope.tasks[1].id, "t2");
        assert_eq!(envelope.tasks[1].assigned_to.as_deref(), Some("u-7"));
        assert_eq!(envelope.with_status("completed").count(), 1);
    }
}
