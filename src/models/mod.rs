pub mod api;
pub mod notification;
pub mod project;
pub mod report;
pub mod task;
pub mod user;

pub use api::ApiMessage;
pub use notification::{Notification, NotificationsEnvelope};
pub use project::{
    NewProject, Project, ProjectEnvelope, ProjectPage, ProjectUpdate, ProjectsByTypeRequest,
    ProjectsEnvelope,
};
pub use report::{DailyCount, MonthlyStats};
pub use task::{
    NewSubtask, Subtask, SubtasksEnvelope, Task, TaskEnvelope, TaskStatusUpdate, TasksEnvelope,
};
pub use user::{Role, User, UserEnvelope, UserUpdate, UsersEnvelope};
