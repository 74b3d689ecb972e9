pub mod notifications;
pub mod projects;
pub mod reports;
pub mod resource;
pub mod tasks;
pub mod users;

pub use notifications::use_notifications;
pub use projects::{
    refresh_project_pages, use_project, use_projects, use_projects_by_type, use_supervisor_projects,
};
pub use reports::{use_current_month_stats, use_monthly_stats};
pub use resource::{ResourceState, UseResourceHandle};
pub use tasks::{use_project_tasks, use_subtasks, use_task, use_user_tasks};
pub use users::{use_user, use_users, use_users_by_role};
