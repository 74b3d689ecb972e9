use super::resource::{use_get, UseResourceHandle};
use crate::app::AppContext;
use crate::models::{SubtasksEnvelope, TaskEnvelope, TasksEnvelope};

pub fn use_task(ctx: &AppContext, id: Option<&str>) -> UseResourceHandle<TaskEnvelope> {
    use_get(ctx, id.map(|id| ctx.api().task_url(id)), ctx.fetch_options())
}

pub fn use_project_tasks(ctx: &AppContext, project_id: Option<&str>) -> UseResourceHandle<TasksEnvelope> {
    use_get(
        ctx,
        project_id.map(|id| ctx.api().project_tasks_url(id)),
        ctx.fetch_options(),
    )
}

pub fn use_user_tasks(ctx: &AppContext, user_id: Option<&str>) -> UseResourceHandle<TasksEnvelope> {
    use_get(
        ctx,
        user_id.map(|id| ctx.api().user_tasks_url(id)),
        ctx.fetch_options(),
    )
}

pub fn use_subtasks(ctx: &AppContext, task_id: Option<&str>) -> UseResourceHandle<SubtasksEnvelope> {
    use_get(
        ctx,
        task_id.map(|id| ctx.api().subtasks_url(id)),
        ctx.fetch_options(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::test_app;
    use crate::services::Method;
    use serde_json::json;

    const PROJECT_TASKS: &str = "http://localhost:5003/api/tasks/project/p1";

    #[test]
    fn two_components_share_one_request() {
        let mut app = test_app();
        app.http.respond_get(
            PROJECT_TASKS,
            200,
            json!({ "success": true, "tasks": [{ "_id": "t1", "title": "Translate reel 1", "status": "pending" }] }),
        );

        let board = use_project_tasks(&app.ctx, Some("p1"));
        let sidebar = use_project_tasks(&app.ctx, Some("p1"));
        app.pool.run_until_stalled();

        assert_eq!(app.http.calls_to(PROJECT_TASKS), 1);
        assert_eq!(board.state(), sidebar.state());
        assert_eq!(board.state().data.unwrap().with_status("pending").count(), 1);
    }

    #[test]
    fn mutate_after_a_status_change_refetches() {
        let mut app = test_app();
        app.http.respond_get(
            PROJECT_TASKS,
            200,
            json!({ "success": true, "tasks": [{ "_id": "t1", "title": "Mix", "status": "pending" }] }),
        );
        app.http.respond(
            Method::Put,
            "http://localhost:5003/api/tasks/t1/status",
            200,
            json!({ "success": true }),
        );

        let tasks = use_project_tasks(&app.ctx, Some("p1"));
        app.pool.run_until_stalled();

        app.pool
            .run_until(app.ctx.api().update_task_status("t1", "completed"))
            .unwrap();
        app.http.respond_get(
            PROJECT_TASKS,
            200,
            json!({ "success": true, "tasks": [{ "_id": "t1", "title": "Mix", "status": "completed" }] }),
        );

        let state = app.pool.run_until(tasks.mutate());
        assert_eq!(app.http.calls_to(PROJECT_TASKS), 2);
        assert_eq!(state.data.unwrap().tasks[0].status, "completed");
    }
}
