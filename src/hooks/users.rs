use super::resource::{use_get, UseResourceHandle};
use crate::app::AppContext;
use crate::models::{Role, UserEnvelope, UsersEnvelope};

pub fn use_user(ctx: &AppContext, id: Option<&str>) -> UseResourceHandle<UserEnvelope> {
    use_get(ctx, id.map(|id| ctx.api().user_url(id)), ctx.fetch_options())
}

pub fn use_users(ctx: &AppContext) -> UseResourceHandle<UsersEnvelope> {
    use_get(ctx, Some(ctx.api().users_url()), ctx.fetch_options())
}

pub fn use_users_by_role(ctx: &AppContext, role: Option<Role>) -> UseResourceHandle<UsersEnvelope> {
    use_get(
        ctx,
        role.map(|role| ctx.api().users_by_role_url(role)),
        ctx.fetch_options(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::test_app;
    use serde_json::json;

    #[test]
    fn users_by_role_decodes_the_envelope() {
        let mut app = test_app();
        app.http.respond_get(
            "http://localhost:5001/api/users/role/Sound%20Engineer",
            200,
            json!({
                "success": true,
                "users": [
                    { "id": "u5", "name": "Sam", "email": "sam@studio.test", "role": "Sound Engineer" }
                ]
            }),
        );

        let handle = use_users_by_role(&app.ctx, Some(Role::SoundEngineer));
        assert!(handle.state().is_loading);
        app.pool.run_until_stalled();

        let state = handle.state();
        assert!(!state.is_loading);
        let users = state.data.unwrap().users;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::SoundEngineer);
    }

    #[test]
    fn missing_id_fetches_nothing() {
        let mut app = test_app();
        let handle = use_user(&app.ctx, None);
        app.pool.run_until_stalled();

        assert_eq!(handle.key(), None);
        assert!(!handle.state().is_loading);
        assert!(app.http.requests().is_empty());
    }
}
