use super::resource::{use_get, UseResourceHandle};
use crate::app::AppContext;
use crate::models::NotificationsEnvelope;

pub fn use_notifications(ctx: &AppContext, user_id: Option<&str>) -> UseResourceHandle<NotificationsEnvelope> {
    use_get(
        ctx,
        user_id.map(|id| ctx.api().notifications_url(id)),
        ctx.fetch_options(),
    )
}
