use futures::future::{self, FutureExt, LocalBoxFuture};
use std::rc::Rc;

use super::resource::{use_get, UseResourceHandle};
use crate::app::AppContext;
use crate::cache::{CacheSnapshot, Fetcher};
use crate::models::{ProjectEnvelope, ProjectPage, ProjectsEnvelope};
use crate::services::{ApiClient, PROJECTS_BY_TYPE};

pub fn use_project(ctx: &AppContext, id: Option<&str>) -> UseResourceHandle<ProjectEnvelope> {
    use_get(ctx, id.map(|id| ctx.api().project_url(id)), ctx.fetch_options())
}

pub fn use_projects(ctx: &AppContext) -> UseResourceHandle<ProjectsEnvelope> {
    use_get(ctx, Some(ctx.api().projects_url()), ctx.fetch_options())
}

pub fn use_supervisor_projects(
    ctx: &AppContext,
    supervisor_id: Option<&str>,
) -> UseResourceHandle<ProjectsEnvelope> {
    use_get(
        ctx,
        supervisor_id.map(|id| ctx.api().supervisor_projects_url(id)),
        ctx.fetch_options(),
    )
}

/// One page of projects of a type. Each (type, page) pair is its own entry.
pub fn use_projects_by_type(
    ctx: &AppContext,
    project_type: Option<&str>,
    page: Option<u32>,
) -> UseResourceHandle<ProjectPage> {
    let Some(project_type) = project_type else {
        let idle: Fetcher = Rc::new(|| future::ready(Ok(serde_json::Value::Null)).boxed_local());
        return UseResourceHandle::mount(ctx.cache(), None, idle, ctx.fetch_options());
    };

    let key = ApiClient::projects_by_type_key(project_type, page);
    let fetcher: Fetcher = match ctx.api().projects_by_type_request(project_type, page) {
        Ok(request) => ctx.api().fetcher(request),
        Err(e) => Rc::new(move || future::ready(Err(e.clone())).boxed_local()),
    };
    UseResourceHandle::mount(ctx.cache(), Some(key), fetcher, ctx.fetch_options())
}

/// Refetches every cached project page, whatever its type or page number.
pub fn refresh_project_pages(ctx: &AppContext) -> LocalBoxFuture<'static, Vec<CacheSnapshot>> {
    ctx.cache()
        .invalidate_where(|key| key.kind() == Some(PROJECTS_BY_TYPE))
}
