use chrono::{DateTime, Datelike};

use super::resource::{use_get, UseResourceHandle};
use crate::app::AppContext;
use crate::models::MonthlyStats;

/// Months without activity come back as 404 and show as empty stats.
/// Other failures are retried on the configured schedule.
pub fn use_monthly_stats(
    ctx: &AppContext,
    user_id: Option<&str>,
    year: i32,
    month: u32,
) -> UseResourceHandle<MonthlyStats> {
    let options = ctx
        .fetch_options()
        .with_retries(&ctx.config().cache)
        .treat_not_found_as_empty();
    use_get(
        ctx,
        user_id.map(|id| ctx.api().monthly_stats_url(id, year, month)),
        options,
    )
}

/// Stats for the month the app clock is in, in UTC.
pub fn use_current_month_stats(ctx: &AppContext, user_id: Option<&str>) -> UseResourceHandle<MonthlyStats> {
    let now = DateTime::from_timestamp_millis(ctx.timer().now_millis()).unwrap_or_default();
    use_monthly_stats(ctx, user_id, now.year(), now.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    use crate::app::testing::test_app;

    #[test]
    fn missing_month_is_empty_not_an_error() {
        let mut app = test_app();
        app.http.respond_get(
            "http://localhost:5003/api/tasks/stats/u1/2024/2",
            404,
            json!({ "message": "No stats for this month" }),
        );

        let stats = use_monthly_stats(&app.ctx, Some("u1"), 2024, 2);
        app.pool.run_until_stalled();

        let state = stats.state();
        assert_eq!(state.error, None);
        assert!(state.data.unwrap().is_empty());
        assert_eq!(app.timer.pending(), 0);
    }

    #[test]
    fn server_errors_are_retried_three_times() {
        let mut app = test_app();
        let url = "http://localhost:5003/api/tasks/stats/u1/2024/5";
        app.http.respond_get(url, 500, json!({ "message": "boom" }));

        let stats = use_monthly_stats(&app.ctx, Some("u1"), 2024, 5);
        app.pool.run_until_stalled();
        for _ in 0..5 {
            app.timer.advance(Duration::from_secs(5));
            app.pool.run_until_stalled();
        }

        assert_eq!(app.http.calls_to(url), 4);
        assert_eq!(stats.state().error.and_then(|e| e.status()), Some(500));
    }

    #[test]
    fn current_month_follows_the_clock() {
        let mut app = test_app();
        // ManualTimer starts at 2023-11-14T22:13:20Z.
        let stats = use_current_month_stats(&app.ctx, Some("u1"));
        app.pool.run_until_stalled();

        assert_eq!(
            stats.key().map(ToString::to_string).as_deref(),
            Some("http://localhost:5003/api/tasks/stats/u1/2023/11")
        );
    }
}
