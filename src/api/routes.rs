//! API route definitions
//!
//! Dashboard endpoints:
//! - /api/machines - registry listing and machine upsert
//! - /api/machines/:id/summary - per-machine payout-rate series
//! - /api/machines/:id/readings - daily reading entry
//! - /api/fleet - date-aligned fleet series and trailing rates
//! - /api/leaderboard - fleet rankings by summary rate
//! - /api/profit/estimate - session profit estimation

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{self, DashboardState};

/// Create all API routes for the dashboard
pub fn api_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/machines", get(handlers::get_machines))
        .route("/machines/:id", put(handlers::put_machine))
        .route("/machines/:id/summary", get(handlers::get_machine_summary))
        .route("/machines/:id/readings", post(handlers::post_reading))
        .route("/fleet", get(handlers::get_fleet))
        .route("/leaderboard", get(handlers::get_leaderboard))
        .route("/profit/estimate", post(handlers::post_profit_estimate))
        .with_state(state)
}
