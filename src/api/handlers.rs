//! API route handlers
//!
//! Request handling for the dashboard endpoints: machine listings,
//! per-machine rate summaries, the fleet overview, the leaderboard, and
//! daily reading entry.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::analytics::{profit, AnalyticsEngine, AnalyticsError, ProfitAssumptions};
use crate::store::StoreError;
use crate::types::{ClawParams, Machine, MachineStatus, Reading};

/// Shared state for API handlers
#[derive(Clone)]
pub struct DashboardState {
    pub engine: Arc<AnalyticsEngine>,
    /// Cost model used by the profit endpoint
    pub profit_assumptions: ProfitAssumptions,
}

impl DashboardState {
    pub fn new(engine: Arc<AnalyticsEngine>, profit_assumptions: ProfitAssumptions) -> Self {
        Self {
            engine,
            profit_assumptions,
        }
    }
}

fn analytics_error_response(err: &AnalyticsError) -> Response {
    match err {
        AnalyticsError::ZeroFleetPayout { .. } => ApiErrorResponse::unprocessable(err.to_string()),
        AnalyticsError::Store(StoreError::UnknownMachine(id)) => {
            ApiErrorResponse::not_found(format!("unknown machine: {id}"))
        }
        AnalyticsError::Store(inner) => {
            error!(error = %inner, "store error while serving request");
            ApiErrorResponse::internal(inner.to_string())
        }
    }
}

fn store_error_response(err: &StoreError) -> Response {
    match err {
        StoreError::UnknownMachine(id) => {
            ApiErrorResponse::not_found(format!("unknown machine: {id}"))
        }
        other => {
            error!(error = %other, "store error while serving request");
            ApiErrorResponse::internal(other.to_string())
        }
    }
}

/// GET /health
pub async fn health() -> Response {
    ApiResponse::ok(serde_json::json!({"status": "ok"}))
}

/// GET /api/machines
pub async fn get_machines(State(state): State<DashboardState>) -> Response {
    match state.engine.registry().machines() {
        Ok(machines) => ApiResponse::ok(machines),
        Err(err) => store_error_response(&err),
    }
}

/// GET /api/machines/:id/summary
pub async fn get_machine_summary(
    Path(machine_id): Path<String>,
    State(state): State<DashboardState>,
) -> Response {
    match state.engine.registry().machine(&machine_id) {
        Ok(Some(_)) => {}
        Ok(None) => return ApiErrorResponse::not_found(format!("unknown machine: {machine_id}")),
        Err(err) => return store_error_response(&err),
    }

    match state.engine.machine_summary(&machine_id) {
        Ok(summary) => ApiResponse::ok(summary),
        Err(err) => analytics_error_response(&err),
    }
}

/// GET /api/fleet
pub async fn get_fleet(State(state): State<DashboardState>) -> Response {
    match state.engine.fleet_overview() {
        Ok(overview) => ApiResponse::ok(overview),
        Err(err) => analytics_error_response(&err),
    }
}

/// GET /api/leaderboard
pub async fn get_leaderboard(State(state): State<DashboardState>) -> Response {
    match state.engine.leaderboard() {
        Ok(board) => ApiResponse::ok(board),
        Err(err) => analytics_error_response(&err),
    }
}

/// Request body for POST /api/machines/:id/readings
#[derive(Debug, Deserialize)]
pub struct NewReading {
    pub date: NaiveDate,
    pub coins_in: u64,
    pub toys_payout: u64,
    #[serde(default)]
    pub params: Option<ClawParams>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// POST /api/machines/:id/readings — record (or replace) a daily reading.
///
/// When the body omits claw parameters, the machine's current ones are
/// carried forward onto the reading.
pub async fn post_reading(
    Path(machine_id): Path<String>,
    State(state): State<DashboardState>,
    Json(body): Json<NewReading>,
) -> Response {
    let machine = match state.engine.registry().machine(&machine_id) {
        Ok(Some(machine)) => machine,
        Ok(None) => return ApiErrorResponse::not_found(format!("unknown machine: {machine_id}")),
        Err(err) => return store_error_response(&err),
    };

    let params = body.params.unwrap_or(machine.params);
    let mut reading = Reading::new(machine_id, body.date, body.coins_in, body.toys_payout, params);
    reading.notes = body.notes;

    match state.engine.store().upsert_reading(&reading) {
        Ok(()) => ApiResponse::created(reading),
        Err(err) => store_error_response(&err),
    }
}

/// Request body for PUT /api/machines/:id
#[derive(Debug, Deserialize)]
pub struct NewMachine {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: MachineStatus,
    #[serde(default)]
    pub params: ClawParams,
    #[serde(default)]
    pub notes: Option<String>,
}

/// PUT /api/machines/:id — register or update a machine.
pub async fn put_machine(
    Path(machine_id): Path<String>,
    State(state): State<DashboardState>,
    Json(body): Json<NewMachine>,
) -> Response {
    let machine = Machine {
        id: machine_id,
        name: body.name,
        location: body.location,
        status: body.status,
        params: body.params,
        notes: body.notes,
    };
    match state.engine.registry().upsert_machine(&machine) {
        Ok(()) => ApiResponse::ok(machine),
        Err(err) => store_error_response(&err),
    }
}

/// Request body for POST /api/profit/estimate
#[derive(Debug, Deserialize)]
pub struct ProfitRequest {
    /// Coin amounts fed in during the session
    pub coin_amounts: Vec<u64>,
    /// Observed toys payout; when present the estimate uses it instead of
    /// the rate-derived expectation
    #[serde(default)]
    pub total_toys_payout: Option<f64>,
}

/// POST /api/profit/estimate
pub async fn post_profit_estimate(
    State(state): State<DashboardState>,
    Json(body): Json<ProfitRequest>,
) -> Response {
    let estimate = match body.total_toys_payout {
        Some(total) => profit::estimate_with_total_payout(
            &body.coin_amounts,
            total,
            &state.profit_assumptions,
        ),
        None => profit::estimate(&body.coin_amounts, &state.profit_assumptions),
    };
    ApiResponse::ok(estimate)
}
