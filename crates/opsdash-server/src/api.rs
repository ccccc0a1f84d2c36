pub mod grid;
pub mod pages;
pub mod statistics;

use crate::logging::TraceId;
use crate::state::AppState;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

/// API error response
#[derive(Serialize, ToSchema)]
pub struct ApiError {
    /// Error code
    pub err_code: i32,
    /// Error message
    pub err_msg: String,
    /// Trace id for log correlation
    pub trace_id: String,
}

fn to_custom_error_code(code: &str) -> i32 {
    match code {
        "bad_request" => 1001,
        "not_found" => 1004,
        "internal_error" => 1500,
        "storage_error" => 1501,
        _ => 1999,
    }
}

/// Error bodies carry a stable code, a human-readable message, and the
/// request trace id. Internal details never reach the client; they are
/// logged at the failure site instead.
pub fn error_response(status: StatusCode, trace_id: &str, code: &str, msg: &str) -> Response {
    (
        status,
        Json(ApiError {
            err_code: to_custom_error_code(code),
            err_msg: msg.to_string(),
            trace_id: trace_id.to_string(),
        }),
    )
        .into_response()
}

/// Service health
#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service version
    version: String,
    /// Uptime in seconds
    uptime_secs: i64,
    /// Database status (ok / unreachable)
    database_status: String,
}

/// Get service health.
#[utoipa::path(
    get,
    path = "/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    )
)]
async fn health(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let uptime = (Utc::now() - state.start_time).num_seconds();
    let database_status = match state.store.ping().await {
        Ok(()) => "ok".to_string(),
        Err(e) => {
            tracing::error!(trace_id = %trace_id, error = %e, "Database ping failed");
            "unreachable".to_string()
        }
    };
    (
        StatusCode::OK,
        Json(HealthResponse {
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_secs: uptime,
            database_status,
        }),
    )
}

/// Navigation tree department node
#[derive(Serialize, ToSchema)]
struct TreeNode {
    id: &'static str,
    text: &'static str,
    children: Vec<TreeLeaf>,
}

/// Navigation tree team node
#[derive(Serialize, ToSchema)]
struct TreeLeaf {
    id: &'static str,
    text: &'static str,
}

/// Get the fixed navigation tree shown in the dashboard sidebar.
#[utoipa::path(
    get,
    path = "/api/tree",
    tag = "Navigation",
    responses(
        (status = 200, description = "Navigation tree", body = Vec<TreeNode>)
    )
)]
async fn navigation_tree() -> Json<Vec<TreeNode>> {
    Json(vec![
        TreeNode {
            id: "dept1",
            text: "Sales Dept",
            children: vec![
                TreeLeaf {
                    id: "team1",
                    text: "Sales Team 1",
                },
                TreeLeaf {
                    id: "team2",
                    text: "Sales Team 2",
                },
            ],
        },
        TreeNode {
            id: "dept2",
            text: "Engineering Dept",
            children: vec![
                TreeLeaf {
                    id: "team3",
                    text: "Development Team",
                },
                TreeLeaf {
                    id: "team4",
                    text: "Infrastructure Team",
                },
            ],
        },
    ])
}

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health))
        .routes(routes!(navigation_tree))
        .merge(pages::page_routes())
        .merge(grid::grid_routes())
        .merge(statistics::statistics_routes())
}
