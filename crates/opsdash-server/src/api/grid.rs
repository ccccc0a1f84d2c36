use crate::api::error_response;
use crate::logging::TraceId;
use crate::state::AppState;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use opsdash_storage::GridSource;
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Team/sales status record
#[derive(Serialize, ToSchema)]
struct GridRecord {
    /// Row id
    id: i32,
    /// Owning navigation-tree node id
    team_id: String,
    /// Entry name
    name: String,
    /// Status label
    status: Option<String>,
    /// Entry date (free-form)
    date: Option<String>,
}

/// List team/sales records for a navigation-tree node.
/// `team1`/`team2` read from team data, `team3`/`team4` from sales data;
/// any other identifier falls back to team data and returns no rows.
#[utoipa::path(
    get,
    path = "/api/data/{item_id}",
    tag = "Grid",
    params(
        ("item_id" = String, Path, description = "Navigation-tree node id")
    ),
    responses(
        (status = 200, description = "Matching records", body = Vec<GridRecord>),
        (status = 500, description = "Database error", body = crate::api::ApiError)
    )
)]
async fn grid_data(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Response {
    let source = GridSource::resolve(&item_id);
    match state.store.grid_rows(&source).await {
        Ok(rows) => {
            let items: Vec<GridRecord> = rows
                .into_iter()
                .map(|r| GridRecord {
                    id: r.id,
                    team_id: r.team_id,
                    name: r.name,
                    status: r.status,
                    date: r.date,
                })
                .collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => {
            tracing::error!(
                trace_id = %trace_id,
                item_id = %item_id,
                error = %e,
                "Failed to query grid data"
            );
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &trace_id,
                "storage_error",
                "Database error",
            )
        }
    }
}

pub fn grid_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(grid_data))
}
