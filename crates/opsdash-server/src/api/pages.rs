use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::Html;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Landing page.
#[utoipa::path(
    get,
    path = "/",
    tag = "Pages",
    responses(
        (status = 200, description = "Landing page", body = String, content_type = "text/html")
    )
)]
async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.templates.render_index())
}

/// Team page by identifier. Missing templates degrade to the default page;
/// this route never fails.
#[utoipa::path(
    get,
    path = "/pages/{team_id}",
    tag = "Pages",
    params(
        ("team_id" = String, Path, description = "Navigation-tree node id")
    ),
    responses(
        (status = 200, description = "Team page (or default page)", body = String, content_type = "text/html")
    )
)]
async fn team_page(State(state): State<AppState>, Path(team_id): Path<String>) -> Html<String> {
    Html(state.templates.render_page(&team_id))
}

pub fn page_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(index))
        .routes(routes!(team_page))
}
