use crate::api::error_response;
use crate::logging::TraceId;
use crate::state::AppState;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use opsdash_storage::{DailyStatisticsRow, GroupField};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use utoipa_axum::{router::OpenApiRouter, routes};

const DEFAULT_MONTH: &str = "2025-12";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct MonthParams {
    /// Calendar month `YYYY-MM` (default `2025-12`)
    #[param(required = false)]
    month: Option<String>,
}

/// The grouping-column name and day columns are dynamic, so pivot rows are
/// shaped as plain JSON objects: `{<group column>, d01..d31, total_count}`.
fn pivot_row_json(group: GroupField, row: &DailyStatisticsRow) -> Value {
    let mut map = serde_json::Map::new();
    map.insert(group.column_name().to_string(), row.key.clone().into());
    for (i, count) in row.days.iter().enumerate() {
        map.insert(format!("d{:02}", i + 1), (*count).into());
    }
    map.insert("total_count".to_string(), row.total_count.into());
    Value::Object(map)
}

/// Day-pivoted monthly statistics.
/// `slack1` groups by region name, `slack2` by alarm name; any other
/// identifier is a client error.
#[utoipa::path(
    get,
    path = "/api/query/{item_id}",
    tag = "Statistics",
    params(
        ("item_id" = String, Path, description = "`slack1` (by region) or `slack2` (by alarm)"),
        MonthParams
    ),
    responses(
        (status = 200, description = "Pivot rows: grouping key, d01..d31, total_count"),
        (status = 400, description = "Unknown statistics identifier", body = crate::api::ApiError),
        (status = 500, description = "Database error", body = crate::api::ApiError)
    )
)]
async fn daily_statistics(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Query(params): Query<MonthParams>,
) -> Response {
    let Some(group) = GroupField::from_item_id(&item_id) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            &trace_id,
            "bad_request",
            &format!("Unknown statistics item id '{item_id}', expected slack1 or slack2"),
        );
    };
    let month = params
        .month
        .unwrap_or_else(|| DEFAULT_MONTH.to_string());

    match state.store.daily_statistics(group, &month).await {
        Ok(rows) => {
            let items: Vec<Value> = rows.iter().map(|r| pivot_row_json(group, r)).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => {
            tracing::error!(
                trace_id = %trace_id,
                item_id = %item_id,
                month = %month,
                error = %e,
                "Failed to query daily statistics"
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

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct AlarmWindowParams {
    /// Inclusive window start timestamp
    start: String,
    /// Inclusive window end timestamp
    end: String,
}

/// Windowed alarm count, keyed the way the Slack export names its columns.
#[derive(Serialize, ToSchema)]
struct AlarmStatisticsResponse {
    #[serde(rename = "Alarm")]
    alarm: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "NodeName")]
    node_name: Option<String>,
    cnt: i64,
}

/// Firing-alarm counts per (alarm, region, node) within a time window,
/// ordered by count descending.
#[utoipa::path(
    get,
    path = "/api/slack/alarms",
    tag = "Statistics",
    params(AlarmWindowParams),
    responses(
        (status = 200, description = "Windowed alarm counts", body = Vec<AlarmStatisticsResponse>),
        (status = 500, description = "Database error", body = crate::api::ApiError)
    )
)]
async fn alarm_statistics(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Query(params): Query<AlarmWindowParams>,
) -> Response {
    match state
        .store
        .alarm_statistics(&params.start, &params.end)
        .await
    {
        Ok(rows) => {
            let items: Vec<AlarmStatisticsResponse> = rows
                .into_iter()
                .map(|r| AlarmStatisticsResponse {
                    alarm: r.alarm,
                    region: r.region,
                    node_name: r.node_name,
                    cnt: r.count,
                })
                .collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => {
            tracing::error!(
                trace_id = %trace_id,
                start = %params.start,
                end = %params.end,
                error = %e,
                "Failed to query alarm statistics"
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

pub fn statistics_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(daily_statistics))
        .routes(routes!(alarm_statistics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdash_storage::DAYS_IN_PIVOT;

    #[test]
    fn pivot_row_carries_group_column_and_all_days() {
        let mut days = [0i64; DAYS_IN_PIVOT];
        days[0] = 5;
        let row = DailyStatisticsRow {
            key: "Seoul".to_string(),
            days,
            total_count: 5,
        };
        let json = pivot_row_json(GroupField::RegionName, &row);
        let obj = json.as_object().unwrap();

        // grouping key + 31 day columns + total
        assert_eq!(obj.len(), DAYS_IN_PIVOT + 2);
        assert_eq!(obj["RegionName"], "Seoul");
        assert_eq!(obj["d01"], 5);
        assert_eq!(obj["d02"], 0);
        assert_eq!(obj["d31"], 0);
        assert_eq!(obj["total_count"], 5);
    }

    #[test]
    fn pivot_row_key_column_follows_grouping() {
        let row = DailyStatisticsRow {
            key: "HighCpu".to_string(),
            days: [0; DAYS_IN_PIVOT],
            total_count: 0,
        };
        let json = pivot_row_json(GroupField::AlarmName, &row);
        assert!(json.get("AlarmName").is_some());
        assert!(json.get("RegionName").is_none());
    }
}
