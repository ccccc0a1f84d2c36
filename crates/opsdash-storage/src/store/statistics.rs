use std::fmt::Write;

use anyhow::Result;
use sea_orm::{ConnectionTrait, DbBackend, Statement, Value};
use serde::Serialize;

use crate::store::ReportStore;

/// Number of day columns in the pivot result. Fixed at 31 regardless of the
/// actual month length; days past the end of a month always sum to zero.
pub const DAYS_IN_PIVOT: usize = 31;

/// Sentinel status marking an alarm as currently active.
pub const FIRING_STATUS: &str = "Firing";

/// Dimension the daily pivot groups by.
///
/// A closed enum because the column name is interpolated into the statement
/// text; free-form field names must never reach the query builder. Values
/// (month, window bounds) are always bound parameters instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    RegionName,
    AlarmName,
}

impl GroupField {
    /// Maps a statistics route identifier to its grouping dimension.
    /// Unknown identifiers are a client error, reported by the caller.
    pub fn from_item_id(item_id: &str) -> Option<Self> {
        match item_id {
            "slack1" => Some(GroupField::RegionName),
            "slack2" => Some(GroupField::AlarmName),
            _ => None,
        }
    }

    pub fn column_name(self) -> &'static str {
        match self {
            GroupField::RegionName => "RegionName",
            GroupField::AlarmName => "AlarmName",
        }
    }
}

/// One pivot row: grouping key plus the summed count for each day of the
/// month and the month total.
#[derive(Debug, Clone, Serialize)]
pub struct DailyStatisticsRow {
    pub key: String,
    pub days: [i64; DAYS_IN_PIVOT],
    pub total_count: i64,
}

/// Alarm occurrences for one (alarm, region, node) triple inside a window.
#[derive(Debug, Clone, Serialize)]
pub struct AlarmStatisticsRow {
    pub alarm: String,
    pub region: String,
    pub node_name: Option<String>,
    pub count: i64,
}

fn placeholder(backend: DbBackend, index: usize) -> String {
    match backend {
        DbBackend::Postgres => format!("${index}"),
        _ => "?".to_string(),
    }
}

/// Builds the day-pivoted monthly aggregate over `"Statistics"`: one
/// `d01..d31` column per day plus `total_count`, grouped and ordered by the
/// chosen dimension. The single bound value is the `"AlarmMonth"` filter.
pub fn daily_statistics_sql(backend: DbBackend, group: GroupField) -> String {
    let mut day_columns = String::new();
    for day in 1..=DAYS_IN_PIVOT {
        let _ = writeln!(
            day_columns,
            "    COALESCE(SUM(CASE WHEN \"Day\" = {day} THEN \"Count\" END), 0) AS d{day:02},"
        );
    }
    let column = group.column_name();
    let month = placeholder(backend, 1);
    format!(
        "SELECT DISTINCT\n    \"{column}\",\n{day_columns}    SUM(\"Count\") AS total_count\n\
         FROM \"Statistics\"\n\
         WHERE \"AlarmMonth\" = {month}\n\
         GROUP BY \"{column}\"\n\
         ORDER BY \"{column}\""
    )
}

/// Counts firing alarm messages with a known node inside an inclusive
/// `[start, end]` window, grouped by (alarm, region, node) and ordered by
/// count descending. Bound values: start, end, firing sentinel.
pub fn alarm_statistics_sql(backend: DbBackend) -> String {
    format!(
        "SELECT \"Alarm\", \"Region\", \"NodeName\", COUNT(*) AS cnt\n\
         FROM \"SlackMessage\"\n\
         WHERE \"NodeName\" IS NOT NULL\n\
           AND \"DateTime\" >= {start}\n\
           AND \"DateTime\" <= {end}\n\
           AND \"Status\" = {status}\n\
         GROUP BY \"Alarm\", \"Region\", \"NodeName\"\n\
         ORDER BY cnt DESC",
        start = placeholder(backend, 1),
        end = placeholder(backend, 2),
        status = placeholder(backend, 3),
    )
}

impl ReportStore {
    /// Runs the monthly pivot for the given grouping dimension. Every row
    /// carries exactly [`DAYS_IN_PIVOT`] day counts; rows come back ordered
    /// ascending by grouping key.
    pub async fn daily_statistics(
        &self,
        group: GroupField,
        month: &str,
    ) -> Result<Vec<DailyStatisticsRow>> {
        let backend = self.db().get_database_backend();
        let sql = daily_statistics_sql(backend, group);
        let rows = self
            .db()
            .query_all(Statement::from_sql_and_values(
                backend,
                sql,
                [Value::from(month)],
            ))
            .await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let key: String = row.try_get("", group.column_name())?;
            let mut days = [0i64; DAYS_IN_PIVOT];
            for (i, slot) in days.iter_mut().enumerate() {
                *slot = row.try_get("", &format!("d{:02}", i + 1))?;
            }
            let total_count: i64 = row.try_get("", "total_count")?;
            result.push(DailyStatisticsRow {
                key,
                days,
                total_count,
            });
        }
        Ok(result)
    }

    /// Runs the windowed alarm-count aggregate over `"SlackMessage"`.
    pub async fn alarm_statistics(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<AlarmStatisticsRow>> {
        let backend = self.db().get_database_backend();
        let sql = alarm_statistics_sql(backend);
        let rows = self
            .db()
            .query_all(Statement::from_sql_and_values(
                backend,
                sql,
                [
                    Value::from(start),
                    Value::from(end),
                    Value::from(FIRING_STATUS),
                ],
            ))
            .await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            result.push(AlarmStatisticsRow {
                alarm: row.try_get("", "Alarm")?,
                region: row.try_get("", "Region")?,
                node_name: row.try_get("", "NodeName")?,
                count: row.try_get("", "cnt")?,
            });
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_item_id_is_a_closed_mapping() {
        assert_eq!(
            GroupField::from_item_id("slack1"),
            Some(GroupField::RegionName)
        );
        assert_eq!(
            GroupField::from_item_id("slack2"),
            Some(GroupField::AlarmName)
        );
        assert_eq!(GroupField::from_item_id("slack3"), None);
        assert_eq!(GroupField::from_item_id(""), None);
    }

    #[test]
    fn pivot_sql_emits_all_day_columns() {
        let sql = daily_statistics_sql(DbBackend::Sqlite, GroupField::RegionName);
        for day in 1..=DAYS_IN_PIVOT {
            assert!(sql.contains(&format!("AS d{day:02}")), "missing d{day:02}");
        }
        assert!(sql.contains("AS total_count"));
        assert!(sql.contains("GROUP BY \"RegionName\""));
        assert!(sql.contains("ORDER BY \"RegionName\""));
        // the month value is bound, never interpolated
        assert!(sql.contains("\"AlarmMonth\" = ?"));
    }

    #[test]
    fn pivot_sql_uses_numbered_placeholders_on_postgres() {
        let sql = daily_statistics_sql(DbBackend::Postgres, GroupField::AlarmName);
        assert!(sql.contains("\"AlarmMonth\" = $1"));
        assert!(sql.contains("GROUP BY \"AlarmName\""));
    }

    #[test]
    fn alarm_sql_filters_node_and_status() {
        let sql = alarm_statistics_sql(DbBackend::Sqlite);
        assert!(sql.contains("\"NodeName\" IS NOT NULL"));
        assert!(sql.contains("ORDER BY cnt DESC"));
    }
}
