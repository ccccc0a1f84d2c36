use anyhow::Result;
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder};
use serde::Serialize;

use crate::entities::{sales_data, team_data};
use crate::store::ReportStore;

/// Backing table for a grid-data request, resolved from the navigation-tree
/// node id. A closed enum so every variant carries its table and filter
/// value; there is no string-keyed model lookup at query time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridSource {
    /// Rows from `team_data` where `team_id` matches.
    Team { team_id: String },
    /// Rows from `sales_data` where `team_id` matches.
    Sales { team_id: String },
}

impl GridSource {
    /// `team1`/`team2` read from `team_data`, `team3`/`team4` from
    /// `sales_data`. Unrecognized identifiers deliberately fall back to the
    /// team table (they then match no rows), unlike the statistics route
    /// which rejects unknown identifiers outright.
    pub fn resolve(item_id: &str) -> Self {
        match item_id {
            "team3" | "team4" => GridSource::Sales {
                team_id: item_id.to_string(),
            },
            _ => GridSource::Team {
                team_id: item_id.to_string(),
            },
        }
    }

    pub fn team_id(&self) -> &str {
        match self {
            GridSource::Team { team_id } | GridSource::Sales { team_id } => team_id,
        }
    }
}

/// Team/sales status row (both tables share this shape).
#[derive(Debug, Clone, Serialize)]
pub struct GridRow {
    pub id: i32,
    pub team_id: String,
    pub name: String,
    pub status: Option<String>,
    pub date: Option<String>,
}

impl ReportStore {
    /// Returns all rows of the source table whose `team_id` matches the
    /// requested identifier, ordered by id.
    pub async fn grid_rows(&self, source: &GridSource) -> Result<Vec<GridRow>> {
        match source {
            GridSource::Team { team_id } => {
                let rows = team_data::Entity::find()
                    .filter(team_data::Column::TeamId.eq(team_id.as_str()))
                    .order_by(team_data::Column::Id, Order::Asc)
                    .all(self.db())
                    .await?;
                Ok(rows
                    .into_iter()
                    .map(|m| GridRow {
                        id: m.id,
                        team_id: m.team_id,
                        name: m.name,
                        status: m.status,
                        date: m.date,
                    })
                    .collect())
            }
            GridSource::Sales { team_id } => {
                let rows = sales_data::Entity::find()
                    .filter(sales_data::Column::TeamId.eq(team_id.as_str()))
                    .order_by(sales_data::Column::Id, Order::Asc)
                    .all(self.db())
                    .await?;
                Ok(rows
                    .into_iter()
                    .map(|m| GridRow {
                        id: m.id,
                        team_id: m.team_id,
                        name: m.name,
                        status: m.status,
                        date: m.date,
                    })
                    .collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GridSource;

    #[test]
    fn resolve_maps_known_ids() {
        assert!(matches!(
            GridSource::resolve("team1"),
            GridSource::Team { ref team_id } if team_id == "team1"
        ));
        assert!(matches!(
            GridSource::resolve("team2"),
            GridSource::Team { .. }
        ));
        assert!(matches!(
            GridSource::resolve("team3"),
            GridSource::Sales { ref team_id } if team_id == "team3"
        ));
        assert!(matches!(
            GridSource::resolve("team4"),
            GridSource::Sales { .. }
        ));
    }

    #[test]
    fn resolve_defaults_unknown_ids_to_team_table() {
        let source = GridSource::resolve("dept1");
        assert!(matches!(source, GridSource::Team { .. }));
        assert_eq!(source.team_id(), "dept1");
    }
}
