use sea_orm::entity::prelude::*;

/// One alerting event forwarded from Slack. The table keeps the PascalCase
/// column names the ingestion side writes.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "SlackMessage")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "Alarm")]
    pub alarm: String,
    #[sea_orm(column_name = "Region")]
    pub region: String,
    #[sea_orm(column_name = "NodeName")]
    pub node_name: Option<String>,
    #[sea_orm(column_name = "DateTime")]
    pub date_time: DateTime,
    #[sea_orm(column_name = "Status")]
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
