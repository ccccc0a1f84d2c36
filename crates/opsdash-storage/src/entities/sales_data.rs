use sea_orm::entity::prelude::*;

/// Sales-side status entry; same shape as `team_data` but a separate table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sales_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub team_id: String,
    pub name: String,
    pub status: Option<String>,
    pub date: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
