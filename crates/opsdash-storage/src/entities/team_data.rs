use sea_orm::entity::prelude::*;

/// Status entry belonging to a named team. `team_id` is a discriminator
/// matching the navigation-tree node ids, not an enforced foreign key.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "team_data")]
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
