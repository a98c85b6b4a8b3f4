use sea_orm::entity::prelude::*;

/// One channel following one community.
///
/// Uniqueness of (`channel_id`, `community_name`) is not enforced by the table;
/// the in-memory subscription index keeps it logically unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subscription")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub channel_id: i64,
    #[sea_orm(column_type = "Text")]
    pub community_name: String,
    pub role_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
