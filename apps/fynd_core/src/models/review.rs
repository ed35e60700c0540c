use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,

    pub rating: i32,

    #[sea_orm(column_type = "Text")]
    pub review: String,

    #[sea_orm(column_type = "Text")]
    pub ai_response: String,

    #[sea_orm(column_type = "Text")]
    pub ai_summary: String,

    #[sea_orm(column_type = "Text")]
    pub ai_action: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
