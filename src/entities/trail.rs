use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "trails")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_serializing)]
    pub id: i32,
    pub search_query: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub length: Option<f64>,
    pub stars: Option<f64>,
    pub star_votes: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,
    pub trail_url: Option<String>,
    pub conditions: Option<String>,
    pub condition_date: Option<String>,
    pub condition_time: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
