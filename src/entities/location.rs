use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One geocoded place. `search_query` is the raw text the user searched for;
/// `formatted_query` is the canonical name the geocoder resolved it to.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_serializing)]
    pub id: i32,
    pub search_query: String,
    pub formatted_query: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
