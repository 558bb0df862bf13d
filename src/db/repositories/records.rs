use async_trait::async_trait;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder,
};
use serde::Serialize;

use crate::entities::{location, meetup, movie, restaurant, trail, weather};

/// Binds one cached resource table to the shape the cache pipeline needs:
/// keyed lookup in insertion order, append-only insert, and wholesale
/// invalidation by key.
///
/// Lookups order by `id` ascending so "first row" is always the oldest row of
/// the last refetch batch. Inserts never deduplicate or upsert; invalidation
/// is a plain delete of every row for the key and is a no-op when none match.
#[async_trait]
pub trait ResourceTable: Send + Sync + 'static {
    type Model: Clone + Serialize + Send + Sync;

    async fn find_by_key(conn: &DatabaseConnection, key: &str) -> Result<Vec<Self::Model>, DbErr>;

    async fn append(conn: &DatabaseConnection, row: Self::Model) -> Result<(), DbErr>;

    async fn delete_by_key(conn: &DatabaseConnection, key: &str) -> Result<u64, DbErr>;

    /// Epoch-millisecond stamp shared by every row of a refetch batch.
    fn created_at(row: &Self::Model) -> i64;
}

#[async_trait]
impl ResourceTable for location::Entity {
    type Model = location::Model;

    async fn find_by_key(conn: &DatabaseConnection, key: &str) -> Result<Vec<Self::Model>, DbErr> {
        Self::find()
            .filter(location::Column::SearchQuery.eq(key))
            .order_by_asc(location::Column::Id)
            .all(conn)
            .await
    }

    async fn append(conn: &DatabaseConnection, row: Self::Model) -> Result<(), DbErr> {
        let mut active = row.into_active_model();
        active.id = ActiveValue::NotSet;
        Self::insert(active).exec(conn).await.map(|_| ())
    }

    async fn delete_by_key(conn: &DatabaseConnection, key: &str) -> Result<u64, DbErr> {
        Self::delete_many()
            .filter(location::Column::SearchQuery.eq(key))
            .exec(conn)
            .await
            .map(|deleted| deleted.rows_affected)
    }

    fn created_at(row: &Self::Model) -> i64 {
        row.created_at
    }
}

#[async_trait]
impl ResourceTable for weather::Entity {
    type Model = weather::Model;

    async fn find_by_key(conn: &DatabaseConnection, key: &str) -> Result<Vec<Self::Model>, DbErr> {
        Self::find()
            .filter(weather::Column::SearchQuery.eq(key))
            .order_by_asc(weather::Column::Id)
            .all(conn)
            .await
    }

    async fn append(conn: &DatabaseConnection, row: Self::Model) -> Result<(), DbErr> {
        let mut active = row.into_active_model();
        active.id = ActiveValue::NotSet;
        Self::insert(active).exec(conn).await.map(|_| ())
    }

    async fn delete_by_key(conn: &DatabaseConnection, key: &str) -> Result<u64, DbErr> {
        Self::delete_many()
            .filter(weather::Column::SearchQuery.eq(key))
            .exec(conn)
            .await
            .map(|deleted| deleted.rows_affected)
    }

    fn created_at(row: &Self::Model) -> i64 {
        row.created_at
    }
}

#[async_trait]
impl ResourceTable for restaurant::Entity {
    type Model = restaurant::Model;

    async fn find_by_key(conn: &DatabaseConnection, key: &str) -> Result<Vec<Self::Model>, DbErr> {
        Self::find()
            .filter(restaurant::Column::SearchQuery.eq(key))
            .order_by_asc(restaurant::Column::Id)
            .all(conn)
            .await
    }

    async fn append(conn: &DatabaseConnection, row: Self::Model) -> Result<(), DbErr> {
        let mut active = row.into_active_model();
        active.id = ActiveValue::NotSet;
        Self::insert(active).exec(conn).await.map(|_| ())
    }

    async fn delete_by_key(conn: &DatabaseConnection, key: &str) -> Result<u64, DbErr> {
        Self::delete_many()
            .filter(restaurant::Column::SearchQuery.eq(key))
            .exec(conn)
            .await
            .map(|deleted| deleted.rows_affected)
    }

    fn created_at(row: &Self::Model) -> i64 {
        row.created_at
    }
}

#[async_trait]
impl ResourceTable for movie::Entity {
    type Model = movie::Model;

    async fn find_by_key(conn: &DatabaseConnection, key: &str) -> Result<Vec<Self::Model>, DbErr> {
        Self::find()
            .filter(movie::Column::SearchQuery.eq(key))
            .order_by_asc(movie::Column::Id)
            .all(conn)
            .await
    }

    async fn append(conn: &DatabaseConnection, row: Self::Model) -> Result<(), DbErr> {
        let mut active = row.into_active_model();
        active.id = ActiveValue::NotSet;
        Self::insert(active).exec(conn).await.map(|_| ())
    }

    async fn delete_by_key(conn: &DatabaseConnection, key: &str) -> Result<u64, DbErr> {
        Self::delete_many()
            .filter(movie::Column::SearchQuery.eq(key))
            .exec(conn)
            .await
            .map(|deleted| deleted.rows_affected)
    }

    fn created_at(row: &Self::Model) -> i64 {
        row.created_at
    }
}

#[async_trait]
impl ResourceTable for meetup::Entity {
    type Model = meetup::Model;

    async fn find_by_key(conn: &DatabaseConnection, key: &str) -> Result<Vec<Self::Model>, DbErr> {
        Self::find()
            .filter(meetup::Column::SearchQuery.eq(key))
            .order_by_asc(meetup::Column::Id)
            .all(conn)
            .await
    }

    async fn append(conn: &DatabaseConnection, row: Self::Model) -> Result<(), DbErr> {
        let mut active = row.into_active_model();
        active.id = ActiveValue::NotSet;
        Self::insert(active).exec(conn).await.map(|_| ())
    }

    async fn delete_by_key(conn: &DatabaseConnection, key: &str) -> Result<u64, DbErr> {
        Self::delete_many()
            .filter(meetup::Column::SearchQuery.eq(key))
            .exec(conn)
            .await
            .map(|deleted| deleted.rows_affected)
    }

    fn created_at(row: &Self::Model) -> i64 {
        row.created_at
    }
}

#[async_trait]
impl ResourceTable for trail::Entity {
    type Model = trail::Model;

    async fn find_by_key(conn: &DatabaseConnection, key: &str) -> Result<Vec<Self::Model>, DbErr> {
        Self::find()
            .filter(trail::Column::SearchQuery.eq(key))
            .order_by_asc(trail::Column::Id)
            .all(conn)
            .await
    }

    async fn append(conn: &DatabaseConnection, row: Self::Model) -> Result<(), DbErr> {
        let mut active = row.into_active_model();
        active.id = ActiveValue::NotSet;
        Self::insert(active).exec(conn).await.map(|_| ())
    }

    async fn delete_by_key(conn: &DatabaseConnection, key: &str) -> Result<u64, DbErr> {
        Self::delete_many()
            .filter(trail::Column::SearchQuery.eq(key))
            .exec(conn)
            .await
            .map(|deleted| deleted.rows_affected)
    }

    fn created_at(row: &Self::Model) -> i64 {
        row.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;
    use crate::entities::weather;

    fn forecast_row(key: &str, stamp: i64, summary: &str) -> weather::Model {
        weather::Model {
            id: 0,
            search_query: key.to_string(),
            forecast: Some(summary.to_string()),
            time: Some("Tue Aug 04 2026".to_string()),
            created_at: stamp,
        }
    }

    #[tokio::test]
    async fn find_returns_rows_in_insertion_order() {
        let store = Store::new("sqlite::memory:").await.unwrap();

        for summary in ["clear", "rain", "fog"] {
            store
                .insert_record::<weather::Entity>(forecast_row("portland, or", 1, summary))
                .await
                .unwrap();
        }

        let rows = store
            .find_records::<weather::Entity>("portland, or")
            .await
            .unwrap();
        let summaries: Vec<_> = rows.iter().filter_map(|r| r.forecast.as_deref()).collect();
        assert_eq!(summaries, ["clear", "rain", "fog"]);
    }

    #[tokio::test]
    async fn find_is_scoped_to_the_exact_key() {
        let store = Store::new("sqlite::memory:").await.unwrap();

        store
            .insert_record::<weather::Entity>(forecast_row("boise, id", 1, "sun"))
            .await
            .unwrap();

        let rows = store
            .find_records::<weather::Entity>("boise")
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_every_row_for_the_key() {
        let store = Store::new("sqlite::memory:").await.unwrap();

        store
            .insert_record::<weather::Entity>(forecast_row("reno, nv", 1, "sun"))
            .await
            .unwrap();
        store
            .insert_record::<weather::Entity>(forecast_row("reno, nv", 1, "wind"))
            .await
            .unwrap();
        store
            .insert_record::<weather::Entity>(forecast_row("elko, nv", 1, "snow"))
            .await
            .unwrap();

        let deleted = store
            .delete_records::<weather::Entity>("reno, nv")
            .await
            .unwrap();
        assert_eq!(deleted, 2);

        assert!(
            store
                .find_records::<weather::Entity>("reno, nv")
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            store
                .find_records::<weather::Entity>("elko, nv")
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn deleting_an_absent_key_is_a_noop() {
        let store = Store::new("sqlite::memory:").await.unwrap();

        let deleted = store
            .delete_records::<weather::Entity>("nowhere")
            .await
            .unwrap();
        assert_eq!(deleted, 0);
    }
}
