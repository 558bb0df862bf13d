use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityName, Schema};

use crate::entities::{location, meetup, movie, restaurant, trail, weather};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(location::Entity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(weather::Entity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(restaurant::Entity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(movie::Entity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(meetup::Entity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(trail::Entity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Every lookup, insert and invalidation is keyed by search_query.
        for table in [
            location::Entity.table_name(),
            weather::Entity.table_name(),
            restaurant::Entity.table_name(),
            movie::Entity.table_name(),
            meetup::Entity.table_name(),
            trail::Entity.table_name(),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(format!("idx_{table}_search_query"))
                        .table(Alias::new(table))
                        .col(Alias::new("search_query"))
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            trail::Entity.table_name(),
            meetup::Entity.table_name(),
            movie::Entity.table_name(),
            restaurant::Entity.table_name(),
            weather::Entity.table_name(),
            location::Entity.table_name(),
        ] {
            manager
                .drop_table(Table::drop().table(Alias::new(table)).to_owned())
                .await?;
        }

        Ok(())
    }
}
