use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table("product")
                    .if_not_exists()
                    .col(pk_auto("id"))
                    .col(string("external_id").unique_key().not_null())
                    .col(string("name").not_null())
                    .col(string("url").not_null())
                    .col(json("price").not_null())
                    .col(timestamp_with_time_zone("last_checked_at").not_null())
                    .col(timestamp_with_time_zone("created_at").default(Expr::current_timestamp()).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table("product").to_owned())
            .await
    }
}
