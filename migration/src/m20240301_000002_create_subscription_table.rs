use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table("subscription")
                    .if_not_exists()
                    .col(pk_auto("id"))
                    .col(integer("product_id").not_null())
                    .col(text("channel").not_null())
                    .col(string("recipient").not_null())
                    .col(double("target_price").not_null())
                    .col(timestamp_with_time_zone("created_at").default(Expr::current_timestamp()).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_product")
                            .from("subscription", "product_id")
                            .to("product", "id")
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table("subscription").to_owned())
            .await
    }
}
