//! Migration: Create the one table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(One::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(One::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(One::OneProperty01).string_len(200).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(One::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum One {
    Table,
    Id,
    #[iden = "one_property01"]
    OneProperty01,
}
