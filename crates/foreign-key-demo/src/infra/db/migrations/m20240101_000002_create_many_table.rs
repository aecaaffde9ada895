//! Migration: Create the many table referencing one.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_one_table::One;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Many::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Many::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Many::OneId).uuid().not_null())
                    .col(ColumnDef::new(Many::ManyProperty01).string_len(200).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_many_one_id")
                            .from(Many::Table, Many::OneId)
                            .to(One::Table, One::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_many_one_id")
                    .table(Many::Table)
                    .col(Many::OneId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Many::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Many {
    Table,
    Id,
    OneId,
    #[iden = "many_property01"]
    ManyProperty01,
}
