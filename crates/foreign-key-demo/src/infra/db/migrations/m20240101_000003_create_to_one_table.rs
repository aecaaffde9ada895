//! Migration: Create the to_one table, one row per one at most.

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
                    .table(ToOne::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ToOne::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ToOne::OneId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(ToOne::ToOneProperty01).string_len(200).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_to_one_one_id")
                            .from(ToOne::Table, ToOne::OneId)
                            .to(One::Table, One::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ToOne::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ToOne {
    Table,
    Id,
    OneId,
    #[iden = "to_one_property01"]
    ToOneProperty01,
}
