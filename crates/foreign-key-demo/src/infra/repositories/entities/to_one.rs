//! `to_one` table: at most one row per `one` row.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "to_one")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub one_id: Uuid,
    pub to_one_property01: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::one::Entity",
        from = "Column::OneId",
        to = "super::one::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    One,
}

impl Related<super::one::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::One.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
