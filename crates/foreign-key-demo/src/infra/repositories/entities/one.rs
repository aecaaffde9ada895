//! `one` table: parent side of both relationships.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "one")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub one_property01: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::many::Entity")]
    Many,
    #[sea_orm(has_one = "super::to_one::Entity")]
    ToOne,
}

impl Related<super::many::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Many.def()
    }
}

impl Related<super::to_one::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ToOne.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
