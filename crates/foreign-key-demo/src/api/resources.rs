//! Record resources: how payloads become rows for each table.

use api_kit::RecordResource;
use sea_orm::Set;
use uuid::Uuid;

use crate::domain::{
    CategoryViewModel, CreateCategoryCommand, CreateManyCommand, CreateOneCommand,
    ManyQueryViewModel, OneViewModel, UpdateCategoryCommand, UpdateManyCommand, UpdateOneCommand,
};
use crate::infra::repositories::entities::{category, many, one};
use crate::infra::{CategoryRepository, ManyRepository, OneRepository};

pub struct OneResource;

impl RecordResource for OneResource {
    type Entity = one::Entity;
    type Repository = OneRepository;
    type View = OneViewModel;
    type Create = CreateOneCommand;
    type Update = UpdateOneCommand;

    fn new_record(payload: CreateOneCommand) -> one::ActiveModel {
        one::ActiveModel {
            id: Set(Uuid::new_v4()),
            one_property01: Set(payload.one_property01),
        }
    }

    fn apply_update(mut record: one::ActiveModel, payload: UpdateOneCommand) -> one::ActiveModel {
        record.one_property01 = Set(payload.one_property01);
        record
    }

    fn key_of(model: &one::Model) -> Uuid {
        model.id
    }
}

pub struct ManyResource;

impl RecordResource for ManyResource {
    type Entity = many::Entity;
    type Repository = ManyRepository;
    type View = ManyQueryViewModel;
    type Create = CreateManyCommand;
    type Update = UpdateManyCommand;

    fn new_record(payload: CreateManyCommand) -> many::ActiveModel {
        many::ActiveModel {
            id: Set(Uuid::new_v4()),
            one_id: Set(payload.one_id),
            many_property01: Set(payload.many_property01),
        }
    }

    fn apply_update(mut record: many::ActiveModel, payload: UpdateManyCommand) -> many::ActiveModel {
        record.one_id = Set(payload.one_id);
        record.many_property01 = Set(payload.many_property01);
        record
    }

    fn key_of(model: &many::Model) -> Uuid {
        model.id
    }
}

pub struct CategoryResource;

impl RecordResource for CategoryResource {
    type Entity = category::Entity;
    type Repository = CategoryRepository;
    type View = CategoryViewModel;
    type Create = CreateCategoryCommand;
    type Update = UpdateCategoryCommand;

    fn new_record(payload: CreateCategoryCommand) -> category::ActiveModel {
        category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(payload.name),
            description: Set(payload.description),
        }
    }

    fn apply_update(
        mut record: category::ActiveModel,
        payload: UpdateCategoryCommand,
    ) -> category::ActiveModel {
        record.name = Set(payload.name);
        record.description = Set(payload.description);
        record
    }

    fn key_of(model: &category::Model) -> Uuid {
        model.id
    }
}
