//! View models returned to clients.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::infra::repositories::entities::{category, one, to_one};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OneViewModel {
    pub id: Uuid,
    pub one_property01: String,
}

impl From<one::Model> for OneViewModel {
    fn from(model: one::Model) -> Self {
        Self {
            id: model.id,
            one_property01: model.one_property01,
        }
    }
}

/// A Many with its One and a summary line built from both.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ManyQueryViewModel {
    pub many_id: Uuid,
    pub one_id: Uuid,
    pub many_property01: String,
    #[schema(example = "ManyID: .../OneID: .../ManyProperty01: a/OneProperty01: b")]
    pub custom_property: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one: Option<OneViewModel>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ToOneViewModel {
    pub id: Uuid,
    pub one_id: Uuid,
    pub to_one_property01: String,
}

impl From<to_one::Model> for ToOneViewModel {
    fn from(model: to_one::Model) -> Self {
        Self {
            id: model.id,
            one_id: model.one_id,
            to_one_property01: model.to_one_property01,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryViewModel {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<category::Model> for CategoryViewModel {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}
