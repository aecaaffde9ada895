//! Request payloads accepted by the record controllers.

use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOneCommand {
    #[validate(length(min = 1, max = 200, message = "OneProperty01 must be 1-200 characters"))]
    #[schema(example = "first one")]
    pub one_property01: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOneCommand {
    #[validate(length(min = 1, max = 200, message = "OneProperty01 must be 1-200 characters"))]
    pub one_property01: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateManyCommand {
    /// Id of an existing One
    pub one_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "ManyProperty01 must be 1-200 characters"))]
    #[schema(example = "first many")]
    pub many_property01: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateManyCommand {
    pub one_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "ManyProperty01 must be 1-200 characters"))]
    pub many_property01: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryCommand {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Books")]
    pub name: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryCommand {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}
