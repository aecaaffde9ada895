//! API layer - Generic controllers and HTTP plumbing
//!
//! - Query and record controllers generic over a repository/resource
//! - Mediator commands backing the write routes
//! - Custom extractors
//! - OpenAPI descriptions of the generic routes
//! - Error-handling middleware and the health endpoint

pub mod commands;
pub mod controller;
pub mod error_handling;
pub mod extractors;
pub mod health;
pub mod openapi;

pub use commands::{register_record_handlers, Create, Delete, RecordCommandHandler, Update};
pub use controller::{
    ActiveModelOf, Controller, ModelOf, QueryController, RecordController, RecordResource,
};
pub use openapi::{ApiInfo, ControllerDocs};
