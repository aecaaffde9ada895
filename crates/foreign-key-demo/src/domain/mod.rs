//! Domain layer - Request payloads, view models and the mapping profile

pub mod commands;
pub mod mapping;
pub mod view_models;

pub use commands::*;
pub use mapping::MappingProfile;
pub use view_models::*;
