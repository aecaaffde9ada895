//! API layer - Resources, custom command handlers and controllers

pub mod controllers;
pub mod handlers;
pub mod resources;

pub use controllers::controllers;
pub use handlers::CreateManyHandler;
pub use resources::{CategoryResource, ManyResource, OneResource};
