//! API Kit - reusable scaffolding for CRUD REST APIs
//!
//! Wires the pieces every CRUD service repeats into one `Startup`:
//! a SeaORM connection and unit of work, object mapping profiles,
//! mediator-based command dispatch, JWT bearer authentication and
//! an OpenAPI document served through Swagger UI.
//!
//! # Layers
//!
//! - **config**: Environment settings and constants
//! - **errors**: Centralized error handling
//! - **logging**: Tracing subscriber setup
//! - **mapping**: Object-to-object mapping profiles
//! - **mediator**: Request/handler dispatch
//! - **auth**: JWT issuing, verification and middleware
//! - **infra**: Database, repositories and unit of work
//! - **api**: Generic controllers, extractors, OpenAPI, middleware
//! - **startup**: The bootstrap that assembles everything into a router
//! - **types**: Shared types (pagination, responses)
//!
//! # Usage
//!
//! ```rust,ignore
//! struct MyStartup;
//!
//! impl Startup for MyStartup {
//!     fn controllers(&self, services: &Services) -> Vec<Controller> {
//!         vec![RecordController::<ProductResource>::new(
//!             Arc::new(RecordStore::new(services.connection())),
//!             services.mapper(),
//!             services.mediator(),
//!         )
//!         .into_controller("/api/product", "Product")]
//!     }
//! }
//!
//! Host::new(MyStartup, Config::from_env()?).serve(db).await?;
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod infra;
pub mod logging;
pub mod mapping;
pub mod mediator;
pub mod startup;
pub mod types;

// Re-export commonly used types at crate root
pub use api::{ApiInfo, Controller, QueryController, RecordController, RecordResource};
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use mapping::{Mapper, MapperConfiguration, Profile};
pub use mediator::{Mediator, MediatorBuilder, Request, RequestHandler};
pub use startup::{Host, Services, Startup, StartupOptions};
