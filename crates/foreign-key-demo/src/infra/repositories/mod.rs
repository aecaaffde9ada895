//! Repositories for the demo tables.
//!
//! Plain tables reuse the generic `RecordStore`; `many` has its own
//! repository so every read carries the referenced `one` row.

pub mod entities;
mod many_repository;

use api_kit::infra::RecordStore;

pub use many_repository::{ManyRepository, ManyWithOne};

pub type OneRepository = RecordStore<entities::one::Entity>;
pub type ToOneRepository = RecordStore<entities::to_one::Entity>;
pub type CategoryRepository = RecordStore<entities::category::Entity>;
