//! Foreign Key Demo - CRUD API over related tables
//!
//! Exposes `One`, `Many`, `ToOne` and `Category` records through the
//! generic controllers of `api-kit`. `Many` rows reference a `One`; reads
//! of `Many` load that parent and summarize both in `custom_property`.

pub mod api;
pub mod cli;
pub mod commands;
pub mod domain;
pub mod infra;
pub mod startup;

pub use startup::ForeignKeyStartup;
