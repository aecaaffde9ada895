//! Infrastructure layer - Database schema and repositories

pub mod db;
pub mod repositories;

pub use db::migrations::Migrator;
pub use repositories::{
    CategoryRepository, ManyRepository, ManyWithOne, OneRepository, ToOneRepository,
};
