//! Infrastructure layer - Database integration
//!
//! This module handles all persistence concerns:
//! - Database connections and migrations
//! - Generic repositories over SeaORM entities
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::Database;
pub use repositories::{
    CrudRepository, KeyOf, QueryRepository, ReadRepository, RecordEntity, RecordStore, Repository,
    TxRecordStore, WriteRepository,
};
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, UnitOfWork};
