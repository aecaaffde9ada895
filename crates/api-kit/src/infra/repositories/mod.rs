//! Repository layer - Data access abstraction
//!
//! Generic repositories over SeaORM entities. Applications alias
//! [`RecordStore`] for plain tables and implement [`QueryRepository`]
//! themselves when a read needs more than one table.

mod base;
mod query;
mod record_store;

pub use base::{
    CrudRepository, KeyOf, ReadRepository, RecordEntity, Repository, WriteRepository,
};
pub use query::QueryRepository;
pub use record_store::{RecordStore, TxRecordStore};
