//! Pass-through repositories over a connection or a transaction.

use std::marker::PhantomData;
use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction, IntoActiveModel};

use super::base::{ReadRepository, RecordEntity, Repository, WriteRepository};

/// Generic repository over a pooled connection.
pub struct RecordStore<E> {
    db: Arc<DatabaseConnection>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> RecordStore<E> {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

impl<E> Clone for RecordStore<E> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.db))
    }
}

impl<E: RecordEntity> Repository<E> for RecordStore<E> {
    type Connection = DatabaseConnection;

    fn db(&self) -> &DatabaseConnection {
        self.db.as_ref()
    }
}

impl<E: RecordEntity> ReadRepository<E> for RecordStore<E> {}

impl<E> WriteRepository<E> for RecordStore<E>
where
    E: RecordEntity,
    E::Model: IntoActiveModel<E::ActiveModel>,
{
}

/// Transaction-aware repository.
///
/// Borrows the transaction so every operation is part of it and the
/// transaction outlives the repository.
pub struct TxRecordStore<'a, E> {
    txn: &'a DatabaseTransaction,
    _entity: PhantomData<fn() -> E>,
}

impl<'a, E> TxRecordStore<'a, E> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self {
            txn,
            _entity: PhantomData,
        }
    }
}

impl<E: RecordEntity> Repository<E> for TxRecordStore<'_, E> {
    type Connection = DatabaseTransaction;

    fn db(&self) -> &DatabaseTransaction {
        self.txn
    }
}

impl<E: RecordEntity> ReadRepository<E> for TxRecordStore<'_, E> {}

impl<E> WriteRepository<E> for TxRecordStore<'_, E>
where
    E: RecordEntity,
    E::Model: IntoActiveModel<E::ActiveModel>,
{
}
