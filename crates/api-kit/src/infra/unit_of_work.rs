//! Unit of Work pattern implementation.
//!
//! Groups repository operations into one committed transaction:
//! - Centralizes access to repositories
//! - Manages database transactions (begin, commit, rollback)
//! - Ensures consistency across multiple repository operations

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};

use super::repositories::{RecordEntity, RecordStore, TxRecordStore};
use crate::errors::{AppError, AppResult};

/// Future returned by a transactional closure.
pub type TxFuture<'a, T> = BoxFuture<'a, AppResult<T>>;

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not object safe due to generic methods; depend on
/// it through a type parameter.
#[async_trait]
pub trait UnitOfWork: Send + Sync + 'static {
    /// Underlying pooled connection
    fn connection(&self) -> &Arc<DatabaseConnection>;

    /// Repository for entity `E` outside any transaction
    fn records<E: RecordEntity>(&self) -> RecordStore<E>
    where
        Self: Sized,
    {
        RecordStore::new(Arc::clone(self.connection()))
    }

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    /// Uses ReadCommitted isolation level.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;

    /// Execute a closure within a transaction with serializable isolation.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Repository for entity `E` bound to this transaction
    pub fn records<E: RecordEntity>(&self) -> TxRecordStore<'a, E> {
        TxRecordStore::new(self.txn)
    }

    /// Raw transaction, for queries the generic repositories don't cover
    pub fn transaction(&self) -> &'a DatabaseTransaction {
        self.txn
    }
}

/// Concrete implementation of UnitOfWork
#[derive(Clone)]
pub struct Persistence {
    db: Arc<DatabaseConnection>,
}

impl Persistence {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let result = f(TransactionContext::new(&txn)).await;

        match result {
            Ok(value) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn connection(&self) -> &Arc<DatabaseConnection> {
        &self.db
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}

/// Shorthand for running a block inside [`UnitOfWork::transaction`].
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
