//! Read side consumed by the generic query controller.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::base::{KeyOf, ReadRepository, RecordEntity};
use super::record_store::RecordStore;
use crate::errors::AppResult;
use crate::types::PaginationParams;

/// What a query controller needs from its repository.
///
/// `Item` is whatever the mapping profile maps from; for a plain
/// table it is the SeaORM model, for a joined read it can be a
/// struct carrying the related rows.
#[async_trait]
pub trait QueryRepository: Send + Sync + 'static {
    type Key: Clone + Debug + Send + Sync + DeserializeOwned + 'static;
    type Item: Send + Sync + 'static;

    async fn get(&self, id: Self::Key) -> AppResult<Option<Self::Item>>;

    async fn page(&self, params: &PaginationParams) -> AppResult<(Vec<Self::Item>, u64)>;
}

#[async_trait]
impl<E: RecordEntity> QueryRepository for RecordStore<E> {
    type Key = KeyOf<E>;
    type Item = E::Model;

    async fn get(&self, id: Self::Key) -> AppResult<Option<Self::Item>> {
        self.find_by_id(id).await
    }

    async fn page(&self, params: &PaginationParams) -> AppResult<(Vec<Self::Item>, u64)> {
        self.find_paginated(params).await
    }
}
