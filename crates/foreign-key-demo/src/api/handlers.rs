//! Custom command handlers.

use std::sync::Arc;

use api_kit::api::Create;
use api_kit::infra::{ReadRepository, UnitOfWork, WriteRepository};
use api_kit::{AppError, AppResult, RecordResource, RequestHandler};
use async_trait::async_trait;

use super::resources::ManyResource;
use crate::infra::repositories::entities::{many, one};

/// Creates a Many only when the referenced One exists.
///
/// Replaces the default create handler so a dangling `one_id` is a
/// validation error instead of a foreign-key violation.
pub struct CreateManyHandler<U> {
    uow: Arc<U>,
}

impl<U> CreateManyHandler<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> RequestHandler<Create<ManyResource>> for CreateManyHandler<U> {
    async fn handle(&self, request: Create<ManyResource>) -> AppResult<many::Model> {
        let payload = request.0;
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let one_id = payload.one_id;
                    if ctx.records::<one::Entity>().find_by_id(one_id).await?.is_none() {
                        tracing::debug!("Rejected Many for unknown One {}", one_id);
                        return Err(AppError::validation(format!(
                            "OneID {} does not reference an existing One",
                            one_id
                        )));
                    }

                    ctx.records::<many::Entity>()
                        .insert(ManyResource::new_record(payload))
                        .await
                })
            })
            .await
    }
}
