//! Write commands sent by [`RecordController`](super::RecordController).

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::IntoActiveModel;

use super::controller::{ActiveModelOf, ModelOf, RecordResource};
use crate::errors::{AppResult, OptionExt};
use crate::infra::{KeyOf, ReadRepository, UnitOfWork, WriteRepository};
use crate::mediator::{MediatorBuilder, Request, RequestHandler};

/// Insert a new row built from the create payload.
pub struct Create<R: RecordResource>(pub R::Create);

/// Apply the update payload to the row with key `id`.
pub struct Update<R: RecordResource> {
    pub id: KeyOf<R::Entity>,
    pub payload: R::Update,
}

/// Delete the row with key `id`.
pub struct Delete<R: RecordResource> {
    pub id: KeyOf<R::Entity>,
}

impl<R: RecordResource> Request for Create<R> {
    type Response = ModelOf<R::Entity>;
}

impl<R: RecordResource> Request for Update<R> {
    type Response = ModelOf<R::Entity>;
}

impl<R: RecordResource> Request for Delete<R> {
    type Response = ();
}

/// Default handler for the record commands.
///
/// Each command runs in its own unit-of-work transaction.
pub struct RecordCommandHandler<R, U> {
    uow: Arc<U>,
    _resource: PhantomData<fn() -> R>,
}

impl<R, U> RecordCommandHandler<R, U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self {
            uow,
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<R, U> RequestHandler<Create<R>> for RecordCommandHandler<R, U>
where
    R: RecordResource,
    U: UnitOfWork,
    ModelOf<R::Entity>: IntoActiveModel<ActiveModelOf<R::Entity>>,
{
    async fn handle(&self, request: Create<R>) -> AppResult<ModelOf<R::Entity>> {
        let record = R::new_record(request.0);
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move { ctx.records::<R::Entity>().insert(record).await })
            })
            .await
    }
}

#[async_trait]
impl<R, U> RequestHandler<Update<R>> for RecordCommandHandler<R, U>
where
    R: RecordResource,
    U: UnitOfWork,
    ModelOf<R::Entity>: IntoActiveModel<ActiveModelOf<R::Entity>>,
{
    async fn handle(&self, request: Update<R>) -> AppResult<ModelOf<R::Entity>> {
        let Update { id, payload } = request;
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let records = ctx.records::<R::Entity>();
                    let current = records.find_by_id(id).await?.ok_or_not_found()?;
                    let changed = R::apply_update(current.into_active_model(), payload);
                    records.update(changed).await
                })
            })
            .await
    }
}

#[async_trait]
impl<R, U> RequestHandler<Delete<R>> for RecordCommandHandler<R, U>
where
    R: RecordResource,
    U: UnitOfWork,
    ModelOf<R::Entity>: IntoActiveModel<ActiveModelOf<R::Entity>>,
{
    async fn handle(&self, request: Delete<R>) -> AppResult<()> {
        let id = request.id;
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move { ctx.records::<R::Entity>().delete_by_id(id).await })
            })
            .await
    }
}

/// Register [`RecordCommandHandler`] for the commands of `R` that have
/// no handler yet.
///
/// Register custom handlers first; they are kept.
pub fn register_record_handlers<R, U>(builder: &mut MediatorBuilder, uow: Arc<U>)
where
    R: RecordResource,
    U: UnitOfWork,
    ModelOf<R::Entity>: IntoActiveModel<ActiveModelOf<R::Entity>>,
{
    if !builder.contains::<Create<R>>() {
        builder.register::<Create<R>, _>(RecordCommandHandler::<R, U>::new(Arc::clone(&uow)));
    }
    if !builder.contains::<Update<R>>() {
        builder.register::<Update<R>, _>(RecordCommandHandler::<R, U>::new(Arc::clone(&uow)));
    }
    if !builder.contains::<Delete<R>>() {
        builder.register::<Delete<R>, _>(RecordCommandHandler::<R, U>::new(uow));
    }
}
