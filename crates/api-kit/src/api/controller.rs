//! Generic controllers.
//!
//! A `QueryController` exposes the read routes of any [`QueryRepository`];
//! a `RecordController` adds the write routes for a [`RecordResource`],
//! dispatching them through the mediator. Both produce a [`Controller`]
//! the startup mounts and documents.

use std::marker::PhantomData;
use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    routing::get,
    Json, Router,
};
use sea_orm::EntityTrait;
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::commands::{Create, Delete, Update};
use super::extractors::{PathParam, QueryParams, ValidatedJson};
use super::openapi::ControllerDocs;
use crate::errors::{AppResult, OptionExt};
use crate::infra::{KeyOf, QueryRepository, RecordEntity};
use crate::mapping::Mapper;
use crate::mediator::Mediator;
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// SeaORM model of entity `E`.
pub type ModelOf<E> = <E as EntityTrait>::Model;

/// SeaORM active model of entity `E`.
pub type ActiveModelOf<E> = <E as EntityTrait>::ActiveModel;

/// A table exposed through a [`RecordController`].
///
/// Ties the entity to the repository that reads it, the view returned to
/// clients and the payloads accepted on create and update.
pub trait RecordResource: Send + Sync + 'static {
    type Entity: RecordEntity;
    type Repository: QueryRepository<Key = KeyOf<Self::Entity>>;
    type View: Serialize + Send + 'static;
    type Create: DeserializeOwned + Validate + Send + 'static;
    type Update: DeserializeOwned + Validate + Send + 'static;

    /// Build the row to insert from a create payload.
    fn new_record(payload: Self::Create) -> ActiveModelOf<Self::Entity>;

    /// Apply an update payload to a loaded row.
    fn apply_update(
        record: ActiveModelOf<Self::Entity>,
        payload: Self::Update,
    ) -> ActiveModelOf<Self::Entity>;

    /// Primary key of a stored row.
    fn key_of(model: &ModelOf<Self::Entity>) -> KeyOf<Self::Entity>;
}

/// A router mounted by the startup under `path`.
pub struct Controller {
    pub path: String,
    pub router: Router,
    pub anonymous: bool,
    pub docs: Option<ControllerDocs>,
}

impl Controller {
    pub fn new(path: impl Into<String>, router: Router) -> Self {
        Self {
            path: path.into(),
            router,
            anonymous: false,
            docs: None,
        }
    }

    /// Skip bearer authentication for every route of this controller.
    pub fn allow_anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    pub fn with_docs(mut self, docs: ControllerDocs) -> Self {
        self.docs = Some(docs);
        self
    }
}

/// Read-only controller: `GET /` and `GET /:id`.
pub struct QueryController<Q, V> {
    repository: Arc<Q>,
    mapper: Arc<Mapper>,
    _view: PhantomData<fn() -> V>,
}

impl<Q, V> Clone for QueryController<Q, V> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            mapper: Arc::clone(&self.mapper),
            _view: PhantomData,
        }
    }
}

impl<Q, V> QueryController<Q, V>
where
    Q: QueryRepository,
    V: Serialize + Send + 'static,
{
    pub fn new(repository: Arc<Q>, mapper: Arc<Mapper>) -> Self {
        Self {
            repository,
            mapper,
            _view: PhantomData,
        }
    }

    pub fn routes(self) -> Router {
        Router::new()
            .route("/", get(list::<Q, V>))
            .route("/:id", get(find::<Q, V>))
            .with_state(self)
    }

    /// Routes plus their OpenAPI description, ready to mount.
    pub fn into_controller(self, path: impl Into<String>, tag: &str) -> Controller
    where
        V: ToSchema<'static>,
    {
        let mut docs = ControllerDocs::new(tag);
        docs.query_operations::<V>();
        Controller::new(path, self.routes()).with_docs(docs)
    }

    /// Load one item and map it to the view.
    pub async fn view_of(&self, id: Q::Key) -> AppResult<V> {
        let item = self.repository.get(id).await?.ok_or_not_found()?;
        self.mapper.map::<Q::Item, V>(&item)
    }

    pub async fn page(&self, params: &PaginationParams) -> AppResult<Paginated<V>> {
        params.checked_offset()?;
        let (items, total) = self.repository.page(params).await?;
        let data = self.mapper.map_all::<Q::Item, V>(&items)?;
        Ok(Paginated::new(data, params.page.max(1), params.limit(), total))
    }
}

async fn list<Q, V>(
    State(controller): State<QueryController<Q, V>>,
    QueryParams(params): QueryParams<PaginationParams>,
) -> AppResult<Json<Paginated<V>>>
where
    Q: QueryRepository,
    V: Serialize + Send + 'static,
{
    controller.page(&params).await.map(Json)
}

async fn find<Q, V>(
    State(controller): State<QueryController<Q, V>>,
    PathParam(id): PathParam<Q::Key>,
) -> AppResult<Json<V>>
where
    Q: QueryRepository,
    V: Serialize + Send + 'static,
{
    controller.view_of(id).await.map(Json)
}

/// Read and write controller for a [`RecordResource`].
pub struct RecordController<R: RecordResource> {
    query: QueryController<R::Repository, R::View>,
    mediator: Arc<Mediator>,
}

impl<R: RecordResource> Clone for RecordController<R> {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
            mediator: Arc::clone(&self.mediator),
        }
    }
}

impl<R: RecordResource> FromRef<RecordController<R>> for QueryController<R::Repository, R::View> {
    fn from_ref(controller: &RecordController<R>) -> Self {
        controller.query.clone()
    }
}

impl<R: RecordResource> RecordController<R> {
    pub fn new(repository: Arc<R::Repository>, mapper: Arc<Mapper>, mediator: Arc<Mediator>) -> Self {
        Self {
            query: QueryController::new(repository, mapper),
            mediator,
        }
    }

    pub fn routes(self) -> Router {
        Router::new()
            .route(
                "/",
                get(list::<R::Repository, R::View>).post(create::<R>),
            )
            .route(
                "/:id",
                get(find::<R::Repository, R::View>)
                    .put(update::<R>)
                    .delete(remove::<R>),
            )
            .with_state(self)
    }

    /// Routes plus their OpenAPI description, ready to mount.
    pub fn into_controller(self, path: impl Into<String>, tag: &str) -> Controller
    where
        R::View: ToSchema<'static>,
        R::Create: ToSchema<'static>,
        R::Update: ToSchema<'static>,
    {
        let mut docs = ControllerDocs::new(tag);
        docs.query_operations::<R::View>();
        docs.command_operations::<R::View, R::Create, R::Update>();
        Controller::new(path, self.routes()).with_docs(docs)
    }
}

async fn create<R: RecordResource>(
    State(controller): State<RecordController<R>>,
    ValidatedJson(payload): ValidatedJson<R::Create>,
) -> AppResult<Created<R::View>> {
    let model = controller.mediator.send(Create::<R>(payload)).await?;
    let view = controller.query.view_of(R::key_of(&model)).await?;
    Ok(Created(view))
}

async fn update<R: RecordResource>(
    State(controller): State<RecordController<R>>,
    PathParam(id): PathParam<KeyOf<R::Entity>>,
    ValidatedJson(payload): ValidatedJson<R::Update>,
) -> AppResult<Json<R::View>> {
    let model = controller
        .mediator
        .send(Update::<R> { id, payload })
        .await?;
    controller.query.view_of(R::key_of(&model)).await.map(Json)
}

async fn remove<R: RecordResource>(
    State(controller): State<RecordController<R>>,
    PathParam(id): PathParam<KeyOf<R::Entity>>,
) -> AppResult<NoContent> {
    controller.mediator.send(Delete::<R> { id }).await?;
    Ok(NoContent)
}
