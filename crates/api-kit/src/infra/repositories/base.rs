//! Base repository traits following Interface Segregation Principle (ISP).
//!
//! These traits provide a foundation for all repositories with
//! common CRUD operations that can be composed as needed.

use std::fmt::Debug;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, Iterable, PaginatorTrait,
    PrimaryKeyToColumn, PrimaryKeyTrait, QueryOrder,
};
use serde::de::DeserializeOwned;

use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

/// Primary key value of an entity.
pub type KeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Entities usable by the generic repositories and controllers.
///
/// Blanket-implemented for every SeaORM entity whose model is shareable
/// across threads and whose key can be read from a URL path.
pub trait RecordEntity:
    EntityTrait<
    Model: Sync + 'static,
    ActiveModel: Send + Sync + 'static,
    PrimaryKey: PrimaryKeyTrait<ValueType: Clone + Debug + Send + Sync + DeserializeOwned + 'static>,
>
{
}

impl<E> RecordEntity for E where
    E: EntityTrait<
        Model: Sync + 'static,
        ActiveModel: Send + Sync + 'static,
        PrimaryKey: PrimaryKeyTrait<
            ValueType: Clone + Debug + Send + Sync + DeserializeOwned + 'static,
        >,
    >
{
}

/// Connection accessor shared by the read and write traits
pub trait Repository<E: RecordEntity>: Send + Sync {
    type Connection: ConnectionTrait + Send + Sync;

    /// Get database connection (or transaction) reference
    fn db(&self) -> &Self::Connection;
}

/// Read operations (Query) - Single Responsibility
#[async_trait]
pub trait ReadRepository<E: RecordEntity>: Repository<E> {
    /// Find entity by primary key
    async fn find_by_id(&self, id: KeyOf<E>) -> AppResult<Option<E::Model>> {
        E::find_by_id(id)
            .one(self.db())
            .await
            .map_err(Into::into)
    }

    /// Find all entities
    async fn find_all(&self) -> AppResult<Vec<E::Model>> {
        E::find().all(self.db()).await.map_err(Into::into)
    }

    /// Find entities with pagination, ordered by primary key
    async fn find_paginated(&self, params: &PaginationParams) -> AppResult<(Vec<E::Model>, u64)> {
        params.checked_offset()?;

        let mut query = E::find();
        for key in E::PrimaryKey::iter() {
            query = query.order_by_asc(key.into_column());
        }

        let paginator = query.paginate(self.db(), params.limit());
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(params.page_index()).await?;
        Ok((data, total))
    }

    /// Count all entities
    async fn count(&self) -> AppResult<u64> {
        E::find().count(self.db()).await.map_err(Into::into)
    }
}

/// Write operations (Command) - Single Responsibility
#[async_trait]
pub trait WriteRepository<E: RecordEntity>: Repository<E>
where
    E::Model: IntoActiveModel<E::ActiveModel>,
{
    /// Insert new entity
    async fn insert(&self, model: E::ActiveModel) -> AppResult<E::Model> {
        model.insert(self.db()).await.map_err(Into::into)
    }

    /// Update existing entity (only changed columns are written)
    async fn update(&self, model: E::ActiveModel) -> AppResult<E::Model> {
        model.update(self.db()).await.map_err(Into::into)
    }

    /// Delete entity by primary key, `NotFound` when no row matched
    async fn delete_by_id(&self, id: KeyOf<E>) -> AppResult<()> {
        let result = E::delete_by_id(id).exec(self.db()).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

/// Full CRUD repository - Combines all operations
pub trait CrudRepository<E>: ReadRepository<E> + WriteRepository<E>
where
    E: RecordEntity,
    E::Model: IntoActiveModel<E::ActiveModel>,
{
}

// Auto-implement CrudRepository for types implementing all traits
impl<T, E> CrudRepository<E> for T
where
    T: ReadRepository<E> + WriteRepository<E>,
    E: RecordEntity,
    E::Model: IntoActiveModel<E::ActiveModel>,
{
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value};

    use super::*;
    use crate::infra::RecordStore;

    mod note {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = "note")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i32,
            pub body: String,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    fn into_log(db: Arc<DatabaseConnection>) -> Vec<sea_orm::Transaction> {
        match Arc::try_unwrap(db) {
            Ok(db) => db.into_transaction_log(),
            Err(_) => panic!("connection still shared"),
        }
    }

    #[tokio::test]
    async fn test_find_paginated_orders_by_primary_key() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[BTreeMap::from([("num_items", Value::BigInt(Some(1)))])]])
                .append_query_results([vec![note::Model {
                    id: 4,
                    body: "first".to_string(),
                }]])
                .into_connection(),
        );
        let store = RecordStore::<note::Entity>::new(Arc::clone(&db));

        let (rows, total) = store
            .find_paginated(&PaginationParams::new(2, 5))
            .await
            .unwrap();
        drop(store);

        assert_eq!(total, 1);
        assert_eq!(rows.len(), 1);

        let log = into_log(db);
        let page_sql = &log.last().unwrap().statements()[0].sql;
        assert!(page_sql.contains(r#"ORDER BY "note"."id" ASC"#), "{}", page_sql);
        assert!(page_sql.contains("LIMIT"), "{}", page_sql);
    }

    #[tokio::test]
    async fn test_find_paginated_rejects_overflowing_page() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let store = RecordStore::<note::Entity>::new(Arc::clone(&db));

        let result = store
            .find_paginated(&PaginationParams::new(u64::MAX, 100))
            .await;
        drop(store);

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(into_log(db).is_empty());
    }

    #[tokio::test]
    async fn test_delete_without_match_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([sea_orm::MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );
        let store = RecordStore::<note::Entity>::new(db);

        let result = store.delete_by_id(9).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
