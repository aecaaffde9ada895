//! Many repository - reads `many` rows joined with their `one`.

use std::sync::Arc;

use api_kit::infra::QueryRepository;
use api_kit::types::PaginationParams;
use api_kit::AppResult;
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};
use uuid::Uuid;

use super::entities::{many, one};

/// A `many` row with the `one` row it references, when loaded.
#[derive(Debug, Clone)]
pub struct ManyWithOne {
    pub many: many::Model,
    pub one: Option<one::Model>,
}

impl From<(many::Model, Option<one::Model>)> for ManyWithOne {
    fn from((many, one): (many::Model, Option<one::Model>)) -> Self {
        Self { many, one }
    }
}

#[derive(Clone)]
pub struct ManyRepository {
    db: Arc<DatabaseConnection>,
}

impl ManyRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl QueryRepository for ManyRepository {
    type Key = Uuid;
    type Item = ManyWithOne;

    async fn get(&self, id: Uuid) -> AppResult<Option<ManyWithOne>> {
        let row = many::Entity::find_by_id(id)
            .find_also_related(one::Entity)
            .one(self.db.as_ref())
            .await?;
        Ok(row.map(ManyWithOne::from))
    }

    async fn page(&self, params: &PaginationParams) -> AppResult<(Vec<ManyWithOne>, u64)> {
        params.checked_offset()?;
        let paginator = many::Entity::find()
            .find_also_related(one::Entity)
            .order_by_asc(many::Column::Id)
            .paginate(self.db.as_ref(), params.limit());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(params.page_index()).await?;
        Ok((rows.into_iter().map(ManyWithOne::from).collect(), total))
    }
}
