//! Data access for progress samples.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::entity::progress::{ActiveModel, Column, Entity as ProgressEntity, Model};
use crate::models::{
    CrudCollection, Page, Progress, ProgressCreate, ProgressFilter, ProgressPatch, ProgressUpdate,
};

use super::{CrudResult, not_found, write_error};

const ENTITY: &str = "Progress";

impl From<Model> for Progress {
    fn from(model: Model) -> Self {
        Progress {
            id: model.id,
            test_run_id: model.test_run_id,
            test_id: model.test_id,
            name: model.name,
            progress: model.progress,
            timestamp: model.timestamp,
        }
    }
}

impl From<ProgressUpdate> for ActiveModel {
    fn from(update: ProgressUpdate) -> Self {
        let mut model = ActiveModel {
            name: Set(update.name),
            progress: Set(update.progress),
            timestamp: Set(update.timestamp),
            ..Default::default()
        };
        if let Some(test_run_id) = update.test_run_id {
            model.test_run_id = Set(test_run_id);
        }
        if let Some(test_id) = update.test_id {
            model.test_id = Set(Some(test_id));
        }
        model
    }
}

impl From<ProgressPatch> for ActiveModel {
    fn from(patch: ProgressPatch) -> Self {
        let mut model: ActiveModel = Default::default();
        if let Some(test_run_id) = patch.test_run_id {
            model.test_run_id = Set(test_run_id);
        }
        if let Some(test_id) = patch.test_id {
            model.test_id = Set(test_id);
        }
        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(progress) = patch.progress {
            model.progress = Set(progress);
        }
        if let Some(timestamp) = patch.timestamp {
            model.timestamp = Set(timestamp);
        }
        model
    }
}

/// CRUD operations on the `progress` table.
pub struct ProgressCrud {
    db: DatabaseConnection,
}

impl ProgressCrud {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> CrudResult<Progress> {
        ProgressEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Progress::from)
            .ok_or_else(|| not_found(ENTITY, id))
    }

    pub async fn get_all(
        &self,
        filter: &ProgressFilter,
        page: Page,
    ) -> CrudResult<CrudCollection<Progress>> {
        let mut select = ProgressEntity::find();

        if let Some(test_run_id) = filter.test_run_id {
            select = select.filter(Column::TestRunId.eq(test_run_id));
        }

        if let Some(test_id) = filter.test_id {
            select = select.filter(Column::TestId.eq(test_id));
        }

        let txn = self.db.begin().await?;

        let count = select.clone().count(&txn).await?;

        let rows = select
            .order_by_desc(Column::Timestamp)
            .order_by_asc(Column::Id)
            .offset(page.offset())
            .limit(page.page_size)
            .all(&txn)
            .await?;

        txn.commit().await?;

        Ok(CrudCollection {
            items: rows.into_iter().map(Progress::from).collect(),
            count,
        })
    }

    pub async fn create(&self, payload: ProgressCreate) -> CrudResult<Uuid> {
        let id = payload.id.unwrap_or_else(Uuid::new_v4);

        let model = ActiveModel {
            id: Set(id),
            test_run_id: Set(payload.test_run_id),
            test_id: Set(payload.test_id),
            name: Set(payload.name),
            progress: Set(payload.progress),
            timestamp: Set(payload.timestamp.unwrap_or_else(Utc::now)),
        };

        let txn = self.db.begin().await?;

        ProgressEntity::insert(model)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| write_error(ENTITY, id, e))?;

        txn.commit().await?;

        debug!("Created progress {}", id);
        Ok(id)
    }

    pub async fn update(&self, id: Uuid, changes: impl Into<ActiveModel>) -> CrudResult<Uuid> {
        let changes = changes.into();
        let txn = self.db.begin().await?;

        let affected = if changes.is_changed() {
            ProgressEntity::update_many()
                .set(changes)
                .filter(Column::Id.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| write_error(ENTITY, id, e))?
                .rows_affected
        } else {
            ProgressEntity::find_by_id(id).count(&txn).await?
        };

        if affected < 1 {
            return Err(not_found(ENTITY, id));
        }

        txn.commit().await?;

        debug!("Updated progress {}", id);
        Ok(id)
    }
}
