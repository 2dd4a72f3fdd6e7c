//! Data access for log lines.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::entity::log::{ActiveModel, Column, Entity as LogEntity, Model};
use crate::models::{CrudCollection, Log, LogCreate, LogFilter, LogPatch, LogUpdate, Page};

use super::{CrudResult, not_found, write_error};

const ENTITY: &str = "Log";

impl From<Model> for Log {
    fn from(model: Model) -> Self {
        Log {
            id: model.id,
            test_run_id: model.test_run_id,
            test_id: model.test_id,
            timestamp: model.timestamp,
            name: model.name,
            level: model.level,
            message: model.message,
        }
    }
}

impl From<LogUpdate> for ActiveModel {
    fn from(update: LogUpdate) -> Self {
        let mut model = ActiveModel {
            timestamp: Set(update.timestamp),
            name: Set(update.name),
            level: Set(update.level),
            message: Set(update.message),
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

impl From<LogPatch> for ActiveModel {
    fn from(patch: LogPatch) -> Self {
        let mut model: ActiveModel = Default::default();
        if let Some(test_run_id) = patch.test_run_id {
            model.test_run_id = Set(test_run_id);
        }
        if let Some(test_id) = patch.test_id {
            model.test_id = Set(test_id);
        }
        if let Some(timestamp) = patch.timestamp {
            model.timestamp = Set(timestamp);
        }
        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(level) = patch.level {
            model.level = Set(level);
        }
        if let Some(message) = patch.message {
            model.message = Set(message);
        }
        model
    }
}

/// CRUD operations on the `logs` table.
pub struct LogCrud {
    db: DatabaseConnection,
}

impl LogCrud {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> CrudResult<Log> {
        LogEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Log::from)
            .ok_or_else(|| not_found(ENTITY, id))
    }

    /// Newest line first.
    pub async fn get_all(&self, filter: &LogFilter, page: Page) -> CrudResult<CrudCollection<Log>> {
        let mut select = LogEntity::find();

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
            items: rows.into_iter().map(Log::from).collect(),
            count,
        })
    }

    pub async fn create(&self, payload: LogCreate) -> CrudResult<Uuid> {
        let id = payload.id.unwrap_or_else(Uuid::new_v4);

        let model = ActiveModel {
            id: Set(id),
            test_run_id: Set(payload.test_run_id),
            test_id: Set(payload.test_id),
            timestamp: Set(payload.timestamp.unwrap_or_else(Utc::now)),
            name: Set(payload.name),
            level: Set(payload.level),
            message: Set(payload.message),
        };

        let txn = self.db.begin().await?;

        LogEntity::insert(model)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| write_error(ENTITY, id, e))?;

        txn.commit().await?;

        debug!("Created log {}", id);
        Ok(id)
    }

    pub async fn update(&self, id: Uuid, changes: impl Into<ActiveModel>) -> CrudResult<Uuid> {
        let changes = changes.into();
        let txn = self.db.begin().await?;

        let affected = if changes.is_changed() {
            LogEntity::update_many()
                .set(changes)
                .filter(Column::Id.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| write_error(ENTITY, id, e))?
                .rows_affected
        } else {
            LogEntity::find_by_id(id).count(&txn).await?
        };

        if affected < 1 {
            return Err(not_found(ENTITY, id));
        }

        txn.commit().await?;

        debug!("Updated log {}", id);
        Ok(id)
    }
}
