//! Data access for single-valued metrics.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::entity::metric::{ActiveModel, Column, Entity as MetricEntity, Model};
use crate::models::{
    CrudCollection, Metric, MetricCreate, MetricFilter, MetricPatch, MetricUpdate, Page,
};

use super::{CrudResult, not_found, write_error};

const ENTITY: &str = "Metric";

impl From<Model> for Metric {
    fn from(model: Model) -> Self {
        Metric {
            id: model.id,
            test_run_id: model.test_run_id,
            test_id: model.test_id,
            name: model.name,
            description: model.description,
            unit: model.unit,
            value: model.value,
            timestamp: model.timestamp,
        }
    }
}

impl From<MetricUpdate> for ActiveModel {
    fn from(update: MetricUpdate) -> Self {
        let mut model = ActiveModel {
            name: Set(update.name),
            description: Set(update.description),
            unit: Set(update.unit),
            value: Set(update.value),
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

impl From<MetricPatch> for ActiveModel {
    fn from(patch: MetricPatch) -> Self {
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
        if let Some(description) = patch.description {
            model.description = Set(description);
        }
        if let Some(unit) = patch.unit {
            model.unit = Set(unit);
        }
        if let Some(value) = patch.value {
            model.value = Set(value);
        }
        if let Some(timestamp) = patch.timestamp {
            model.timestamp = Set(timestamp);
        }
        model
    }
}

/// CRUD operations on the `metrics` table.
pub struct MetricCrud {
    db: DatabaseConnection,
}

impl MetricCrud {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> CrudResult<Metric> {
        MetricEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Metric::from)
            .ok_or_else(|| not_found(ENTITY, id))
    }

    pub async fn get_all(
        &self,
        filter: &MetricFilter,
        page: Page,
    ) -> CrudResult<CrudCollection<Metric>> {
        let mut select = MetricEntity::find();

        if let Some(test_run_id) = filter.test_run_id {
            select = select.filter(Column::TestRunId.eq(test_run_id));
        }

        if let Some(test_id) = filter.test_id {
            select = select.filter(Column::TestId.eq(test_id));
        }

        if let Some(ref name) = filter.name {
            select = select.filter(Column::Name.eq(name.as_str()));
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
            items: rows.into_iter().map(Metric::from).collect(),
            count,
        })
    }

    pub async fn create(&self, payload: MetricCreate) -> CrudResult<Uuid> {
        let id = payload.id.unwrap_or_else(Uuid::new_v4);

        let model = ActiveModel {
            id: Set(id),
            test_run_id: Set(payload.test_run_id),
            test_id: Set(payload.test_id),
            name: Set(payload.name),
            description: Set(payload.description),
            unit: Set(payload.unit),
            value: Set(payload.value),
            timestamp: Set(payload.timestamp.unwrap_or_else(Utc::now)),
        };

        let txn = self.db.begin().await?;

        MetricEntity::insert(model)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| write_error(ENTITY, id, e))?;

        txn.commit().await?;

        debug!("Created metric {}", id);
        Ok(id)
    }

    pub async fn update(&self, id: Uuid, changes: impl Into<ActiveModel>) -> CrudResult<Uuid> {
        let changes = changes.into();
        let txn = self.db.begin().await?;

        let affected = if changes.is_changed() {
            MetricEntity::update_many()
                .set(changes)
                .filter(Column::Id.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| write_error(ENTITY, id, e))?
                .rows_affected
        } else {
            MetricEntity::find_by_id(id).count(&txn).await?
        };

        if affected < 1 {
            return Err(not_found(ENTITY, id));
        }

        txn.commit().await?;

        debug!("Updated metric {}", id);
        Ok(id)
    }
}
