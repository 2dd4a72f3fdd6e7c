//! Data access for metrics over time.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::entity::metric_ot::{ActiveModel, Column, Entity as MetricOverTimeEntity, Model};
use crate::models::{
    CrudCollection, MetricOverTime, MetricOverTimeCreate, MetricOverTimeFilter,
    MetricOverTimePatch, MetricOverTimeUpdate, Page,
};

use super::{CrudError, CrudResult, not_found, values_to_json, write_error};

const ENTITY: &str = "Metric over time";

impl TryFrom<Model> for MetricOverTime {
    type Error = CrudError;

    fn try_from(model: Model) -> CrudResult<Self> {
        Ok(MetricOverTime {
            id: model.id,
            test_run_id: model.test_run_id,
            test_id: model.test_id,
            timestamp: model.timestamp,
            name: model.name,
            values: serde_json::from_value(model.values)?,
        })
    }
}

impl From<MetricOverTimeUpdate> for ActiveModel {
    fn from(update: MetricOverTimeUpdate) -> Self {
        let mut model = ActiveModel {
            timestamp: Set(update.timestamp),
            name: Set(update.name),
            values: Set(values_to_json(update.values)),
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

impl From<MetricOverTimePatch> for ActiveModel {
    fn from(patch: MetricOverTimePatch) -> Self {
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
        if let Some(values) = patch.values {
            model.values = Set(values_to_json(values));
        }
        model
    }
}

/// CRUD operations on the `metrics_ot` table.
pub struct MetricOverTimeCrud {
    db: DatabaseConnection,
}

impl MetricOverTimeCrud {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> CrudResult<MetricOverTime> {
        MetricOverTimeEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found(ENTITY, id))?
            .try_into()
    }

    /// List matching rows, newest first, together with the unpaged count.
    pub async fn get_all(
        &self,
        filter: &MetricOverTimeFilter,
        page: Page,
    ) -> CrudResult<CrudCollection<MetricOverTime>> {
        let mut select = MetricOverTimeEntity::find();

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

        let items = rows
            .into_iter()
            .map(MetricOverTime::try_from)
            .collect::<CrudResult<Vec<_>>>()?;

        Ok(CrudCollection { items, count })
    }

    pub async fn create(&self, payload: MetricOverTimeCreate) -> CrudResult<Uuid> {
        let id = payload.id.unwrap_or_else(Uuid::new_v4);

        let model = ActiveModel {
            id: Set(id),
            test_run_id: Set(payload.test_run_id),
            test_id: Set(payload.test_id),
            timestamp: Set(payload.timestamp.unwrap_or_else(Utc::now)),
            name: Set(payload.name),
            values: Set(values_to_json(payload.values)),
        };

        let txn = self.db.begin().await?;

        MetricOverTimeEntity::insert(model)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| write_error(ENTITY, id, e))?;

        txn.commit().await?;

        debug!("Created metric over time {}", id);
        Ok(id)
    }

    /// Write `changes` to row `id`. Accepts a full update or a patch.
    pub async fn update(
        &self,
        id: Uuid,
        changes: impl Into<ActiveModel>,
    ) -> CrudResult<Uuid> {
        let changes = changes.into();
        let txn = self.db.begin().await?;

        let affected = if changes.is_changed() {
            MetricOverTimeEntity::update_many()
                .set(changes)
                .filter(Column::Id.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| write_error(ENTITY, id, e))?
                .rows_affected
        } else {
            MetricOverTimeEntity::find_by_id(id).count(&txn).await?
        };

        if affected < 1 {
            return Err(not_found(ENTITY, id));
        }

        txn.commit().await?;

        debug!("Updated metric over time {}", id);
        Ok(id)
    }
}
