//! Data access for test runs.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::entity::test_run::{ActiveModel, Column, Entity as TestRunEntity, Model};
use crate::models::{
    CrudCollection, Page, TestRun, TestRunCreate, TestRunFilter, TestRunPatch, TestRunUpdate,
};

use super::{CrudError, CrudResult, labels_to_json, not_found, object_to_json, write_error};

const ENTITY: &str = "Test run";

impl TryFrom<Model> for TestRun {
    type Error = CrudError;

    fn try_from(model: Model) -> CrudResult<Self> {
        Ok(TestRun {
            id: model.id,
            project_id: model.project_id,
            name: model.name,
            variant: serde_json::from_value(model.variant)?,
            config: serde_json::from_value(model.config)?,
            status: model.status,
            start_time: model.start_time,
            end_time: model.end_time,
        })
    }
}

impl From<TestRunUpdate> for ActiveModel {
    fn from(update: TestRunUpdate) -> Self {
        let mut model = ActiveModel {
            name: Set(update.name),
            variant: Set(labels_to_json(update.variant)),
            config: Set(object_to_json(update.config)),
            status: Set(update.status),
            start_time: Set(update.start_time),
            end_time: Set(update.end_time),
            ..Default::default()
        };
        if let Some(project_id) = update.project_id {
            model.project_id = Set(project_id);
        }
        model
    }
}

impl From<TestRunPatch> for ActiveModel {
    fn from(patch: TestRunPatch) -> Self {
        let mut model: ActiveModel = Default::default();
        if let Some(project_id) = patch.project_id {
            model.project_id = Set(project_id);
        }
        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(variant) = patch.variant {
            model.variant = Set(labels_to_json(variant));
        }
        if let Some(config) = patch.config {
            model.config = Set(object_to_json(config));
        }
        if let Some(status) = patch.status {
            model.status = Set(status);
        }
        if let Some(start_time) = patch.start_time {
            model.start_time = Set(start_time);
        }
        if let Some(end_time) = patch.end_time {
            model.end_time = Set(end_time);
        }
        model
    }
}

/// CRUD operations on the `test_runs` table.
pub struct TestRunCrud {
    db: DatabaseConnection,
}

impl TestRunCrud {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> CrudResult<TestRun> {
        TestRunEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found(ENTITY, id))?
            .try_into()
    }

    /// List runs, most recently started first.
    pub async fn get_all(
        &self,
        filter: &TestRunFilter,
        page: Page,
    ) -> CrudResult<CrudCollection<TestRun>> {
        let mut select = TestRunEntity::find();

        if let Some(project_id) = filter.project_id {
            select = select.filter(Column::ProjectId.eq(project_id));
        }

        if let Some(ref status) = filter.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        let txn = self.db.begin().await?;

        let count = select.clone().count(&txn).await?;

        let rows = select
            .order_by_desc(Column::StartTime)
            .order_by_asc(Column::Id)
            .offset(page.offset())
            .limit(page.page_size)
            .all(&txn)
            .await?;

        txn.commit().await?;

        let items = rows
            .into_iter()
            .map(TestRun::try_from)
            .collect::<CrudResult<Vec<_>>>()?;

        Ok(CrudCollection { items, count })
    }

    pub async fn create(&self, payload: TestRunCreate) -> CrudResult<Uuid> {
        let id = payload.id.unwrap_or_else(Uuid::new_v4);

        let model = ActiveModel {
            id: Set(id),
            project_id: Set(payload.project_id),
            name: Set(payload.name),
            variant: Set(labels_to_json(payload.variant)),
            config: Set(object_to_json(payload.config)),
            status: Set(payload.status),
            start_time: Set(payload.start_time.unwrap_or_else(Utc::now)),
            end_time: Set(payload.end_time),
        };

        let txn = self.db.begin().await?;

        TestRunEntity::insert(model)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| write_error(ENTITY, id, e))?;

        txn.commit().await?;

        debug!("Created test run {}", id);
        Ok(id)
    }

    pub async fn update(&self, id: Uuid, changes: impl Into<ActiveModel>) -> CrudResult<Uuid> {
        let changes = changes.into();
        let txn = self.db.begin().await?;

        let affected = if changes.is_changed() {
            TestRunEntity::update_many()
                .set(changes)
                .filter(Column::Id.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| write_error(ENTITY, id, e))?
                .rows_affected
        } else {
            TestRunEntity::find_by_id(id).count(&txn).await?
        };

        if affected < 1 {
            return Err(not_found(ENTITY, id));
        }

        txn.commit().await?;

        debug!("Updated test run {}", id);
        Ok(id)
    }
}
