//! Data access for projects.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::entity::project::{ActiveModel, Column, Entity as ProjectEntity, Model};
use crate::models::{
    CrudCollection, Page, Project, ProjectCreate, ProjectFilter, ProjectPatch, ProjectUpdate,
};

use super::{CrudError, CrudResult, not_found, object_to_json, write_error};

const ENTITY: &str = "Project";

impl TryFrom<Model> for Project {
    type Error = CrudError;

    fn try_from(model: Model) -> CrudResult<Self> {
        Ok(Project {
            id: model.id,
            name: model.name,
            config: serde_json::from_value(model.config)?,
        })
    }
}

impl From<ProjectUpdate> for ActiveModel {
    fn from(update: ProjectUpdate) -> Self {
        ActiveModel {
            name: Set(update.name),
            config: Set(object_to_json(update.config)),
            ..Default::default()
        }
    }
}

impl From<ProjectPatch> for ActiveModel {
    fn from(patch: ProjectPatch) -> Self {
        let mut model: ActiveModel = Default::default();
        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(config) = patch.config {
            model.config = Set(object_to_json(config));
        }
        model
    }
}

/// CRUD operations on the `projects` table.
pub struct ProjectCrud {
    db: DatabaseConnection,
}

impl ProjectCrud {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> CrudResult<Project> {
        ProjectEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found(ENTITY, id))?
            .try_into()
    }

    /// List projects alphabetically.
    pub async fn get_all(
        &self,
        filter: &ProjectFilter,
        page: Page,
    ) -> CrudResult<CrudCollection<Project>> {
        let mut select = ProjectEntity::find();

        if let Some(ref name) = filter.name {
            select = select.filter(Column::Name.eq(name.as_str()));
        }

        let txn = self.db.begin().await?;

        let count = select.clone().count(&txn).await?;

        let rows = select
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .offset(page.offset())
            .limit(page.page_size)
            .all(&txn)
            .await?;

        txn.commit().await?;

        let items = rows
            .into_iter()
            .map(Project::try_from)
            .collect::<CrudResult<Vec<_>>>()?;

        Ok(CrudCollection { items, count })
    }

    pub async fn create(&self, payload: ProjectCreate) -> CrudResult<Uuid> {
        let id = payload.id.unwrap_or_else(Uuid::new_v4);

        let model = ActiveModel {
            id: Set(id),
            name: Set(payload.name),
            config: Set(object_to_json(payload.config)),
        };

        let txn = self.db.begin().await?;

        ProjectEntity::insert(model)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| write_error(ENTITY, id, e))?;

        txn.commit().await?;

        debug!("Created project {}", id);
        Ok(id)
    }

    pub async fn update(&self, id: Uuid, changes: impl Into<ActiveModel>) -> CrudResult<Uuid> {
        let changes = changes.into();
        let txn = self.db.begin().await?;

        let affected = if changes.is_changed() {
            ProjectEntity::update_many()
                .set(changes)
                .filter(Column::Id.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| write_error(ENTITY, id, e))?
                .rows_affected
        } else {
            ProjectEntity::find_by_id(id).count(&txn).await?
        };

        if affected < 1 {
            return Err(not_found(ENTITY, id));
        }

        txn.commit().await?;

        debug!("Updated project {}", id);
        Ok(id)
    }
}
