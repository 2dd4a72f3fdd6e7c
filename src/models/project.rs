//! Projects group test runs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::JsonObject;
use super::validation;
use crate::error::AppResult;

pub const NAME_MAX_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = Object)]
    pub config: JsonObject,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProjectCreate {
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub config: JsonObject,
}

impl ProjectCreate {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::required_text("name", self.name, NAME_MAX_LEN)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProjectUpdate {
    pub name: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub config: JsonObject,
}

impl ProjectUpdate {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::required_text("name", self.name, NAME_MAX_LEN)?;
        Ok(self)
    }

    pub fn into_create(self, id: Uuid) -> AppResult<ProjectCreate> {
        Ok(ProjectCreate {
            id: Some(id),
            name: self.name,
            config: self.config,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProjectPatch {
    pub name: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub config: Option<JsonObject>,
}

impl ProjectPatch {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = self
            .name
            .map(|name| validation::required_text("name", name, NAME_MAX_LEN))
            .transpose()?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub name: Option<String>,
}
