//! Test runs: one execution of a project's suite under a given variant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::serde_utils::double_option;
use super::validation;
use super::{JsonObject, Labels};
use crate::error::AppResult;

pub const NAME_MAX_LEN: usize = 256;
pub const STATUS_MAX_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TestRun {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: Option<String>,
    /// Labels describing what was run (platform, browser, build...)
    #[schema(value_type = Object)]
    pub variant: Labels,
    #[schema(value_type = Object)]
    pub config: JsonObject,
    pub status: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TestRunCreate {
    pub id: Option<Uuid>,
    pub project_id: Uuid,
    pub name: Option<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub variant: Labels,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub config: JsonObject,
    pub status: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl TestRunCreate {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::optional_text("name", self.name, NAME_MAX_LEN)?;
        self.status = validation::required_text("status", self.status, STATUS_MAX_LEN)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TestRunUpdate {
    pub project_id: Option<Uuid>,
    pub name: Option<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub variant: Labels,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub config: JsonObject,
    pub status: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl TestRunUpdate {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::optional_text("name", self.name, NAME_MAX_LEN)?;
        self.status = validation::required_text("status", self.status, STATUS_MAX_LEN)?;
        Ok(self)
    }

    pub fn into_create(self, id: Uuid) -> AppResult<TestRunCreate> {
        let project_id = self
            .project_id
            .ok_or_else(|| validation::missing("project_id"))?;

        Ok(TestRunCreate {
            id: Some(id),
            project_id,
            name: self.name,
            variant: self.variant,
            config: self.config,
            status: self.status,
            start_time: Some(self.start_time),
            end_time: self.end_time,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TestRunPatch {
    pub project_id: Option<Uuid>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[schema(value_type = Option<Object>)]
    pub variant: Option<Labels>,
    #[schema(value_type = Option<Object>)]
    pub config: Option<JsonObject>,
    pub status: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    /// `null` marks the run as unfinished again
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub end_time: Option<Option<DateTime<Utc>>>,
}

impl TestRunPatch {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = self
            .name
            .map(|name| validation::optional_text("name", name, NAME_MAX_LEN))
            .transpose()?;
        self.status = self
            .status
            .map(|status| validation::required_text("status", status, STATUS_MAX_LEN))
            .transpose()?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestRunFilter {
    pub project_id: Option<Uuid>,
    pub status: Option<String>,
}
