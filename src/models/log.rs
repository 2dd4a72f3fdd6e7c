//! Log lines captured during a test run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::serde_utils::double_option;
use super::validation;
use crate::error::AppResult;

pub const NAME_MAX_LEN: usize = 128;
pub const LEVEL_MAX_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Log {
    pub id: Uuid,
    pub test_run_id: Uuid,
    pub test_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
    /// Source of the line, e.g. `browser-console`
    pub name: String,
    pub level: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LogCreate {
    pub id: Option<Uuid>,
    pub test_run_id: Uuid,
    pub test_id: Option<Uuid>,
    pub timestamp: Option<DateTime<Utc>>,
    pub name: String,
    pub level: String,
    pub message: String,
}

impl LogCreate {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::trimmed("name", self.name, NAME_MAX_LEN)?;
        self.level = validation::required_text("level", self.level, LEVEL_MAX_LEN)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LogUpdate {
    pub test_run_id: Option<Uuid>,
    pub test_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub level: String,
    pub message: String,
}

impl LogUpdate {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::trimmed("name", self.name, NAME_MAX_LEN)?;
        self.level = validation::required_text("level", self.level, LEVEL_MAX_LEN)?;
        Ok(self)
    }

    pub fn into_create(self, id: Uuid) -> AppResult<LogCreate> {
        let test_run_id = self
            .test_run_id
            .ok_or_else(|| validation::missing("test_run_id"))?;

        Ok(LogCreate {
            id: Some(id),
            test_run_id,
            test_id: self.test_id,
            timestamp: Some(self.timestamp),
            name: self.name,
            level: self.level,
            message: self.message,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LogPatch {
    pub test_run_id: Option<Uuid>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub test_id: Option<Option<Uuid>>,
    pub timestamp: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub level: Option<String>,
    pub message: Option<String>,
}

impl LogPatch {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::optional_text("name", self.name, NAME_MAX_LEN)?;
        self.level = self
            .level
            .map(|level| validation::required_text("level", level, LEVEL_MAX_LEN))
            .transpose()?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogFilter {
    pub test_run_id: Option<Uuid>,
    pub test_id: Option<Uuid>,
}
