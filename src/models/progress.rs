//! Progress samples: how far a run (or one test) has got, as a percentage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::serde_utils::double_option;
use super::validation;
use crate::error::AppResult;

pub const NAME_MAX_LEN: usize = 128;
pub const MIN_PROGRESS: f64 = 0.0;
pub const MAX_PROGRESS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Progress {
    pub id: Uuid,
    pub test_run_id: Uuid,
    pub test_id: Option<Uuid>,
    pub name: String,
    /// Percentage in `0..=100`
    pub progress: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProgressCreate {
    pub id: Option<Uuid>,
    pub test_run_id: Uuid,
    pub test_id: Option<Uuid>,
    pub name: String,
    pub progress: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

impl ProgressCreate {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::trimmed("name", self.name, NAME_MAX_LEN)?;
        self.progress = validation::within("progress", self.progress, MIN_PROGRESS, MAX_PROGRESS)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProgressUpdate {
    pub test_run_id: Option<Uuid>,
    pub test_id: Option<Uuid>,
    pub name: String,
    pub progress: f64,
    pub timestamp: DateTime<Utc>,
}

impl ProgressUpdate {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::trimmed("name", self.name, NAME_MAX_LEN)?;
        self.progress = validation::within("progress", self.progress, MIN_PROGRESS, MAX_PROGRESS)?;
        Ok(self)
    }

    pub fn into_create(self, id: Uuid) -> AppResult<ProgressCreate> {
        let test_run_id = self
            .test_run_id
            .ok_or_else(|| validation::missing("test_run_id"))?;

        Ok(ProgressCreate {
            id: Some(id),
            test_run_id,
            test_id: self.test_id,
            name: self.name,
            progress: self.progress,
            timestamp: Some(self.timestamp),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProgressPatch {
    pub test_run_id: Option<Uuid>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub test_id: Option<Option<Uuid>>,
    pub name: Option<String>,
    pub progress: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl ProgressPatch {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::optional_text("name", self.name, NAME_MAX_LEN)?;
        self.progress = self
            .progress
            .map(|p| validation::within("progress", p, MIN_PROGRESS, MAX_PROGRESS))
            .transpose()?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressFilter {
    pub test_run_id: Option<Uuid>,
    pub test_id: Option<Uuid>,
}
