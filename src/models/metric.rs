//! Single-valued metrics recorded against a test run or one of its tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::serde_utils::double_option;
use super::validation;
use crate::error::AppResult;

pub const NAME_MAX_LEN: usize = 128;
pub const DESCRIPTION_MAX_LEN: usize = 256;
pub const UNIT_MAX_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Metric {
    pub id: Uuid,
    pub test_run_id: Uuid,
    pub test_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub value: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MetricCreate {
    pub id: Option<Uuid>,
    pub test_run_id: Uuid,
    pub test_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub value: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl MetricCreate {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::trimmed("name", self.name, NAME_MAX_LEN)?;
        self.description =
            validation::optional_text("description", self.description, DESCRIPTION_MAX_LEN)?;
        self.unit = validation::optional_text("unit", self.unit, UNIT_MAX_LEN)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MetricUpdate {
    pub test_run_id: Option<Uuid>,
    pub test_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub value: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl MetricUpdate {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::trimmed("name", self.name, NAME_MAX_LEN)?;
        self.description =
            validation::optional_text("description", self.description, DESCRIPTION_MAX_LEN)?;
        self.unit = validation::optional_text("unit", self.unit, UNIT_MAX_LEN)?;
        Ok(self)
    }

    pub fn into_create(self, id: Uuid) -> AppResult<MetricCreate> {
        let test_run_id = self
            .test_run_id
            .ok_or_else(|| validation::missing("test_run_id"))?;

        Ok(MetricCreate {
            id: Some(id),
            test_run_id,
            test_id: self.test_id,
            name: self.name,
            description: self.description,
            unit: self.unit,
            value: self.value,
            timestamp: Some(self.timestamp),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct MetricPatch {
    pub test_run_id: Option<Uuid>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub test_id: Option<Option<Uuid>>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub unit: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub value: Option<Option<f64>>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl MetricPatch {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::optional_text("name", self.name, NAME_MAX_LEN)?;
        self.description = self
            .description
            .map(|d| validation::optional_text("description", d, DESCRIPTION_MAX_LEN))
            .transpose()?;
        self.unit = self
            .unit
            .map(|u| validation::optional_text("unit", u, UNIT_MAX_LEN))
            .transpose()?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricFilter {
    pub test_run_id: Option<Uuid>,
    pub test_id: Option<Uuid>,
    pub name: Option<String>,
}
