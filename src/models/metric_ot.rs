//! Metrics over time: a named set of samples taken at one instant of a test run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

use super::serde_utils::double_option;
use super::validation;
use crate::error::AppResult;

pub const NAME_MAX_LEN: usize = 128;

/// Sample values keyed by label. A label may carry `null`.
pub type MetricValues = BTreeMap<String, Option<f64>>;

/// Metric over time as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetricOverTime {
    pub id: Uuid,
    pub test_run_id: Uuid,
    pub test_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    #[schema(value_type = Object)]
    pub values: MetricValues,
}

/// Payload for creating a metric over time.
///
/// `id` and `timestamp` are filled in when absent.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MetricOverTimeCreate {
    pub id: Option<Uuid>,
    pub test_run_id: Uuid,
    pub test_id: Option<Uuid>,
    pub timestamp: Option<DateTime<Utc>>,
    pub name: String,
    #[schema(value_type = Object)]
    pub values: MetricValues,
}

impl MetricOverTimeCreate {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::trimmed("name", self.name, NAME_MAX_LEN)?;
        Ok(self)
    }
}

/// Full replacement of a metric over time. Parent keys are applied only when given.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MetricOverTimeUpdate {
    pub test_run_id: Option<Uuid>,
    pub test_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    #[schema(value_type = Object)]
    pub values: MetricValues,
}

impl MetricOverTimeUpdate {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::trimmed("name", self.name, NAME_MAX_LEN)?;
        Ok(self)
    }

    /// Turn a PUT body into a create for `id`; the owning test run must be named.
    pub fn into_create(self, id: Uuid) -> AppResult<MetricOverTimeCreate> {
        let test_run_id = self
            .test_run_id
            .ok_or_else(|| validation::missing("test_run_id"))?;

        Ok(MetricOverTimeCreate {
            id: Some(id),
            test_run_id,
            test_id: self.test_id,
            timestamp: Some(self.timestamp),
            name: self.name,
            values: self.values,
        })
    }
}

/// Partial update: only the fields present in the body are written.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct MetricOverTimePatch {
    pub test_run_id: Option<Uuid>,
    /// `null` detaches the metric from its test
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub test_id: Option<Option<Uuid>>,
    pub timestamp: Option<DateTime<Utc>>,
    pub name: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub values: Option<MetricValues>,
}

impl MetricOverTimePatch {
    pub fn validate(mut self) -> AppResult<Self> {
        self.name = validation::optional_text("name", self.name, NAME_MAX_LEN)?;
        Ok(self)
    }
}

/// Equality filters for listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricOverTimeFilter {
    pub test_run_id: Option<Uuid>,
    pub test_id: Option<Uuid>,
}
