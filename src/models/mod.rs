//! Request and response shapes for every entity, plus pagination.
//!
//! Each entity has four views: a read form, a `Create` payload, a full
//! `Update` payload and a `Patch` payload where every field is optional.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::defaults;
use crate::error::{AppError, AppResult};

pub mod log;
pub mod metric;
pub mod metric_ot;
pub mod progress;
pub mod project;
pub mod serde_utils;
pub mod test_run;
pub mod validation;

pub use log::{Log, LogCreate, LogFilter, LogPatch, LogUpdate};
pub use metric::{Metric, MetricCreate, MetricFilter, MetricPatch, MetricUpdate};
pub use metric_ot::{
    MetricOverTime, MetricOverTimeCreate, MetricOverTimeFilter, MetricOverTimePatch,
    MetricOverTimeUpdate, MetricValues,
};
pub use progress::{Progress, ProgressCreate, ProgressFilter, ProgressPatch, ProgressUpdate};
pub use project::{Project, ProjectCreate, ProjectFilter, ProjectPatch, ProjectUpdate};
pub use test::{Test, TestCreate, TestFilter, TestPatch, TestUpdate};
pub use test_run::{TestRun, TestRunCreate, TestRunFilter, TestRunPatch, TestRunUpdate};

/// Free-form JSON object (project and test-run configuration).
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// String-to-string labels (test-run variants, test parameters).
pub type Labels = BTreeMap<String, String>;

/// Page requested when the query string names none.
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when the query string names none.
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Upper bound for `page_size`, registered as app data.
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    pub max_page_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        PageLimits {
            max_page_size: defaults::MAX_PAGE_SIZE,
        }
    }
}

/// Raw `page` / `page_size` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageParams {
    /// Apply defaults, reject values below 1 and clamp the page size.
    pub fn resolve(&self, limits: PageLimits) -> AppResult<Page> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        if page < 1 {
            return Err(AppError::Validation("page: must be at least 1".to_string()));
        }

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size < 1 {
            return Err(AppError::Validation(
                "page_size: must be at least 1".to_string(),
            ));
        }

        let page = Page {
            page: page as u64,
            page_size: (page_size as u64).min(limits.max_page_size),
        };

        // The store binds OFFSET as a signed 64-bit integer.
        let offset = (page.page - 1)
            .checked_mul(page.page_size)
            .filter(|offset| i64::try_from(*offset).is_ok());
        if offset.is_none() {
            return Err(AppError::Validation(format!(
                "page: too large for page_size {}",
                page.page_size
            )));
        }

        Ok(page)
    }
}

/// A validated, 1-based page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u64,
    pub page_size: u64,
}

impl Page {
    pub fn new(page: u64, page_size: u64) -> Self {
        Page { page, page_size }
    }

    /// Rows to skip before this page starts.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// One page of rows plus the size of the whole filtered set.
#[derive(Debug, Clone)]
pub struct CrudCollection<T> {
    pub items: Vec<T>,
    pub count: u64,
}

/// Body returned alongside `201 Created`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub id: Uuid,
}
