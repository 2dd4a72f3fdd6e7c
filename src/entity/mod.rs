//! SeaORM entity definitions.

pub mod log;
pub mod metric;
pub mod metric_ot;
pub mod progress;
pub mod project;
pub mod test_run;
