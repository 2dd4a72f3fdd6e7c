//! CRUD E2E test suite.
//!
//! Drives the HTTP API end to end against a private in-memory SQLite
//! database per test, migrated with the embedded migrations.
//!
//! Run with: cargo test --test crud_e2e

mod test_helpers;

mod test_logs;
mod test_metrics;
mod test_metrics_ot;
mod test_progress;
mod test_projects;
mod test_test_runs;
mod test_tests;
