//! Agnostic server library.
//!
//! Persistence and HTTP exposure for projects, test runs, tests, metrics,
//! metrics over time, progress samples and logs.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
