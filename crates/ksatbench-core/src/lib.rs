//! ksatbench-core — aggregation engine for the KSAT AI benchmark.
//!
//! Loads exam definitions and per-model evaluation records, validates them,
//! and derives summaries, leaderboards, and per-subject statistics for the
//! presentation layer.

pub mod catalog;
pub mod classification;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod model;
pub mod report;
pub mod store;
pub mod subject_stats;
pub mod summary;
pub mod validate;
