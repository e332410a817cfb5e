//! Scoring core for artist performance dashboards.
//!
//! Every analyzer is a pure function over caller-supplied snapshots: percent
//! change, weighted composite grades, platform diversity, cross-platform
//! growth sync, milestone ETAs, track momentum and threshold-based insights.
//! [`report::Scorer`] runs them all over one [`report::DashboardSnapshot`].

pub mod config;
pub mod core;
pub mod error;
pub mod insights;
pub mod report;
pub mod scoring;

pub use config::Config;
pub use error::{ConfigError, LadderError, ScoreError, SnapshotError};
pub use report::{DashboardReport, DashboardSnapshot, Scorer};
