//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `catalog.rs`: ward reference data and zone/ward selection.
//! - `history.rs`: rolling 5-day window per ward (initialize/get/append/reload).
//! - `storage.rs`: persistence seam + CSV history file.
//! - `classifier.rs`: AQI category and advisory lookups.
//! - `predictor.rs`: next-day forecast from the recent window.
//! - `ranking.rs`: ward and zone pollution rankings.
//! - `provider.rs`: upstream AQI feed client.
//! - `dashboard.rs`: fetch/record/assess flows and the ranking tables.
//! - `config.rs`: TOML settings with env/CLI overrides.
//! - `logging.rs`: tracing subscriber setup.
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod dashboard;
pub mod history;
pub mod logging;
pub mod output;
pub mod predictor;
pub mod provider;
pub mod ranking;
pub mod storage;
