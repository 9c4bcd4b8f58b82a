//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `runtime.rs`: init/fetch/record/history/predict/classify.
//! - `report.rs`: zones/wards listings, rankings and the dashboard tables.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod report;
pub mod runtime;

pub use report::{handle_catalog_commands, handle_report_commands};
pub use runtime::{handle_lookup_commands, handle_runtime_commands};
