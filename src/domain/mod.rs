//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs`: wards, history records, ranking rows, report/output structs.
//! - `constants.rs`: window length, default seed, provider defaults.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect `--json` outputs and integration contracts.
//! Keep schema-impacting changes explicit and synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
