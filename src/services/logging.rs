use crate::domain::constants::LOG_ENV;
use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Installs the stderr subscriber. Filter comes from `WARD_AQI_LOG`
/// (e.g. `WARD_AQI_LOG=ward_aqi=debug`), falling back to `ward_aqi=warn`.
/// stdout is left untouched so `--json` output stays parseable.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("ward_aqi=warn"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
