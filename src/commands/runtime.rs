use crate::cli::{Cli, Commands};
use crate::domain::models::{AqiReport, HistoryView, InitReport, Reading};
use crate::error::AqiError;
use crate::services::catalog::WardCatalog;
use crate::services::config::Settings;
use crate::services::dashboard::{
    classify_report, fetch_and_record, prediction_report, record_reading,
};
use crate::services::history::HistoryStore;
use crate::services::output::{format_aqi, print_one};
use crate::services::provider::WaqiClient;
use crate::services::storage::HistoryStorage;

/// Commands that need neither the catalog nor the history store.
pub fn handle_lookup_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Classify { aqi } = &cli.command else {
        return Ok(false);
    };
    if !aqi.is_finite() || *aqi < 0.0 {
        return Err(AqiError::InvalidReading(aqi.to_string()).into());
    }
    print_one(cli.json, classify_report(*aqi), |r| {
        vec![
            format!("AQI: {}", format_aqi(r.aqi)),
            format!("category: {}", r.category_label),
            format!("government advisory: {}", r.government_advice),
            format!("public advisory: {}", r.public_advice),
        ]
    })?;
    Ok(true)
}

pub fn handle_runtime_commands<S: HistoryStorage>(
    cli: &Cli,
    settings: &Settings,
    catalog: &WardCatalog,
    store: &mut HistoryStore<S>,
) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Init => {
            let report = InitReport {
                wards: store.len(),
                seeded: store.seeded(),
                rebuilt: store.was_rebuilt(),
                history_file: store.location(),
            };
            print_one(cli.json, report, |r| {
                let mut lines = vec![format!(
                    "history store ready: {} wards in {}",
                    r.wards, r.history_file
                )];
                if r.rebuilt {
                    lines.push("invalid history was discarded and reseeded".to_string());
                } else if r.seeded > 0 {
                    lines.push(format!("seeded {} wards with default history", r.seeded));
                }
                lines
            })?;
        }
        Commands::Fetch { ward } => {
            let w = catalog.resolve(&ward.ward, ward.zone.as_deref())?;
            let provider = WaqiClient::new(
                &settings.provider.endpoint,
                settings.provider.token.clone(),
                settings.provider.timeout_ms,
            );
            let report = fetch_and_record(&provider, store, w)?;
            print_one(cli.json, report, report_lines)?;
        }
        Commands::Record { ward, aqi } => {
            let w = catalog.resolve(&ward.ward, ward.zone.as_deref())?;
            let report = record_reading(store, w, Reading::manual(*aqi))?;
            print_one(cli.json, report, report_lines)?;
        }
        Commands::History { ward } => {
            let w = catalog.resolve(&ward.ward, ward.zone.as_deref())?;
            let rec = store.get(w.ward_no)?;
            let view = HistoryView {
                ward_no: w.ward_no,
                ward_name: w.ward_name.clone(),
                zone: w.zone.clone(),
                slots: rec.slots,
                avg_aqi: rec.average(),
            };
            print_one(cli.json, view, |v| {
                vec![
                    format!("ward: {} {} ({})", v.ward_no, v.ward_name, v.zone),
                    format!("history (oldest first): {}", join_slots(&v.slots)),
                    format!("average: {}", format_aqi(v.avg_aqi)),
                ]
            })?;
        }
        Commands::Predict { ward } => {
            let w = catalog.resolve(&ward.ward, ward.zone.as_deref())?;
            let report = prediction_report(w, store.get(w.ward_no)?);
            print_one(cli.json, report, |p| {
                vec![
                    format!("ward: {} {} ({})", p.ward_no, p.ward_name, p.zone),
                    format!("history (oldest first): {}", join_slots(&p.history)),
                    format!("predicted AQI: {}", p.predicted_aqi),
                    format!("category: {}", p.category_label),
                ]
            })?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}

fn join_slots(slots: &[f64]) -> String {
    slots
        .iter()
        .map(|v| format_aqi(*v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn report_lines(r: &AqiReport) -> Vec<String> {
    let mut lines = vec![
        format!("ward: {} {} ({})", r.ward_no, r.ward_name, r.zone),
        format!("current AQI: {}", format_aqi(r.current_aqi)),
        format!("predicted AQI: {}", r.predicted_aqi),
        format!("category: {}", r.category_label),
        format!("government advisory: {}", r.government_advice),
        format!("public advisory: {}", r.public_advice),
        format!("history (oldest first): {}", join_slots(&r.history)),
    ];
    if let Some(station) = &r.station {
        lines.push(format!("station: {}", station));
    }
    if let Some(at) = &r.observed_at {
        lines.push(format!("observed at: {}", at));
    }
    for w in &r.warnings {
        lines.push(format!("warning: {}", w));
    }
    lines
}
