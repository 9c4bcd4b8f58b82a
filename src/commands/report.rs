use crate::cli::{Cli, Commands, RankScope};
use crate::domain::models::{DashboardView, RankingRow, ZoneRankingRow};
use crate::error::AqiError;
use crate::services::catalog::WardCatalog;
use crate::services::config::Settings;
use crate::services::dashboard::dashboard_view;
use crate::services::history::HistoryStore;
use crate::services::output::{format_aqi, print_json, print_out, render_table};
use crate::services::ranking::{rank_wards, rank_zones};
use crate::services::storage::HistoryStorage;
use std::time::Duration;

/// Listings served from the ward catalog alone.
pub fn handle_catalog_commands(cli: &Cli, catalog: &WardCatalog) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Zones => {
            print_out(cli.json, &catalog.zones(), |z| {
                format!("{}\t{} wards", z.zone, z.ward_count)
            })?;
        }
        Commands::Wards { zone } => {
            let wards: Vec<_> = match zone {
                Some(z) => catalog.wards_in_zone(z).cloned().collect(),
                None => catalog.wards().to_vec(),
            };
            if let Some(z) = zone.as_deref().filter(|_| wards.is_empty()) {
                return Err(AqiError::NotFound(format!("zone {}", z)).into());
            }
            print_out(cli.json, &wards, |w| {
                format!("{}\t{}\t{}", w.ward_no, w.ward_name, w.zone)
            })?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}

pub fn handle_report_commands<S: HistoryStorage>(
    cli: &Cli,
    settings: &Settings,
    catalog: &WardCatalog,
    store: &mut HistoryStore<S>,
) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Rank { scope, order, top } => {
            let n = top.unwrap_or(settings.dashboard.top);
            match scope {
                RankScope::Wards => {
                    let ranking = rank_wards(store.records(), catalog, *order);
                    if cli.json {
                        print_json(ranking.top(n))?;
                    } else {
                        print_lines(&ward_table("Wards by average AQI", ranking.top(n)));
                    }
                }
                RankScope::Zones => {
                    let ranking = rank_zones(store.records(), catalog, *order);
                    if cli.json {
                        print_json(ranking.top(n))?;
                    } else {
                        print_lines(&zone_table("Zones by average AQI", ranking.top(n)));
                    }
                }
            }
        }
        Commands::Dashboard { top, watch, ticks } => {
            let n = top.unwrap_or(settings.dashboard.top);
            let interval = Duration::from_secs(settings.dashboard.refresh_secs);
            let mut rendered: u64 = 0;
            loop {
                if rendered > 0 {
                    store.reload();
                }
                let view = dashboard_view(store, catalog, n);
                if cli.json {
                    print_json(&view)?;
                } else {
                    print_lines(&dashboard_lines(&view));
                }
                rendered += 1;

                let done = ticks.map(|t| rendered >= t).unwrap_or(false);
                if !*watch || done {
                    break;
                }
                tracing::debug!(rendered, "waiting for next refresh");
                std::thread::sleep(interval);
            }
        }
        _ => return Ok(false),
    }
    Ok(true)
}

fn print_lines(lines: &[String]) {
    for l in lines {
        println!("{}", l);
    }
}

fn ward_table(title: &str, rows: &[RankingRow]) -> Vec<String> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.ward_no.to_string(),
                r.ward_name.clone(),
                r.zone.clone(),
                format_aqi(r.avg_aqi),
            ]
        })
        .collect();
    render_table(title, &["ward_no", "ward_name", "zone", "avg_aqi"], &cells)
}

fn zone_table(title: &str, rows: &[ZoneRankingRow]) -> Vec<String> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| vec![r.zone.clone(), r.ward_count.to_string(), format_aqi(r.avg_aqi)])
        .collect();
    render_table(title, &["zone", "wards", "avg_aqi"], &cells)
}

fn dashboard_lines(view: &DashboardView) -> Vec<String> {
    let mut out = Vec::new();
    out.extend(ward_table(
        &format!("Top {} most polluted wards", view.top),
        &view.most_polluted_wards,
    ));
    out.push(String::new());
    out.extend(ward_table(
        &format!("Top {} least polluted wards", view.top),
        &view.least_polluted_wards,
    ));
    out.push(String::new());
    out.extend(zone_table(
        &format!("Top {} most polluted zones", view.top),
        &view.most_polluted_zones,
    ));
    out.push(String::new());
    out.extend(zone_table(
        &format!("Top {} least polluted zones", view.top),
        &view.least_polluted_zones,
    ));
    out
}
