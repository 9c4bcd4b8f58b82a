use crate::cli::SortOrder;
use crate::domain::models::{
    AqiReport, ClassifyReport, DashboardView, HistoryRecord, PredictionReport, Reading, Ward,
};
use crate::error::AqiError;
use crate::services::catalog::WardCatalog;
use crate::services::classifier::{category, government_advice, public_advice};
use crate::services::history::HistoryStore;
use crate::services::predictor::predict;
use crate::services::provider::AqiProvider;
use crate::services::ranking::{rank_wards, rank_zones};
use crate::services::storage::HistoryStorage;

/// Builds the result panel for `ward` from its updated window and the reading
/// that was just recorded.
pub fn assess(ward: &Ward, record: &HistoryRecord, reading: &Reading) -> AqiReport {
    let cat = category(reading.aqi);
    AqiReport {
        ward_no: ward.ward_no,
        ward_name: ward.ward_name.clone(),
        zone: ward.zone.clone(),
        current_aqi: reading.aqi,
        predicted_aqi: predict(record),
        category: cat,
        category_label: cat.label().to_string(),
        government_advice: government_advice(reading.aqi).to_string(),
        public_advice: public_advice(reading.aqi).to_string(),
        history: record.slots,
        station: reading.station.clone(),
        observed_at: reading.observed_at.clone(),
        warnings: vec![],
    }
}

/// Appends `reading` to the ward's window and assesses the result. A failed
/// write is downgraded to a warning on the report.
pub fn record_reading<S: HistoryStorage>(
    store: &mut HistoryStore<S>,
    ward: &Ward,
    reading: Reading,
) -> Result<AqiReport, AqiError> {
    let mut warnings = Vec::new();
    let record = match store.append(ward.ward_no, reading.aqi) {
        Ok(record) => record,
        Err(AqiError::Persistence(reason)) => {
            tracing::warn!(ward_no = ward.ward_no, %reason, "reading kept in memory only");
            warnings.push(format!("history not saved: {}", reason));
            store.get(ward.ward_no)?.clone()
        }
        Err(e) => return Err(e),
    };
    let mut report = assess(ward, &record, &reading);
    report.warnings = warnings;
    Ok(report)
}

/// Fetches a live reading and records it. On fetch failure nothing is
/// appended and no forecast is made.
pub fn fetch_and_record<S: HistoryStorage>(
    provider: &dyn AqiProvider,
    store: &mut HistoryStore<S>,
    ward: &Ward,
) -> Result<AqiReport, AqiError> {
    let reading = provider.fetch()?;
    tracing::info!(ward_no = ward.ward_no, aqi = reading.aqi, "fetched AQI");
    record_reading(store, ward, reading)
}

pub fn prediction_report(ward: &Ward, record: &HistoryRecord) -> PredictionReport {
    let predicted = predict(record);
    let cat = category(predicted as f64);
    PredictionReport {
        ward_no: ward.ward_no,
        ward_name: ward.ward_name.clone(),
        zone: ward.zone.clone(),
        history: record.slots,
        predicted_aqi: predicted,
        category: cat,
        category_label: cat.label().to_string(),
    }
}

pub fn classify_report(aqi: f64) -> ClassifyReport {
    let cat = category(aqi);
    ClassifyReport {
        aqi,
        category: cat,
        category_label: cat.label().to_string(),
        government_advice: government_advice(aqi).to_string(),
        public_advice: public_advice(aqi).to_string(),
    }
}

/// The four ranking tables: most/least polluted wards and zones.
pub fn dashboard_view<S: HistoryStorage>(
    store: &HistoryStore<S>,
    catalog: &WardCatalog,
    top: usize,
) -> DashboardView {
    DashboardView {
        top,
        most_polluted_wards: rank_wards(store.records(), catalog, SortOrder::Desc)
            .top(top)
            .to_vec(),
        least_polluted_wards: rank_wards(store.records(), catalog, SortOrder::Asc)
            .top(top)
            .to_vec(),
        most_polluted_zones: rank_zones(store.records(), catalog, SortOrder::Desc)
            .top(top)
            .to_vec(),
        least_polluted_zones: rank_zones(store.records(), catalog, SortOrder::Asc)
            .top(top)
            .to_vec(),
    }
}
