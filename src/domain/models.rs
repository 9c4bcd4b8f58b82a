use crate::domain::constants::WINDOW_LEN;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// One administrative ward as listed in the ward catalog.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Ward {
    pub ward_no: u32,
    pub ward_name: String,
    pub zone: String,
}

/// Rolling AQI window for one ward, oldest day first.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HistoryRecord {
    pub ward_no: u32,
    pub slots: [f64; WINDOW_LEN],
}

impl HistoryRecord {
    pub fn new(ward_no: u32, slots: [f64; WINDOW_LEN]) -> Self {
        Self { ward_no, slots }
    }

    pub fn average(&self) -> f64 {
        self.slots.iter().sum::<f64>() / WINDOW_LEN as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    VeryPoor,
    Severe,
}

impl AqiCategory {
    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Satisfactory => "Satisfactory",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::VeryPoor => "Very Poor",
            AqiCategory::Severe => "Severe",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single reading returned by the upstream provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub aqi: f64,
    pub station: Option<String>,
    pub observed_at: Option<String>,
}

impl Reading {
    pub fn manual(aqi: f64) -> Self {
        Self {
            aqi,
            station: None,
            observed_at: None,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RankingRow {
    pub ward_no: u32,
    pub ward_name: String,
    pub zone: String,
    pub avg_aqi: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ZoneRankingRow {
    pub zone: String,
    pub avg_aqi: f64,
    pub ward_count: usize,
}

/// Result panel for one ward after a reading has been recorded.
#[derive(Debug, Serialize)]
pub struct AqiReport {
    pub ward_no: u32,
    pub ward_name: String,
    pub zone: String,
    pub current_aqi: f64,
    pub predicted_aqi: i64,
    pub category: AqiCategory,
    pub category_label: String,
    pub government_advice: String,
    pub public_advice: String,
    pub history: [f64; WINDOW_LEN],
    pub station: Option<String>,
    pub observed_at: Option<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictionReport {
    pub ward_no: u32,
    pub ward_name: String,
    pub zone: String,
    pub history: [f64; WINDOW_LEN],
    pub predicted_aqi: i64,
    pub category: AqiCategory,
    pub category_label: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyReport {
    pub aqi: f64,
    pub category: AqiCategory,
    pub category_label: String,
    pub government_advice: String,
    pub public_advice: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryView {
    pub ward_no: u32,
    pub ward_name: String,
    pub zone: String,
    pub slots: [f64; WINDOW_LEN],
    pub avg_aqi: f64,
}

#[derive(Debug, Serialize)]
pub struct InitReport {
    pub wards: usize,
    pub seeded: usize,
    pub rebuilt: bool,
    pub history_file: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub top: usize,
    pub most_polluted_wards: Vec<RankingRow>,
    pub least_polluted_wards: Vec<RankingRow>,
    pub most_polluted_zones: Vec<ZoneRankingRow>,
    pub least_polluted_zones: Vec<ZoneRankingRow>,
}

#[derive(Debug, Serialize)]
pub struct ZoneSummary {
    pub zone: String,
    pub ward_count: usize,
}
