use crate::domain::models::AqiCategory;

pub fn category(aqi: f64) -> AqiCategory {
    if aqi <= 50.0 {
        AqiCategory::Good
    } else if aqi <= 100.0 {
        AqiCategory::Satisfactory
    } else if aqi <= 200.0 {
        AqiCategory::Moderate
    } else if aqi <= 300.0 {
        AqiCategory::Poor
    } else if aqi <= 400.0 {
        AqiCategory::VeryPoor
    } else {
        AqiCategory::Severe
    }
}

pub fn government_advice(aqi: f64) -> &'static str {
    if aqi > 300.0 {
        "GRAP-IV, construction ban, traffic restrictions"
    } else if aqi > 200.0 {
        "Traffic control, water sprinkling"
    } else {
        "Normal monitoring"
    }
}

pub fn public_advice(aqi: f64) -> &'static str {
    if aqi > 300.0 {
        "Stay indoors, use N95 masks"
    } else if aqi > 200.0 {
        "Reduce outdoor activity"
    } else {
        "Normal activity allowed"
    }
}
