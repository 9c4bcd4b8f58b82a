use crate::domain::models::Reading;
use crate::error::AqiError;
use serde::Deserialize;
use std::time::Duration;

/// Source of live AQI readings.
pub trait AqiProvider {
    fn fetch(&self) -> Result<Reading, AqiError>;
}

#[derive(Debug, Deserialize)]
struct FeedBody {
    status: String,
    #[serde(default)]
    data: Option<FeedData>,
}

#[derive(Debug, Deserialize)]
struct FeedData {
    aqi: serde_json::Value,
    #[serde(default)]
    city: Option<FeedCity>,
    #[serde(default)]
    time: Option<FeedTime>,
}

#[derive(Debug, Deserialize)]
struct FeedCity {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedTime {
    s: Option<String>,
}

/// City feed client for the World Air Quality Index API.
#[derive(Debug, Clone)]
pub struct WaqiClient {
    endpoint: String,
    token: Option<String>,
    timeout: Duration,
}

impl WaqiClient {
    pub fn new(endpoint: &str, token: Option<String>, timeout_ms: u64) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            token,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    fn fetch_text(&self, token: &str) -> anyhow::Result<String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let resp = client
            .get(&self.endpoint)
            .query(&[("token", token)])
            .send()?
            .error_for_status()?;
        Ok(resp.text()?)
    }
}

impl AqiProvider for WaqiClient {
    fn fetch(&self) -> Result<Reading, AqiError> {
        let Some(token) = self.token.as_deref() else {
            tracing::warn!("no AQI provider token configured");
            return Err(AqiError::FetchFailure);
        };
        let body = self.fetch_text(token).map_err(|e| {
            tracing::warn!(endpoint = %self.endpoint, error = %e, "AQI fetch failed");
            AqiError::FetchFailure
        })?;
        parse_feed(&body)
    }
}

/// Extracts a reading from a feed body. Anything other than an `ok` status
/// with a numeric, non-negative `data.aqi` is a fetch failure.
pub fn parse_feed(body: &str) -> Result<Reading, AqiError> {
    let feed: FeedBody = serde_json::from_str(body).map_err(|e| {
        tracing::warn!(error = %e, "malformed AQI feed body");
        AqiError::FetchFailure
    })?;
    if feed.status != "ok" {
        tracing::warn!(status = %feed.status, "AQI feed returned non-ok status");
        return Err(AqiError::FetchFailure);
    }
    let Some(data) = feed.data else {
        tracing::warn!("AQI feed has no data section");
        return Err(AqiError::FetchFailure);
    };
    let aqi = match data.aqi.as_f64() {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => {
            tracing::warn!(aqi = %data.aqi, "AQI feed value is not a usable number");
            return Err(AqiError::FetchFailure);
        }
    };
    Ok(Reading {
        aqi,
        station: data.city.and_then(|c| c.name),
        observed_at: data.time.and_then(|t| t.s),
    })
}
