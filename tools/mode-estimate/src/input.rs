use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;

use wayfarer_estimate::{EstimatorConfig, RouteEstimate};

const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse a local wall-clock time, with or without seconds
pub fn parse_time(value: &str) -> Result<NaiveDateTime, String> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM[:SS], got {value:?}"))
}

pub fn load_routes(path: &Path) -> Result<Vec<RouteEstimate>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_routes(&data)
}

pub fn parse_routes(data: &str) -> Result<Vec<RouteEstimate>> {
    serde_json::from_str(data).context("Expected a JSON array of routes")
}

pub fn load_config(path: &Path) -> Result<EstimatorConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&data).context("Malformed estimator config")
}
