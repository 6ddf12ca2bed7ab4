//! Hospital providers: Nominatim place search and the built-in fallback set.

use super::types::{Coordinate, Facility};
use crate::config::PlacesConfig;
use crate::remote::{CallError, ProviderClient, ProviderRequest};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

// ─── Built-in dataset ───────────────────────────────────────────

struct BuiltinFacility {
    name: &'static str,
    address: &'static str,
    lat: f64,
    lon: f64,
    distance_km: f64,
}

/// Seed hospitals around VIT Chennai. Distances are fixed placeholders,
/// not measured against any query point.
const BUILTIN_FACILITIES: &[BuiltinFacility] = &[
    BuiltinFacility {
        name: "VIT University Health Centre",
        address: "VIT Chennai, Vandalur-Kelambakkam Road, Chennai",
        lat: 12.8400, lon: 80.1557,
        distance_km: 0.2,
    },
    BuiltinFacility {
        name: "Apollo Hospital",
        address: "Perumbakkam, Chennai",
        lat: 12.9126, lon: 80.2270,
        distance_km: 8.3,
    },
    BuiltinFacility {
        name: "Chettinad Hospital",
        address: "Kelambakkam, Chennai",
        lat: 12.7852, lon: 80.2296,
        distance_km: 7.5,
    },
];

/// The fallback set, in its fixed order.
pub fn builtin_facilities() -> Vec<Facility> {
    BUILTIN_FACILITIES
        .iter()
        .map(|f| Facility {
            name: f.name.to_string(),
            address: f.address.to_string(),
            location: Coordinate::new_unchecked(f.lat, f.lon),
            distance_km: f.distance_km,
        })
        .collect()
}

// ─── Nominatim provider ─────────────────────────────────────────

const UNKNOWN_NAME: &str = "Unknown Hospital";

/// One Nominatim search hit. Coordinates arrive as strings.
#[derive(Deserialize, Debug, Clone)]
pub struct PlaceRecord {
    #[serde(default)]
    pub lat: Option<Value>,
    #[serde(default)]
    pub lon: Option<Value>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A provider record whose coordinates parsed cleanly.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub address: String,
    pub location: Coordinate,
}

impl PlaceRecord {
    /// Turn the raw record into a candidate, or `None` if its coordinates
    /// are missing or not numeric.
    pub fn into_candidate(self) -> Option<Candidate> {
        let lat = parse_coord(self.lat.as_ref()?)?;
        let lon = parse_coord(self.lon.as_ref()?)?;

        let (name, address) = match self.display_name {
            Some(display) => {
                let first = display.split(',').next().unwrap_or("").trim();
                let name = if first.is_empty() { UNKNOWN_NAME.to_string() } else { first.to_string() };
                (name, display)
            }
            None => (UNKNOWN_NAME.to_string(), String::new()),
        };

        Some(Candidate {
            name,
            address,
            location: Coordinate::new_unchecked(lat, lon),
        })
    }
}

fn parse_coord(v: &Value) -> Option<f64> {
    let n = match v {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Nominatim `viewbox` for a square of `half_width` degrees around `origin`:
/// left,top,right,bottom.
pub fn viewbox(origin: Coordinate, half_width: f64) -> String {
    format!(
        "{},{},{},{}",
        origin.longitude - half_width,
        origin.latitude + half_width,
        origin.longitude + half_width,
        origin.latitude - half_width,
    )
}

/// Build the bounded hospital search around `origin`.
pub fn nominatim_request(origin: Coordinate, cfg: &PlacesConfig) -> ProviderRequest {
    ProviderRequest::get(cfg.url.as_str())
        .param("q", &cfg.query)
        .param("format", "json")
        .param("limit", cfg.limit)
        .param("extratags", 1)
        .param("addressdetails", 1)
        .param("bounded", 1)
        .param("viewbox", viewbox(origin, cfg.box_half_width_deg))
        .timeout(Duration::from_secs(cfg.timeout_secs))
}

/// Query Nominatim and return every record with parseable coordinates,
/// in provider order.
pub fn nominatim_search(
    client: &dyn ProviderClient,
    origin: Coordinate,
    cfg: &PlacesConfig,
) -> Result<Vec<Candidate>, CallError> {
    let body = client.call(&nominatim_request(origin, cfg))?;

    let records = match body {
        Value::Array(items) => items,
        other => {
            return Err(CallError::Decode(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            )))
        }
    };

    let total = records.len();
    let candidates: Vec<Candidate> = records
        .into_iter()
        .filter_map(|raw| serde_json::from_value::<PlaceRecord>(raw).ok())
        .filter_map(PlaceRecord::into_candidate)
        .collect();

    if candidates.len() < total {
        debug!(
            discarded = total - candidates.len(),
            total, "dropped Nominatim records without numeric coordinates"
        );
    }

    Ok(candidates)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
