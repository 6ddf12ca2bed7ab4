//! Hospital search resolver.
//!
//! Flow:  Nominatim (bounded box) → parse → haversine → radius filter → sort
//!        → built-in fallback set when nothing survives

use super::providers::{self, Candidate};
use super::types::{Coordinate, Facility, FacilitySearch, FacilitySource};
use crate::config::PlacesConfig;
use crate::distance::{haversine_km, round_km};
use crate::remote::ProviderClient;
use std::sync::Arc;
use tracing::{info, warn};

/// Finds hospitals near a coordinate, degrading to a fixed seed set.
pub struct GeoSearchResolver {
    client: Arc<dyn ProviderClient>,
    config: PlacesConfig,
    fallback: Vec<Facility>,
}

impl GeoSearchResolver {
    pub fn new(client: Arc<dyn ProviderClient>, config: PlacesConfig) -> Self {
        Self {
            client,
            config,
            fallback: providers::builtin_facilities(),
        }
    }

    /// Replace the fallback set (for testing or regional deployments).
    pub fn with_fallback(mut self, fallback: Vec<Facility>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn fallback(&self) -> &[Facility] {
        &self.fallback
    }

    /// Nearby facilities, nearest first. Never fails.
    pub fn search(&self, origin: Coordinate) -> Vec<Facility> {
        self.search_with_source(origin).facilities
    }

    /// Like [`search`](Self::search), but also reports where the list came from.
    pub fn search_with_source(&self, origin: Coordinate) -> FacilitySearch {
        let candidates = match providers::nominatim_search(self.client.as_ref(), origin, &self.config) {
            Ok(c) => c,
            Err(e) => {
                warn!(%origin, error = %e, "place search failed");
                Vec::new()
            }
        };

        let facilities = self.rank_within_radius(origin, candidates);
        if facilities.is_empty() {
            info!(%origin, "no hospitals within {} km, using built-in set", self.config.radius_km);
            return FacilitySearch {
                facilities: self.fallback.clone(),
                source: FacilitySource::Fallback,
            };
        }

        info!(%origin, count = facilities.len(), "found nearby hospitals");
        FacilitySearch {
            facilities,
            source: FacilitySource::Provider,
        }
    }

    fn rank_within_radius(&self, origin: Coordinate, candidates: Vec<Candidate>) -> Vec<Facility> {
        let mut facilities: Vec<Facility> = candidates
            .into_iter()
            .filter_map(|c| {
                let km = haversine_km(origin, c.location);
                (km <= self.config.radius_km).then(|| Facility {
                    name: c.name,
                    address: c.address,
                    location: c.location,
                    distance_km: round_km(km),
                })
            })
            .collect();

        // Stable: equal distances keep provider order
        facilities.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        facilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::stub::StubClient;
    use crate::remote::CallError;
    use serde_json::{json, Value};

    const NOMINATIM: &str = "https://nominatim.openstreetmap.org";

    fn origin() -> Coordinate {
        Coordinate::new_unchecked(12.8400, 80.1557)
    }

    fn resolver(stub: StubClient) -> (GeoSearchResolver, Arc<StubClient>) {
        let stub = Arc::new(stub);
        let r = GeoSearchResolver::new(stub.clone(), PlacesConfig::default());
        (r, stub)
    }

    fn hit(lat: &str, lon: &str, name: &str) -> Value {
        json!({"lat": lat, "lon": lon, "display_name": name})
    }

    fn assert_is_fallback(search: &FacilitySearch) {
        assert_eq!(search.source, FacilitySource::Fallback);
        assert_eq!(search.facilities, providers::builtin_facilities());
        assert_eq!(search.facilities[0].name, "VIT University Health Centre");
        assert_eq!(search.facilities[0].distance_km, 0.2);
    }

    #[test]
    fn test_empty_provider_result_uses_fallback() {
        let (r, stub) = resolver(StubClient::new().respond(NOMINATIM, json!([])));
        assert_is_fallback(&r.search_with_source(origin()));
        assert_eq!(stub.call_count(), 1);
    }

    #[test]
    fn test_all_unparseable_uses_fallback() {
        let (r, _) = resolver(StubClient::new().respond(
            NOMINATIM,
            json!([hit("x", "80.1", "A"), hit("12.8", "", "B")]),
        ));
        let out = r.search(origin());
        assert_eq!(out.len(), 3);
        assert_eq!(out, providers::builtin_facilities());
    }

    #[test]
    fn test_provider_failure_uses_fallback() {
        let (r, _) = resolver(StubClient::new().fail(NOMINATIM, CallError::Timeout));
        assert_is_fallback(&r.search_with_source(origin()));

        let (r, _) = resolver(StubClient::new().fail(NOMINATIM, CallError::Status(429)));
        assert_is_fallback(&r.search_with_source(origin()));
    }

    #[test]
    fn test_everything_out_of_radius_uses_fallback() {
        // ~35 km north: inside the 0.4° box, outside 20 km
        let (r, _) = resolver(StubClient::new().respond(NOMINATIM, json!([hit("13.16", "80.1557", "Far Hospital")])));
        assert_is_fallback(&r.search_with_source(origin()));
    }

    #[test]
    fn test_filters_and_sorts_by_distance() {
        let (r, _) = resolver(StubClient::new().respond(
            NOMINATIM,
            json!([
                hit("12.9126", "80.2270", "Apollo Hospital, Perumbakkam, Chennai"),
                hit("13.2000", "80.1557", "Too Far Hospital, Chennai"),
                hit("12.8410", "80.1560", "Campus Clinic, VIT Chennai"),
                hit("bad", "80.0", "Broken Record"),
            ]),
        ));
        let search = r.search_with_source(origin());
        assert_eq!(search.source, FacilitySource::Provider);

        let names: Vec<&str> = search.facilities.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Campus Clinic", "Apollo Hospital"]);

        for f in &search.facilities {
            assert!(f.distance_km <= 20.0);
            assert_eq!(f.distance_km, round_km(f.distance_km));
        }
        assert!(search.facilities[0].distance_km < search.facilities[1].distance_km);
        assert_eq!(search.facilities[1].address, "Apollo Hospital, Perumbakkam, Chennai");
    }

    #[test]
    fn test_radius_is_configurable() {
        let stub = Arc::new(StubClient::new().respond(
            NOMINATIM,
            json!([hit("12.9126", "80.2270", "Apollo Hospital")]),
        ));
        let cfg = PlacesConfig { radius_km: 5.0, ..PlacesConfig::default() };
        let r = GeoSearchResolver::new(stub, cfg);
        assert_eq!(r.search_with_source(origin()).source, FacilitySource::Fallback);
    }

    #[test]
    fn test_radius_boundary_is_inclusive() {
        let km = haversine_km(origin(), Coordinate::new_unchecked(12.9126, 80.2270));
        let search_with_radius = |radius_km: f64| {
            let stub = Arc::new(StubClient::new().respond(
                NOMINATIM,
                json!([hit("12.9126", "80.2270", "Apollo Hospital")]),
            ));
            let cfg = PlacesConfig { radius_km, ..PlacesConfig::default() };
            GeoSearchResolver::new(stub, cfg).search_with_source(origin())
        };

        let at_edge = search_with_radius(km);
        assert_eq!(at_edge.source, FacilitySource::Provider);
        assert_eq!(at_edge.facilities.len(), 1);
        assert_eq!(at_edge.facilities[0].name, "Apollo Hospital");

        assert_is_fallback(&search_with_radius(km - 1e-9));
    }

    #[test]
    fn test_custom_fallback() {
        let only = vec![Facility {
            name: "Field Clinic".into(),
            address: "Somewhere".into(),
            location: Coordinate::new_unchecked(0.0, 0.0),
            distance_km: 1.0,
        }];
        let (r, _) = resolver(StubClient::new().respond(NOMINATIM, json!([])));
        let r = r.with_fallback(only.clone());
        assert_eq!(r.search(origin()), only);
    }

    #[test]
    fn test_sends_bounding_box() {
        let (r, stub) = resolver(StubClient::new().respond(NOMINATIM, json!([])));
        r.search(Coordinate::new_unchecked(10.0, 20.0));
        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].query_value("viewbox"), Some("19.6,10.4,20.4,9.6"));
    }
}
