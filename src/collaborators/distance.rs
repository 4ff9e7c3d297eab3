//! Turns addresses into coordinates before a run starts. Adapted from the
//! teacher's `api`/`distance` modules — the GA itself never reaches this
//! code; it only ever sees the [`crate::domain::types::Coordinate`]s these
//! providers resolve.

use std::error::Error;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, trace, warn};

use crate::domain::types::Coordinate;

pub trait DistanceMatrixProvider: Send + Sync {
    /// Resolves each address (in order) to a [`Coordinate`]. Addresses that
    /// fail to geocode are simply absent from the result — callers decide
    /// whether a short result is fatal.
    fn resolve(
        &self,
        addresses: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<Coordinate>, Box<dyn Error + Send + Sync>>> + Send;
}

/// Resolves addresses via a self-hosted or public OSRM `nearest` endpoint.
pub struct OsrmProvider {
    base_url: String,
    client: Client,
}

impl OsrmProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }
}

impl DistanceMatrixProvider for OsrmProvider {
    async fn resolve(&self, addresses: &[String]) -> Result<Vec<Coordinate>, Box<dyn Error + Send + Sync>> {
        let mut coords = Vec::with_capacity(addresses.len());
        for address in addresses {
            let url = format!("{}/nearest/v1/driving/{}", self.base_url, address);
            trace!("Querying OSRM nearest endpoint: {}", url);
            let response = match self.client.get(&url).send().await {
                Ok(resp) => resp,
                Err(e) => {
                    error!("OSRM nearest request failed for {}: {}", address, e);
                    continue;
                }
            };
            if !response.status().is_success() {
                warn!("OSRM nearest returned HTTP {} for {}", response.status(), address);
                continue;
            }
            let json: Value = response.json().await?;
            let waypoint = &json["waypoints"][0]["location"];
            let (lon, lat) = (waypoint[0].as_f64(), waypoint[1].as_f64());
            match (lat, lon) {
                (Some(lat), Some(lon)) => {
                    debug!("Resolved {} -> ({}, {})", address, lat, lon);
                    coords.push(Coordinate::new(lat, lon));
                }
                _ => warn!("Missing waypoint location for {}", address),
            }
        }
        info!("Resolved {}/{} addresses via OSRM", coords.len(), addresses.len());
        Ok(coords)
    }
}

/// Resolves addresses via the Google Geocoding API.
pub struct GoogleGeocodingProvider {
    api_key: String,
    client: Client,
}

impl GoogleGeocodingProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
        }
    }
}

impl DistanceMatrixProvider for GoogleGeocodingProvider {
    async fn resolve(&self, addresses: &[String]) -> Result<Vec<Coordinate>, Box<dyn Error + Send + Sync>> {
        let mut coords = Vec::with_capacity(addresses.len());
        for address in addresses {
            let url = "https://maps.googleapis.com/maps/api/geocode/json";
            let response = self
                .client
                .get(url)
                .query(&[("address", address.as_str()), ("key", self.api_key.as_str())])
                .send()
                .await?
                .json::<GeocodingResponse>()
                .await?;

            match response.results.into_iter().next() {
                Some(result) => coords.push(Coordinate::new(
                    result.geometry.location.lat,
                    result.geometry.location.lng,
                )),
                None => warn!("Google geocoding returned no results for {}", address),
            }
        }
        info!(
            "Resolved {}/{} addresses via Google Geocoding",
            coords.len(),
            addresses.len()
        );
        Ok(coords)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}
