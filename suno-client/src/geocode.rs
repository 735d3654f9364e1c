//! Geocoding
//!
//! Reverse (coordinates → address) and forward (text → places) lookups
//! against an OpenStreetMap Nominatim-compatible service.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::GeoPoint;
use crate::{ClientConfig, ClientError, ClientResult};

/// A resolved place
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
    pub city: String,
    pub province: String,
}

impl Address {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Geocoding service
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse(&self, point: GeoPoint) -> ClientResult<Address>;
    async fn search(&self, query: &str) -> ClientResult<Vec<Address>>;
}

#[derive(Debug, Deserialize)]
struct Place {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    lat: Option<String>,
    #[serde(default)]
    lon: Option<String>,
    #[serde(default)]
    address: Option<PlaceAddress>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PlaceAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    province: Option<String>,
}

impl Place {
    /// `fallback` supplies coordinates the response omits or garbles
    fn into_address(self, fallback: Option<GeoPoint>) -> ClientResult<Address> {
        if let Some(error) = self.error {
            return Err(ClientError::Geocode(error));
        }
        let display_name = self
            .display_name
            .ok_or_else(|| ClientError::Geocode("response has no display_name".into()))?;
        let parsed = match (
            self.lat.as_deref().and_then(|v| v.parse::<f64>().ok()),
            self.lon.as_deref().and_then(|v| v.parse::<f64>().ok()),
        ) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        };
        let point = fallback
            .or(parsed)
            .ok_or_else(|| ClientError::Geocode("response has no coordinates".into()))?;
        let parts = self.address.unwrap_or_default();
        Ok(Address {
            latitude: point.latitude,
            longitude: point.longitude,
            display_name,
            city: parts
                .city
                .or(parts.town)
                .or(parts.village)
                .unwrap_or_default(),
            province: parts.state.or(parts.province).unwrap_or_default(),
        })
    }
}

/// Nominatim HTTP geocoder
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            base_url: config.geocoder_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Geocode(format!("{} returned {}", path, status)));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn reverse(&self, point: GeoPoint) -> ClientResult<Address> {
        let query = [
            ("format", "json".to_string()),
            ("lat", point.latitude.to_string()),
            ("lon", point.longitude.to_string()),
            ("zoom", "18".to_string()),
            ("addressdetails", "1".to_string()),
        ];
        let place: Place = self.fetch("reverse", &query).await?;
        // Keep the clicked coordinates rather than the snapped feature's
        place.into_address(Some(point))
    }

    async fn search(&self, text: &str) -> ClientResult<Vec<Address>> {
        let query = [
            ("format", "json".to_string()),
            ("q", text.to_string()),
            ("limit", "5".to_string()),
            ("addressdetails", "1".to_string()),
        ];
        let places: Vec<Place> = self.fetch("search", &query).await?;
        Ok(places
            .into_iter()
            .filter_map(|p| p.into_address(None).ok())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(json: serde_json::Value) -> Place {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_city_falls_back_to_town_then_village() {
        let addr = place(serde_json::json!({
            "display_name": "Main St, Almonte, Ontario",
            "lat": "45.2", "lon": "-76.1",
            "address": {"village": "Almonte", "state": "Ontario"}
        }))
        .into_address(None)
        .unwrap();
        assert_eq!(addr.city, "Almonte");
        assert_eq!(addr.province, "Ontario");
        assert_eq!(addr.point(), GeoPoint::new(45.2, -76.1));

        let addr = place(serde_json::json!({
            "display_name": "x", "lat": "1", "lon": "2",
            "address": {"city": "Ottawa", "town": "Vanier", "province": "ON"}
        }))
        .into_address(None)
        .unwrap();
        assert_eq!(addr.city, "Ottawa");
        assert_eq!(addr.province, "ON");
    }

    #[test]
    fn test_reverse_keeps_requested_point() {
        let clicked = GeoPoint::new(45.4215, -75.6919);
        let addr = place(serde_json::json!({
            "display_name": "Parliament Hill", "lat": "45.4236", "lon": "-75.7009"
        }))
        .into_address(Some(clicked))
        .unwrap();
        assert_eq!(addr.point(), clicked);
        assert_eq!(addr.city, "");
    }

    #[test]
    fn test_service_error_is_surfaced() {
        let err = place(serde_json::json!({"error": "Unable to geocode"}))
            .into_address(Some(GeoPoint::new(0.0, 0.0)))
            .unwrap_err();
        assert!(matches!(err, ClientError::Geocode(ref m) if m == "Unable to geocode"));
    }
}
