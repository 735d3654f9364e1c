//! Location picker
//!
//! Map-click driven address selection. On start the picker centres on the
//! device position (or the configured fallback) and resolves it; every
//! later click resolves the clicked point. Lookups are sequenced so the
//! address shown always belongs to the most recent click, whatever order
//! the responses arrive in.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::config::{DEFAULT_POSITION, GeoPoint};
use crate::geocode::{Address, Geocoder};
use crate::sequence::RequestSequencer;
use crate::{ClientError, ClientResult};

/// Label shown when a point could not be resolved
pub const ADDRESS_NOT_FOUND: &str = "Address not found";

/// Device geolocation
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self) -> ClientResult<GeoPoint>;
}

/// Always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub GeoPoint);

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(&self) -> ClientResult<GeoPoint> {
        Ok(self.0)
    }
}

/// No geolocation available (denied or unsupported)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPosition;

#[async_trait]
impl PositionSource for NoPosition {
    async fn current_position(&self) -> ClientResult<GeoPoint> {
        Err(ClientError::Geocode("geolocation unavailable".into()))
    }
}

/// The point the user picked and what it resolved to
#[derive(Debug, Clone, PartialEq)]
pub struct PickedLocation {
    pub point: GeoPoint,
    /// `None` while the lookup is pending or after it failed
    pub address: Option<Address>,
}

impl PickedLocation {
    pub fn label(&self) -> &str {
        self.address
            .as_ref()
            .map(|a| a.display_name.as_str())
            .unwrap_or(ADDRESS_NOT_FOUND)
    }
}

/// Picker state as shown on the map
#[derive(Debug, Clone, PartialEq)]
pub struct PickerState {
    pub center: GeoPoint,
    pub device_position: Option<GeoPoint>,
    pub selection: Option<PickedLocation>,
    pub loading: bool,
}

/// Outcome of a selection
#[derive(Debug, Clone, PartialEq)]
pub enum PickUpdate {
    /// The lookup finished and is what the picker now shows
    Applied(PickedLocation),
    /// A newer click superseded this one; its lookup was dropped
    Stale,
}

pub struct LocationPicker<G: Geocoder, P: PositionSource = NoPosition> {
    geocoder: G,
    position: P,
    fallback: GeoPoint,
    state: watch::Sender<PickerState>,
    sequencer: RequestSequencer,
}

impl<G: Geocoder, P: PositionSource> LocationPicker<G, P> {
    pub fn new(geocoder: G, position: P) -> Self {
        let (state, _) = watch::channel(PickerState {
            center: DEFAULT_POSITION,
            device_position: None,
            selection: None,
            loading: false,
        });
        Self {
            geocoder,
            position,
            fallback: DEFAULT_POSITION,
            state,
            sequencer: RequestSequencer::new(),
        }
    }

    /// Centre used when the device position is unavailable
    pub fn with_fallback(self, fallback: GeoPoint) -> Self {
        self.state.send_modify(|s| s.center = fallback);
        Self { fallback, ..self }
    }

    pub fn state(&self) -> PickerState {
        self.state.borrow().clone()
    }

    pub fn selection(&self) -> Option<PickedLocation> {
        self.state.borrow().selection.clone()
    }

    /// Selections are published here (the parent form listens)
    pub fn subscribe(&self) -> watch::Receiver<PickerState> {
        self.state.subscribe()
    }

    /// Locates the device, centres on it (or the fallback) and resolves it
    pub async fn init(&self) -> PickUpdate {
        let center = match self.position.current_position().await {
            Ok(point) => {
                self.state.send_modify(|s| s.device_position = Some(point));
                point
            }
            Err(e) => {
                tracing::debug!("Device position unavailable, using fallback: {}", e);
                self.fallback
            }
        };
        self.select(center).await
    }

    /// Map click
    pub async fn select(&self, point: GeoPoint) -> PickUpdate {
        let ticket = self.sequencer.begin();
        self.state.send_modify(|s| {
            s.center = point;
            s.selection = Some(PickedLocation {
                point,
                address: None,
            });
            s.loading = true;
        });

        let result = self.geocoder.reverse(point).await;
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(%ticket, "Dropping stale geocode response");
            return PickUpdate::Stale;
        }

        let address = match result {
            Ok(address) => Some(address),
            Err(e) => {
                tracing::warn!(lat = point.latitude, lng = point.longitude, "Reverse geocoding failed: {}", e);
                None
            }
        };
        let picked = PickedLocation { point, address };
        self.state.send_modify(|s| {
            s.selection = Some(picked.clone());
            s.loading = false;
        });
        PickUpdate::Applied(picked)
    }

    /// Re-selects the device position, if one was obtained
    pub async fn use_current_location(&self) -> Option<PickUpdate> {
        let device = self.state.borrow().device_position;
        match device {
            Some(point) => Some(self.select(point).await),
            None => None,
        }
    }

    /// Forward geocoding for the search box
    pub async fn search(&self, query: &str) -> ClientResult<Vec<Address>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.geocoder.search(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Resolves every point to "lat,lng"; latitudes above 80 fail, and the
    /// integer part of the longitude is a delay in milliseconds.
    #[derive(Default)]
    struct FakeGeocoder {
        calls: Mutex<Vec<GeoPoint>>,
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn reverse(&self, point: GeoPoint) -> ClientResult<Address> {
            self.calls.lock().unwrap().push(point);
            tokio::time::sleep(Duration::from_millis(point.longitude.abs() as u64)).await;
            if point.latitude > 80.0 {
                return Err(ClientError::Geocode("Unable to geocode".into()));
            }
            Ok(Address {
                latitude: point.latitude,
                longitude: point.longitude,
                display_name: format!("{},{}", point.latitude, point.longitude),
                city: "Ottawa".into(),
                province: "Ontario".into(),
            })
        }

        async fn search(&self, query: &str) -> ClientResult<Vec<Address>> {
            Ok(vec![Address {
                latitude: 1.0,
                longitude: 2.0,
                display_name: query.to_string(),
                city: String::new(),
                province: String::new(),
            }])
        }
    }

    #[tokio::test]
    async fn test_init_uses_device_position() {
        let picker = LocationPicker::new(FakeGeocoder::default(), FixedPosition(GeoPoint::new(10.0, 1.0)));
        let update = picker.init().await;
        let PickUpdate::Applied(picked) = update else {
            panic!("expected applied update");
        };
        assert_eq!(picked.label(), "10,1");
        let state = picker.state();
        assert_eq!(state.device_position, Some(GeoPoint::new(10.0, 1.0)));
        assert_eq!(state.center, GeoPoint::new(10.0, 1.0));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_init_falls_back_without_position() {
        let picker = LocationPicker::new(FakeGeocoder::default(), NoPosition);
        picker.init().await;
        assert_eq!(picker.state().center, DEFAULT_POSITION);
        assert_eq!(picker.selection().unwrap().point, DEFAULT_POSITION);
        assert!(picker.use_current_location().await.is_none());
    }

    #[tokio::test]
    async fn test_failed_lookup_keeps_point() {
        let picker = LocationPicker::new(FakeGeocoder::default(), NoPosition);
        let update = picker.select(GeoPoint::new(85.0, 1.0)).await;
        let PickUpdate::Applied(picked) = update else {
            panic!("expected applied update");
        };
        assert!(picked.address.is_none());
        assert_eq!(picked.label(), ADDRESS_NOT_FOUND);
        assert_eq!(picked.point, GeoPoint::new(85.0, 1.0));
    }

    #[tokio::test]
    async fn test_last_click_wins_over_slow_response() {
        let picker = LocationPicker::new(FakeGeocoder::default(), NoPosition);
        // first click resolves slowly, second quickly
        let (first, second) = tokio::join!(
            picker.select(GeoPoint::new(1.0, 150.0)),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                picker.select(GeoPoint::new(2.0, 1.0)).await
            }
        );
        assert_eq!(first, PickUpdate::Stale);
        assert!(matches!(second, PickUpdate::Applied(_)));
        assert_eq!(picker.selection().unwrap().label(), "2,1");
        assert_eq!(picker.geocoder.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_search_skips_service() {
        let picker = LocationPicker::new(FakeGeocoder::default(), NoPosition);
        assert!(picker.search("  ").await.unwrap().is_empty());
        assert_eq!(picker.search("Bank St").await.unwrap()[0].display_name, "Bank St");
    }
}
