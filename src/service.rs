// Mock hotel data service
// Every call resolves against the seed catalog after an artificial delay, there is no real I/O.

use crate::catalog::Catalog;
use crate::config::DemoConfig;
use crate::model::{Coordinates, Hotel, SearchParams};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

// Reverse geocoding is not real, every position resolves to this label
pub const CURRENT_LOCATION_LABEL: &str = "Current Location";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Geolocation is not supported by this client")]
    GeolocationUnsupported,

    #[error("Unable to retrieve your location")]
    GeolocationUnavailable,

    #[error("Search failed: {0}")]
    SearchFailed(String),
}

// Stand-in for the browser geolocation capability
#[async_trait]
pub trait LocationProvider: Send + Sync + 'static {
    async fn current_position(&self) -> Result<Coordinates, ServiceError>;
}

// No geolocation capability at all
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeolocation;

#[async_trait]
impl LocationProvider for NoGeolocation {
    async fn current_position(&self) -> Result<Coordinates, ServiceError> {
        Err(ServiceError::GeolocationUnsupported)
    }
}

// Capability present but the user refused (or the lookup failed)
#[derive(Debug, Default, Clone, Copy)]
pub struct DeniedLocation;

#[async_trait]
impl LocationProvider for DeniedLocation {
    async fn current_position(&self) -> Result<Coordinates, ServiceError> {
        Err(ServiceError::GeolocationUnavailable)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, ServiceError> {
        Ok(self.0)
    }
}

#[async_trait]
pub trait HotelService: Send + Sync + 'static {
    // Hotels whose city or country matches the destination; the whole
    // catalog when nothing matches
    async fn search_hotels(&self, params: &SearchParams) -> Result<Vec<Hotel>, ServiceError>;

    async fn get_hotel_by_id(&self, id: &str) -> Option<Hotel>;

    async fn get_current_location(&self) -> Result<Coordinates, ServiceError>;

    async fn get_city_from_coordinates(&self, coordinates: Coordinates) -> String;
}

pub struct MockHotelService {
    catalog: Catalog,
    locator: Box<dyn LocationProvider>,
    search_latency: Duration,
    lookup_latency: Duration,
    geocode_latency: Duration,
    fail_next_searches: AtomicUsize,
    search_count: AtomicUsize,
}

impl MockHotelService {
    pub fn new(catalog: Catalog, config: &DemoConfig) -> Self {
        Self {
            catalog,
            locator: Box::new(NoGeolocation),
            search_latency: config.search_latency(),
            lookup_latency: config.lookup_latency(),
            geocode_latency: config.geocode_latency(),
            fail_next_searches: AtomicUsize::new(0),
            search_count: AtomicUsize::new(0),
        }
    }

    pub fn with_locator(mut self, locator: impl LocationProvider) -> Self {
        self.locator = Box::new(locator);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // Make the next `count` searches fail after their delay
    pub fn fail_next_searches(&self, count: usize) {
        self.fail_next_searches.store(count, Ordering::SeqCst);
    }

    pub fn search_count(&self) -> usize {
        self.search_count.load(Ordering::SeqCst)
    }

    async fn simulate_latency(latency: Duration) {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl HotelService for MockHotelService {
    async fn search_hotels(&self, params: &SearchParams) -> Result<Vec<Hotel>, ServiceError> {
        self.search_count.fetch_add(1, Ordering::SeqCst);
        debug!(destination = %params.destination, "searching hotels");
        Self::simulate_latency(self.search_latency).await;

        let pending_failures = self.fail_next_searches.load(Ordering::SeqCst);
        if pending_failures > 0 {
            self.fail_next_searches
                .store(pending_failures - 1, Ordering::SeqCst);
            return Err(ServiceError::SearchFailed(
                "Service temporarily unavailable".to_string(),
            ));
        }

        let hotels = self.catalog.filter_by_destination(&params.destination);
        info!(
            destination = %params.destination,
            results = hotels.len(),
            "search completed"
        );
        Ok(hotels)
    }

    async fn get_hotel_by_id(&self, id: &str) -> Option<Hotel> {
        debug!(hotel_id = id, "looking up hotel");
        Self::simulate_latency(self.lookup_latency).await;
        self.catalog.find(id).cloned()
    }

    async fn get_current_location(&self) -> Result<Coordinates, ServiceError> {
        self.locator.current_position().await
    }

    async fn get_city_from_coordinates(&self, coordinates: Coordinates) -> String {
        debug!(lat = coordinates.lat, lng = coordinates.lng, "resolving city");
        Self::simulate_latency(self.geocode_latency).await;
        CURRENT_LOCATION_LABEL.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GuestCount;
    use chrono::Utc;
    use tokio::time::Instant;

    fn params(destination: &str) -> SearchParams {
        let now = Utc::now();
        SearchParams {
            destination: destination.to_string(),
            check_in: now,
            check_out: now + chrono::Duration::days(1),
            guests: GuestCount::default(),
            coordinates: None,
        }
    }

    fn service() -> MockHotelService {
        MockHotelService::new(Catalog::seed().unwrap(), &DemoConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_waits_for_configured_latency() {
        let service = service();
        let started = Instant::now();
        let hotels = service.search_hotels(&params("Aspen")).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].name, "Mountain Lodge Retreat");
        assert_eq!(service.search_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmatched_destination_returns_every_hotel() {
        let service = service();
        let hotels = service.search_hotels(&params("Tokyo")).await.unwrap();
        assert_eq!(hotels, service.catalog().hotels().to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_by_id() {
        let service = service();
        let started = Instant::now();
        let hotel = service.get_hotel_by_id("2").await;
        assert!(started.elapsed() >= Duration::from_millis(500));
        assert_eq!(hotel.map(|h| h.name), Some("Urban Boutique Hotel".to_string()));
        assert!(service.get_hotel_by_id("99").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_injected_failures_are_consumed() {
        let service = service();
        service.fail_next_searches(1);

        let first = service.search_hotels(&params("Miami")).await;
        assert!(matches!(first, Err(ServiceError::SearchFailed(_))));

        let second = service.search_hotels(&params("Miami")).await;
        tokio_test::assert_ok!(&second);
        assert_eq!(service.search_count(), 2);
    }

    #[tokio::test]
    async fn test_geolocation_providers() {
        let service = MockHotelService::new(Catalog::seed().unwrap(), &DemoConfig::instant());
        assert_eq!(
            service.get_current_location().await,
            Err(ServiceError::GeolocationUnsupported)
        );

        let denied = MockHotelService::new(Catalog::seed().unwrap(), &DemoConfig::instant())
            .with_locator(DeniedLocation);
        assert_eq!(
            denied.get_current_location().await,
            Err(ServiceError::GeolocationUnavailable)
        );

        let here = Coordinates {
            lat: 48.8566,
            lng: 2.3522,
        };
        let fixed = MockHotelService::new(Catalog::seed().unwrap(), &DemoConfig::instant())
            .with_locator(FixedLocation(here));
        assert_eq!(fixed.get_current_location().await, Ok(here));
        assert_eq!(
            fixed.get_city_from_coordinates(here).await,
            CURRENT_LOCATION_LABEL
        );
    }
}
