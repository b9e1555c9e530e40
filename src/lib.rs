// Hotel search and booking demo backed by an in-memory mock service

pub mod booking;
pub mod catalog;
pub mod config;
pub mod feed;
pub mod live;
pub mod model;
pub mod notify;
pub mod page;
pub mod pricing;
pub mod search_form;
pub mod service;
pub mod state;
pub mod view;

// Re-export key types for convenience
pub use booking::{BookingError, BookingForm};
pub use catalog::{Catalog, CatalogError};
pub use config::{ConfigError, DemoConfig};
pub use feed::RecentBookings;
pub use live::{LiveSettings, LiveUpdates};
pub use model::{
    Booking, BookingStatus, Coordinates, GuestCount, GuestDetails, Hotel, Location, Room,
    SearchParams,
};
pub use notify::{Notification, Notifier, Variant};
pub use page::SearchPage;
pub use pricing::{nights_between, stay_total};
pub use search_form::SearchForm;
pub use service::{
    DeniedLocation, FixedLocation, HotelService, LocationProvider, MockHotelService,
    NoGeolocation, ServiceError,
};
