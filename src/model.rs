// Plain records shared by the catalog, the service and the page controller
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub address: String,
    pub coordinates: Coordinates,
}

// Seed hotels are created once and never mutated
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub location: Location,
    pub rating: f64,
    pub review_count: u32,
    pub images: Vec<String>,
    pub price_per_night: f64,
    pub currency: String,
    pub amenities: Vec<String>,
    pub description: String,
    pub rooms: Vec<Room>,
}

impl Hotel {
    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == room_id)
    }

    // City or country contains the query, ignoring case
    pub fn matches_destination(&self, destination: &str) -> bool {
        let query = destination.to_lowercase();
        self.location.city.to_lowercase().contains(&query)
            || self.location.country.to_lowercase().contains(&query)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub max_guests: u32,
    pub price_per_night: f64,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    // Display only, bookings never decrement it
    pub available_rooms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct GuestCount {
    pub adults: u32,
    pub children: u32,
}

impl GuestCount {
    pub fn new(adults: u32, children: u32) -> Self {
        Self { adults, children }
    }

    pub fn total(&self) -> u32 {
        self.adults + self.children
    }
}

impl Default for GuestCount {
    fn default() -> Self {
        Self {
            adults: 2,
            children: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub destination: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guests: GuestCount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

// The id is a millisecond timestamp, so two bookings created in the same
// millisecond share it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub hotel_id: String,
    pub room_id: String,
    pub user_id: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guests: GuestCount,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

pub fn booking_id_at(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_booking_serializes_with_lowercase_status() {
        let created = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let booking = Booking {
            id: booking_id_at(created),
            hotel_id: "1".to_string(),
            room_id: "1-1".to_string(),
            user_id: "current-user".to_string(),
            check_in: created,
            check_out: created + chrono::Duration::days(1),
            guests: GuestCount::default(),
            total_price: 250.0,
            status: BookingStatus::Confirmed,
            created_at: created,
        };

        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["status"], "confirmed");
        assert_eq!(json["hotelId"], "1");
        assert_eq!(json["id"], created.timestamp_millis().to_string());
    }

    #[test]
    fn test_guest_count_defaults_to_two_adults() {
        let guests = GuestCount::default();
        assert_eq!(guests, GuestCount::new(2, 0));
        assert_eq!(guests.total(), 2);
    }
}
