// Booking form: room choice, stay dates, party size and guest details
use crate::model::{booking_id_at, Booking, BookingStatus, GuestCount, GuestDetails, Hotel, Room};
use crate::pricing::{nights_between, stay_total};
use crate::search_form::{start_of_day, today_and_tomorrow};
use chrono::{NaiveDate, Utc};
use std::ops::RangeInclusive;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub const ADULT_CHOICES: RangeInclusive<u32> = 1..=6;
pub const CHILD_CHOICES: RangeInclusive<u32> = 0..=4;

// User id attached to bookings made through the form
pub const CURRENT_USER_ID: &str = "current-user";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("No room selected")]
    NoRoomSelected,

    #[error("Room {0} does not belong to this hotel")]
    UnknownRoom(String),

    #[error("Stay dates are incomplete")]
    MissingDates,

    #[error("Missing required field: {0}")]
    MissingGuestDetail(&'static str),

    #[error("{field} must be within {min}..={max}, got {value}")]
    GuestCountOutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingForm {
    hotel: Hotel,
    selected_room: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    guests: GuestCount,
    pub guest: GuestDetails,
}

impl BookingForm {
    // Opens with today/tomorrow, the hotel's first room and two adults
    pub fn open(hotel: Hotel, today: NaiveDate) -> Self {
        let (check_in, check_out) = today_and_tomorrow(today);
        let selected_room = hotel.rooms.first().map(|room| room.id.clone());
        Self {
            hotel,
            selected_room,
            check_in: Some(check_in),
            check_out: Some(check_out),
            guests: GuestCount::default(),
            guest: GuestDetails::default(),
        }
    }

    pub fn hotel(&self) -> &Hotel {
        &self.hotel
    }

    pub fn selected_room(&self) -> Option<&Room> {
        self.selected_room
            .as_deref()
            .and_then(|room_id| self.hotel.room(room_id))
    }

    pub fn select_room(&mut self, room_id: &str) -> Result<&Room, BookingError> {
        let room = self
            .hotel
            .room(room_id)
            .ok_or_else(|| BookingError::UnknownRoom(room_id.to_string()))?;
        self.selected_room = Some(room.id.clone());
        Ok(room)
    }

    pub fn guests(&self) -> GuestCount {
        self.guests
    }

    pub fn set_adults(&mut self, adults: u32) -> Result<(), BookingError> {
        check_choice("adults", adults, &ADULT_CHOICES)?;
        self.guests.adults = adults;
        Ok(())
    }

    pub fn set_children(&mut self, children: u32) -> Result<(), BookingError> {
        check_choice("children", children, &CHILD_CHOICES)?;
        self.guests.children = children;
        Ok(())
    }

    // Zero until both dates are filled in; may go negative
    pub fn nights(&self) -> i64 {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => {
                nights_between(start_of_day(check_in), start_of_day(check_out))
            }
            _ => 0,
        }
    }

    pub fn total(&self) -> f64 {
        match self.selected_room() {
            Some(room) if self.check_in.is_some() && self.check_out.is_some() => {
                stay_total(self.nights(), room.price_per_night)
            }
            _ => 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), BookingError> {
        if self.selected_room().is_none() {
            return Err(BookingError::NoRoomSelected);
        }
        if self.check_in.is_none() || self.check_out.is_none() {
            return Err(BookingError::MissingDates);
        }
        if self.guest.first_name.is_empty() {
            return Err(BookingError::MissingGuestDetail("first name"));
        }
        if self.guest.last_name.is_empty() {
            return Err(BookingError::MissingGuestDetail("last name"));
        }
        if self.guest.email.is_empty() {
            return Err(BookingError::MissingGuestDetail("email"));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    // Builds the confirmed booking without the artificial delay
    pub fn confirm(&self) -> Result<Booking, BookingError> {
        self.validate()?;
        let (room, check_in, check_out) =
            match (self.selected_room(), self.check_in, self.check_out) {
                (Some(room), Some(check_in), Some(check_out)) => (room, check_in, check_out),
                (None, _, _) => return Err(BookingError::NoRoomSelected),
                _ => return Err(BookingError::MissingDates),
            };

        let now = Utc::now();
        Ok(Booking {
            id: booking_id_at(now),
            hotel_id: self.hotel.id.clone(),
            room_id: room.id.clone(),
            user_id: CURRENT_USER_ID.to_string(),
            check_in: start_of_day(check_in),
            check_out: start_of_day(check_out),
            guests: self.guests,
            total_price: self.total(),
            status: BookingStatus::Confirmed,
            created_at: now,
        })
    }

    // Simulates the booking call: validates, waits, then confirms
    pub async fn submit(&self, latency: Duration) -> Result<Booking, BookingError> {
        self.validate()?;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        let booking = self.confirm()?;
        info!(
            booking_id = %booking.id,
            hotel_id = %booking.hotel_id,
            total = booking.total_price,
            "booking confirmed"
        );
        Ok(booking)
    }
}

fn check_choice(
    field: &'static str,
    value: u32,
    choices: &RangeInclusive<u32>,
) -> Result<(), BookingError> {
    if choices.contains(&value) {
        Ok(())
    } else {
        Err(BookingError::GuestCountOutOfRange {
            field,
            value,
            min: *choices.start(),
            max: *choices.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use test_case::test_case;
    use tokio::time::Instant;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn form_for(hotel_id: &str) -> BookingForm {
        let catalog = Catalog::seed().unwrap();
        BookingForm::open(catalog.find(hotel_id).unwrap().clone(), june(1))
    }

    fn filled(mut form: BookingForm) -> BookingForm {
        form.guest = GuestDetails {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone: None,
        };
        form
    }

    #[test]
    fn test_opens_with_defaults() {
        let form = form_for("3");
        assert_eq!(form.selected_room().map(|r| r.id.as_str()), Some("3-1"));
        assert_eq!(form.check_in, Some(june(1)));
        assert_eq!(form.check_out, Some(june(2)));
        assert_eq!(form.guests(), GuestCount::new(2, 0));
        assert_eq!(form.nights(), 1);
        assert_eq!(form.total(), 320.0);
        assert!(!form.is_valid());
    }

    #[test_case(1, 5, 4, 1000.0 ; "four nights")]
    #[test_case(1, 2, 1, 250.0 ; "single night")]
    #[test_case(5, 5, 0, 0.0 ; "zero nights")]
    #[test_case(5, 3, -2, -500.0 ; "check out before check in")]
    fn test_nights_and_total(check_in: u32, check_out: u32, nights: i64, total: f64) {
        let mut form = form_for("1");
        form.check_in = Some(june(check_in));
        form.check_out = Some(june(check_out));
        assert_eq!(form.nights(), nights);
        assert_eq!(form.total(), total);
    }

    #[test]
    fn test_total_is_zero_without_dates() {
        let mut form = form_for("1");
        form.check_out = None;
        assert_eq!(form.nights(), 0);
        assert_eq!(form.total(), 0.0);
        assert_eq!(filled(form).validate(), Err(BookingError::MissingDates));
    }

    #[test]
    fn test_required_guest_details() {
        let mut form = filled(form_for("2"));
        assert!(form.is_valid());

        form.guest.email.clear();
        assert_eq!(form.validate(), Err(BookingError::MissingGuestDetail("email")));

        form.guest.email = "a@b.c".to_string();
        form.guest.first_name.clear();
        assert_eq!(
            form.validate(),
            Err(BookingError::MissingGuestDetail("first name"))
        );

        // Only emptiness is checked, whitespace counts as a value
        form.guest.first_name = "  ".to_string();
        assert!(form.is_valid());
    }

    #[test]
    fn test_room_and_guest_selection() {
        let mut form = form_for("1");
        assert!(form.select_room("1-1").is_ok());
        assert_eq!(
            form.select_room("2-1").unwrap_err(),
            BookingError::UnknownRoom("2-1".to_string())
        );

        assert!(form.set_adults(6).is_ok());
        assert!(form.set_children(4).is_ok());
        assert_eq!(form.guests(), GuestCount::new(6, 4));
        assert!(matches!(
            form.set_adults(0),
            Err(BookingError::GuestCountOutOfRange { field: "adults", .. })
        ));
        assert!(form.set_children(5).is_err());
        assert_eq!(form.guests(), GuestCount::new(6, 4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_waits_then_confirms() {
        let mut form = filled(form_for("1"));
        form.check_out = Some(june(4));
        form.set_children(1).unwrap();

        let started = Instant::now();
        let booking = form.submit(Duration::from_secs(2)).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(booking.hotel_id, "1");
        assert_eq!(booking.room_id, "1-1");
        assert_eq!(booking.user_id, CURRENT_USER_ID);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.guests, GuestCount::new(2, 1));
        assert_eq!(booking.total_price, 750.0);
        assert_eq!(booking.id, booking.created_at.timestamp_millis().to_string());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_submit_fails_without_waiting() {
        let form = form_for("1");
        let started = Instant::now();
        let result = form.submit(Duration::from_secs(2)).await;
        assert_eq!(result, Err(BookingError::MissingGuestDetail("first name")));
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
