// Display helpers for the result grid, hotel cards and the live bookings strip
use crate::booking::BookingForm;
use crate::model::{Booking, Hotel};
use serde::Serialize;

const VISIBLE_AMENITIES: usize = 4;
const MAX_STARS: u32 = 5;

pub fn pluralize(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarRating {
    pub full: u32,
    pub half: bool,
    pub empty: u32,
}

impl StarRating {
    pub fn from_rating(rating: f64) -> Self {
        let rating = rating.clamp(0.0, MAX_STARS as f64);
        Self {
            full: rating.floor() as u32,
            half: rating.fract() != 0.0,
            empty: MAX_STARS - rating.ceil() as u32,
        }
    }

    pub fn render(&self) -> String {
        let mut out = "★".repeat(self.full as usize);
        if self.half {
            out.push('⯨');
        }
        out.push_str(&"☆".repeat(self.empty as usize));
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelCard {
    pub id: String,
    pub name: String,
    pub place: String,
    pub price_label: String,
    pub stars: StarRating,
    pub rating: f64,
    pub reviews_label: String,
    pub amenities: Vec<String>,
    // "+N more" once amenities overflow the card
    pub more_amenities: Option<String>,
    pub description: String,
}

impl From<&Hotel> for HotelCard {
    fn from(hotel: &Hotel) -> Self {
        let hidden = hotel.amenities.len().saturating_sub(VISIBLE_AMENITIES);
        Self {
            id: hotel.id.clone(),
            name: hotel.name.clone(),
            place: format!("{}, {}", hotel.location.city, hotel.location.country),
            price_label: format!("${}", hotel.price_per_night),
            stars: StarRating::from_rating(hotel.rating),
            rating: hotel.rating,
            reviews_label: format!("({} reviews)", hotel.review_count),
            amenities: hotel
                .amenities
                .iter()
                .take(VISIBLE_AMENITIES)
                .cloned()
                .collect(),
            more_amenities: (hidden > 0).then(|| format!("+{hidden} more")),
            description: hotel.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsHeader {
    pub title: String,
    pub subtitle: String,
}

impl ResultsHeader {
    pub fn for_count(count: usize) -> Option<Self> {
        (count > 0).then(|| Self {
            title: "Available Hotels".to_string(),
            subtitle: format!("{} found for your search", pluralize(count, "hotel")),
        })
    }
}

// What the results area shows: nothing before the first search, a spinner
// while one is running, the empty panel, or the header over the card grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResultsPanel {
    Hidden,
    Loading { title: String, subtitle: String },
    Empty { title: String, subtitle: String },
    Results(ResultsHeader),
}

impl ResultsPanel {
    pub fn new(search_performed: bool, loading: bool, count: usize) -> Self {
        if loading {
            return Self::Loading {
                title: "Searching for hotels...".to_string(),
                subtitle: "This may take a few moments".to_string(),
            };
        }
        if !search_performed {
            return Self::Hidden;
        }
        match ResultsHeader::for_count(count) {
            Some(header) => Self::Results(header),
            None => Self::Empty {
                title: "No hotels found".to_string(),
                subtitle: "Try adjusting your search criteria or choose a different destination."
                    .to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveBookingRow {
    pub booking_id: String,
    pub hotel_name: String,
    pub time: String,
    pub price_label: String,
    pub guests_label: String,
}

impl LiveBookingRow {
    // Hotels are looked up in the current results only
    pub fn new(booking: &Booking, hotels: &[Hotel]) -> Self {
        let hotel_name = hotels
            .iter()
            .find(|hotel| hotel.id == booking.hotel_id)
            .map(|hotel| hotel.name.clone())
            .unwrap_or_else(|| "Hotel booking".to_string());
        Self {
            booking_id: booking.id.clone(),
            hotel_name,
            time: booking.created_at.format("%H:%M:%S").to_string(),
            price_label: format!("${}", booking.total_price),
            guests_label: pluralize(booking.guests.adults as usize, "guest"),
        }
    }
}

pub fn live_booking_rows<'a>(
    bookings: impl IntoIterator<Item = &'a Booking>,
    hotels: &[Hotel],
    limit: usize,
) -> Vec<LiveBookingRow> {
    bookings
        .into_iter()
        .take(limit)
        .map(|booking| LiveBookingRow::new(booking, hotels))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingSummary {
    pub heading: String,
    pub room_label: String,
    pub nights_label: String,
    pub rate_line: String,
    pub total_label: String,
    pub can_confirm: bool,
}

impl From<&BookingForm> for BookingSummary {
    fn from(form: &BookingForm) -> Self {
        let hotel = form.hotel();
        let nights = form.nights();
        let nights_text = if nights == 1 {
            "1 night".to_string()
        } else {
            format!("{nights} nights")
        };
        let has_dates = form.check_in.is_some() && form.check_out.is_some();
        let room = form.selected_room();
        let rate = room.map_or(0.0, |room| room.price_per_night);
        Self {
            heading: format!(
                "{} • {}, {}",
                hotel.name, hotel.location.city, hotel.location.country
            ),
            room_label: room.map_or_else(|| "Select room".to_string(), |r| r.room_type.clone()),
            nights_label: if has_dates {
                nights_text.clone()
            } else {
                "Select dates".to_string()
            },
            rate_line: format!("${rate} × {nights_text}"),
            total_label: format!("${}", form.total()),
            can_confirm: form.is_valid(),
        }
    }
}
