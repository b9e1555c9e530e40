// Search form state: destination, stay dates and a guest preset
use crate::model::{GuestCount, SearchParams};
use crate::service::HotelService;
use chrono::{DateTime, Days, NaiveDate, Utc};
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

// (adults, children) combinations offered by the guest selector
pub const GUEST_PRESETS: [(u32, u32); 6] = [(1, 0), (2, 0), (2, 1), (2, 2), (3, 0), (4, 0)];

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid guest selection: {0}")]
pub struct GuestPresetError(String);

// Parses the "adults-children" form, e.g. "2-1"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuestPreset(pub GuestCount);

impl FromStr for GuestPreset {
    type Err = GuestPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GuestPresetError(s.to_string());
        let (adults, children) = s.split_once('-').ok_or_else(invalid)?;
        let adults: u32 = adults.trim().parse().map_err(|_| invalid())?;
        let children: u32 = children.trim().parse().map_err(|_| invalid())?;
        if !GUEST_PRESETS.contains(&(adults, children)) {
            return Err(invalid());
        }
        Ok(GuestPreset(GuestCount::new(adults, children)))
    }
}

impl std::fmt::Display for GuestPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let GuestCount { adults, children } = self.0;
        match children {
            0 if adults == 1 => write!(f, "1 Adult"),
            0 => write!(f, "{adults} Adults"),
            1 => write!(f, "{adults} Adults, 1 Child"),
            _ => write!(f, "{adults} Adults, {children} Children"),
        }
    }
}

// Midnight UTC, the way a bare yyyy-mm-dd date input is interpreted
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

pub fn today_and_tomorrow(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
    (today, tomorrow)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchForm {
    pub destination: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: GuestCount,
}

impl SearchForm {
    // Dates default to today and tomorrow, guests to two adults
    pub fn new(today: NaiveDate) -> Self {
        let (check_in, check_out) = today_and_tomorrow(today);
        Self {
            destination: String::new(),
            check_in: Some(check_in),
            check_out: Some(check_out),
            guests: GuestCount::default(),
        }
    }

    pub fn today() -> Self {
        Self::new(Utc::now().date_naive())
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn select_guests(&mut self, preset: &str) -> Result<(), GuestPresetError> {
        self.guests = preset.parse::<GuestPreset>()?.0;
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        !self.destination.is_empty() && self.check_in.is_some() && self.check_out.is_some()
    }

    // None while the search button would be disabled
    pub fn to_params(&self) -> Option<SearchParams> {
        if !self.can_submit() {
            return None;
        }
        Some(SearchParams {
            destination: self.destination.clone(),
            check_in: start_of_day(self.check_in?),
            check_out: start_of_day(self.check_out?),
            guests: self.guests,
            coordinates: None,
        })
    }

    // Fills the destination from the device position. Failures are logged and
    // leave the form untouched.
    pub async fn use_current_location<S>(&mut self, service: &S) -> bool
    where
        S: HotelService + ?Sized,
    {
        match service.get_current_location().await {
            Ok(coordinates) => {
                self.destination = service.get_city_from_coordinates(coordinates).await;
                true
            }
            Err(e) => {
                warn!(error = %e, "error getting location");
                false
            }
        }
    }
}
