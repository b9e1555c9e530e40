// Seed catalog: the fixed set of hotels standing in for a real backend
use crate::model::Hotel;
use thiserror::Error;

const SEED_JSON: &str = include_str!("../data/hotels.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Seed data parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Seed data is empty")]
    Empty,

    #[error("Hotel {0} has no rooms")]
    HotelWithoutRooms(String),
}

#[derive(Debug, Clone)]
pub struct Catalog {
    hotels: Vec<Hotel>,
}

impl Catalog {
    // Parse a catalog from a JSON array of hotels
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let hotels: Vec<Hotel> = serde_json::from_str(json)?;
        Self::from_hotels(hotels)
    }

    // Every hotel must carry at least one room, live updates book the first one
    pub fn from_hotels(hotels: Vec<Hotel>) -> Result<Self, CatalogError> {
        if hotels.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(hotel) = hotels.iter().find(|h| h.rooms.is_empty()) {
            return Err(CatalogError::HotelWithoutRooms(hotel.id.clone()));
        }
        Ok(Self { hotels })
    }

    pub fn seed() -> Result<Self, CatalogError> {
        Self::from_json(SEED_JSON)
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn find(&self, id: &str) -> Option<&Hotel> {
        self.hotels.iter().find(|hotel| hotel.id == id)
    }

    // Hotels matching the destination; falls back to the whole catalog when
    // nothing matches so a search always shows something.
    pub fn filter_by_destination(&self, destination: &str) -> Vec<Hotel> {
        let filtered: Vec<Hotel> = self
            .hotels
            .iter()
            .filter(|hotel| hotel.matches_destination(destination))
            .cloned()
            .collect();

        if filtered.is_empty() {
            self.hotels.clone()
        } else {
            filtered
        }
    }
}
