// Page state owned by the controller and shared with the live-update task
use crate::feed::RecentBookings;
use crate::model::Hotel;
use parking_lot::Mutex;
use std::sync::Arc;

pub type SharedState = Arc<Mutex<PageState>>;

#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub hotels: Vec<Hotel>,
    pub loading: bool,
    pub search_performed: bool,
    pub selected_hotel: Option<Hotel>,
    pub booking_open: bool,
    pub recent_bookings: RecentBookings,
}

impl PageState {
    pub fn new(feed_capacity: usize) -> Self {
        Self {
            recent_bookings: RecentBookings::new(feed_capacity),
            ..Self::default()
        }
    }

    pub fn shared(feed_capacity: usize) -> SharedState {
        Arc::new(Mutex::new(Self::new(feed_capacity)))
    }

    // Looks only at the current result set
    pub fn hotel(&self, id: &str) -> Option<&Hotel> {
        self.hotels.iter().find(|hotel| hotel.id == id)
    }
}
