// Recent bookings: bounded, most recent first
use crate::model::Booking;
use std::collections::VecDeque;

pub const DEFAULT_FEED_CAPACITY: usize = 5;

#[derive(Debug, Clone)]
pub struct RecentBookings {
    entries: VecDeque<Booking>,
    capacity: usize,
}

impl Default for RecentBookings {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_CAPACITY)
    }
}

impl RecentBookings {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    // Prepend, dropping the oldest entry once the list is full
    pub fn push(&mut self, booking: Booking) {
        self.entries.push_front(booking);
        self.entries.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Booking> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Booking> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn to_vec(&self) -> Vec<Booking> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BookingStatus, GuestCount};
    use chrono::{Duration, TimeZone, Utc};

    fn booking(n: i64) -> Booking {
        let created = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap() + Duration::seconds(n);
        Booking {
            id: n.to_string(),
            hotel_id: "1".to_string(),
            room_id: "1-1".to_string(),
            user_id: "current-user".to_string(),
            check_in: created,
            check_out: created + Duration::days(1),
            guests: GuestCount::default(),
            total_price: 250.0,
            status: BookingStatus::Confirmed,
            created_at: created,
        }
    }

    #[test]
    fn test_never_exceeds_capacity_and_keeps_newest_first() {
        let mut feed = RecentBookings::default();
        for n in 0..12 {
            feed.push(booking(n));
            assert!(feed.len() <= 5);
            assert_eq!(feed.latest().map(|b| b.id.as_str()), Some(n.to_string().as_str()));
        }

        let ids: Vec<&str> = feed.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["11", "10", "9", "8", "7"]);
        assert!(feed
            .to_vec()
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut feed = RecentBookings::new(0);
        feed.push(booking(1));
        feed.push(booking(2));
        assert_eq!(feed.capacity(), 1);
        assert_eq!(feed.to_vec(), vec![booking(2)]);
    }
}
