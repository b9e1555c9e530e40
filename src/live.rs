// Live updates: a timer that now and then fabricates a booking for one of the
// hotels currently on screen and announces it.

use crate::config::ConfigError;
use crate::model::{booking_id_at, Booking, BookingStatus, GuestCount, Hotel};
use crate::notify::{Notification, Notifier};
use crate::state::SharedState;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

pub const ANONYMOUS_USER_ID: &str = "anonymous-user";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveSettings {
    pub interval: Duration,
    pub probability: f64,
}

impl LiveSettings {
    pub fn new(interval: Duration, probability: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ConfigError::ProbabilityOutOfRange(probability));
        }
        Ok(Self {
            interval,
            probability,
        })
    }
}

impl Default for LiveSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            probability: 0.1,
        }
    }
}

// One night for two adults in the first room, priced at the hotel's nightly rate
pub fn synthetic_booking(hotel: &Hotel, now: DateTime<Utc>) -> Option<Booking> {
    let room = hotel.rooms.first()?;
    Some(Booking {
        id: booking_id_at(now),
        hotel_id: hotel.id.clone(),
        room_id: room.id.clone(),
        user_id: ANONYMOUS_USER_ID.to_string(),
        check_in: now,
        check_out: now + chrono::Duration::days(1),
        guests: GuestCount::new(2, 0),
        total_price: hotel.price_per_night,
        status: BookingStatus::Confirmed,
        created_at: now,
    })
}

// Rolls the dice once. Returns the booking and the name of the hotel it was made for.
// A probability that is not a positive number (NaN included) never fires.
pub fn maybe_synthesize<R: Rng>(
    hotels: &[Hotel],
    rng: &mut R,
    probability: f64,
    now: DateTime<Utc>,
) -> Option<(Booking, String)> {
    if hotels.is_empty() || probability.is_nan() || probability <= 0.0 {
        return None;
    }
    if !rng.gen_bool(probability.min(1.0)) {
        return None;
    }
    let hotel = hotels.choose(rng)?;
    synthetic_booking(hotel, now).map(|booking| (booking, hotel.name.clone()))
}

fn live_update_notification(hotel_name: &str) -> Notification {
    Notification::info("Live Update", format!("Someone just booked {hotel_name}!"))
}

// Runs a single tick against the shared page state
pub fn tick<R: Rng>(
    state: &SharedState,
    notifier: &Notifier,
    rng: &mut R,
    probability: f64,
) -> Option<Booking> {
    let (booking, hotel_name) = {
        let mut page = state.lock();
        let (booking, hotel_name) = maybe_synthesize(&page.hotels, rng, probability, Utc::now())?;
        page.recent_bookings.push(booking.clone());
        (booking, hotel_name)
    };

    info!(hotel = %hotel_name, booking_id = %booking.id, "live booking");
    notifier.notify(live_update_notification(&hotel_name));
    Some(booking)
}

// Handle to the background timer. Dropping it stops the timer. Every change
// published on the results channel restarts the interval, so the next tick
// lands one full period after the latest search.
pub struct LiveUpdates {
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl LiveUpdates {
    pub fn spawn(
        state: SharedState,
        notifier: Notifier,
        settings: LiveSettings,
        seed: Option<u64>,
        mut results: watch::Receiver<u64>,
    ) -> Self {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let period = settings.interval.max(Duration::from_millis(1));
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let handle = tokio::spawn(async move {
            // First tick after one full period, like a browser interval
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    Ok(()) = results.changed() => {
                        debug!("results changed, restarting live interval");
                        ticker.reset();
                    }
                    _ = ticker.tick() => {
                        tick(&state, &notifier, &mut rng, settings.probability);
                    }
                }
            }
            debug!("live updates stopped");
        });

        Self {
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    // Stops the timer and waits for the task to exit
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for LiveUpdates {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
