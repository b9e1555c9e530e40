// Page controller: owns the page state and wires search, booking and live updates together
use crate::booking::{BookingError, BookingForm};
use crate::config::{ConfigError, DemoConfig};
use crate::live::{LiveSettings, LiveUpdates};
use crate::model::{Booking, Hotel, SearchParams};
use crate::notify::{Notification, Notifier};
use crate::search_form::SearchForm;
use crate::service::HotelService;
use crate::state::{PageState, SharedState};
use crate::view::{
    live_booking_rows, pluralize, HotelCard, LiveBookingRow, ResultsHeader, ResultsPanel,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

pub struct SearchPage<S: HotelService> {
    service: Arc<S>,
    state: SharedState,
    notifier: Notifier,
    config: DemoConfig,
    // Bumped whenever a search replaces the result list
    results: watch::Sender<u64>,
}

impl<S: HotelService> SearchPage<S> {
    pub fn new(service: Arc<S>, config: DemoConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (results, _) = watch::channel(0);
        Ok(Self {
            service,
            state: PageState::shared(config.feed_capacity),
            notifier: Notifier::new(),
            config,
            results,
        })
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    // Point-in-time copy of the page state
    pub fn snapshot(&self) -> PageState {
        self.state.lock().clone()
    }

    pub fn hotels(&self) -> Vec<Hotel> {
        self.state.lock().hotels.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn recent_bookings(&self) -> Vec<Booking> {
        self.state.lock().recent_bookings.to_vec()
    }

    pub fn search_form(&self) -> SearchForm {
        SearchForm::today()
    }

    // Runs a search and replaces the result list. Failures only surface as a
    // notification; the previous results stay on screen.
    pub async fn search(&self, params: &SearchParams) -> Option<usize> {
        {
            let mut page = self.state.lock();
            page.loading = true;
            page.search_performed = true;
        }

        let outcome = self.service.search_hotels(params).await;

        let found = match outcome {
            Ok(hotels) => {
                let count = hotels.len();
                self.state.lock().hotels = hotels;
                self.results.send_modify(|version| *version += 1);
                if count == 0 {
                    self.notifier.notify(Notification::destructive(
                        "No hotels found",
                        "Try adjusting your search criteria or destination.",
                    ));
                } else {
                    self.notifier.notify(Notification::info(
                        "Search completed",
                        format!("Found {} for your stay.", pluralize(count, "hotel")),
                    ));
                }
                Some(count)
            }
            Err(e) => {
                warn!(error = %e, destination = %params.destination, "search failed");
                self.notifier.notify(Notification::destructive(
                    "Search failed",
                    "There was an error searching for hotels. Please try again.",
                ));
                None
            }
        };

        self.state.lock().loading = false;
        found
    }

    // Submits the form if it is complete; a disabled search does nothing
    pub async fn submit_search(&self, form: &SearchForm) -> Option<usize> {
        let params = form.to_params()?;
        self.search(&params).await
    }

    pub fn book_now(&self, hotel: &Hotel) -> BookingForm {
        self.book_now_on(hotel, Utc::now().date_naive())
    }

    pub fn book_now_on(&self, hotel: &Hotel, today: NaiveDate) -> BookingForm {
        let mut page = self.state.lock();
        page.selected_hotel = Some(hotel.clone());
        page.booking_open = true;
        BookingForm::open(hotel.clone(), today)
    }

    pub fn close_booking(&self) {
        self.state.lock().booking_open = false;
    }

    pub fn complete_booking(&self, booking: Booking) {
        let hotel_name = {
            let mut page = self.state.lock();
            page.recent_bookings.push(booking.clone());
            page.selected_hotel
                .as_ref()
                .map(|hotel| hotel.name.clone())
                .unwrap_or_default()
        };

        info!(booking_id = %booking.id, hotel = %hotel_name, "booking completed");
        self.notifier.notify(Notification::info(
            "Booking confirmed!",
            format!("Your reservation at {hotel_name} has been confirmed."),
        ));
    }

    // Submit, record and close. The modal stays open when the form is invalid.
    pub async fn submit_booking(&self, form: &BookingForm) -> Result<Booking, BookingError> {
        let booking = form.submit(self.config.booking_latency()).await?;
        self.complete_booking(booking.clone());
        self.close_booking();
        Ok(booking)
    }

    pub fn start_live_updates(&self) -> LiveUpdates {
        let settings = LiveSettings {
            interval: self.config.live_interval(),
            probability: self.config.live_probability,
        };
        LiveUpdates::spawn(
            self.state.clone(),
            self.notifier.clone(),
            settings,
            self.config.rng_seed,
            self.results.subscribe(),
        )
    }

    pub fn results_header(&self) -> Option<ResultsHeader> {
        let page = self.state.lock();
        if page.loading {
            return None;
        }
        ResultsHeader::for_count(page.hotels.len())
    }

    pub fn results_panel(&self) -> ResultsPanel {
        let page = self.state.lock();
        ResultsPanel::new(page.search_performed, page.loading, page.hotels.len())
    }

    pub fn hotel_cards(&self) -> Vec<HotelCard> {
        self.state.lock().hotels.iter().map(HotelCard::from).collect()
    }

    pub fn live_rows(&self) -> Vec<LiveBookingRow> {
        let page = self.state.lock();
        live_booking_rows(
            page.recent_bookings.iter(),
            &page.hotels,
            self.config.feed_display,
        )
    }
}
