use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use hotel_search_demo::view::{BookingSummary, HotelCard};
use hotel_search_demo::{
    Catalog, DemoConfig, GuestDetails, HotelService, MockHotelService, SearchForm, SearchPage,
};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "hotel-search-demo", version, about = "Hotel search and booking demo")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search hotels by city or country
    Search {
        destination: String,
        /// Guest preset as adults-children, e.g. 2-1
        #[arg(long, default_value = "2-0")]
        guests: String,
    },
    /// Book the first room of a hotel for tonight
    Book {
        hotel_id: String,
        #[arg(long, default_value = "John")]
        first_name: String,
        #[arg(long, default_value = "Doe")]
        last_name: String,
        #[arg(long, default_value = "john.doe@example.com")]
        email: String,
        /// Number of nights
        #[arg(long, default_value_t = 1)]
        nights: u64,
    },
    /// Watch synthetic live bookings for a while
    Live {
        #[arg(long, default_value_t = 30)]
        seconds: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_search_demo=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = DemoConfig::from_env()?;
    let catalog = Catalog::seed().context("loading seed hotels")?;
    let service = Arc::new(MockHotelService::new(catalog, &config));
    let page = SearchPage::new(service.clone(), config)?;

    let mut toasts = page.notifier().subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(toast) = toasts.recv().await {
            println!("[{}] {}", toast.title, toast.description);
        }
    });

    match cli.command {
        Command::Search {
            destination,
            guests,
        } => {
            let mut form = SearchForm::today().with_destination(destination);
            form.select_guests(&guests)?;
            if page.submit_search(&form).await.is_none() {
                bail!("search did not complete");
            }
            if let Some(header) = page.results_header() {
                println!("{}: {}", header.title, header.subtitle);
            }
            for card in page.hotel_cards() {
                print_card(&card);
            }
        }
        Command::Book {
            hotel_id,
            first_name,
            last_name,
            email,
            nights,
        } => {
            let hotel = service
                .get_hotel_by_id(&hotel_id)
                .await
                .ok_or_else(|| anyhow!("no hotel with id {hotel_id}"))?;
            let mut form = page.book_now(&hotel);
            form.check_out = form
                .check_in
                .and_then(|day| day.checked_add_days(chrono::Days::new(nights)));
            form.guest = GuestDetails {
                first_name,
                last_name,
                email,
                phone: None,
            };

            let summary = BookingSummary::from(&form);
            println!("{}", summary.heading);
            println!(
                "{} | {} | total {}",
                summary.room_label, summary.rate_line, summary.total_label
            );

            let booking = page.submit_booking(&form).await?;
            println!("booking {} confirmed", booking.id);
        }
        Command::Live { seconds } => {
            let mut form = SearchForm::today().with_destination("usa");
            form.select_guests("2-0")?;
            page.submit_search(&form).await;

            let live = page.start_live_updates();
            tokio::time::sleep(Duration::from_secs(seconds)).await;
            live.shutdown().await;

            for row in page.live_rows() {
                println!(
                    "{} at {}: {} ({})",
                    row.hotel_name, row.time, row.price_label, row.guests_label
                );
            }
        }
    }

    // Dropping the page closes the notification channel; the printer exits
    // once it has drained what was already sent
    drop(page);
    let _ = printer.await;
    Ok(())
}

fn print_card(card: &HotelCard) {
    println!("- {} [{}] {}", card.name, card.id, card.place);
    println!(
        "  {} {} {}  {} / night",
        card.stars.render(),
        card.rating,
        card.reviews_label,
        card.price_label
    );
    let mut amenities = card.amenities.join(", ");
    if let Some(more) = &card.more_amenities {
        amenities.push_str(&format!(" {more}"));
    }
    println!("  {amenities}");
}
