use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use hlopg_client::error::{ApiError, BookingError, ConfigError, ProfileError, SelectionError};
use hlopg_client::models::booking::PricingMode;
use hlopg_client::models::catalog::{AmenityCatalog, RuleCatalog};
use hlopg_client::models::hostel::Hostel;
use hlopg_client::services::booking_service::{build_request, BookingSubmitter, Selection};
use hlopg_client::services::hostel_service::load_listing;
use hlopg_client::services::image_service::ImageService;
use hlopg_client::services::pricing_service::PricingService;
use hlopg_client::services::profile_service::ProfileService;
use hlopg_client::{ApiClient, ApiConfig};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error("Hostel {hostel} has no {tier} sharing")]
    UnknownTier { hostel: String, tier: String },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Book PG stays and edit PG listings from the terminal.
///
/// Settings come from the environment: `HLOPG_BASE_URL`, `HLOPG_TOKEN` and
/// `HLOPG_TIMEOUT_SECS`.
#[derive(Debug, Parser)]
#[command(name = "hlopg", version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show a hostel's sharing options with daily and monthly prices
    Show { hostel_id: String },
    /// Price a stay without booking it
    Quote(BookingArgs),
    /// Book a stay
    Book {
        #[command(flatten)]
        booking: BookingArgs,
        /// Accept the terms and conditions
        #[arg(long)]
        accept_terms: bool,
    },
    /// Print the editable profile of a PG as JSON
    Draft { hostel_id: String },
    /// Edit a PG profile and save it
    Update(UpdateArgs),
}

#[derive(Debug, Args)]
struct BookingArgs {
    hostel_id: String,
    /// Sharing tier, e.g. single, double, triple
    #[arg(long)]
    tier: String,
    /// daily or monthly
    #[arg(long, default_value = "monthly")]
    mode: PricingMode,
    /// Number of days, for daily stays
    #[arg(long)]
    days: Option<String>,
    /// Move-in date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    hostel_id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    info: Option<String>,
    /// Image file to attach (repeatable)
    #[arg(long = "image")]
    images: Vec<PathBuf>,
    /// Amenity to switch on or off by display name (repeatable)
    #[arg(long = "amenity")]
    amenities: Vec<String>,
    /// Rule to switch on or off (repeatable)
    #[arg(long = "rule")]
    rules: Vec<String>,
}

impl Cli {
    pub async fn handle() -> Result<(), CliError> {
        let cli = Self::parse();
        let config = ApiConfig::from_env()?;
        let base_url = config.base_url.clone();
        let client = ApiClient::new(config)?;

        match cli.command {
            Commands::Show { hostel_id } => {
                let hostel = load_listing(&client, &hostel_id, &RuleCatalog::default(), &base_url).await?;
                print_listing(&hostel);
            }

            Commands::Quote(args) => {
                let hostel = load_listing(&client, &args.hostel_id, &RuleCatalog::default(), &base_url).await?;
                let selection = select(&hostel, &args, false)?;
                let quote = selection.quote(hostel.deposit);
                println!("{} ({}) at {}", quote_line(&selection), selection.pricing_mode(), hostel.name);
                println!("Rent:    {}", quote.rent);
                println!("Deposit: {}", quote.deposit);
                println!("Total:   {}", quote.total);
            }

            Commands::Book {
                booking,
                accept_terms,
            } => {
                let hostel = load_listing(&client, &booking.hostel_id, &RuleCatalog::default(), &base_url).await?;
                let selection = select(&hostel, &booking, accept_terms)?;
                let request = build_request(&selection, &hostel.id, hostel.deposit)?;
                let submitter = BookingSubmitter::new(client);
                let confirmation = submitter.submit(&request).await?;
                println!(
                    "Booking successful! Booking ID: {} (total {})",
                    confirmation.booking_id, request.total_amount
                );
            }

            Commands::Draft { hostel_id } => {
                let service = profile_service(client, base_url);
                let draft = service.load(&hostel_id).await?;
                println!("{}", serde_json::to_string_pretty(&draft)?);
            }

            Commands::Update(args) => {
                let service = profile_service(client, base_url);
                let mut draft = service.load(&args.hostel_id).await?;

                if let Some(name) = args.name {
                    draft.name = name;
                }
                if let Some(info) = args.info {
                    draft.description = info;
                }
                for amenity in &args.amenities {
                    draft.toggle_amenity(amenity);
                }
                for rule in &args.rules {
                    draft.add_custom_rule(rule);
                    draft.toggle_rule(rule);
                }
                for image in ImageService::load_all(&args.images).await {
                    draft.attach_image(image);
                }

                service.save(&args.hostel_id, &draft).await?;
                println!("PG {} updated", args.hostel_id);
            }
        };

        Ok(())
    }
}

fn profile_service(client: ApiClient, base_url: url::Url) -> ProfileService<ApiClient> {
    ProfileService::new(client, base_url, AmenityCatalog::default(), RuleCatalog::default())
}

fn select(hostel: &Hostel, args: &BookingArgs, accept_terms: bool) -> Result<Selection, CliError> {
    let option = hostel.option(&args.tier).ok_or_else(|| CliError::UnknownTier {
        hostel: hostel.id.clone(),
        tier: args.tier.clone(),
    })?;

    let mut selection = Selection::default();
    selection.set_pricing_mode(args.mode);
    selection.select_option(option);
    if let Some(days) = &args.days {
        selection.set_duration_days(days)?;
    }
    if let Some(date) = args.date {
        selection.set_move_in_date(date)?;
    }
    selection.accept_terms(accept_terms);
    Ok(selection)
}

fn quote_line(selection: &Selection) -> String {
    match selection.duration_days() {
        Some(days) if selection.pricing_mode() == PricingMode::Daily => format!(
            "{} sharing, {} x {} days",
            selection.tier().unwrap_or_default(),
            selection.displayed_price(),
            days
        ),
        _ => format!(
            "{} sharing, {}",
            selection.tier().unwrap_or_default(),
            selection.displayed_price()
        ),
    }
}

fn print_listing(hostel: &Hostel) {
    println!("{} ({})", hostel.name, hostel.id);
    if !hostel.address.is_empty() {
        println!("{}", hostel.address);
    }
    println!("Deposit: {}", hostel.deposit);
    for option in &hostel.sharing_options {
        println!(
            "  {:<10} {:>8}/month {:>6}/day",
            option.tier,
            PricingService::displayed_price(option.monthly_price, PricingMode::Monthly),
            PricingService::displayed_price(option.monthly_price, PricingMode::Daily),
        );
    }
    if !hostel.amenities.is_empty() {
        println!("Amenities: {}", hostel.amenities.join(", "));
    }
    println!("Rules: {}", hostel.rules.join(", "));
}
