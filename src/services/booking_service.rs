use std::num::IntErrorKind;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Local, Months, NaiveDate};
use log::{info, warn};

use crate::error::{BookingError, SelectionError};
use crate::models::booking::{BookingConfirmation, BookingRequest, PricingMode, Quote, SharingOption};
use crate::services::api_client::HostelApi;
use crate::services::pricing_service::PricingService;

pub const MIN_STAY_DAYS: u32 = 1;
pub const MAX_STAY_DAYS: u32 = 60;
/// How far ahead a move-in date may be picked.
pub const BOOKING_WINDOW_MONTHS: u32 = 2;
/// Duration recorded for monthly bookings.
pub const MONTHLY_STAY_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq)]
struct SelectedTier {
    label: String,
    monthly_price: Option<f64>,
}

/// A renter's in-progress booking choices.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    today: NaiveDate,
    tier: Option<SelectedTier>,
    displayed_price: f64,
    pricing_mode: PricingMode,
    move_in_date: Option<NaiveDate>,
    duration_days: Option<u32>,
    terms_accepted: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self::opened_on(Local::now().date_naive())
    }
}

impl Selection {
    pub fn opened_on(today: NaiveDate) -> Self {
        Self {
            today,
            tier: None,
            displayed_price: 0.0,
            pricing_mode: PricingMode::default(),
            move_in_date: None,
            duration_days: None,
            terms_accepted: false,
        }
    }

    pub fn tier(&self) -> Option<&str> {
        self.tier.as_ref().map(|t| t.label.as_str())
    }

    pub fn displayed_price(&self) -> f64 {
        self.displayed_price
    }

    pub fn pricing_mode(&self) -> PricingMode {
        self.pricing_mode
    }

    pub fn move_in_date(&self) -> Option<NaiveDate> {
        self.move_in_date
    }

    pub fn duration_days(&self) -> Option<u32> {
        self.duration_days
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    /// Earliest and latest allowed move-in dates.
    pub fn move_in_window(&self) -> (NaiveDate, NaiveDate) {
        let latest = self
            .today
            .checked_add_months(Months::new(BOOKING_WINDOW_MONTHS))
            .unwrap_or(NaiveDate::MAX);
        (self.today, latest)
    }

    pub fn select_tier(&mut self, tier: impl Into<String>, monthly_price: Option<f64>) {
        self.tier = Some(SelectedTier {
            label: tier.into(),
            monthly_price,
        });
        self.refresh_price();
    }

    pub fn select_option(&mut self, option: &SharingOption) {
        self.select_tier(option.tier.clone(), option.monthly_price);
    }

    pub fn set_pricing_mode(&mut self, mode: PricingMode) {
        self.pricing_mode = mode;
        self.refresh_price();
    }

    /// Applies the duration field. Blank input leaves the duration unset and
    /// any integer, however large, is clamped to the allowed stay length.
    /// Anything else, including trailing text, is rejected.
    pub fn set_duration_days(&mut self, raw: &str) -> Result<(), SelectionError> {
        let raw = raw.trim();
        if raw.is_empty() {
            self.duration_days = None;
            return Ok(());
        }
        let days = match raw.parse::<i64>() {
            Ok(days) => days,
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => i64::from(MAX_STAY_DAYS),
                IntErrorKind::NegOverflow => i64::from(MIN_STAY_DAYS),
                _ => return Err(SelectionError::InvalidDuration(raw.to_string())),
            },
        };
        let clamped = days.clamp(i64::from(MIN_STAY_DAYS), i64::from(MAX_STAY_DAYS));
        self.duration_days = Some(clamped as u32);
        Ok(())
    }

    pub fn set_move_in_date(&mut self, date: NaiveDate) -> Result<(), SelectionError> {
        let (earliest, latest) = self.move_in_window();
        if date < earliest || date > latest {
            return Err(SelectionError::DateOutOfRange {
                date,
                earliest,
                latest,
            });
        }
        self.move_in_date = Some(date);
        Ok(())
    }

    pub fn clear_move_in_date(&mut self) {
        self.move_in_date = None;
    }

    pub fn accept_terms(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    pub fn can_submit(&self) -> bool {
        self.missing_field().is_none()
    }

    pub fn rent_amount(&self) -> f64 {
        PricingService::rent_amount(self.displayed_price, self.pricing_mode, self.duration_days)
    }

    pub fn quote(&self, deposit: f64) -> Quote {
        let rent = self.rent_amount();
        Quote {
            displayed_price: self.displayed_price,
            rent,
            deposit,
            total: PricingService::total_amount(Some(rent), Some(deposit)),
        }
    }

    fn missing_field(&self) -> Option<&'static str> {
        if self.tier.is_none() {
            return Some("no sharing tier selected");
        }
        if self.move_in_date.is_none() {
            return Some("no move-in date chosen");
        }
        if !self.terms_accepted {
            return Some("terms and conditions not accepted");
        }
        if self.pricing_mode == PricingMode::Daily && !self.duration_days.is_some_and(|d| d > 0) {
            return Some("number of days is required for daily stays");
        }
        None
    }

    fn refresh_price(&mut self) {
        if let Some(tier) = &self.tier {
            self.displayed_price = PricingService::displayed_price(tier.monthly_price, self.pricing_mode);
        }
    }
}

/// Packages a completed selection into a booking request.
pub fn build_request(
    selection: &Selection,
    hostel_id: &str,
    deposit: f64,
) -> Result<BookingRequest, BookingError> {
    if let Some(missing) = selection.missing_field() {
        return Err(BookingError::Incomplete(missing));
    }
    let (Some(tier), Some(move_in_date)) = (selection.tier(), selection.move_in_date()) else {
        return Err(BookingError::Incomplete("selection changed while building"));
    };

    let duration_days = match selection.pricing_mode() {
        PricingMode::Daily => selection.duration_days().unwrap_or(0),
        PricingMode::Monthly => MONTHLY_STAY_DAYS,
    };
    let rent_amount = selection.rent_amount();

    Ok(BookingRequest {
        hostel_id: hostel_id.to_string(),
        tier: tier.to_string(),
        pricing_mode: selection.pricing_mode(),
        duration_days,
        move_in_date,
        rent_amount,
        deposit_amount: deposit,
        total_amount: PricingService::total_amount(Some(rent_amount), Some(deposit)),
    })
}

/// Sends booking requests to the backend.
pub struct BookingSubmitter<A> {
    api: A,
    in_flight: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<A: HostelApi> BookingSubmitter<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Sends the booking once. A call made while another is pending is
    /// refused; failed bookings are never retried here.
    pub async fn submit(&self, request: &BookingRequest) -> Result<BookingConfirmation, BookingError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(BookingError::SubmissionInProgress);
        }
        let _guard = InFlight(&self.in_flight);

        match self.api.create_booking(request).await {
            Ok(confirmation) => {
                info!(
                    "Booked {} at hostel {} (booking {})",
                    request.tier, request.hostel_id, confirmation.booking_id
                );
                Ok(confirmation)
            }
            Err(err) => {
                warn!("Booking at hostel {} failed: {}", request.hostel_id, err);
                Err(err.into())
            }
        }
    }
}
