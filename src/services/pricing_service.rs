use crate::models::booking::PricingMode;

/// Days a monthly price is spread over when shown per day.
pub const DAYS_PER_MONTH: f64 = 30.0;

pub struct PricingService;

impl PricingService {
    /// Price shown for a tier under the given mode. Missing prices show as 0.
    pub fn displayed_price(monthly_price: Option<f64>, mode: PricingMode) -> f64 {
        let Some(price) = monthly_price else {
            return 0.0;
        };
        match mode {
            PricingMode::Monthly => price,
            PricingMode::Daily => (price / DAYS_PER_MONTH).round(),
        }
    }

    /// Rent charged for the stay. An unset duration counts as zero days.
    pub fn rent_amount(displayed_price: f64, mode: PricingMode, duration_days: Option<u32>) -> f64 {
        match mode {
            PricingMode::Monthly => displayed_price,
            PricingMode::Daily => displayed_price * f64::from(duration_days.unwrap_or(0)),
        }
    }

    pub fn total_amount(rent: Option<f64>, deposit: Option<f64>) -> f64 {
        rent.unwrap_or(0.0) + deposit.unwrap_or(0.0)
    }
}
