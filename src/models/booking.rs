use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether rent is shown and charged per day or per month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    Daily,
    #[default]
    Monthly,
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingMode::Daily => write!(f, "daily"),
            PricingMode::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for PricingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(PricingMode::Daily),
            "monthly" | "month" => Ok(PricingMode::Monthly),
            other => Err(format!("unknown pricing mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharingOption {
    pub tier: String,
    /// `None` when the server sent no usable price.
    pub monthly_price: Option<f64>,
}

/// Running totals shown next to the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub displayed_price: f64,
    pub rent: f64,
    pub deposit: f64,
    pub total: f64,
}

/// Body of `POST /booking/newbooking`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(rename = "hostelId")]
    pub hostel_id: String,
    #[serde(rename = "sharing")]
    pub tier: String,
    #[serde(rename = "priceType")]
    pub pricing_mode: PricingMode,
    #[serde(rename = "numDays")]
    pub duration_days: u32,
    #[serde(rename = "date", with = "iso_date")]
    pub move_in_date: NaiveDate,
    #[serde(rename = "rentAmount")]
    pub rent_amount: f64,
    #[serde(rename = "deposit")]
    pub deposit_amount: f64,
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingConfirmation {
    pub booking_id: String,
}

mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_uses_backend_field_names() {
        let request = BookingRequest {
            hostel_id: "17".to_string(),
            tier: "double".to_string(),
            pricing_mode: PricingMode::Daily,
            duration_days: 10,
            move_in_date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            rent_amount: 2000.0,
            deposit_amount: 2000.0,
            total_amount: 4000.0,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "hostelId": "17",
                "sharing": "double",
                "priceType": "daily",
                "numDays": 10,
                "date": "2026-11-02",
                "rentAmount": 2000.0,
                "deposit": 2000.0,
                "totalAmount": 4000.0,
            })
        );
    }

    #[test]
    fn test_pricing_mode_parsing() {
        assert_eq!("Daily".parse::<PricingMode>(), Ok(PricingMode::Daily));
        assert_eq!("month".parse::<PricingMode>(), Ok(PricingMode::Monthly));
        assert!("weekly".parse::<PricingMode>().is_err());
        assert_eq!(PricingMode::default(), PricingMode::Monthly);
    }
}
