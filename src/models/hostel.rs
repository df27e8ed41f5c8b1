use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use super::booking::SharingOption;
use super::catalog::RuleCatalog;
use super::image::resolve_image_url;
use super::lenient;

/// Hostel record as the backend returns it from `GET /hostel/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HostelRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub hostel_id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub hostel_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub hostel_info: String,
    #[serde(deserialize_with = "lenient::string")]
    pub pg_type: String,
    #[serde(deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(deserialize_with = "lenient::string")]
    pub area: String,
    #[serde(deserialize_with = "lenient::string")]
    pub city: String,
    #[serde(deserialize_with = "lenient::string")]
    pub state: String,
    #[serde(deserialize_with = "lenient::string")]
    pub pincode: String,
    #[serde(deserialize_with = "lenient::amount")]
    pub deposit: Option<f64>,
    /// Tier label to monthly price, in server order.
    #[serde(deserialize_with = "lenient::object")]
    pub sharing: Map<String, Value>,
    #[serde(deserialize_with = "lenient::object")]
    pub amenities: Map<String, Value>,
    #[serde(deserialize_with = "lenient::strings")]
    pub rules: Vec<String>,
    #[serde(deserialize_with = "lenient::strings")]
    pub images: Vec<String>,
    #[serde(rename = "foodMenu", deserialize_with = "lenient::object")]
    pub food_menu: Map<String, Value>,
}

/// Response wrapper the backend puts around records.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub success: Option<bool>,
    pub ok: Option<bool>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn rejected(&self) -> bool {
        self.success == Some(false) || self.ok == Some(false)
    }
}

/// What the booking dialog needs to know about a hostel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hostel {
    pub id: String,
    pub name: String,
    pub address: String,
    pub deposit: f64,
    pub sharing_options: Vec<SharingOption>,
    /// Backend keys of the amenities that are switched on.
    pub amenities: Vec<String>,
    pub rules: Vec<String>,
    pub images: Vec<String>,
}

impl Hostel {
    pub fn from_record(id: &str, record: &HostelRecord, rules: &RuleCatalog, base_url: &Url) -> Self {
        let sharing_options = record
            .sharing
            .iter()
            .map(|(tier, price)| SharingOption {
                tier: tier.clone(),
                monthly_price: lenient::number(price),
            })
            .collect();

        let amenities = record
            .amenities
            .iter()
            .filter(|(_, enabled)| lenient::truthy(enabled))
            .map(|(key, _)| key.clone())
            .collect();

        let rules = if record.rules.is_empty() {
            rules.listing_fallback.clone()
        } else {
            record.rules.clone()
        };

        Self {
            id: id.to_string(),
            name: record.hostel_name.clone(),
            address: record.address.clone(),
            deposit: record.deposit.unwrap_or(0.0),
            sharing_options,
            amenities,
            rules,
            images: record
                .images
                .iter()
                .map(|reference| resolve_image_url(base_url, reference))
                .collect(),
        }
    }

    pub fn option(&self, tier: &str) -> Option<&SharingOption> {
        self.sharing_options.iter().find(|o| o.tier == tier)
    }
}
