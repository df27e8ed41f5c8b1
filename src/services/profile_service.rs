use std::sync::LazyLock;

use log::{debug, info, warn};
use regex::Regex;
use serde_json::{Map, Value};
use url::Url;

use crate::error::{DraftError, ProfileError};
use crate::models::catalog::{AmenityCatalog, RuleCatalog};
use crate::models::hostel::HostelRecord;
use crate::models::image::{resolve_image_url, ImageRef};
use crate::models::lenient;
use crate::models::profile::{Day, FoodMenu, Location, Meal, PgDraft, PgType, SharingRow, UpdatePayload};
use crate::services::api_client::HostelApi;

/// Indian postal PIN: six digits, not starting with zero.
static PINCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]{5}$").expect("pincode pattern is valid"));

/// Builds an editable draft from a server record, filling every field the
/// editor needs even when the record leaves it out.
pub fn merge_profile(
    record: &HostelRecord,
    amenities: &AmenityCatalog,
    rules: &RuleCatalog,
    base_url: &Url,
) -> PgDraft {
    let mut sharing: Vec<SharingRow> = record
        .sharing
        .iter()
        .map(|(tier, price)| SharingRow {
            tier: tier.clone(),
            price: lenient::number(price),
        })
        .collect();
    if sharing.is_empty() {
        sharing.push(SharingRow::default());
    }

    let selected_amenities = record
        .amenities
        .iter()
        .filter(|(_, enabled)| lenient::truthy(enabled))
        .filter_map(|(key, _)| match amenities.name_for(key) {
            Some(name) => Some(name.to_string()),
            None => {
                debug!("Dropping unknown amenity key {:?}", key);
                None
            }
        })
        .collect();

    let mut selected_rules: Vec<String> = Vec::new();
    for rule in &record.rules {
        if !selected_rules.contains(rule) {
            selected_rules.push(rule.clone());
        }
    }
    let mut available_rules = rules.defaults.clone();
    for rule in &selected_rules {
        if !available_rules.contains(rule) {
            available_rules.push(rule.clone());
        }
    }

    let images = record
        .images
        .iter()
        .map(|reference| ImageRef::Existing {
            reference: reference.clone(),
            url: resolve_image_url(base_url, reference),
        })
        .collect();

    PgDraft {
        name: record.hostel_name.clone(),
        description: record.hostel_info.clone(),
        pg_type: PgType::parse(&record.pg_type),
        location: Location {
            address: record.address.clone(),
            area: record.area.clone(),
            city: record.city.clone(),
            state: record.state.clone(),
            pincode: record.pincode.clone(),
        },
        sharing,
        images,
        food_menu: merge_food_menu(&record.food_menu),
        rules: selected_rules,
        available_rules,
        amenities: selected_amenities,
    }
}

/// Accepts either meal-major (`{breakfast: {monday: ..}}`) or day-major
/// (`{monday: {breakfast: ..}}`) menus. Missing cells are empty.
pub fn merge_food_menu(raw: &Map<String, Value>) -> FoodMenu {
    let mut menu = FoodMenu::default();
    for (outer, inner) in raw {
        let Value::Object(inner) = inner else {
            continue;
        };
        if let Some(meal) = Meal::from_key(outer) {
            for (day_key, dish) in inner {
                if let (Some(day), Some(dish)) = (Day::from_key(day_key), lenient::text(dish)) {
                    menu.day_mut(day).set(meal, dish);
                }
            }
        } else if let Some(day) = Day::from_key(outer) {
            for (meal_key, dish) in inner {
                if let (Some(meal), Some(dish)) = (Meal::from_key(meal_key), lenient::text(dish)) {
                    menu.day_mut(day).set(meal, dish);
                }
            }
        }
    }
    menu
}

/// Converts a draft into what the update endpoint accepts. The draft itself
/// is left untouched.
pub fn build_update_payload(draft: &PgDraft, amenities: &AmenityCatalog) -> Result<UpdatePayload, DraftError> {
    if draft.name.trim().is_empty() {
        return Err(DraftError::MissingName);
    }
    let pincode = draft.location.pincode.trim();
    if !pincode.is_empty() && !PINCODE.is_match(pincode) {
        return Err(DraftError::InvalidPincode(pincode.to_string()));
    }

    let mut sharing = Map::new();
    for row in &draft.sharing {
        match row.price {
            Some(price) if row.is_complete() => {
                sharing.insert(row.tier.trim().to_string(), Value::from(price));
            }
            _ => debug!("Skipping incomplete sharing row {:?}", row),
        }
    }

    for name in &draft.amenities {
        if amenities.key_for(name).is_none() {
            debug!("Skipping amenity without a key: {:?}", name);
        }
    }
    // catalog order, not the order the owner ticked them in
    let furnish: Map<String, Value> = amenities
        .entries()
        .filter(|(name, _)| draft.amenities.iter().any(|selected| selected.as_str() == *name))
        .map(|(_, key)| (key.to_string(), Value::Bool(true)))
        .collect();

    let mut existing_images = Vec::new();
    let mut new_images = Vec::new();
    for image in &draft.images {
        match image {
            ImageRef::Existing { reference, .. } => existing_images.push(reference.clone()),
            ImageRef::Attached(local) => new_images.push(local.clone()),
        }
    }

    Ok(UpdatePayload {
        name: draft.name.trim().to_string(),
        description: draft.description.clone(),
        pg_type: draft.pg_type.map(|t| t.as_str().to_string()).unwrap_or_default(),
        location: Location {
            pincode: pincode.to_string(),
            ..draft.location.clone()
        },
        sharing,
        rules: draft.rules.clone(),
        amenities: furnish,
        food_menu: draft.food_menu.clone(),
        existing_images,
        new_images,
    })
}

/// Loads PG profiles for editing and saves them back.
pub struct ProfileService<A> {
    api: A,
    base_url: Url,
    amenities: AmenityCatalog,
    rules: RuleCatalog,
}

impl<A: HostelApi> ProfileService<A> {
    pub fn new(api: A, base_url: Url, amenities: AmenityCatalog, rules: RuleCatalog) -> Self {
        Self {
            api,
            base_url,
            amenities,
            rules,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn amenities(&self) -> &AmenityCatalog {
        &self.amenities
    }

    pub async fn load(&self, hostel_id: &str) -> Result<PgDraft, ProfileError> {
        let record = self.api.fetch_hostel(hostel_id).await.map_err(|err| {
            warn!("Failed to load PG {}: {}", hostel_id, err);
            ProfileError::from(err)
        })?;
        info!("Loaded PG {} for editing", hostel_id);
        Ok(merge_profile(&record, &self.amenities, &self.rules, &self.base_url))
    }

    /// Validates and saves the draft. On any failure the draft stays as it
    /// was so the owner can fix it and try again.
    pub async fn save(&self, hostel_id: &str, draft: &PgDraft) -> Result<(), ProfileError> {
        let payload = build_update_payload(draft, &self.amenities)?;
        self.submit(hostel_id, payload).await
    }

    pub async fn submit(&self, hostel_id: &str, payload: UpdatePayload) -> Result<(), ProfileError> {
        match self.api.update_hostel(hostel_id, payload).await {
            Ok(()) => {
                info!("Updated PG {}", hostel_id);
                Ok(())
            }
            Err(err) => {
                warn!("Failed to update PG {}: {}", hostel_id, err);
                Err(err.into())
            }
        }
    }
}
