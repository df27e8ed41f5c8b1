use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::catalog::LocationCatalog;
use super::image::{ImageRef, LocalImage};
use crate::error::DraftError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum PgType {
    Men,
    Women,
    #[serde(rename = "Co-Living")]
    CoLiving,
}

impl PgType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Men" => Some(PgType::Men),
            "Women" => Some(PgType::Women),
            "Co-Living" => Some(PgType::CoLiving),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PgType::Men => "Men",
            PgType::Women => "Women",
            PgType::CoLiving => "Co-Living",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Location {
    pub address: String,
    pub area: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// One editable tier/price pair. Blank rows are allowed while editing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SharingRow {
    pub tier: String,
    pub price: Option<f64>,
}

impl SharingRow {
    pub fn is_complete(&self) -> bool {
        !self.tier.trim().is_empty() && self.price.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|day| day.key().eq_ignore_ascii_case(key.trim()))
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

impl Meal {
    pub const ALL: [Meal; 3] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner];

    pub fn key(&self) -> &'static str {
        match self {
            Meal::Breakfast => "breakfast",
            Meal::Lunch => "lunch",
            Meal::Dinner => "dinner",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|meal| meal.key().eq_ignore_ascii_case(key.trim()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayMenu {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

impl DayMenu {
    pub fn get(&self, meal: Meal) -> &str {
        match meal {
            Meal::Breakfast => &self.breakfast,
            Meal::Lunch => &self.lunch,
            Meal::Dinner => &self.dinner,
        }
    }

    pub fn set(&mut self, meal: Meal, value: impl Into<String>) {
        let slot = match meal {
            Meal::Breakfast => &mut self.breakfast,
            Meal::Lunch => &mut self.lunch,
            Meal::Dinner => &mut self.dinner,
        };
        *slot = value.into();
    }
}

/// Weekly menu. Always holds every day of the week; serialized day-major.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodMenu {
    days: [DayMenu; 7],
}

impl FoodMenu {
    pub fn day(&self, day: Day) -> &DayMenu {
        &self.days[day.index()]
    }

    pub fn day_mut(&mut self, day: Day) -> &mut DayMenu {
        &mut self.days[day.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, &DayMenu)> {
        Day::ALL.into_iter().zip(self.days.iter())
    }
}

impl Serialize for FoodMenu {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Day::ALL.len()))?;
        for (day, menu) in self.iter() {
            map.serialize_entry(day.key(), menu)?;
        }
        map.end()
    }
}

/// Editable copy of a PG profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PgDraft {
    pub name: String,
    pub description: String,
    pub pg_type: Option<PgType>,
    pub location: Location,
    pub sharing: Vec<SharingRow>,
    pub images: Vec<ImageRef>,
    pub food_menu: FoodMenu,
    /// Selected rules.
    pub rules: Vec<String>,
    /// Rules offered as toggles, selected or not.
    pub available_rules: Vec<String>,
    /// Selected amenities by display name.
    pub amenities: Vec<String>,
}

impl PgDraft {
    pub fn add_sharing_row(&mut self) {
        self.sharing.push(SharingRow::default());
    }

    pub fn remove_sharing_row(&mut self, index: usize) -> Result<SharingRow, DraftError> {
        if index >= self.sharing.len() {
            return Err(DraftError::NoSuchRow(index));
        }
        if index == 0 {
            return Err(DraftError::FirstRowRequired);
        }
        Ok(self.sharing.remove(index))
    }

    pub fn set_sharing_tier(&mut self, index: usize, tier: impl Into<String>) -> Result<(), DraftError> {
        let row = self
            .sharing
            .get_mut(index)
            .ok_or(DraftError::NoSuchRow(index))?;
        row.tier = tier.into();
        Ok(())
    }

    /// Sets a row's price from form input. Blank input clears the price.
    pub fn set_sharing_price(&mut self, index: usize, raw: &str) -> Result<(), DraftError> {
        let price = parse_price(raw)?;
        let row = self
            .sharing
            .get_mut(index)
            .ok_or(DraftError::NoSuchRow(index))?;
        row.price = price;
        Ok(())
    }

    pub fn toggle_amenity(&mut self, name: &str) {
        toggle(&mut self.amenities, name);
    }

    pub fn toggle_rule(&mut self, name: &str) {
        toggle(&mut self.rules, name);
    }

    /// Offers a new rule. Returns false for blank or already offered rules.
    pub fn add_custom_rule(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.available_rules.iter().any(|r| r == name) {
            return false;
        }
        self.available_rules.push(name.to_string());
        true
    }

    pub fn set_meal(&mut self, day: Day, meal: Meal, value: impl Into<String>) {
        self.food_menu.day_mut(day).set(meal, value);
    }

    pub fn attach_image(&mut self, image: LocalImage) {
        self.images.push(ImageRef::Attached(image));
    }

    pub fn remove_image(&mut self, index: usize) -> Result<ImageRef, DraftError> {
        if index >= self.images.len() {
            return Err(DraftError::NoSuchImage(index));
        }
        Ok(self.images.remove(index))
    }

    pub fn attached_images(&self) -> impl Iterator<Item = &LocalImage> {
        self.images.iter().filter_map(|image| match image {
            ImageRef::Attached(local) => Some(local),
            ImageRef::Existing { .. } => None,
        })
    }

    /// Picks a state and clears the dependent city and area.
    pub fn select_state(&mut self, catalog: &LocationCatalog, state: &str) -> Result<(), DraftError> {
        if !catalog.has_state(state) {
            return Err(DraftError::UnknownState(state.to_string()));
        }
        self.location.state = state.to_string();
        self.location.city.clear();
        self.location.area.clear();
        Ok(())
    }

    /// Picks a city in the current state and clears the area.
    pub fn select_city(&mut self, catalog: &LocationCatalog, city: &str) -> Result<(), DraftError> {
        if !catalog.has_city(&self.location.state, city) {
            return Err(DraftError::UnknownCity {
                state: self.location.state.clone(),
                city: city.to_string(),
            });
        }
        self.location.city = city.to_string();
        self.location.area.clear();
        Ok(())
    }

    pub fn select_area(&mut self, catalog: &LocationCatalog, area: &str) -> Result<(), DraftError> {
        let known = catalog
            .areas(&self.location.state, &self.location.city)
            .is_some_and(|areas| areas.iter().any(|a| a == area));
        if !known {
            return Err(DraftError::UnknownArea {
                city: self.location.city.clone(),
                area: area.to_string(),
            });
        }
        self.location.area = area.to_string();
        Ok(())
    }
}

fn toggle(list: &mut Vec<String>, name: &str) {
    if let Some(pos) = list.iter().position(|item| item == name) {
        list.remove(pos);
    } else {
        list.push(name.to_string());
    }
}

fn parse_price(raw: &str) -> Result<Option<f64>, DraftError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(Some(price)),
        _ => Err(DraftError::InvalidPrice(raw.to_string())),
    }
}

/// Wire form of an edited profile, ready to be sent as multipart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatePayload {
    pub name: String,
    pub description: String,
    pub pg_type: String,
    pub location: Location,
    /// Tier to price, in row order.
    pub sharing: Map<String, Value>,
    pub rules: Vec<String>,
    /// Amenity key to `true`, in catalog order.
    pub amenities: Map<String, Value>,
    pub food_menu: FoodMenu,
    pub existing_images: Vec<String>,
    #[serde(skip)]
    pub new_images: Vec<LocalImage>,
}
