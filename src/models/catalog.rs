//! Fixed lookup tables used by the profile editor.
//!
//! These are plain values handed to the merge and payload steps so that two
//! editors can run with different tables side by side.

/// Display name to backend key for each amenity the editor offers.
#[derive(Debug, Clone, PartialEq)]
pub struct AmenityCatalog {
    entries: Vec<(String, String)>,
}

impl AmenityCatalog {
    pub fn new<N, K>(entries: impl IntoIterator<Item = (N, K)>) -> Self
    where
        N: Into<String>,
        K: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, key)| (name.into(), key.into()))
                .collect(),
        }
    }

    pub fn key_for(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, k)| k.as_str())
    }

    pub fn name_for(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, k)| k == key)
            .map(|(n, _)| n.as_str())
    }

    /// `(name, key)` pairs in display order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, k)| (n.as_str(), k.as_str()))
    }
}

impl Default for AmenityCatalog {
    fn default() -> Self {
        Self::new([
            ("Free WiFi", "wifi"),
            ("Fan", "fan"),
            ("Bed", "bed"),
            ("Lights", "lights"),
            ("Cupboard", "cupboard"),
            ("Geyser", "geyser"),
            ("Water", "water"),
            ("Gym", "gym"),
            ("TV", "tv"),
            ("Food", "food"),
            ("Parking", "parking"),
            ("AC", "ac"),
            ("Hot Water", "hot_water"),
            ("CC Camera", "cc_camera"),
        ])
    }
}

/// Rules offered as toggles before the owner adds custom ones.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleCatalog {
    pub defaults: Vec<String>,
    /// Rules shown on a listing that declares none.
    pub listing_fallback: Vec<String>,
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self {
            defaults: ["No Alcohol", "No Smoking", "No Pets", "Keep Clean"]
                .map(String::from)
                .to_vec(),
            listing_fallback: ["No Alcohol", "No Smoking"].map(String::from).to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct City {
    name: String,
    areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct State {
    name: String,
    cities: Vec<City>,
}

/// State, city and area choices for the location picker.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationCatalog {
    states: Vec<State>,
}

impl LocationCatalog {
    pub fn new(states: Vec<(&str, Vec<(&str, Vec<&str>)>)>) -> Self {
        Self {
            states: states
                .into_iter()
                .map(|(state, cities)| State {
                    name: state.to_string(),
                    cities: cities
                        .into_iter()
                        .map(|(city, areas)| City {
                            name: city.to_string(),
                            areas: areas.into_iter().map(String::from).collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|s| s.name.as_str())
    }

    pub fn cities(&self, state: &str) -> Option<impl Iterator<Item = &str>> {
        self.state(state)
            .map(|s| s.cities.iter().map(|c| c.name.as_str()))
    }

    pub fn areas(&self, state: &str, city: &str) -> Option<&[String]> {
        self.city(state, city).map(|c| c.areas.as_slice())
    }

    pub fn has_state(&self, state: &str) -> bool {
        self.state(state).is_some()
    }

    pub fn has_city(&self, state: &str, city: &str) -> bool {
        self.city(state, city).is_some()
    }

    fn state(&self, state: &str) -> Option<&State> {
        self.states.iter().find(|s| s.name == state)
    }

    fn city(&self, state: &str, city: &str) -> Option<&City> {
        self.state(state)?.cities.iter().find(|c| c.name == city)
    }
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self::new(vec![
            (
                "Telangana",
                vec![
                    (
                        "Hyderabad",
                        vec![
                            "Ameerpet",
                            "Dilshuknagar",
                            "Gachibowli",
                            "Gandimaisamma",
                            "Kondapur",
                            "KPHB",
                            "LB Nagar",
                            "Medchal",
                            "Moosapet",
                            "Madhapur",
                            "Patancheruvu",
                            "Uppal",
                        ],
                    ),
                    ("Warangal", vec!["Hanamkonda", "Kazipet"]),
                ],
            ),
            (
                "Karnataka",
                vec![
                    (
                        "Bangalore",
                        vec![
                            "Bannerghatta",
                            "Basavanagudi",
                            "Devanahalli",
                            "Electronic City",
                            "Hebbal",
                            "Hoskote",
                            "HSR Layout",
                            "Indiranagar",
                            "Jayanagar",
                            "Kengeri",
                            "Koramangala",
                            "Madiwala",
                            "Marathahalli",
                            "Sarjapur Road",
                            "Ulsoor",
                            "Whitefield",
                        ],
                    ),
                    ("Mysore", vec!["Gokulam", "Vijayanagar"]),
                ],
            ),
            (
                "AndhraPradesh",
                vec![
                    ("Vijayawada", vec!["Benz Circle", "Gunadala", "Poranki"]),
                    ("Vizag", vec!["Gajuwaka", "MVP Colony"]),
                ],
            ),
            (
                "Maharashtra",
                vec![
                    (
                        "Mumbai",
                        vec![
                            "Airoli",
                            "Andheri",
                            "Borivali",
                            "Chembur",
                            "Goregaon",
                            "Jogeshwari",
                            "Juhu",
                            "Kandivali",
                            "Kurla",
                            "Malabar Hill",
                            "Marine Drive",
                            "Mira Road",
                            "Powai",
                            "Thane",
                            "Vikhroli",
                            "Virar",
                        ],
                    ),
                    (
                        "Pune",
                        vec![
                            "Aundh",
                            "Baner",
                            "Hadapsar",
                            "Hinjewadi",
                            "Kalyani Nagar",
                            "Kharadi",
                            "Koregaon Park",
                            "Kothrud",
                        ],
                    ),
                ],
            ),
            (
                "TamilNadu",
                vec![(
                    "Chennai",
                    vec![
                        "Ambattur",
                        "Anna Nagar",
                        "Gopalapuram",
                        "Kotturpuram",
                        "Medavakkam",
                        "Navalur",
                        "Perungudi",
                        "Porur",
                        "Semmancheri",
                        "Tambaram",
                        "Thoraipakkam",
                        "Velachery",
                    ],
                )],
            ),
        ])
    }
}
