use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Facility keys recognised by the catalog. Requested keys outside this list
/// are dropped before filtering.
pub const FACILITY_KEYS: [&str; 28] = [
    "swimmingPool",
    "boarding",
    "wifiCampus",
    "library",
    "scienceLabs",
    "computerLab",
    "sportsFields",
    "tennisCourts",
    "basketballCourt",
    "rugbyPitch",
    "cricketPitch",
    "hockeyField",
    "athleticsTrack",
    "gymnasium",
    "artStudio",
    "musicRoom",
    "drama",
    "chapel",
    "clinic",
    "cafeteria",
    "schoolBus",
    "aftercare",
    "specialNeeds",
    "security",
    "solarBackup",
    "boreholeWater",
    "farm",
    "equestrian",
];

/// City used when a search does not name one
pub const DEFAULT_CITY: &str = "Harare";

pub fn is_known_facility(key: &str) -> bool {
    FACILITY_KEYS.contains(&key)
}

/// Fee/prestige band of a school
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    Premium,
    UpperMiddle,
    LowerMiddle,
}

impl Tier {
    /// Ordering rank, lower comes first
    pub fn rank(self) -> u8 {
        match self {
            Tier::Premium => 0,
            Tier::UpperMiddle => 1,
            Tier::LowerMiddle => 2,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "premium" => Some(Tier::Premium),
            "upper-middle" | "upper middle" => Some(Tier::UpperMiddle),
            "lower-middle" | "lower middle" => Some(Tier::LowerMiddle),
            _ => None,
        }
    }
}

/// A school in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub city: String,
    #[serde(default)]
    pub phase: Vec<String>,
    #[serde(rename = "boardingType", default)]
    pub boarding_type: Vec<String>,
    #[serde(default)]
    pub curricula: Vec<String>,
    #[serde(rename = "learningEnvironment", default)]
    pub learning_environment: Option<String>,
    #[serde(default)]
    pub facilities: BTreeMap<String, bool>,
    #[serde(default)]
    pub tier: Option<Tier>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(rename = "facebookUrl", default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(rename = "heroImage", default)]
    pub hero_image: Option<String>,
}

impl SchoolRecord {
    /// Whether the facility flag is set to `true`
    pub fn has_facility(&self, key: &str) -> bool {
        self.facilities.get(key).copied().unwrap_or(false)
    }

    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    fn tier_rank(&self) -> u8 {
        self.tier.map(Tier::rank).unwrap_or(u8::MAX)
    }

    /// Catalog ordering: tier first, then name
    pub fn catalog_order(&self, other: &Self) -> std::cmp::Ordering {
        self.tier_rank()
            .cmp(&other.tier_rank())
            .then_with(|| compare_names(&self.name, &other.name))
    }
}

/// Lowercase, replace punctuation with spaces and collapse whitespace.
pub fn normalize_name(value: &str) -> String {
    let replaced: String = value
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// URL-safe identifier for a school, unique per (city, normalized name)
pub fn slugify(name: &str, city: &str) -> String {
    let name = normalize_name(name).replace(' ', "-");
    let city = normalize_name(city).replace(' ', "-");
    match (name.is_empty(), city.is_empty()) {
        (_, true) => name,
        (true, false) => city,
        (false, false) => format!("{}-{}", name, city),
    }
}

/// Case-insensitive name ordering with a byte-wise tiebreak so the order is total
pub fn compare_names(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Normalized search preferences handed to the matching engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPreferences {
    pub city: String,
    #[serde(rename = "learningEnvironment", default)]
    pub learning_environment: Option<String>,
    #[serde(default)]
    pub curriculum: Vec<String>,
    #[serde(default)]
    pub phase: Vec<String>,
    #[serde(rename = "boardingType", default)]
    pub boarding_type: Vec<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
}

impl Default for SearchPreferences {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            learning_environment: None,
            curriculum: vec![],
            phase: vec![],
            boarding_type: vec![],
            facilities: vec![],
        }
    }
}

impl SearchPreferences {
    /// Requested facility keys the catalog knows about
    pub fn known_facilities(&self) -> Vec<&str> {
        self.facilities
            .iter()
            .map(String::as_str)
            .filter(|key| is_known_facility(key))
            .collect()
    }

    /// Learning environment, ignoring blank values
    pub fn environment(&self) -> Option<&str> {
        self.learning_environment
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// A scored candidate school
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub city: String,
    pub phase: Vec<String>,
    #[serde(rename = "boardingType")]
    pub boarding_type: Vec<String>,
    pub curricula: Vec<String>,
    #[serde(rename = "learningEnvironment")]
    pub learning_environment: Option<String>,
    pub tier: Option<Tier>,
    pub website: Option<String>,
    #[serde(rename = "facebookUrl")]
    pub facebook_url: Option<String>,
    pub logo: Option<String>,
    #[serde(rename = "heroImage")]
    pub hero_image: Option<String>,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    pub reasons: Vec<String>,
    #[serde(rename = "matchReason")]
    pub match_reason: String,
    #[serde(rename = "isPinned")]
    pub is_pinned: bool,
}

/// Separator used to render the reasons list as one string
pub const REASON_SEPARATOR: &str = " · ";

impl MatchResult {
    pub fn from_school(school: &SchoolRecord, match_score: f64, reasons: Vec<String>, is_pinned: bool) -> Self {
        Self {
            id: school.id.clone(),
            slug: school.slug.clone(),
            name: school.name.clone(),
            city: school.city.clone(),
            phase: school.phase.clone(),
            boarding_type: school.boarding_type.clone(),
            curricula: school.curricula.clone(),
            learning_environment: school.learning_environment.clone(),
            tier: school.tier,
            website: school.website.clone(),
            facebook_url: school.facebook_url.clone(),
            logo: school.logo.clone(),
            hero_image: school.hero_image.clone(),
            match_score,
            match_reason: reasons.join(REASON_SEPARATOR),
            reasons,
            is_pinned,
        }
    }
}

/// Identity of the promoted school, plus promotional fields the caller fills in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinnedSchoolSummary {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub city: String,
    pub logo: Option<String>,
    #[serde(rename = "heroImage")]
    pub hero_image: Option<String>,
    pub website: Option<String>,
    #[serde(rename = "registrationUrl", default, skip_serializing_if = "Option::is_none")]
    pub registration_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<String>,
}

impl From<&MatchResult> for PinnedSchoolSummary {
    fn from(result: &MatchResult) -> Self {
        Self {
            id: result.id.clone(),
            slug: result.slug.clone(),
            name: result.name.clone(),
            city: result.city.clone(),
            logo: result.logo.clone(),
            hero_image: result.hero_image.clone(),
            website: result.website.clone(),
            registration_url: None,
            documents: vec![],
        }
    }
}
