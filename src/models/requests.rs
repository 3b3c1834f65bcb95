use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use validator::Validate;

use crate::models::domain::{SearchPreferences, DEFAULT_CITY};

/// List-valued field as sent by the web form or the chat bot.
///
/// Accepts a JSON list, a comma-separated string, or (for facility
/// checkboxes) an object of flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListField {
    Many(Vec<String>),
    One(String),
    Flags(BTreeMap<String, Value>),
}

impl ListField {
    /// Flatten into trimmed, non-empty, de-duplicated entries
    pub fn into_items(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            ListField::Many(values) => values,
            ListField::One(value) => vec![value],
            ListField::Flags(flags) => flags
                .into_iter()
                .filter(|(_, value)| is_truthy(value))
                .map(|(key, _)| key)
                .collect(),
        };

        let mut items: Vec<String> = Vec::new();
        for entry in raw.iter().flat_map(|value| value.split(',')) {
            let entry = entry.trim();
            if !entry.is_empty() && !items.iter().any(|existing| existing == entry) {
                items.push(entry.to_string());
            }
        }
        items
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "on" | "true" | "yes" | "1"),
        _ => false,
    }
}

fn deserialize_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<ListField>::deserialize(deserializer)?;
    Ok(field.map(ListField::into_items).unwrap_or_default())
}

/// Request to recommend schools
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[serde(default)]
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[serde(rename = "learningEnvironment", default)]
    #[validate(length(max = 100))]
    pub learning_environment: Option<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub curriculum: Vec<String>,
    #[serde(rename = "type", alias = "phase", default, deserialize_with = "deserialize_list")]
    pub phase: Vec<String>,
    #[serde(rename = "type2", alias = "boardingType", default, deserialize_with = "deserialize_list")]
    pub boarding_type: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub facilities: Vec<String>,
    #[serde(default)]
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u16>,
}

impl RecommendRequest {
    /// Normalize into engine preferences: trimmed strings, blank values dropped,
    /// city defaulted.
    pub fn to_preferences(&self) -> SearchPreferences {
        self.to_preferences_with_city(DEFAULT_CITY)
    }

    pub fn to_preferences_with_city(&self, default_city: &str) -> SearchPreferences {
        let city = self
            .city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .unwrap_or(default_city)
            .to_string();

        let learning_environment = self
            .learning_environment
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        SearchPreferences {
            city,
            learning_environment,
            curriculum: self.curriculum.clone(),
            phase: self.phase.clone(),
            boarding_type: self.boarding_type.clone(),
            facilities: self.facilities.clone(),
        }
    }
}
