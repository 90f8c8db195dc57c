//! Wire-level domain models shared by the server and the client SDK
//!
//! Field names and optionality mirror the JSON the API serves. Category
//! values are a closed vocabulary; unrecognized tags are dropped at decode
//! time rather than silently carried through to rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed tourism classification vocabulary.
///
/// Used both as the selectable filter list and as the per-entity tag set,
/// so an unknown string can never masquerade as a real category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Culture,
    Adventure,
    Nature,
    Foods,
    Festivals,
    Homestays,
}

impl Category {
    /// All categories, in the display order screens use
    pub const ALL: [Category; 6] = [
        Category::Culture,
        Category::Adventure,
        Category::Nature,
        Category::Foods,
        Category::Festivals,
        Category::Homestays,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Culture => "Culture",
            Category::Adventure => "Adventure",
            Category::Nature => "Nature",
            Category::Foods => "Foods",
            Category::Festivals => "Festivals",
            Category::Homestays => "Homestays",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Culture" => Ok(Category::Culture),
            "Adventure" => Ok(Category::Adventure),
            "Nature" => Ok(Category::Nature),
            "Foods" => Ok(Category::Foods),
            "Festivals" => Ok(Category::Festivals),
            "Homestays" => Ok(Category::Homestays),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Rejected category string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// Decode a category set, dropping (and logging) unrecognized values.
fn category_set<'de, D>(deserializer: D) -> std::result::Result<Vec<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<String> = Vec::deserialize(deserializer)?;
    Ok(raw
        .iter()
        .filter_map(|s| match s.parse::<Category>() {
            Ok(c) => Some(c),
            Err(_) => {
                tracing::warn!(value = %s, "Dropping unrecognized category tag");
                None
            }
        })
        .collect())
}

/// Decode an optional single category, mapping unknown values to `None`.
fn category_opt<'de, D>(deserializer: D) -> std::result::Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.parse::<Category>() {
        Ok(c) => Some(c),
        Err(_) => {
            tracing::warn!(value = %s, "Dropping unrecognized category tag");
            None
        }
    }))
}

/// Category selection for listing screens.
///
/// `All` is the sentinel the UI shows first; it is never sent as a query
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// The query-string value, or `None` when the filter is `All`
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(c) => Some(c.as_str()),
        }
    }

    pub fn matches(&self, categories: &[Category]) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => categories.contains(c),
        }
    }
}

/// A point of interest. Read-only from the client's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "category_set")]
    pub categories: Vec<Category>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Attraction {
    /// Mappable entities carry both coordinates; map rendering requires this,
    /// grid/list rendering does not.
    pub fn is_mappable(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// A dated happening. The upcoming/past bucket is derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "category_opt")]
    pub category: Option<Category>,
    pub image_url: Option<String>,
    pub organizer: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn is_mappable(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// The (user, attraction) favorites relation. At most one row per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub user_id: String,
    pub attraction_id: String,
    pub created_at: DateTime<Utc>,
}

/// Body for POST /api/favorites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteCreate {
    pub user_id: String,
    pub attraction_id: String,
}

/// Profile returned by the external identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

/// Result of exchanging a one-time code: the bearer token plus the profile
/// it authenticates. Returned by POST /api/auth/session and persisted by the
/// client session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionHandshake {
    pub token: String,
    pub user: UserProfile,
    pub expires_at: DateTime<Utc>,
}

/// Budget tier for itinerary generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    Medium,
    High,
}

impl Budget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Budget::Low => "low",
            Budget::Medium => "medium",
            Budget::High => "high",
        }
    }
}

/// Body for POST /api/itinerary/generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryRequest {
    pub interests: Vec<Category>,
    pub duration: u32,
    pub budget: Budget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// A generated plan, as persisted and as returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: String,
    pub user_id: Option<String>,
    pub itinerary: String,
    pub interests: Vec<Category>,
    pub duration: u32,
    pub budget: Budget,
    pub created_at: DateTime<Utc>,
}

/// One month of visitor counts for one country and visitor type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitorAnalytics {
    pub year: i32,
    pub month: i32,
    pub country: String,
    pub visitor_type: String,
    pub count: i64,
}

/// A public holiday, used by the events calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicHoliday {
    pub date: DateTime<Utc>,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
        assert!("Shopping".parse::<Category>().is_err());
    }

    #[test]
    fn test_unknown_categories_dropped() {
        let json = r#"{
            "id": "a1",
            "name": "Cave",
            "location": null,
            "description": null,
            "categories": ["Nature", "Spelunking", "Adventure"],
            "latitude": 1.5,
            "longitude": 110.3,
            "image_url": null,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;
        let attraction: Attraction = serde_json::from_str(json).unwrap();
        assert_eq!(
            attraction.categories,
            vec![Category::Nature, Category::Adventure]
        );
    }

    #[test]
    fn test_unknown_event_category_dropped() {
        let json = r#"{
            "id": "e1",
            "title": "Regatta",
            "category": "Boating",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
            "description": null,
            "start_date": null,
            "end_date": null,
            "location_name": null,
            "latitude": null,
            "longitude": null,
            "image_url": null,
            "organizer": null
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.category, None);
    }

    #[test]
    fn test_mappable_requires_both_coordinates() {
        let mut a: Attraction = serde_json::from_str(
            r#"{
                "id": "a1", "name": "Museum",
                "location": null, "description": null, "categories": [],
                "latitude": 1.55, "longitude": 110.34, "image_url": null,
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert!(a.is_mappable());
        a.longitude = None;
        assert!(!a.is_mappable());
    }

    #[test]
    fn test_category_filter_query_value() {
        assert_eq!(CategoryFilter::All.query_value(), None);
        assert_eq!(
            CategoryFilter::Only(Category::Foods).query_value(),
            Some("Foods")
        );
    }

    #[test]
    fn test_budget_serialization() {
        assert_eq!(serde_json::to_string(&Budget::Low).unwrap(), r#""low""#);
        let b: Budget = serde_json::from_str(r#""high""#).unwrap();
        assert_eq!(b, Budget::High);
    }
}
