//! Filtering and partitioning of attraction/event collections
//!
//! Every function here subsets; none reorders or mutates. The order the
//! data access layer returned is the canonical order throughout, so a
//! screen can chain these freely and still render server order.
//!
//! The server applies the category filter in SQL where it can; this module
//! is the reference semantics both sides must agree on, and the client
//! re-applies it in memory when a screen narrows an already-fetched list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Attraction, Category, CategoryFilter, Event};

/// Entities that carry a category tag set
pub trait Categorized {
    fn has_category(&self, category: Category) -> bool;
}

impl Categorized for Attraction {
    fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}

impl Categorized for Event {
    fn has_category(&self, category: Category) -> bool {
        self.category == Some(category)
    }
}

/// Entities that may carry map coordinates
pub trait Locatable {
    fn coordinates(&self) -> Option<(f64, f64)>;
}

impl Locatable for Attraction {
    fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

impl Locatable for Event {
    fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Entities with free-text-searchable fields
pub trait Searchable {
    /// Name/title, location label, description
    fn searchable_fields(&self) -> [Option<&str>; 3];
}

impl Searchable for Attraction {
    fn searchable_fields(&self) -> [Option<&str>; 3] {
        [
            Some(self.name.as_str()),
            self.location.as_deref(),
            self.description.as_deref(),
        ]
    }
}

impl Searchable for Event {
    fn searchable_fields(&self) -> [Option<&str>; 3] {
        [
            Some(self.title.as_str()),
            self.location_name.as_deref(),
            self.description.as_deref(),
        ]
    }
}

/// Retain items matching the selected category. `All` is the identity:
/// same elements, same order.
pub fn by_category<T: Categorized + Clone>(items: &[T], filter: CategoryFilter) -> Vec<T> {
    match filter {
        CategoryFilter::All => items.to_vec(),
        CategoryFilter::Only(c) => items
            .iter()
            .filter(|item| item.has_category(c))
            .cloned()
            .collect(),
    }
}

/// Retain items with both coordinates present. Map rendering only;
/// grid/list screens skip this. Idempotent.
pub fn mappable<T: Locatable + Clone>(items: &[T]) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.coordinates().is_some())
        .cloned()
        .collect()
}

/// Case-folded substring search over the searchable fields. An empty or
/// whitespace-only query is the identity. Always in-memory; never a
/// network call.
pub fn search<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| {
            item.searchable_fields()
                .iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// The three mutually exclusive temporal views over events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemporalView {
    #[default]
    All,
    Upcoming,
    Past,
}

/// What to do with events that have no start date.
///
/// Treating them as upcoming forever is the default; the alternative hides
/// them from everything but the All view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndatedEventPolicy {
    /// Undated events appear under Upcoming and never under Past
    #[default]
    AlwaysUpcoming,
    /// Undated events appear only under All
    Excluded,
}

/// Partition events into the requested temporal view.
///
/// `now` is the single cutoff for the whole collection; callers evaluate it
/// once per request, not per item. An event starting exactly at `now` is
/// upcoming.
pub fn partition_events(
    events: &[Event],
    view: TemporalView,
    now: DateTime<Utc>,
    undated: UndatedEventPolicy,
) -> Vec<Event> {
    match view {
        TemporalView::All => events.to_vec(),
        TemporalView::Upcoming => events
            .iter()
            .filter(|e| match e.start_date {
                Some(start) => start >= now,
                None => undated == UndatedEventPolicy::AlwaysUpcoming,
            })
            .cloned()
            .collect(),
        TemporalView::Past => events
            .iter()
            .filter(|e| matches!(e.start_date, Some(start) if start < now))
            .cloned()
            .collect(),
    }
}

/// Discriminant for the common map-marker projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Attraction,
    Event,
}

/// The display shape both entity kinds project into for the map and the
/// detail panel. The `kind` discriminant drives detail rendering and must
/// survive the projection faithfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub kind: MarkerKind,
    pub title: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub categories: Vec<Category>,
    pub image_url: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl Marker {
    pub fn from_attraction(attraction: &Attraction) -> Self {
        Marker {
            id: attraction.id.clone(),
            kind: MarkerKind::Attraction,
            title: attraction.name.clone(),
            description: attraction.description.clone(),
            latitude: attraction.latitude,
            longitude: attraction.longitude,
            categories: attraction.categories.clone(),
            image_url: attraction.image_url.clone(),
            start_date: None,
            end_date: None,
        }
    }

    pub fn from_event(event: &Event) -> Self {
        Marker {
            id: event.id.clone(),
            kind: MarkerKind::Event,
            title: event.title.clone(),
            description: event.description.clone(),
            latitude: event.latitude,
            longitude: event.longitude,
            categories: event.category.into_iter().collect(),
            image_url: event.image_url.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
        }
    }
}

impl Locatable for Marker {
    fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn attraction(id: &str, categories: Vec<Category>) -> Attraction {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Attraction {
            id: id.to_string(),
            name: format!("Attraction {id}"),
            location: Some("Kuching".to_string()),
            description: None,
            categories,
            latitude: Some(1.55),
            longitude: Some(110.34),
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn event(id: &str, start: Option<DateTime<Utc>>) -> Event {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            description: None,
            start_date: start,
            end_date: None,
            location_name: None,
            latitude: None,
            longitude: None,
            category: Some(Category::Festivals),
            image_url: None,
            organizer: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_category_filter_membership() {
        let items = vec![
            attraction("1", vec![Category::Nature]),
            attraction("2", vec![Category::Culture]),
            attraction("3", vec![Category::Culture, Category::Nature]),
        ];

        let filtered = by_category(&items, CategoryFilter::Only(Category::Culture));
        assert_eq!(filtered.len(), 2);
        assert!(filtered
            .iter()
            .all(|a| a.categories.contains(&Category::Culture)));
        assert_eq!(filtered[0].id, "2");
        assert_eq!(filtered[1].id, "3");
    }

    #[test]
    fn test_category_filter_all_is_identity() {
        let items = vec![
            attraction("1", vec![Category::Nature]),
            attraction("2", vec![]),
        ];
        assert_eq!(by_category(&items, CategoryFilter::All), items);
    }

    #[test]
    fn test_category_filter_scenario() {
        // attractions = [{id:"1",Nature}, {id:"2",Culture}] -> Culture -> [id:"2"]
        let items = vec![
            attraction("1", vec![Category::Nature]),
            attraction("2", vec![Category::Culture]),
        ];
        let filtered = by_category(&items, CategoryFilter::Only(Category::Culture));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "2");
    }

    #[test]
    fn test_mappable_is_idempotent() {
        let mut unmapped = attraction("1", vec![]);
        unmapped.latitude = None;
        let items = vec![unmapped, attraction("2", vec![]), attraction("3", vec![])];

        let once = mappable(&items);
        assert_eq!(once.len(), 2);
        assert!(once.iter().all(|a| a.is_mappable()));
        assert_eq!(mappable(&once), once);
    }

    #[test]
    fn test_search_case_insensitive() {
        let mut museum = attraction("1", vec![]);
        museum.name = "Borneo Cultures Museum".to_string();
        let mut park = attraction("2", vec![]);
        park.name = "National Park".to_string();
        park.description = Some("Rainforest MUSEUM trail".to_string());
        let mut beach = attraction("3", vec![]);
        beach.name = "Damai Beach".to_string();
        beach.description = None;
        beach.location = None;
        let items = vec![museum, park, beach];

        let hits = search(&items, "musEUM");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "1");
        assert_eq!(hits[1].id, "2");
    }

    #[test]
    fn test_search_empty_query_is_identity() {
        let items = vec![attraction("1", vec![]), attraction("2", vec![])];
        assert_eq!(search(&items, ""), items);
        assert_eq!(search(&items, "   "), items);
    }

    #[test]
    fn test_partition_covers_dated_events_once() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let items = vec![
            event("e1", Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())),
            event("e2", Some(Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap())),
            event("e3", Some(now)),
            event("e4", None),
        ];

        let upcoming = partition_events(
            &items,
            TemporalView::Upcoming,
            now,
            UndatedEventPolicy::AlwaysUpcoming,
        );
        let past = partition_events(
            &items,
            TemporalView::Past,
            now,
            UndatedEventPolicy::AlwaysUpcoming,
        );

        // Every dated event lands in exactly one bucket
        for e in items.iter().filter(|e| e.start_date.is_some()) {
            let in_upcoming = upcoming.iter().any(|u| u.id == e.id);
            let in_past = past.iter().any(|p| p.id == e.id);
            assert!(in_upcoming ^ in_past, "event {} must be in one bucket", e.id);
        }

        // Boundary: start == now is upcoming
        assert!(upcoming.iter().any(|e| e.id == "e3"));
        // Spec scenario: past -> [e1], upcoming includes e2
        assert!(past.iter().any(|e| e.id == "e1"));
        assert!(upcoming.iter().any(|e| e.id == "e2"));
    }

    #[test]
    fn test_undated_event_policy() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let items = vec![event("e1", None)];

        let upcoming = partition_events(
            &items,
            TemporalView::Upcoming,
            now,
            UndatedEventPolicy::AlwaysUpcoming,
        );
        assert_eq!(upcoming.len(), 1);

        let excluded = partition_events(
            &items,
            TemporalView::Upcoming,
            now,
            UndatedEventPolicy::Excluded,
        );
        assert!(excluded.is_empty());

        // Undated events are never "past" under either policy
        for policy in [UndatedEventPolicy::AlwaysUpcoming, UndatedEventPolicy::Excluded] {
            assert!(partition_events(&items, TemporalView::Past, now, policy).is_empty());
        }
    }

    #[test]
    fn test_partition_all_is_identity() {
        let now = Utc::now();
        let items = vec![event("e1", None), event("e2", Some(now))];
        assert_eq!(
            partition_events(&items, TemporalView::All, now, UndatedEventPolicy::default()),
            items
        );
    }

    #[test]
    fn test_marker_preserves_discriminant() {
        let a = attraction("a1", vec![Category::Culture]);
        let e = event("e1", Some(Utc::now()));

        let am = Marker::from_attraction(&a);
        assert_eq!(am.kind, MarkerKind::Attraction);
        assert_eq!(am.id, "a1");
        assert_eq!(am.categories, vec![Category::Culture]);
        assert_eq!(am.start_date, None);

        let em = Marker::from_event(&e);
        assert_eq!(em.kind, MarkerKind::Event);
        assert_eq!(em.categories, vec![Category::Festivals]);
        assert_eq!(em.start_date, e.start_date);
    }

    #[test]
    fn test_mappable_markers() {
        let a = attraction("a1", vec![]);
        let e = event("e1", None); // no coordinates
        let markers = vec![Marker::from_attraction(&a), Marker::from_event(&e)];
        let on_map = mappable(&markers);
        assert_eq!(on_map.len(), 1);
        assert_eq!(on_map[0].kind, MarkerKind::Attraction);
    }
}
