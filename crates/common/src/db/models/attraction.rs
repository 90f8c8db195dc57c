//! Attraction entity
//!
//! Rows are created by the bulk import process and are read-only from the
//! API's perspective.

use crate::models::{Attraction, Category};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attractions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub location: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Category tags as a JSONB array of vocabulary strings
    #[sea_orm(column_type = "JsonBinary")]
    pub categories: Json,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,

    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorites,
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Decode the JSONB tag array into the closed vocabulary, dropping
/// anything unrecognized.
pub(crate) fn decode_categories(value: &Json) -> Vec<Category> {
    value
        .as_array()
        .map(|tags| {
            tags.iter()
                .filter_map(|tag| tag.as_str())
                .filter_map(|tag| match tag.parse::<Category>() {
                    Ok(c) => Some(c),
                    Err(_) => {
                        tracing::warn!(value = %tag, "Dropping unrecognized category tag");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

impl From<Model> for Attraction {
    fn from(row: Model) -> Self {
        let categories = decode_categories(&row.categories);
        Attraction {
            id: row.id,
            name: row.name,
            location: row.location,
            description: row.description,
            categories,
            latitude: row.latitude,
            longitude: row.longitude,
            image_url: row.image_url,
            created_at: row.created_at.to_utc(),
            updated_at: row.updated_at.to_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_categories_drops_unknown() {
        let value = serde_json::json!(["Culture", "Skydiving", "Nature"]);
        assert_eq!(
            decode_categories(&value),
            vec![Category::Culture, Category::Nature]
        );
    }

    #[test]
    fn test_decode_categories_handles_non_array() {
        assert!(decode_categories(&serde_json::json!(null)).is_empty());
        assert!(decode_categories(&serde_json::json!("Culture")).is_empty());
    }
}
