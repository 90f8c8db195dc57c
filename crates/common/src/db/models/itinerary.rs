//! Generated itinerary entity

use crate::models::{Budget, Category, Itinerary};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "itineraries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub user_id: Option<String>,

    /// The generated plan text
    #[sea_orm(column_type = "Text")]
    pub itinerary: String,

    /// Requested interests as a JSONB array of vocabulary strings
    #[sea_orm(column_type = "JsonBinary")]
    pub interests: Json,

    pub duration: i32,

    #[sea_orm(column_type = "Text")]
    pub budget: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Itinerary {
    fn from(row: Model) -> Self {
        let interests = row
            .interests
            .as_array()
            .map(|tags| {
                tags.iter()
                    .filter_map(|tag| tag.as_str())
                    .filter_map(|tag| tag.parse::<Category>().ok())
                    .collect()
            })
            .unwrap_or_default();
        let budget = match row.budget.as_str() {
            "high" => Budget::High,
            "medium" => Budget::Medium,
            _ => Budget::Low,
        };
        Itinerary {
            id: row.id,
            user_id: row.user_id,
            itinerary: row.itinerary,
            interests,
            duration: row.duration.max(0) as u32,
            budget,
            created_at: row.created_at.to_utc(),
        }
    }
}
