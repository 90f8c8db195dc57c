//! Event entity

use crate::models::{Category, Event};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub start_date: Option<DateTimeWithTimeZone>,

    pub end_date: Option<DateTimeWithTimeZone>,

    #[sea_orm(column_type = "Text", nullable)]
    pub location_name: Option<String>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,

    /// Single optional vocabulary tag
    #[sea_orm(column_type = "Text", nullable)]
    pub category: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub organizer: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Event {
    fn from(row: Model) -> Self {
        let category = row.category.as_deref().and_then(|tag| {
            match tag.parse::<Category>() {
                Ok(c) => Some(c),
                Err(_) => {
                    tracing::warn!(value = %tag, "Dropping unrecognized category tag");
                    None
                }
            }
        });
        Event {
            id: row.id,
            title: row.title,
            description: row.description,
            start_date: row.start_date.map(|d| d.to_utc()),
            end_date: row.end_date.map(|d| d.to_utc()),
            location_name: row.location_name,
            latitude: row.latitude,
            longitude: row.longitude,
            category,
            image_url: row.image_url,
            organizer: row.organizer,
            created_at: row.created_at.to_utc(),
            updated_at: row.updated_at.to_utc(),
        }
    }
}
