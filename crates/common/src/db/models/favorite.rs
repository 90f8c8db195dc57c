//! Favorite entity
//!
//! One row per (user, attraction) pair; a unique index enforces the
//! at-most-one invariant the repository's idempotent upsert relies on.

use crate::models::Favorite;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "favorites")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(column_type = "Text")]
    pub user_id: String,

    #[sea_orm(column_type = "Text")]
    pub attraction_id: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::attraction::Entity",
        from = "Column::AttractionId",
        to = "super::attraction::Column::Id"
    )]
    Attraction,
}

impl Related<super::attraction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attraction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Favorite {
    fn from(row: Model) -> Self {
        Favorite {
            id: row.id,
            user_id: row.user_id,
            attraction_id: row.attraction_id,
            created_at: row.created_at.to_utc(),
        }
    }
}
