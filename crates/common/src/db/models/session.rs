//! Session entity
//!
//! Only the token hash is stored; the opaque token itself goes back to the
//! client once and is never persisted server-side.

use crate::models::UserProfile;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub token_hash: String,

    #[sea_orm(column_type = "Text")]
    pub user_id: String,

    /// Cached identity-provider profile as JSONB
    #[sea_orm(column_type = "JsonBinary")]
    pub profile: Json,

    pub created_at: DateTimeWithTimeZone,

    pub expires_at: DateTimeWithTimeZone,
}

impl Model {
    /// Check if the session is expired
    pub fn is_expired(&self) -> bool {
        use chrono::Utc;
        let now: DateTimeWithTimeZone = Utc::now().into();
        self.expires_at < now
    }

    /// Decode the cached profile
    pub fn user_profile(&self) -> Option<UserProfile> {
        serde_json::from_value(self.profile.clone()).ok()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
