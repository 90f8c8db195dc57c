//! Repository pattern for database operations
//!
//! Provides a clean interface for all data access operations. The category
//! filter is pushed into SQL as JSONB containment so server-side filtering
//! agrees exactly with `crate::filter::by_category`.

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use crate::models::{Category, UserProfile};
use chrono::{DateTime, Duration, TimeZone, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the read connection
    fn read_conn(&self) -> &DatabaseConnection {
        self.pool.read()
    }

    /// Get the write connection
    fn write_conn(&self) -> &DatabaseConnection {
        self.pool.write()
    }

    // ========================================================================
    // Health Check
    // ========================================================================

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    /// Collection counts reported by the health endpoint
    pub async fn count_attractions(&self) -> Result<u64> {
        AttractionEntity::find()
            .count(self.read_conn())
            .await
            .map_err(Into::into)
    }

    pub async fn count_events(&self) -> Result<u64> {
        EventEntity::find()
            .count(self.read_conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Attraction Operations
    // ========================================================================

    /// List attractions with optional category/location filtering.
    ///
    /// The category predicate is JSONB containment on the tag array, which
    /// matches the in-memory filter's "category set contains" semantics.
    pub async fn list_attractions(
        &self,
        category: Option<Category>,
        location: Option<&str>,
        limit: u64,
    ) -> Result<Vec<AttractionRow>> {
        let mut query = AttractionEntity::find();

        if let Some(category) = category {
            let tag = serde_json::json!([category.as_str()]).to_string();
            query = query.filter(Expr::cust_with_values(
                r#""categories" @> ?::jsonb"#,
                [tag],
            ));
        }

        if let Some(location) = location {
            query = query.filter(Expr::cust_with_values(
                r#""location" ILIKE ?"#,
                [format!("%{}%", location)],
            ));
        }

        query
            .limit(limit)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find attraction by ID
    pub async fn find_attraction(&self, id: &str) -> Result<Option<AttractionRow>> {
        AttractionEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Event Operations
    // ========================================================================

    /// List events ordered by start date. Both date bounds apply to the
    /// start date; the end date column never participates in the window.
    pub async fn list_events(
        &self,
        category: Option<Category>,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        limit: u64,
    ) -> Result<Vec<EventRow>> {
        let mut query = EventEntity::find();

        if let Some(category) = category {
            query = query.filter(EventColumn::Category.eq(category.as_str()));
        }

        if let Some(start) = start_date {
            query = query.filter(EventColumn::StartDate.gte(start));
        }

        if let Some(end) = end_date {
            query = query.filter(EventColumn::StartDate.lte(end));
        }

        query
            .order_by_asc(EventColumn::StartDate)
            .limit(limit)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find event by ID
    pub async fn find_event(&self, id: &str) -> Result<Option<EventRow>> {
        EventEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Favorite Operations
    // ========================================================================

    /// Add a favorite. Idempotent: if the pair already exists, the existing
    /// row is returned unchanged.
    pub async fn add_favorite(&self, user_id: &str, attraction_id: &str) -> Result<FavoriteRow> {
        if let Some(existing) = FavoriteEntity::find()
            .filter(FavoriteColumn::UserId.eq(user_id))
            .filter(FavoriteColumn::AttractionId.eq(attraction_id))
            .one(self.write_conn())
            .await?
        {
            return Ok(existing);
        }

        let row = FavoriteActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            attraction_id: Set(attraction_id.to_string()),
            created_at: Set(Utc::now().into()),
        };

        row.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// List the attractions a user has favorited
    pub async fn list_favorite_attractions(&self, user_id: &str) -> Result<Vec<AttractionRow>> {
        let favorites = FavoriteEntity::find()
            .filter(FavoriteColumn::UserId.eq(user_id))
            .all(self.read_conn())
            .await?;

        if favorites.is_empty() {
            return Ok(Vec::new());
        }

        let attraction_ids: Vec<String> =
            favorites.into_iter().map(|f| f.attraction_id).collect();

        AttractionEntity::find()
            .filter(AttractionColumn::Id.is_in(attraction_ids))
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Remove a favorite. Returns false when no row matched.
    pub async fn remove_favorite(&self, user_id: &str, attraction_id: &str) -> Result<bool> {
        let result = FavoriteEntity::delete_many()
            .filter(FavoriteColumn::UserId.eq(user_id))
            .filter(FavoriteColumn::AttractionId.eq(attraction_id))
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Session Operations
    // ========================================================================

    /// Persist a new session for the given profile
    pub async fn create_session(
        &self,
        token_hash: &str,
        profile: &UserProfile,
        ttl_days: i64,
    ) -> Result<SessionRow> {
        let now = Utc::now();
        let row = SessionActiveModel {
            token_hash: Set(token_hash.to_string()),
            user_id: Set(profile.id.clone()),
            profile: Set(serde_json::to_value(profile)?),
            created_at: Set(now.into()),
            expires_at: Set((now + Duration::days(ttl_days)).into()),
        };

        row.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Look up a session by token hash. Expiry is the caller's concern.
    pub async fn find_session(&self, token_hash: &str) -> Result<Option<SessionRow>> {
        SessionEntity::find_by_id(token_hash)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Delete a session. Returns false when no row matched.
    pub async fn delete_session(&self, token_hash: &str) -> Result<bool> {
        let result = SessionEntity::delete_by_id(token_hash)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Analytics & Holidays
    // ========================================================================

    /// List visitor analytics with optional dimension filters
    pub async fn list_analytics(
        &self,
        year: Option<i32>,
        month: Option<i32>,
        country: Option<&str>,
        visitor_type: Option<&str>,
    ) -> Result<Vec<VisitorAnalyticsRow>> {
        let mut query = VisitorAnalyticsEntity::find();

        if let Some(year) = year {
            query = query.filter(VisitorAnalyticsColumn::Year.eq(year));
        }
        if let Some(month) = month {
            query = query.filter(VisitorAnalyticsColumn::Month.eq(month));
        }
        if let Some(country) = country {
            query = query.filter(VisitorAnalyticsColumn::Country.eq(country));
        }
        if let Some(visitor_type) = visitor_type {
            query = query.filter(VisitorAnalyticsColumn::VisitorType.eq(visitor_type));
        }

        query.all(self.read_conn()).await.map_err(Into::into)
    }

    /// List public holidays, optionally windowed to one calendar year
    pub async fn list_holidays(&self, year: Option<i32>) -> Result<Vec<PublicHolidayRow>> {
        let mut query = PublicHolidayEntity::find();

        if let Some(year) = year {
            let window = Utc
                .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
                .single()
                .zip(Utc.with_ymd_and_hms(year.saturating_add(1), 1, 1, 0, 0, 0).single())
                .ok_or_else(|| AppError::InvalidFormat {
                    message: format!("Year out of range: {year}"),
                })?;
            query = query
                .filter(PublicHolidayColumn::Date.gte(window.0))
                .filter(PublicHolidayColumn::Date.lt(window.1));
        }

        query
            .order_by_asc(PublicHolidayColumn::Date)
            .limit(100)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Itinerary Operations
    // ========================================================================

    /// Persist a generated itinerary
    pub async fn insert_itinerary(
        &self,
        user_id: Option<&str>,
        text: &str,
        interests: &[Category],
        duration: u32,
        budget: &str,
    ) -> Result<ItineraryRow> {
        let tags: Vec<&str> = interests.iter().map(|c| c.as_str()).collect();
        let row = ItineraryActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.map(String::from)),
            itinerary: Set(text.to_string()),
            interests: Set(serde_json::json!(tags)),
            duration: Set(duration as i32),
            budget: Set(budget.to_string()),
            created_at: Set(Utc::now().into()),
        };

        row.insert(self.write_conn()).await.map_err(Into::into)
    }
}
