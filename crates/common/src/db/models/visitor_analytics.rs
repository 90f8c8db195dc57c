//! Visitor analytics entity
//!
//! Pre-aggregated monthly visitor counts loaded by the import process.

use crate::models::VisitorAnalytics;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "visitor_analytics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub year: i32,

    pub month: i32,

    #[sea_orm(column_type = "Text")]
    pub country: String,

    #[sea_orm(column_type = "Text")]
    pub visitor_type: String,

    pub count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for VisitorAnalytics {
    fn from(row: Model) -> Self {
        VisitorAnalytics {
            year: row.year,
            month: row.month,
            country: row.country,
            visitor_type: row.visitor_type,
            count: row.count,
        }
    }
}
