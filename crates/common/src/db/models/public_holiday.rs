//! Public holiday entity

use crate::models::PublicHoliday;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "public_holidays")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub date: DateTimeWithTimeZone,

    #[sea_orm(column_type = "Text")]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PublicHoliday {
    fn from(row: Model) -> Self {
        PublicHoliday {
            date: row.date.to_utc(),
            name: row.name,
        }
    }
}
