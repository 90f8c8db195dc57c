//! SeaORM entity models
//!
//! Database entities for the Wayfare backend. Wire-level conversions to the
//! shared domain models live next to each entity.

mod attraction;
mod event;
mod favorite;
mod itinerary;
mod public_holiday;
mod session;
mod visitor_analytics;

pub use attraction::{
    Entity as AttractionEntity,
    Model as AttractionRow,
    ActiveModel as AttractionActiveModel,
    Column as AttractionColumn,
};

pub use event::{
    Entity as EventEntity,
    Model as EventRow,
    ActiveModel as EventActiveModel,
    Column as EventColumn,
};

pub use favorite::{
    Entity as FavoriteEntity,
    Model as FavoriteRow,
    ActiveModel as FavoriteActiveModel,
    Column as FavoriteColumn,
};

pub use session::{
    Entity as SessionEntity,
    Model as SessionRow,
    ActiveModel as SessionActiveModel,
    Column as SessionColumn,
};

pub use visitor_analytics::{
    Entity as VisitorAnalyticsEntity,
    Model as VisitorAnalyticsRow,
    ActiveModel as VisitorAnalyticsActiveModel,
    Column as VisitorAnalyticsColumn,
};

pub use public_holiday::{
    Entity as PublicHolidayEntity,
    Model as PublicHolidayRow,
    ActiveModel as PublicHolidayActiveModel,
    Column as PublicHolidayColumn,
};

pub use itinerary::{
    Entity as ItineraryEntity,
    Model as ItineraryRow,
    ActiveModel as ItineraryActiveModel,
    Column as ItineraryColumn,
};
