//! Delegated external services

pub mod identity;
pub mod itinerary;
