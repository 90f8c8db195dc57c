//! HTTP request handlers

pub mod analytics;
pub mod attractions;
pub mod auth;
pub mod events;
pub mod favorites;
pub mod health;
pub mod itinerary;

use wayfare_common::errors::{AppError, Result};
use wayfare_common::models::Category;

/// Resolve an optional category query parameter against the closed
/// vocabulary. "All" is the UI sentinel and means no filter; anything
/// else unrecognized is a validation failure rather than a silent no-op.
pub(crate) fn category_param(raw: Option<&str>) -> Result<Option<Category>> {
    match raw {
        None => Ok(None),
        Some("All") => Ok(None),
        Some(value) => value.parse::<Category>().map(Some).map_err(|_| {
            AppError::InvalidFormat {
                message: format!("Unknown category: {value}"),
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_param() {
        assert_eq!(category_param(None).unwrap(), None);
        assert_eq!(category_param(Some("All")).unwrap(), None);
        assert_eq!(
            category_param(Some("Culture")).unwrap(),
            Some(Category::Culture)
        );
        assert!(category_param(Some("Shopping")).is_err());
    }
}
