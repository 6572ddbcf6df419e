//! Property record
//!
//! Rows of the `properties` table. The service reads them; `NewProperty` is
//! only used to seed the table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A property listing as stored in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Property {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// Column values for inserting a property; the id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl NewProperty {
    /// Listing created now.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
            location: location.into(),
            created_at: Utc::now(),
        }
    }
}
