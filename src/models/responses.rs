//! Response DTOs for the property service
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Property;

/// One entry of the listing: the six public fields of a property, in wire order.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyListItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl From<Property> for PropertyListItem {
    fn from(property: Property) -> Self {
        Self {
            id: property.id,
            title: property.title,
            description: property.description,
            price: property.price,
            location: property.location,
            created_at: property.created_at,
        }
    }
}

/// Response body for the listing endpoint (GET /properties/)
#[derive(Debug, Clone, Serialize)]
pub struct PropertyListResponse {
    pub data: Vec<PropertyListItem>,
}

impl PropertyListResponse {
    /// Projects properties onto list items, keeping their order.
    pub fn from_properties(properties: Vec<Property>) -> Self {
        Self {
            data: properties.into_iter().map(PropertyListItem::from).collect(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(id: i64, title: &str) -> Property {
        Property {
            id,
            title: title.to_string(),
            description: "desc".to_string(),
            price: 100.5,
            location: "Paris".to_string(),
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_list_response_shape() {
        let resp = PropertyListResponse::from_properties(vec![property(2, "B"), property(1, "A")]);
        let json = serde_json::to_value(&resp).unwrap();

        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["id"], 2);
        assert_eq!(data[1]["title"], "A");

        let keys: Vec<&str> = data[0].as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 6);
        for field in ["id", "title", "description", "price", "location", "created_at"] {
            assert!(keys.contains(&field), "missing {}", field);
        }
    }

    #[test]
    fn test_list_item_field_order() {
        let json = serde_json::to_string(&PropertyListItem::from(property(1, "A"))).unwrap();

        let positions: Vec<usize> = ["\"id\"", "\"title\"", "\"description\"", "\"price\"", "\"location\"", "\"created_at\""]
            .iter()
            .map(|field| json.find(field).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_listing() {
        let json = serde_json::to_string(&PropertyListResponse::from_properties(Vec::new())).unwrap();
        assert_eq!(json, r#"{"data":[]}"#);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
