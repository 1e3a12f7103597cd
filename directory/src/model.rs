//! Directory records.
//!
//! Search results stay loosely typed ([`UserSummary`]) because the table
//! only ever projects a few named fields out of them. The detail editor works
//! on the typed [`UserProfile`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One search hit, kept as the raw JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserSummary(Map<String, Value>);

impl UserSummary {
    /// Wrap a JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw value of `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Numeric `id`, if present.
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        self.get("id").and_then(Value::as_u64)
    }

    /// `field` rendered for a table cell.
    ///
    /// Missing and null fields are empty; strings are shown as-is; other
    /// values use their JSON text.
    #[must_use]
    pub fn cell(&self, field: &str) -> String {
        match self.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// The underlying JSON object.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for UserSummary {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Body of a keyword search response.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub(crate) users: Vec<UserSummary>,
}

/// Geographic position of an address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    /// Street line.
    pub address: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
    /// Position.
    pub coordinates: Coordinates,
}

/// Payment card details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bank {
    /// Card number.
    pub card_number: String,
    /// Expiry, as `MM/YY`.
    pub card_expire: String,
    /// Card network.
    pub card_type: String,
    /// Currency code.
    pub currency: String,
    /// Account IBAN.
    pub iban: String,
}

/// The editable part of a directory user.
///
/// Fields the editor does not show are dropped on decode and never sent back.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// User id.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Network hardware address.
    pub mac_address: String,
    /// University.
    pub university: String,
    /// Postal address.
    pub address: Address,
    /// Payment card.
    pub bank: Bank,
}

impl std::fmt::Debug for UserProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserProfile")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("university", &self.university)
            .field("city", &self.address.city)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(value: Value) -> UserSummary {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_cell_rendering() {
        let record = summary(json!({
            "id": 5,
            "firstName": "Emily",
            "age": 28,
            "verified": true,
            "phone": null,
            "hair": { "color": "Brown" }
        }));

        assert_eq!(record.cell("firstName"), "Emily");
        assert_eq!(record.cell("age"), "28");
        assert_eq!(record.cell("verified"), "true");
        assert_eq!(record.cell("phone"), "");
        assert_eq!(record.cell("email"), "");
        assert_eq!(record.cell("hair"), r#"{"color":"Brown"}"#);
        assert_eq!(record.id(), Some(5));
    }

    #[test]
    fn test_profile_decodes_camel_case_and_ignores_extras() {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": 1,
            "username": "emilys",
            "email": "emily@x.dummyjson.com",
            "macAddress": "47:fa:41:18:ec:eb",
            "university": "University of Wisconsin",
            "phone": "+81 965-431-3024",
            "address": {
                "address": "626 Main Street",
                "city": "Phoenix",
                "state": "Mississippi",
                "postalCode": "29112",
                "coordinates": { "lat": -77.16213, "lng": -92.084824 },
                "country": "United States"
            },
            "bank": {
                "cardExpire": "03/26",
                "cardNumber": "9289760655481815",
                "cardType": "Elo",
                "currency": "CNY",
                "iban": "YPUXISOBI7TTHPK2BR3HAIXL"
            }
        }))
        .unwrap();

        assert_eq!(profile.mac_address, "47:fa:41:18:ec:eb");
        assert_eq!(profile.address.postal_code, "29112");
        assert!((profile.address.coordinates.lng + 92.084_824).abs() < f64::EPSILON);
        assert_eq!(profile.bank.card_type, "Elo");

        let encoded = serde_json::to_value(&profile).unwrap();
        assert!(encoded.get("phone").is_none());
        assert_eq!(encoded["address"]["postalCode"], "29112");
    }

    #[test]
    fn test_profile_debug_hides_bank() {
        let profile = UserProfile {
            bank: Bank {
                card_number: "9289760655481815".to_string(),
                ..Bank::default()
            },
            ..UserProfile::default()
        };
        assert!(!format!("{profile:?}").contains("9289760655481815"));
    }
}
