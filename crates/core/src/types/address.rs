//! Shipping addresses.

use serde::{Deserialize, Serialize};

use super::id::AddressId;

/// Country pre-filled on the address form.
pub const DEFAULT_COUNTRY: &str = "India";

/// A required address field that was left blank.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("missing required address field(s): {}", .0.join(", "))]
pub struct AddressError(pub Vec<&'static str>);

/// Address form contents, before the API assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    pub full_name: String,
    pub phone_number: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub is_default: bool,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_owned()
}

impl Default for AddressInput {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            phone_number: String::new(),
            address_line1: String::new(),
            address_line2: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            country: default_country(),
            is_default: false,
        }
    }
}

impl AddressInput {
    /// Check that every starred form field has a value.
    ///
    /// # Errors
    ///
    /// Returns the wire names of all blank required fields.
    pub fn validate(&self) -> Result<(), AddressError> {
        let required = [
            ("fullName", &self.full_name),
            ("phoneNumber", &self.phone_number),
            ("addressLine1", &self.address_line1),
            ("city", &self.city),
            ("state", &self.state),
            ("postalCode", &self.postal_code),
            ("country", &self.country),
        ];
        let missing: Vec<&'static str> = required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AddressError(missing))
        }
    }
}

/// A saved address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "_id", alias = "id")]
    pub id: AddressId,
    #[serde(flatten)]
    pub fields: AddressInput,
}

impl Address {
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.fields.is_default
    }

    /// Single-line rendering for lists and order summaries.
    #[must_use]
    pub fn one_line(&self) -> String {
        let f = &self.fields;
        let mut parts = vec![f.full_name.as_str(), f.address_line1.as_str()];
        if !f.address_line2.trim().is_empty() {
            parts.push(f.address_line2.as_str());
        }
        parts.extend([f.city.as_str(), f.state.as_str(), f.postal_code.as_str()]);
        parts.join(", ")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_lists_missing_fields() {
        let input = AddressInput {
            full_name: "Asha Rao".to_owned(),
            city: "Pune".to_owned(),
            ..AddressInput::default()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(
            err.0,
            vec!["phoneNumber", "addressLine1", "state", "postalCode"]
        );
    }

    #[test]
    fn test_address_wire_format() {
        let address: Address = serde_json::from_str(
            r#"{"_id": "a1", "fullName": "Asha Rao", "phoneNumber": "99",
                "addressLine1": "1 MG Road", "city": "Pune", "state": "MH",
                "postalCode": "411001", "isDefault": true}"#,
        )
        .unwrap();
        assert_eq!(address.id.as_str(), "a1");
        assert_eq!(address.fields.country, DEFAULT_COUNTRY);
        assert!(address.is_default());
        assert_eq!(address.one_line(), "Asha Rao, 1 MG Road, Pune, MH, 411001");
    }
}
