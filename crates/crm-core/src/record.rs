//! # Loosely-Typed Bulk Records
//!
//! Bulk customer creation accepts arbitrary JSON per row. A row is kept as a
//! [`CustomerRecord`] and read field by field; it only becomes a strict
//! [`crate::types::NewCustomer`] after every check passed.
//!
//! ## Field Reading Rules
//! ```text
//! JSON string        → the string itself
//! JSON number / bool → its JSON text ("5551234", "true")
//! null / absent      → None
//! array / object     → its JSON text (fails later syntax checks)
//! not an object row  → every field absent
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Text used in error messages for a field that was not supplied.
pub const ABSENT: &str = "None";

/// One raw row of bulk input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct CustomerRecord(Map<String, Value>);

impl CustomerRecord {
    /// Reads a field as text following the module-level rules.
    pub fn field(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn name(&self) -> Option<String> {
        self.field("name")
    }

    pub fn email(&self) -> Option<String> {
        self.field("email")
    }

    pub fn phone(&self) -> Option<String> {
        self.field("phone")
    }

    /// Renders an optional field value for an error message.
    pub fn display(value: Option<&str>) -> &str {
        value.unwrap_or(ABSENT)
    }
}

impl From<Value> for CustomerRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => CustomerRecord(map),
            _ => CustomerRecord::default(),
        }
    }
}

impl From<CustomerRecord> for Value {
    fn from(record: CustomerRecord) -> Self {
        Value::Object(record.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_fields() {
        let r = CustomerRecord::from(json!({"name": "Alice", "email": "a@example.com"}));
        assert_eq!(r.name().as_deref(), Some("Alice"));
        assert_eq!(r.email().as_deref(), Some("a@example.com"));
        assert_eq!(r.phone(), None);
    }

    #[test]
    fn test_non_string_fields_render_as_json() {
        let r = CustomerRecord::from(json!({"phone": 5551234, "email": null, "name": ["x"]}));
        assert_eq!(r.phone().as_deref(), Some("5551234"));
        assert_eq!(r.email(), None);
        assert_eq!(r.name().as_deref(), Some("[\"x\"]"));
    }

    #[test]
    fn test_non_object_row_has_no_fields() {
        let r = CustomerRecord::from(json!("not a row"));
        assert_eq!(r.email(), None);
        assert_eq!(CustomerRecord::display(r.email().as_deref()), "None");
    }

    #[test]
    fn test_deserialize_from_json_array() {
        let rows: Vec<CustomerRecord> =
            serde_json::from_str(r#"[{"email": "x@example.com"}, 7]"#).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].email().as_deref(), Some("x@example.com"));
        assert_eq!(rows[1], CustomerRecord::default());
    }
}
