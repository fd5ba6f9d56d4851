//! Bound form state
//!
//! A minimal counterpart of a web framework's bound form: submitted field
//! values plus field-level error collections. Handlers attach this to the
//! page context under the `form` key; validation failures re-render the
//! same form with errors instead of surfacing an error response.

use serde::Serialize;
use std::collections::BTreeMap;

/// Field key used for errors that are not tied to a single field
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Bound field values and field-level errors
#[derive(Debug, Clone, Default, Serialize)]
pub struct Form {
    /// Submitted values, keyed by field name
    pub values: BTreeMap<String, String>,
    /// Validation errors, keyed by field name
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl Form {
    /// Create an empty, unbound form
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a field value
    pub fn value(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Attach an error to a field
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_default().push(message.into());
    }

    /// Check whether the form passed validation
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors attached to a single field
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_is_valid() {
        let form = Form::new().value("text", "hello");
        assert!(form.is_valid());
        assert!(form.field_errors("text").is_empty());
    }

    #[test]
    fn test_add_error_invalidates_form() {
        let mut form = Form::new().value("slug", "dup");
        form.add_error("slug", "taken");

        assert!(!form.is_valid());
        assert_eq!(form.field_errors("slug"), ["taken"]);
    }

    #[test]
    fn test_errors_accumulate_per_field() {
        let mut form = Form::new();
        form.add_error("text", "first");
        form.add_error("text", "second");
        form.add_error(NON_FIELD_ERRORS, "other");

        assert_eq!(form.field_errors("text").len(), 2);
        assert_eq!(form.field_errors(NON_FIELD_ERRORS), ["other"]);
    }

    #[test]
    fn test_serialization_omits_empty_errors() {
        let form = Form::new().value("title", "t");
        let json = serde_json::to_value(&form).unwrap();
        assert!(json.get("errors").is_none());
        assert_eq!(json["values"]["title"], "t");
    }
}
