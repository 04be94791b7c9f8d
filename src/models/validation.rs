//! Field-level request validation.

use std::collections::HashMap;

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FieldErrors(HashMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        // First message per field wins
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.0
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Character-count bounds, inclusive.
    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min {
            self.add(field, format!("must be at least {} characters", min));
        } else if len > max {
            self.add(field, format!("must be at most {} characters", max));
        }
    }

    pub fn optional_length(&mut self, field: &str, value: Option<&str>, min: usize, max: usize) {
        if let Some(value) = value {
            self.length(field, value, min, max);
        }
    }

    /// Absolute http(s) URL
    pub fn http_url(&mut self, field: &str, value: Option<&str>) {
        let Some(value) = value else { return };
        match url::Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            _ => self.add(field, "must be an absolute http or https URL"),
        }
    }

    pub fn positive(&mut self, field: &str, value: Option<i32>) {
        if matches!(value, Some(v) if v <= 0) {
            self.add(field, "must be greater than 0");
        }
    }

    pub fn range(&mut self, field: &str, value: i64, min: i64, max: i64) {
        if value < min || value > max {
            self.add(field, format!("must be between {} and {}", min, max));
        }
    }
}

/// Request bodies and query strings check themselves before any procedure
/// is called.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_characters_not_bytes() {
        let mut errors = FieldErrors::new();
        errors.length("name", "ééé", 1, 3);
        assert!(errors.is_empty());
        errors.length("name", "éééé", 1, 3);
        assert_eq!(errors.get("name"), Some("must be at most 3 characters"));
    }

    #[test]
    fn first_message_per_field_is_kept() {
        let mut errors = FieldErrors::new();
        errors.add("slug", "first");
        errors.add("slug", "second");
        assert_eq!(errors.get("slug"), Some("first"));
    }

    #[test]
    fn url_checks_scheme_and_host() {
        let mut errors = FieldErrors::new();
        errors.http_url("icon_url", Some("https://cdn.example.com/a.png"));
        errors.http_url("cover_image_url", None);
        assert!(errors.is_empty());

        errors.http_url("icon_url", Some("ftp://example.com/a.png"));
        errors.http_url("cover_image_url", Some("/relative/path.png"));
        assert!(errors.get("icon_url").is_some());
        assert!(errors.get("cover_image_url").is_some());
    }
}
