//! Three-state PATCH field.
//!
//! JSON cannot distinguish "key omitted" from "key: null" once both collapse
//! into `Option`, so partial updates model each field as:
//! - omitted   => `Absent` (keep the stored value)
//! - null      => `Null` (clear)
//! - value     => `Value(v)` (replace)

use serde::{Deserialize, Serialize};

use crate::content::StringList;
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Patch<T> {
    #[serde(skip)]
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// Resolves against the stored value of a column that cannot be null.
    pub fn merge_required(self, current: T, field: &'static str) -> Result<T, AppError> {
        match self {
            Patch::Absent => Ok(current),
            Patch::Null => Err(AppError::Validation(format!("{field} cannot be null"))),
            Patch::Value(v) => Ok(v),
        }
    }

    /// Resolves against the stored value of a nullable column.
    pub fn merge_optional(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Absent => current,
            Patch::Null => None,
            Patch::Value(v) => Some(v),
        }
    }
}

impl Patch<String> {
    /// Text fields that clear to empty rather than NULL.
    pub fn merge_text(self, current: String) -> String {
        match self {
            Patch::Absent => current,
            Patch::Null => String::new(),
            Patch::Value(v) => v,
        }
    }
}

impl Patch<StringList> {
    /// List fields replace wholesale; null empties the list.
    pub fn merge_list(self, current: Vec<String>) -> Vec<String> {
        match self {
            Patch::Absent => current,
            Patch::Null => Vec::new(),
            Patch::Value(list) => list.into_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default)]
        title: Patch<String>,
        #[serde(default)]
        link: Patch<String>,
        #[serde(default)]
        tech: Patch<StringList>,
    }

    #[test]
    fn test_omitted_key_deserializes_to_absent() {
        let p: Payload = serde_json::from_str("{}").unwrap();
        assert!(p.title.is_absent());
        assert!(p.link.is_absent());
        assert!(p.tech.is_absent());
    }

    #[test]
    fn test_explicit_null_deserializes_to_null() {
        let p: Payload = serde_json::from_str(r#"{"link": null}"#).unwrap();
        assert_eq!(p.link, Patch::Null);
        assert!(p.title.is_absent(), "other keys stay absent");
    }

    #[test]
    fn test_value_deserializes_to_value() {
        let p: Payload = serde_json::from_str(r#"{"title": "New"}"#).unwrap();
        assert_eq!(p.title, Patch::Value("New".to_string()));
    }

    #[test]
    fn test_empty_string_is_a_value_not_absent() {
        // "cleared to empty string" must survive, unlike truthiness checks.
        let p: Payload = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert_eq!(p.title, Patch::Value(String::new()));
    }

    #[test]
    fn test_merge_required_keeps_current_when_absent() {
        let merged = Patch::Absent
            .merge_required("old".to_string(), "title")
            .unwrap();
        assert_eq!(merged, "old");
    }

    #[test]
    fn test_merge_required_rejects_null() {
        let result = Patch::<String>::Null.merge_required("old".to_string(), "title");
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_merge_optional_null_clears() {
        let merged = Patch::<String>::Null.merge_optional(Some("old".to_string()));
        assert_eq!(merged, None);
    }

    #[test]
    fn test_merge_optional_absent_keeps() {
        let merged = Patch::<String>::Absent.merge_optional(Some("old".to_string()));
        assert_eq!(merged, Some("old".to_string()));
    }

    #[test]
    fn test_merge_list_value_replaces_wholesale() {
        let p: Payload = serde_json::from_str(r#"{"tech": "Rust, Axum"}"#).unwrap();
        let merged = p.tech.merge_list(vec!["Old".to_string()]);
        assert_eq!(merged, vec!["Rust", "Axum"]);
    }

    #[test]
    fn test_merge_list_null_empties() {
        let merged = Patch::<StringList>::Null.merge_list(vec!["Old".to_string()]);
        assert!(merged.is_empty());
    }
}
