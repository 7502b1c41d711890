//! Content store: the CRUD surface behind both the public site and the
//! admin dashboard.

pub mod contact;
pub mod education;
pub mod experience;
pub mod messages;
pub mod patch;
pub mod projects;
pub mod visitors;

use serde::Deserialize;

use crate::errors::AppError;

/// A list-valued field. Dashboard forms submit either a real JSON array or
/// a single comma-separated string; both normalize to trimmed, non-empty
/// items in submission order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    Items(Vec<String>),
    Joined(String),
}

impl StringList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            StringList::Items(items) => items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
            StringList::Joined(joined) => joined
                .split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect(),
        }
    }
}

/// Required text field on create: present and non-blank.
pub fn require_text(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}

/// Optional text field: blank collapses to absent.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_list_from_comma_joined() {
        let list: StringList = serde_json::from_str(r#""React, Node.js,  MongoDB ""#).unwrap();
        assert_eq!(list.into_vec(), vec!["React", "Node.js", "MongoDB"]);
    }

    #[test]
    fn test_string_list_from_array() {
        let list: StringList = serde_json::from_str(r#"["Rust", " Axum "]"#).unwrap();
        assert_eq!(list.into_vec(), vec!["Rust", "Axum"]);
    }

    #[test]
    fn test_string_list_drops_empty_segments() {
        let list: StringList = serde_json::from_str(r#""a,,b, ,c""#).unwrap();
        assert_eq!(list.into_vec(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_string_list_preserves_order() {
        let list: StringList = serde_json::from_str(r#""z, a, m""#).unwrap();
        assert_eq!(list.into_vec(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_require_text_rejects_missing_and_blank() {
        assert!(require_text(None, "title").is_err());
        assert!(require_text(Some("   ".to_string()), "title").is_err());
        assert_eq!(
            require_text(Some("ok".to_string()), "title").unwrap(),
            "ok"
        );
    }

    #[test]
    fn test_optional_text_blank_collapses() {
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(optional_text(Some("x".to_string())), Some("x".to_string()));
        assert_eq!(optional_text(None), None);
    }
}
