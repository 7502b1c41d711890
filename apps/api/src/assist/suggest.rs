//! Prompt construction and response parsing for field suggestions.

use serde_json::Value;

use crate::assist::prompts::{
    DESCRIPTION_INSTRUCTION, SUGGEST_PROMPT_TEMPLATE, TECH_INSTRUCTION,
};
use crate::errors::AppError;
use crate::models::profile::AiProfile;

/// Content types the suggestion endpoint serves.
const SUGGEST_TYPES: &[&str] = &["project", "experience", "education"];
/// Form fields the endpoint can draft. "tech" and "technologies" are the
/// same field under the two names the dashboard forms use.
const SUGGEST_FIELDS: &[&str] = &["description", "tech", "technologies"];

pub fn validate_type(value: Option<String>) -> Result<String, AppError> {
    validate_choice(value, SUGGEST_TYPES, "type")
}

pub fn validate_field(value: Option<String>) -> Result<String, AppError> {
    validate_choice(value, SUGGEST_FIELDS, "field")
}

fn validate_choice(
    value: Option<String>,
    allowed: &[&str],
    name: &'static str,
) -> Result<String, AppError> {
    let value = value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if allowed.contains(&value.as_str()) {
        Ok(value)
    } else {
        Err(AppError::Validation(format!(
            "{name} must be one of {allowed:?}, got \"{value}\""
        )))
    }
}

/// Builds the suggestion prompt for one (type, field) pair. The profile, when
/// present, adds an author block so drafts come out in the owner's voice.
pub fn build_prompt(kind: &str, field: &str, context: &Value, profile: Option<&AiProfile>) -> String {
    let field_instruction = match field {
        "description" => DESCRIPTION_INSTRUCTION,
        _ => TECH_INSTRUCTION,
    };

    let context_json =
        serde_json::to_string_pretty(context).unwrap_or_else(|_| "{}".to_string());

    let author_block = match profile {
        Some(profile) => render_author_block(profile),
        None => String::new(),
    };

    SUGGEST_PROMPT_TEMPLATE
        .replace("{field_instruction}", field_instruction)
        .replace("{kind}", kind)
        .replace("{context_json}", &context_json)
        .replace("{author_block}", &author_block)
}

/// Lines about the owner, drawn from the AI context profile. Empty fields
/// are skipped; an entirely empty profile contributes nothing.
fn render_author_block(profile: &AiProfile) -> String {
    let mut lines = Vec::new();

    if !profile.current_role.trim().is_empty() {
        lines.push(format!("Role: {}", profile.current_role));
    }
    if !profile.years_of_experience.trim().is_empty() {
        lines.push(format!(
            "Years of experience: {}",
            profile.years_of_experience
        ));
    }
    if !profile.specializations.is_empty() {
        lines.push(format!(
            "Specializations: {}",
            profile.specializations.join(", ")
        ));
    }
    let skills = profile.technical_skills.flatten();
    if !skills.is_empty() {
        lines.push(format!("Tech stack: {}", skills.join(", ")));
    }
    if !profile.writing_tone.trim().is_empty() {
        lines.push(format!("Writing tone: {}", profile.writing_tone));
    }
    if !profile.custom_instructions.trim().is_empty() {
        lines.push(format!(
            "Extra instructions: {}",
            profile.custom_instructions
        ));
    }

    if lines.is_empty() {
        return String::new();
    }
    format!("\nABOUT THE AUTHOR:\n{}\n", lines.join("\n"))
}

/// Splits a model response into suggestions by stripping leading `N.` list
/// markers, one suggestion per line. A response with no numbered lines comes
/// back whole as a single suggestion.
pub fn parse_suggestions(raw: &str) -> Vec<String> {
    let items: Vec<String> = raw.lines().filter_map(strip_list_marker).collect();
    if items.is_empty() {
        vec![raw.trim().to_string()]
    } else {
        items
    }
}

fn strip_list_marker(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix(|c: char| c.is_ascii_digit())?;
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    let rest = rest.strip_prefix('.')?;
    let text = rest.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::TechnicalSkills;
    use chrono::Utc;
    use serde_json::json;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn make_profile() -> AiProfile {
        AiProfile {
            account_id: Uuid::new_v4(),
            full_name: String::new(),
            tagline: String::new(),
            bio: String::new(),
            location: String::new(),
            current_role: "Backend Engineer".to_string(),
            years_of_experience: "6".to_string(),
            specializations: vec!["distributed systems".to_string()],
            industries: vec![],
            technical_skills: Json(TechnicalSkills {
                languages: vec!["Rust".to_string()],
                frameworks: vec![],
                tools: vec![],
                databases: vec![],
                cloud_platforms: vec![],
            }),
            work_style: String::new(),
            preferred_project_types: vec![],
            career_goals: String::new(),
            writing_tone: "casual".to_string(),
            personal_quirks: String::new(),
            custom_instructions: String::new(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_numbered_list() {
        let parsed = parse_suggestions("1. Foo\n2. Bar\n3. Baz");
        assert_eq!(parsed, vec!["Foo", "Bar", "Baz"]);
    }

    #[test]
    fn test_parse_tolerates_indentation_and_blank_lines() {
        let parsed = parse_suggestions("  1. Foo\n\n  2. Bar\n");
        assert_eq!(parsed, vec!["Foo", "Bar"]);
    }

    #[test]
    fn test_parse_multi_digit_markers() {
        let parsed = parse_suggestions("10. Tenth\n11. Eleventh");
        assert_eq!(parsed, vec!["Tenth", "Eleventh"]);
    }

    #[test]
    fn test_unnumbered_response_returned_whole() {
        let raw = "Here is a single suggestion without numbering.";
        assert_eq!(parse_suggestions(raw), vec![raw.to_string()]);
    }

    #[test]
    fn test_unnumbered_lines_between_items_are_dropped() {
        let parsed = parse_suggestions("Sure, here you go:\n1. Foo\n2. Bar");
        assert_eq!(parsed, vec!["Foo", "Bar"]);
    }

    #[test]
    fn test_validate_type_accepts_known_rejects_unknown() {
        assert_eq!(
            validate_type(Some("Project".to_string())).unwrap(),
            "project"
        );
        assert!(validate_type(Some("blogpost".to_string())).is_err());
        assert!(validate_type(None).is_err());
    }

    #[test]
    fn test_validate_field_accepts_both_tech_spellings() {
        assert_eq!(validate_field(Some("tech".to_string())).unwrap(), "tech");
        assert_eq!(
            validate_field(Some("technologies".to_string())).unwrap(),
            "technologies"
        );
        assert!(validate_field(Some("title".to_string())).is_err());
    }

    #[test]
    fn test_prompt_embeds_context_and_kind() {
        let context = json!({"title": "Folio"});
        let prompt = build_prompt("project", "description", &context, None);
        assert!(prompt.contains("CONTENT TYPE: project"));
        assert!(prompt.contains("\"title\": \"Folio\""));
        assert!(prompt.contains("compelling"));
        assert!(!prompt.contains("ABOUT THE AUTHOR"));
    }

    #[test]
    fn test_prompt_includes_profile_when_present() {
        let context = json!({});
        let prompt = build_prompt("experience", "tech", &context, Some(&make_profile()));
        assert!(prompt.contains("ABOUT THE AUTHOR"));
        assert!(prompt.contains("Role: Backend Engineer"));
        assert!(prompt.contains("Tech stack: Rust"));
        assert!(prompt.contains("Writing tone: casual"));
    }

    #[test]
    fn test_empty_profile_contributes_nothing() {
        let mut profile = make_profile();
        profile.current_role = String::new();
        profile.years_of_experience = String::new();
        profile.specializations = vec![];
        profile.technical_skills = Json(TechnicalSkills::default());
        profile.writing_tone = String::new();
        let prompt = build_prompt("project", "tech", &json!({}), Some(&profile));
        assert!(!prompt.contains("ABOUT THE AUTHOR"));
    }
}
