use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Tones the suggestion prompts can write in.
pub const WRITING_TONES: &[&str] = &["professional", "casual", "technical", "creative"];
pub const DEFAULT_WRITING_TONE: &str = "professional";

/// Per-account background the suggestion prompts draw from. Created lazily
/// with empty defaults on first read and always scoped to its owner.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AiProfile {
    pub account_id: Uuid,
    pub full_name: String,
    pub tagline: String,
    pub bio: String,
    pub location: String,
    #[sqlx(rename = "role_title")]
    pub current_role: String,
    pub years_of_experience: String,
    pub specializations: Vec<String>,
    pub industries: Vec<String>,
    pub technical_skills: Json<TechnicalSkills>,
    pub work_style: String,
    pub preferred_project_types: Vec<String>,
    pub career_goals: String,
    pub writing_tone: String,
    pub personal_quirks: String,
    pub custom_instructions: String,
    pub updated_at: DateTime<Utc>,
}

/// Skill buckets, stored as one JSONB document. Replaced wholesale on
/// update, never deep-merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSkills {
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub frameworks: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub databases: Vec<String>,
    #[serde(default)]
    pub cloud_platforms: Vec<String>,
}

impl TechnicalSkills {
    /// Flat view for prompt text, bucket order preserved.
    pub fn flatten(&self) -> Vec<&str> {
        self.languages
            .iter()
            .chain(&self.frameworks)
            .chain(&self.tools)
            .chain(&self.databases)
            .chain(&self.cloud_platforms)
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technical_skills_partial_json_fills_missing_buckets() {
        let skills: TechnicalSkills =
            serde_json::from_str(r#"{"languages": ["Rust", "Go"]}"#).unwrap();
        assert_eq!(skills.languages, vec!["Rust", "Go"]);
        assert!(skills.frameworks.is_empty());
        assert!(skills.cloud_platforms.is_empty());
    }

    #[test]
    fn test_flatten_keeps_bucket_order() {
        let skills = TechnicalSkills {
            languages: vec!["Rust".to_string()],
            frameworks: vec!["Axum".to_string()],
            tools: vec![],
            databases: vec!["Postgres".to_string()],
            cloud_platforms: vec![],
        };
        assert_eq!(skills.flatten(), vec!["Rust", "Axum", "Postgres"]);
    }
}
