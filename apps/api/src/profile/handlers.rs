use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use crate::content::patch::Patch;
use crate::content::StringList;
use crate::errors::AppError;
use crate::models::account::Account;
use crate::models::profile::{AiProfile, TechnicalSkills, DEFAULT_WRITING_TONE, WRITING_TONES};
use crate::profile;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UpdateProfile {
    #[serde(default)]
    pub full_name: Patch<String>,
    #[serde(default)]
    pub tagline: Patch<String>,
    #[serde(default)]
    pub bio: Patch<String>,
    #[serde(default)]
    pub location: Patch<String>,
    #[serde(default)]
    pub current_role: Patch<String>,
    #[serde(default)]
    pub years_of_experience: Patch<String>,
    #[serde(default)]
    pub specializations: Patch<StringList>,
    #[serde(default)]
    pub industries: Patch<StringList>,
    #[serde(default)]
    pub technical_skills: Patch<TechnicalSkills>,
    #[serde(default)]
    pub work_style: Patch<String>,
    #[serde(default)]
    pub preferred_project_types: Patch<StringList>,
    #[serde(default)]
    pub career_goals: Patch<String>,
    #[serde(default)]
    pub writing_tone: Patch<String>,
    #[serde(default)]
    pub personal_quirks: Patch<String>,
    #[serde(default)]
    pub custom_instructions: Patch<String>,
}

/// GET /portfolio-context — creates the default profile on first read.
pub async fn get(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
) -> Result<Json<AiProfile>, AppError> {
    let profile = profile::get_or_init(&state.db, account.id).await?;
    Ok(Json(profile))
}

/// PUT /portfolio-context — shallow merge over the stored profile.
/// `technical_skills` replaces as one document, never deep-merged.
pub async fn update(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Json(body): Json<UpdateProfile>,
) -> Result<Json<AiProfile>, AppError> {
    let current = profile::get_or_init(&state.db, account.id).await?;
    let merged = apply_update(current, body)?;
    let saved = profile::save(&state.db, &merged).await?;
    Ok(Json(saved))
}

/// POST /portfolio-context/reset — back to empty defaults.
pub async fn reset(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
) -> Result<Json<AiProfile>, AppError> {
    let profile = profile::reset(&state.db, account.id).await?;
    Ok(Json(profile))
}

fn validate_tone(tone: String) -> Result<String, AppError> {
    let tone = tone.trim().to_lowercase();
    if WRITING_TONES.contains(&tone.as_str()) {
        Ok(tone)
    } else {
        Err(AppError::Validation(format!(
            "writing_tone must be one of {WRITING_TONES:?}, got \"{tone}\""
        )))
    }
}

fn apply_update(current: AiProfile, patch: UpdateProfile) -> Result<AiProfile, AppError> {
    let AiProfile {
        account_id,
        full_name,
        tagline,
        bio,
        location,
        current_role,
        years_of_experience,
        specializations,
        industries,
        technical_skills,
        work_style,
        preferred_project_types,
        career_goals,
        writing_tone,
        personal_quirks,
        custom_instructions,
        updated_at,
    } = current;

    let technical_skills = match patch.technical_skills {
        Patch::Absent => technical_skills,
        Patch::Null => sqlx::types::Json(TechnicalSkills::default()),
        Patch::Value(skills) => sqlx::types::Json(skills),
    };

    let writing_tone = match patch.writing_tone {
        Patch::Absent => writing_tone,
        Patch::Null => DEFAULT_WRITING_TONE.to_string(),
        Patch::Value(tone) => validate_tone(tone)?,
    };

    Ok(AiProfile {
        account_id,
        full_name: patch.full_name.merge_text(full_name),
        tagline: patch.tagline.merge_text(tagline),
        bio: patch.bio.merge_text(bio),
        location: patch.location.merge_text(location),
        current_role: patch.current_role.merge_text(current_role),
        years_of_experience: patch.years_of_experience.merge_text(years_of_experience),
        specializations: patch.specializations.merge_list(specializations),
        industries: patch.industries.merge_list(industries),
        technical_skills,
        work_style: patch.work_style.merge_text(work_style),
        preferred_project_types: patch
            .preferred_project_types
            .merge_list(preferred_project_types),
        career_goals: patch.career_goals.merge_text(career_goals),
        writing_tone,
        personal_quirks: patch.personal_quirks.merge_text(personal_quirks),
        custom_instructions: patch.custom_instructions.merge_text(custom_instructions),
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json as SqlJson;
    use uuid::Uuid;

    fn make_profile() -> AiProfile {
        AiProfile {
            account_id: Uuid::new_v4(),
            full_name: "Ada".to_string(),
            tagline: "Builder".to_string(),
            bio: String::new(),
            location: "Berlin".to_string(),
            current_role: "Engineer".to_string(),
            years_of_experience: "6".to_string(),
            specializations: vec!["backend".to_string()],
            industries: vec![],
            technical_skills: SqlJson(TechnicalSkills {
                languages: vec!["Rust".to_string()],
                ..TechnicalSkills::default()
            }),
            work_style: String::new(),
            preferred_project_types: vec![],
            career_goals: String::new(),
            writing_tone: "professional".to_string(),
            personal_quirks: String::new(),
            custom_instructions: String::new(),
            updated_at: Utc::now(),
        }
    }

    fn patch_from(json: &str) -> UpdateProfile {
        serde_json::from_str(json).expect("valid patch json")
    }

    #[test]
    fn test_empty_patch_is_a_no_op() {
        let current = make_profile();
        let merged = apply_update(current.clone(), patch_from("{}")).unwrap();
        assert_eq!(merged.full_name, current.full_name);
        assert_eq!(merged.writing_tone, current.writing_tone);
        assert_eq!(merged.technical_skills.0, current.technical_skills.0);
    }

    #[test]
    fn test_null_clears_text_to_empty() {
        let merged = apply_update(make_profile(), patch_from(r#"{"tagline": null}"#)).unwrap();
        assert_eq!(merged.tagline, "");
    }

    #[test]
    fn test_technical_skills_replace_wholesale() {
        let merged = apply_update(
            make_profile(),
            patch_from(r#"{"technical_skills": {"frameworks": ["Axum"]}}"#),
        )
        .unwrap();
        assert_eq!(merged.technical_skills.0.frameworks, vec!["Axum"]);
        assert!(
            merged.technical_skills.0.languages.is_empty(),
            "buckets absent from the payload are replaced, not kept"
        );
    }

    #[test]
    fn test_writing_tone_validated() {
        let merged = apply_update(
            make_profile(),
            patch_from(r#"{"writing_tone": "Casual"}"#),
        )
        .unwrap();
        assert_eq!(merged.writing_tone, "casual");

        let rejected = apply_update(
            make_profile(),
            patch_from(r#"{"writing_tone": "sarcastic"}"#),
        );
        assert!(matches!(rejected, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_writing_tone_null_resets_to_default() {
        let mut profile = make_profile();
        profile.writing_tone = "creative".to_string();
        let merged = apply_update(profile, patch_from(r#"{"writing_tone": null}"#)).unwrap();
        assert_eq!(merged.writing_tone, DEFAULT_WRITING_TONE);
    }

    #[test]
    fn test_list_field_accepts_comma_string() {
        let merged = apply_update(
            make_profile(),
            patch_from(r#"{"specializations": "apis, data pipelines"}"#),
        )
        .unwrap();
        assert_eq!(merged.specializations, vec!["apis", "data pipelines"]);
    }
}
