//! AI context profile store. One row per account, created lazily with
//! empty defaults and only ever visible to its owner.

pub mod handlers;

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{AiProfile, TechnicalSkills, DEFAULT_WRITING_TONE};

const INSERT_DEFAULTS: &str = r#"
INSERT INTO ai_profiles (
    account_id, full_name, tagline, bio, location, role_title,
    years_of_experience, specializations, industries, technical_skills,
    work_style, preferred_project_types, career_goals, writing_tone,
    personal_quirks, custom_instructions
)
VALUES ($1, '', '', '', '', '', '', '{}', '{}', $2, '', '{}', '', $3, '', '')
"#;

/// Reads the profile without creating one. Used by the suggestion path,
/// where a missing profile just means no enrichment.
pub async fn load_profile(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Option<AiProfile>, AppError> {
    let profile = sqlx::query_as::<_, AiProfile>("SELECT * FROM ai_profiles WHERE account_id = $1")
        .bind(account_id)
        .fetch_optional(pool)
        .await?;
    Ok(profile)
}

/// Lazy init: the insert is a no-op once the row exists, so concurrent
/// first reads converge on a single row.
pub async fn get_or_init(pool: &PgPool, account_id: Uuid) -> Result<AiProfile, AppError> {
    sqlx::query(&format!("{INSERT_DEFAULTS} ON CONFLICT (account_id) DO NOTHING"))
        .bind(account_id)
        .bind(Json(TechnicalSkills::default()))
        .bind(DEFAULT_WRITING_TONE)
        .execute(pool)
        .await?;

    let profile = sqlx::query_as::<_, AiProfile>("SELECT * FROM ai_profiles WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await?;
    Ok(profile)
}

/// Overwrites the row with defaults, creating it when absent.
pub async fn reset(pool: &PgPool, account_id: Uuid) -> Result<AiProfile, AppError> {
    let profile = sqlx::query_as::<_, AiProfile>(&format!(
        r#"{INSERT_DEFAULTS}
ON CONFLICT (account_id) DO UPDATE SET
    full_name = EXCLUDED.full_name,
    tagline = EXCLUDED.tagline,
    bio = EXCLUDED.bio,
    location = EXCLUDED.location,
    role_title = EXCLUDED.role_title,
    years_of_experience = EXCLUDED.years_of_experience,
    specializations = EXCLUDED.specializations,
    industries = EXCLUDED.industries,
    technical_skills = EXCLUDED.technical_skills,
    work_style = EXCLUDED.work_style,
    preferred_project_types = EXCLUDED.preferred_project_types,
    career_goals = EXCLUDED.career_goals,
    writing_tone = EXCLUDED.writing_tone,
    personal_quirks = EXCLUDED.personal_quirks,
    custom_instructions = EXCLUDED.custom_instructions,
    updated_at = now()
RETURNING *"#
    ))
    .bind(account_id)
    .bind(Json(TechnicalSkills::default()))
    .bind(DEFAULT_WRITING_TONE)
    .fetch_one(pool)
    .await?;
    Ok(profile)
}

/// Persists a merged profile.
pub async fn save(pool: &PgPool, profile: &AiProfile) -> Result<AiProfile, AppError> {
    let saved = sqlx::query_as::<_, AiProfile>(
        r#"
        UPDATE ai_profiles SET
            full_name = $2, tagline = $3, bio = $4, location = $5,
            role_title = $6, years_of_experience = $7, specializations = $8,
            industries = $9, technical_skills = $10, work_style = $11,
            preferred_project_types = $12, career_goals = $13,
            writing_tone = $14, personal_quirks = $15,
            custom_instructions = $16, updated_at = now()
        WHERE account_id = $1
        RETURNING *
        "#,
    )
    .bind(profile.account_id)
    .bind(&profile.full_name)
    .bind(&profile.tagline)
    .bind(&profile.bio)
    .bind(&profile.location)
    .bind(&profile.current_role)
    .bind(&profile.years_of_experience)
    .bind(&profile.specializations)
    .bind(&profile.industries)
    .bind(&profile.technical_skills)
    .bind(&profile.work_style)
    .bind(&profile.preferred_project_types)
    .bind(&profile.career_goals)
    .bind(&profile.writing_tone)
    .bind(&profile.personal_quirks)
    .bind(&profile.custom_instructions)
    .fetch_one(pool)
    .await?;
    Ok(saved)
}
