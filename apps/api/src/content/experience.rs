use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::content::patch::Patch;
use crate::content::{optional_text, require_text, StringList};
use crate::errors::AppError;
use crate::models::portfolio::ExperienceEntry;
use crate::state::AppState;

/// `end_year` accepts a year or the literal "Present". "Present" and null
/// both mean the role is ongoing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EndYear {
    Year(i32),
    Label(String),
}

impl EndYear {
    pub fn into_year(self) -> Result<Option<i32>, AppError> {
        match self {
            EndYear::Year(year) => Ok(Some(year)),
            EndYear::Label(label) if label.eq_ignore_ascii_case("present") => Ok(None),
            EndYear::Label(label) => Err(AppError::Validation(format!(
                "end_year must be a year or \"Present\", got \"{label}\""
            ))),
        }
    }
}

#[derive(Deserialize)]
pub struct CreateExperience {
    pub role: Option<String>,
    pub company: Option<String>,
    pub company_url: Option<String>,
    pub logo_url: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<EndYear>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub skills: Option<StringList>,
    pub certificate_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateExperience {
    #[serde(default)]
    pub role: Patch<String>,
    #[serde(default)]
    pub company: Patch<String>,
    #[serde(default)]
    pub company_url: Patch<String>,
    #[serde(default)]
    pub logo_url: Patch<String>,
    #[serde(default)]
    pub start_year: Patch<i32>,
    #[serde(default)]
    pub end_year: Patch<EndYear>,
    #[serde(default)]
    pub location: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub skills: Patch<StringList>,
    #[serde(default)]
    pub certificate_url: Patch<String>,
}

/// GET /experience
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ExperienceEntry>>, AppError> {
    let entries = sqlx::query_as::<_, ExperienceEntry>(
        "SELECT * FROM experience_entries ORDER BY start_year DESC, created_at DESC",
    )
    .fetch_all(&state.db)
    .await?;
    Ok(Json(entries))
}

/// POST /experience
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateExperience>,
) -> Result<(StatusCode, Json<ExperienceEntry>), AppError> {
    let role = require_text(body.role, "role")?;
    let company = require_text(body.company, "company")?;
    let start_year = body
        .start_year
        .ok_or_else(|| AppError::Validation("start_year is required".to_string()))?;
    let end_year = match body.end_year {
        Some(end) => end.into_year()?,
        None => None,
    };
    let skills = body.skills.map(StringList::into_vec).unwrap_or_default();

    let entry = sqlx::query_as::<_, ExperienceEntry>(
        r#"
        INSERT INTO experience_entries
            (id, role, company, company_url, logo_url, start_year, end_year,
             location, description, skills, certificate_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&role)
    .bind(&company)
    .bind(optional_text(body.company_url))
    .bind(optional_text(body.logo_url))
    .bind(start_year)
    .bind(end_year)
    .bind(optional_text(body.location))
    .bind(optional_text(body.description))
    .bind(&skills)
    .bind(optional_text(body.certificate_url))
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /experience/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateExperience>,
) -> Result<Json<ExperienceEntry>, AppError> {
    let existing =
        sqlx::query_as::<_, ExperienceEntry>("SELECT * FROM experience_entries WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Experience entry {id} not found")))?;

    let merged = apply_update(existing, body)?;

    let entry = sqlx::query_as::<_, ExperienceEntry>(
        r#"
        UPDATE experience_entries
        SET role = $2, company = $3, company_url = $4, logo_url = $5,
            start_year = $6, end_year = $7, location = $8, description = $9,
            skills = $10, certificate_url = $11, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&merged.role)
    .bind(&merged.company)
    .bind(&merged.company_url)
    .bind(&merged.logo_url)
    .bind(merged.start_year)
    .bind(merged.end_year)
    .bind(&merged.location)
    .bind(&merged.description)
    .bind(&merged.skills)
    .bind(&merged.certificate_url)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(entry))
}

/// DELETE /experience/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query("DELETE FROM experience_entries WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Experience entry {id} not found"
        )));
    }
    Ok(Json(json!({ "message": "Experience entry deleted" })))
}

fn apply_update(
    current: ExperienceEntry,
    patch: UpdateExperience,
) -> Result<ExperienceEntry, AppError> {
    let ExperienceEntry {
        id,
        role,
        company,
        company_url,
        logo_url,
        start_year,
        end_year,
        location,
        description,
        skills,
        certificate_url,
        created_at,
        updated_at,
    } = current;

    // end_year: null and "Present" both flip the entry back to ongoing.
    let end_year = match patch.end_year {
        Patch::Absent => end_year,
        Patch::Null => None,
        Patch::Value(end) => end.into_year()?,
    };

    Ok(ExperienceEntry {
        id,
        role: patch.role.merge_required(role, "role")?,
        company: patch.company.merge_required(company, "company")?,
        company_url: patch.company_url.merge_optional(company_url),
        logo_url: patch.logo_url.merge_optional(logo_url),
        start_year: patch.start_year.merge_required(start_year, "start_year")?,
        end_year,
        location: patch.location.merge_optional(location),
        description: patch.description.merge_optional(description),
        skills: patch.skills.merge_list(skills),
        certificate_url: patch.certificate_url.merge_optional(certificate_url),
        created_at,
        updated_at,
    })
}
