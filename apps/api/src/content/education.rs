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
use crate::models::portfolio::EducationEntry;
use crate::state::AppState;

/// Entry kinds the timeline distinguishes: degrees and certifications.
const EDUCATION_KINDS: &[&str] = &["formal", "certification"];
const DEFAULT_KIND: &str = "formal";

fn validate_kind(kind: String) -> Result<String, AppError> {
    let kind = kind.trim().to_lowercase();
    if EDUCATION_KINDS.contains(&kind.as_str()) {
        Ok(kind)
    } else {
        Err(AppError::Validation(format!(
            "type must be one of {EDUCATION_KINDS:?}, got \"{kind}\""
        )))
    }
}

#[derive(Deserialize)]
pub struct CreateEducation {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub year: Option<String>,
    pub location: Option<String>,
    pub gpa: Option<f64>,
    pub description: Option<String>,
    pub courses: Option<StringList>,
    pub achievements: Option<StringList>,
}

#[derive(Deserialize)]
pub struct UpdateEducation {
    #[serde(rename = "type", default)]
    pub kind: Patch<String>,
    #[serde(default)]
    pub degree: Patch<String>,
    #[serde(default)]
    pub institution: Patch<String>,
    #[serde(default)]
    pub year: Patch<String>,
    #[serde(default)]
    pub location: Patch<String>,
    #[serde(default)]
    pub gpa: Patch<f64>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub courses: Patch<StringList>,
    #[serde(default)]
    pub achievements: Patch<StringList>,
}

/// GET /education
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<EducationEntry>>, AppError> {
    let entries = sqlx::query_as::<_, EducationEntry>(
        "SELECT * FROM education_entries ORDER BY created_at DESC",
    )
    .fetch_all(&state.db)
    .await?;
    Ok(Json(entries))
}

/// POST /education
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateEducation>,
) -> Result<(StatusCode, Json<EducationEntry>), AppError> {
    let kind = match body.kind {
        Some(kind) => validate_kind(kind)?,
        None => DEFAULT_KIND.to_string(),
    };
    let degree = require_text(body.degree, "degree")?;
    let institution = require_text(body.institution, "institution")?;
    let year = require_text(body.year, "year")?;
    let courses = body.courses.map(StringList::into_vec).unwrap_or_default();
    let achievements = body
        .achievements
        .map(StringList::into_vec)
        .unwrap_or_default();

    let entry = sqlx::query_as::<_, EducationEntry>(
        r#"
        INSERT INTO education_entries
            (id, kind, degree, institution, year, location, gpa, description,
             courses, achievements)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&kind)
    .bind(&degree)
    .bind(&institution)
    .bind(&year)
    .bind(optional_text(body.location))
    .bind(body.gpa)
    .bind(optional_text(body.description))
    .bind(&courses)
    .bind(&achievements)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /education/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEducation>,
) -> Result<Json<EducationEntry>, AppError> {
    let existing =
        sqlx::query_as::<_, EducationEntry>("SELECT * FROM education_entries WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Education entry {id} not found")))?;

    let merged = apply_update(existing, body)?;

    let entry = sqlx::query_as::<_, EducationEntry>(
        r#"
        UPDATE education_entries
        SET kind = $2, degree = $3, institution = $4, year = $5, location = $6,
            gpa = $7, description = $8, courses = $9, achievements = $10,
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&merged.kind)
    .bind(&merged.degree)
    .bind(&merged.institution)
    .bind(&merged.year)
    .bind(&merged.location)
    .bind(merged.gpa)
    .bind(&merged.description)
    .bind(&merged.courses)
    .bind(&merged.achievements)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(entry))
}

/// DELETE /education/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query("DELETE FROM education_entries WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Education entry {id} not found"
        )));
    }
    Ok(Json(json!({ "message": "Education entry deleted" })))
}

fn apply_update(
    current: EducationEntry,
    patch: UpdateEducation,
) -> Result<EducationEntry, AppError> {
    let EducationEntry {
        id,
        kind,
        degree,
        institution,
        year,
        location,
        gpa,
        description,
        courses,
        achievements,
        created_at,
        updated_at,
    } = current;

    let kind = match patch.kind {
        Patch::Absent => kind,
        Patch::Null => DEFAULT_KIND.to_string(),
        Patch::Value(value) => validate_kind(value)?,
    };

    Ok(EducationEntry {
        id,
        kind,
        degree: patch.degree.merge_required(degree, "degree")?,
        institution: patch
            .institution
            .merge_required(institution, "institution")?,
        year: patch.year.merge_required(year, "year")?,
        location: patch.location.merge_optional(location),
        gpa: patch.gpa.merge_optional(gpa),
        description: patch.description.merge_optional(description),
        courses: patch.courses.merge_list(courses),
        achievements: patch.achievements.merge_list(achievements),
        created_at,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_entry() -> EducationEntry {
        EducationEntry {
            id: Uuid::new_v4(),
            kind: "formal".to_string(),
            degree: "BSc Computer Science".to_string(),
            institution: "State University".to_string(),
            year: "2019".to_string(),
            location: None,
            gpa: Some(3.8),
            description: None,
            courses: vec!["Algorithms".to_string()],
            achievements: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_kind_accepts_both_kinds() {
        assert_eq!(validate_kind("formal".to_string()).unwrap(), "formal");
        assert_eq!(
            validate_kind("Certification".to_string()).unwrap(),
            "certification"
        );
    }

    #[test]
    fn test_validate_kind_rejects_unknown() {
        assert!(validate_kind("bootcamp".to_string()).is_err());
    }

    #[test]
    fn test_patch_kind_null_resets_to_default() {
        let mut entry = make_entry();
        entry.kind = "certification".to_string();
        let patch: UpdateEducation = serde_json::from_str(r#"{"type": null}"#).unwrap();
        let merged = apply_update(entry, patch).unwrap();
        assert_eq!(merged.kind, "formal");
    }

    #[test]
    fn test_patch_gpa_null_clears() {
        let patch: UpdateEducation = serde_json::from_str(r#"{"gpa": null}"#).unwrap();
        let merged = apply_update(make_entry(), patch).unwrap();
        assert_eq!(merged.gpa, None);
    }

    #[test]
    fn test_empty_patch_is_a_no_op() {
        let current = make_entry();
        let patch: UpdateEducation = serde_json::from_str("{}").unwrap();
        let merged = apply_update(current.clone(), patch).unwrap();
        assert_eq!(merged.kind, current.kind);
        assert_eq!(merged.degree, current.degree);
        assert_eq!(merged.gpa, current.gpa);
        assert_eq!(merged.courses, current.courses);
    }
}
