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
use crate::models::portfolio::Project;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tech: Option<StringList>,
    pub link: Option<String>,
    pub github: Option<String>,
    pub year: Option<String>,
    pub image: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProject {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub tech: Patch<StringList>,
    #[serde(default)]
    pub link: Patch<String>,
    #[serde(default)]
    pub github: Patch<String>,
    #[serde(default)]
    pub year: Patch<String>,
    #[serde(default)]
    pub image: Patch<String>,
}

/// GET /projects
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Project>>, AppError> {
    let projects = sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY created_at DESC")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(projects))
}

/// POST /projects
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProject>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let title = require_text(body.title, "title")?;
    let description = require_text(body.description, "description")?;
    let tech = body
        .tech
        .map(StringList::into_vec)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("tech is required".to_string()))?;

    let project = sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (id, title, description, tech, link, github, year, image)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&title)
    .bind(&description)
    .bind(&tech)
    .bind(optional_text(body.link))
    .bind(optional_text(body.github))
    .bind(optional_text(body.year))
    .bind(optional_text(body.image))
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /projects/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProject>,
) -> Result<Json<Project>, AppError> {
    let existing = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;

    let merged = apply_update(existing, body)?;

    let project = sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects
        SET title = $2, description = $3, tech = $4, link = $5,
            github = $6, year = $7, image = $8, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&merged.title)
    .bind(&merged.description)
    .bind(&merged.tech)
    .bind(&merged.link)
    .bind(&merged.github)
    .bind(&merged.year)
    .bind(&merged.image)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(project))
}

/// DELETE /projects/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Project {id} not found")));
    }
    Ok(Json(json!({ "message": "Project deleted" })))
}

/// Shallow merge: present fields overwrite, absent fields stay, lists
/// replace wholesale.
fn apply_update(current: Project, patch: UpdateProject) -> Result<Project, AppError> {
    let Project {
        id,
        title,
        description,
        tech,
        link,
        github,
        year,
        image,
        created_at,
        updated_at,
    } = current;

    Ok(Project {
        id,
        title: patch.title.merge_required(title, "title")?,
        description: patch.description.merge_required(description, "description")?,
        tech: patch.tech.merge_list(tech),
        link: patch.link.merge_optional(link),
        github: patch.github.merge_optional(github),
        year: patch.year.merge_optional(year),
        image: patch.image.merge_optional(image),
        created_at,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_project() -> Project {
        Project {
            id: Uuid::new_v4(),
            title: "Portfolio".to_string(),
            description: "Personal site".to_string(),
            tech: vec!["React".to_string(), "Node".to_string()],
            link: Some("https://example.com".to_string()),
            github: None,
            year: Some("2024".to_string()),
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn patch_from(json: &str) -> UpdateProject {
        serde_json::from_str(json).expect("valid patch json")
    }

    #[test]
    fn test_empty_patch_is_a_no_op() {
        let current = make_project();
        let merged = apply_update(current.clone(), patch_from("{}")).unwrap();
        assert_eq!(merged.title, current.title);
        assert_eq!(merged.description, current.description);
        assert_eq!(merged.tech, current.tech);
        assert_eq!(merged.link, current.link);
        assert_eq!(merged.year, current.year);
    }

    #[test]
    fn test_present_fields_overwrite() {
        let merged = apply_update(
            make_project(),
            patch_from(r#"{"title": "Rewritten", "tech": "Rust, Axum"}"#),
        )
        .unwrap();
        assert_eq!(merged.title, "Rewritten");
        assert_eq!(merged.tech, vec!["Rust", "Axum"]);
        assert_eq!(merged.description, "Personal site", "untouched field kept");
    }

    #[test]
    fn test_null_clears_optional_field() {
        let merged = apply_update(make_project(), patch_from(r#"{"link": null}"#)).unwrap();
        assert_eq!(merged.link, None);
    }

    #[test]
    fn test_null_on_required_field_rejected() {
        let result = apply_update(make_project(), patch_from(r#"{"title": null}"#));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_empty_string_overwrites_instead_of_keeping() {
        let merged = apply_update(make_project(), patch_from(r#"{"year": ""}"#)).unwrap();
        assert_eq!(merged.year, Some(String::new()));
    }
}
