//! Snapshot of the portfolio content that grounds the chat prompt.
//! Fetched fresh on every call, never cached: an edit in the dashboard
//! shows up in the very next reply.

use sqlx::PgPool;

use crate::models::portfolio::{EducationEntry, ExperienceEntry, Project};

pub struct PortfolioSnapshot {
    pub projects: Vec<Project>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

pub async fn load_snapshot(pool: &PgPool) -> Result<PortfolioSnapshot, sqlx::Error> {
    let projects =
        sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;
    let experience = sqlx::query_as::<_, ExperienceEntry>(
        "SELECT * FROM experience_entries ORDER BY start_year DESC, created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    let education =
        sqlx::query_as::<_, EducationEntry>("SELECT * FROM education_entries ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;

    Ok(PortfolioSnapshot {
        projects,
        experience,
        education,
    })
}

/// Renders the snapshot as the plain-text block embedded in the chat prompt.
pub fn render_snapshot(snapshot: &PortfolioSnapshot) -> String {
    let mut out = String::new();

    out.push_str("PROJECTS:\n");
    if snapshot.projects.is_empty() {
        out.push_str("(none yet)\n");
    }
    for project in &snapshot.projects {
        out.push_str(&format!(
            "- {}: {} [{}]\n",
            project.title,
            project.description,
            project.tech.join(", ")
        ));
    }

    out.push_str("\nEXPERIENCE:\n");
    if snapshot.experience.is_empty() {
        out.push_str("(none yet)\n");
    }
    for entry in &snapshot.experience {
        out.push_str(&format!(
            "- {} at {} ({})",
            entry.role,
            entry.company,
            entry.duration()
        ));
        if let Some(location) = &entry.location {
            out.push_str(&format!(", {location}"));
        }
        if !entry.skills.is_empty() {
            out.push_str(&format!(" [{}]", entry.skills.join(", ")));
        }
        out.push('\n');
    }

    out.push_str("\nEDUCATION:\n");
    if snapshot.education.is_empty() {
        out.push_str("(none yet)\n");
    }
    for entry in &snapshot.education {
        out.push_str(&format!(
            "- {} ({}), {}, {}\n",
            entry.degree, entry.kind, entry.institution, entry.year
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn empty_snapshot() -> PortfolioSnapshot {
        PortfolioSnapshot {
            projects: vec![],
            experience: vec![],
            education: vec![],
        }
    }

    #[test]
    fn test_empty_snapshot_renders_placeholders() {
        let text = render_snapshot(&empty_snapshot());
        assert!(text.contains("PROJECTS:\n(none yet)"));
        assert!(text.contains("EXPERIENCE:\n(none yet)"));
        assert!(text.contains("EDUCATION:\n(none yet)"));
    }

    #[test]
    fn test_snapshot_includes_entry_facts() {
        let mut snapshot = empty_snapshot();
        snapshot.projects.push(Project {
            id: Uuid::new_v4(),
            title: "Folio".to_string(),
            description: "Portfolio backend".to_string(),
            tech: vec!["Rust".to_string(), "Axum".to_string()],
            link: None,
            github: None,
            year: None,
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        snapshot.experience.push(ExperienceEntry {
            id: Uuid::new_v4(),
            role: "Engineer".to_string(),
            company: "Acme".to_string(),
            company_url: None,
            logo_url: None,
            start_year: 2021,
            end_year: None,
            location: Some("Berlin".to_string()),
            description: None,
            skills: vec!["Rust".to_string()],
            certificate_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });

        let text = render_snapshot(&snapshot);
        assert!(text.contains("- Folio: Portfolio backend [Rust, Axum]"));
        assert!(text.contains("- Engineer at Acme (2021 - Present), Berlin [Rust]"));
    }
}
