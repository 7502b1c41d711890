use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tech: Vec<String>,
    pub link: Option<String>,
    pub github: Option<String>,
    pub year: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A role entry on the experience timeline. `end_year: None` means the
/// position is ongoing. Serialized responses carry a derived `duration`
/// display string alongside the structured years.
#[derive(Debug, Clone, FromRow)]
pub struct ExperienceEntry {
    pub id: Uuid,
    pub role: String,
    pub company: String,
    pub company_url: Option<String>,
    pub logo_url: Option<String>,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub skills: Vec<String>,
    pub certificate_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExperienceEntry {
    /// Display form of the span, "2021 - Present" while ongoing.
    pub fn duration(&self) -> String {
        match self.end_year {
            Some(end) => format!("{} - {}", self.start_year, end),
            None => format!("{} - Present", self.start_year),
        }
    }
}

// Hand-written so responses include the derived `duration` string, which
// has no backing column.
impl Serialize for ExperienceEntry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("ExperienceEntry", 14)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("role", &self.role)?;
        s.serialize_field("company", &self.company)?;
        s.serialize_field("company_url", &self.company_url)?;
        s.serialize_field("logo_url", &self.logo_url)?;
        s.serialize_field("start_year", &self.start_year)?;
        s.serialize_field("end_year", &self.end_year)?;
        s.serialize_field("duration", &self.duration())?;
        s.serialize_field("location", &self.location)?;
        s.serialize_field("description", &self.description)?;
        s.serialize_field("skills", &self.skills)?;
        s.serialize_field("certificate_url", &self.certificate_url)?;
        s.serialize_field("created_at", &self.created_at)?;
        s.serialize_field("updated_at", &self.updated_at)?;
        s.end()
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EducationEntry {
    pub id: Uuid,
    /// "formal" or "certification".
    #[serde(rename = "type")]
    pub kind: String,
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub location: Option<String>,
    pub gpa: Option<f64>,
    pub description: Option<String>,
    pub courses: Vec<String>,
    pub achievements: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
