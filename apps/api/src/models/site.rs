use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// The singleton contact card shown on the public site. Stored under a
/// fixed row id, so the struct never exposes one.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub updated_at: DateTime<Utc>,
}

/// An inbound contact-form submission.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    #[serde(rename = "message")]
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
