use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Full schema, applied on every boot. Each statement is idempotent so a
/// restart against an existing database is a no-op.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id UUID PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    is_admin BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS projects (
    id UUID PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    tech TEXT[] NOT NULL DEFAULT '{}',
    link TEXT,
    github TEXT,
    year TEXT,
    image TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS experience_entries (
    id UUID PRIMARY KEY,
    role TEXT NOT NULL,
    company TEXT NOT NULL,
    company_url TEXT,
    logo_url TEXT,
    start_year INT NOT NULL,
    end_year INT,
    location TEXT,
    description TEXT,
    skills TEXT[] NOT NULL DEFAULT '{}',
    certificate_url TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS education_entries (
    id UUID PRIMARY KEY,
    kind TEXT NOT NULL DEFAULT 'formal',
    degree TEXT NOT NULL,
    institution TEXT NOT NULL,
    year TEXT NOT NULL,
    location TEXT,
    gpa DOUBLE PRECISION,
    description TEXT,
    courses TEXT[] NOT NULL DEFAULT '{}',
    achievements TEXT[] NOT NULL DEFAULT '{}',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS contact_info (
    id SMALLINT PRIMARY KEY DEFAULT 1 CHECK (id = 1),
    name TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    phone TEXT NOT NULL DEFAULT '',
    address TEXT NOT NULL DEFAULT '',
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS messages (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    subject TEXT,
    body TEXT NOT NULL,
    read BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS visitor_counter (
    id SMALLINT PRIMARY KEY DEFAULT 1 CHECK (id = 1),
    count BIGINT NOT NULL DEFAULT 0,
    last_visited TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS ai_profiles (
    account_id UUID PRIMARY KEY REFERENCES accounts(id) ON DELETE CASCADE,
    full_name TEXT NOT NULL,
    tagline TEXT NOT NULL,
    bio TEXT NOT NULL,
    location TEXT NOT NULL,
    role_title TEXT NOT NULL,
    years_of_experience TEXT NOT NULL,
    specializations TEXT[] NOT NULL,
    industries TEXT[] NOT NULL,
    technical_skills JSONB NOT NULL,
    work_style TEXT NOT NULL,
    preferred_project_types TEXT[] NOT NULL,
    career_goals TEXT NOT NULL,
    writing_tone TEXT NOT NULL,
    personal_quirks TEXT NOT NULL,
    custom_instructions TEXT NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
"#;

/// Applies the schema. The singleton tables (contact_info, visitor_counter)
/// carry a CHECK(id = 1) so concurrent first writes can never produce a
/// second row.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    pool.execute(SCHEMA).await?;
    info!("Database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_are_idempotent() {
        for line in SCHEMA.lines().filter(|l| l.starts_with("CREATE TABLE")) {
            assert!(line.contains("IF NOT EXISTS"), "non-idempotent: {line}");
        }
    }

    #[test]
    fn test_accounts_default_to_non_admin() {
        // Admin status is granted explicitly by the seed, never by the column.
        assert!(SCHEMA.contains("is_admin BOOLEAN NOT NULL DEFAULT FALSE"));
    }
}
