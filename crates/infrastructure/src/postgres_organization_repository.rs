use async_trait::async_trait;
use orgreg_application::OrganizationRepository;
use orgreg_core::{AppError, AppResult};
use orgreg_domain::Organization;
use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed organization read repository.
#[derive(Clone)]
pub struct PostgresOrganizationRepository {
    pool: PgPool,
}

impl PostgresOrganizationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OrganizationRow {
    organization_id: String,
    organization_name: String,
    unique_entity_number: String,
    sector_name: Option<String>,
    primary_contact_name: String,
    primary_contact_email: String,
    is_active: bool,
}

impl From<OrganizationRow> for Organization {
    fn from(row: OrganizationRow) -> Self {
        Self {
            organization_id: row.organization_id,
            organization_name: row.organization_name,
            unique_entity_number: row.unique_entity_number,
            sector_name: row.sector_name,
            primary_contact_name: row.primary_contact_name,
            primary_contact_email: row.primary_contact_email,
            is_active: row.is_active,
        }
    }
}

#[async_trait]
impl OrganizationRepository for PostgresOrganizationRepository {
    async fn find_by_id(&self, organization_id: &str) -> AppResult<Option<Organization>> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT
                o.organization_id,
                o.organization_name,
                o.unique_entity_number,
                s.sector_name,
                o.primary_contact_name,
                o.primary_contact_email,
                o.is_active
            FROM organization o
            LEFT JOIN sector s ON s.sector_id = o.sector_id
            WHERE o.organization_id = $1
            "#,
        )
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load organization: {error}")))?;

        Ok(row.map(Organization::from))
    }
}
