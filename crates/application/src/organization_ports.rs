use async_trait::async_trait;
use orgreg_core::AppResult;
use orgreg_domain::Organization;

/// Read port for registered organizations.
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Finds an organization by id.
    async fn find_by_id(&self, organization_id: &str) -> AppResult<Option<Organization>>;
}
