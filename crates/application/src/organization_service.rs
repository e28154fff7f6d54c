use std::sync::Arc;

use orgreg_core::{AppError, AppResult};
use orgreg_domain::Organization;

use crate::OrganizationRepository;

/// Application service for organization reads.
#[derive(Clone)]
pub struct OrganizationService {
    repository: Arc<dyn OrganizationRepository>,
}

impl OrganizationService {
    /// Creates a service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn OrganizationRepository>) -> Self {
        Self { repository }
    }

    /// Returns the active organization with the given id.
    pub async fn find_active(&self, organization_id: &str) -> AppResult<Organization> {
        self.repository
            .find_by_id(organization_id)
            .await?
            .filter(|organization| organization.is_active)
            .ok_or_else(|| AppError::NotFound("Organization not found.".to_owned()))
    }
}
