use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use orgreg_application::OrganizationRepository;
use orgreg_core::{AppError, AppResult};
use orgreg_domain::Organization;

/// In-memory organization repository for tests and local development.
#[derive(Debug, Default)]
pub struct InMemoryOrganizationRepository {
    organizations: RwLock<HashMap<String, Organization>>,
}

impl InMemoryOrganizationRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with the given organizations.
    #[must_use]
    pub fn with_organizations(organizations: impl IntoIterator<Item = Organization>) -> Self {
        let organizations = organizations
            .into_iter()
            .map(|organization| (organization.organization_id.clone(), organization))
            .collect();

        Self {
            organizations: RwLock::new(organizations),
        }
    }

    /// Inserts or replaces an organization.
    pub fn insert(&self, organization: Organization) -> AppResult<()> {
        self.organizations
            .write()
            .map_err(|_| AppError::Internal("organization store lock poisoned".to_owned()))?
            .insert(organization.organization_id.clone(), organization);
        Ok(())
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn find_by_id(&self, organization_id: &str) -> AppResult<Option<Organization>> {
        let organizations = self
            .organizations
            .read()
            .map_err(|_| AppError::Internal("organization store lock poisoned".to_owned()))?;

        Ok(organizations.get(organization_id).cloned())
    }
}
