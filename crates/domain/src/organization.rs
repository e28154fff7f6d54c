use serde::{Deserialize, Serialize};

/// Read model of a registered organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Stable organization identifier.
    pub organization_id: String,
    /// Registered organization name.
    pub organization_name: String,
    /// Unique entity number issued by the registrar.
    pub unique_entity_number: String,
    /// Sector the organization belongs to, if assigned.
    pub sector_name: Option<String>,
    /// Primary contact name.
    pub primary_contact_name: String,
    /// Primary contact email.
    pub primary_contact_email: String,
    /// Whether the organization is active.
    pub is_active: bool,
}
