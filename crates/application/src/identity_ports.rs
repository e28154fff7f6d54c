use async_trait::async_trait;

/// Account status reported by the identity authority.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveAccount {
    /// Whether the authority considers the account active.
    pub active: bool,
    /// Authority-side user id, when reported.
    pub user_id: Option<String>,
    /// Account email, when reported.
    pub email: Option<String>,
    /// Account username, when reported.
    pub username: Option<String>,
    /// Account role, when reported.
    pub role: Option<String>,
}

/// Port for asking the remote identity authority about an account.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    /// Looks up the current status of `user_id`, forwarding the caller's
    /// original authorization header.
    ///
    /// Returns `None` on any lookup failure (transport error, timeout,
    /// non-success status, undecodable body).
    async fn find_active_account(
        &self,
        user_id: &str,
        authorization_header: &str,
    ) -> Option<ActiveAccount>;
}
