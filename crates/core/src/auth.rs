use serde::{Deserialize, Serialize};

/// Authority prefix for scopes granted by the token issuer.
pub const SCOPE_AUTHORITY_PREFIX: &str = "SCOPE_";

/// Authority prefix for roles reported by the identity authority.
pub const ROLE_AUTHORITY_PREFIX: &str = "ROLE_";

/// Authenticated caller resolved for the lifetime of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    user_id: String,
    username: String,
    email: Option<String>,
    org_id: Option<String>,
    authorities: Vec<String>,
}

impl Principal {
    /// Creates a principal from verified claims and the resolved account.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        email: Option<String>,
        org_id: Option<String>,
        authorities: Vec<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            email,
            org_id,
            authorities,
        }
    }

    /// Returns the stable user identifier (the token subject).
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Returns the display username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Returns the email reported by the identity authority.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the organization the caller belongs to, if the token carries one.
    #[must_use]
    pub fn org_id(&self) -> Option<&str> {
        self.org_id.as_deref()
    }

    /// Returns every granted authority (`SCOPE_*` and `ROLE_*`).
    #[must_use]
    pub fn authorities(&self) -> &[String] {
        self.authorities.as_slice()
    }

    /// Returns whether the caller holds the given authority verbatim.
    #[must_use]
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|granted| granted == authority)
    }

    /// Returns whether the token granted the given scope.
    #[must_use]
    pub fn has_scope(&self, scope: &str) -> bool {
        self.authorities.iter().any(|granted| {
            granted
                .strip_prefix(SCOPE_AUTHORITY_PREFIX)
                .is_some_and(|value| value == scope)
        })
    }
}
