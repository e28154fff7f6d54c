use serde::{Deserialize, Serialize};

/// Capability level granted by a token scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeGrant {
    /// No recognized grant; treated like a view-only caller.
    None,
    /// May read resources of the caller's own organization.
    View,
    /// May manage resources across organizations.
    Manage,
}

impl ScopeGrant {
    /// Classifies one scope token by its final dot-separated segment.
    ///
    /// `org.manage` and `manage` both classify as [`ScopeGrant::Manage`].
    #[must_use]
    pub fn classify(token: &str) -> Self {
        let action = token.rsplit('.').next().unwrap_or_default();
        match action.to_ascii_lowercase().as_str() {
            "manage" => Self::Manage,
            "view" => Self::View,
            _ => Self::None,
        }
    }

    /// Returns a stable label for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::View => "view",
            Self::Manage => "manage",
        }
    }
}

/// Parsed, whitespace-separated scope claim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScopeSet {
    tokens: Vec<String>,
}

impl ScopeSet {
    /// Parses a raw scope claim. An absent or blank claim yields an empty set.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let tokens = raw
            .unwrap_or_default()
            .split_whitespace()
            .map(ToOwned::to_owned)
            .collect();

        Self { tokens }
    }

    /// Returns the individual scope tokens in claim order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        self.tokens.as_slice()
    }

    /// Returns whether the claim carried no scope at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the strongest grant across all tokens.
    #[must_use]
    pub fn effective_grant(&self) -> ScopeGrant {
        self.tokens
            .iter()
            .map(|token| ScopeGrant::classify(token))
            .max()
            .unwrap_or(ScopeGrant::None)
    }
}
