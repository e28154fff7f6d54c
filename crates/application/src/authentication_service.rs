//! Per-request bearer token authentication.
//!
//! A single pass with no retries: extract the bearer token, decode it, ask the
//! identity authority about the account, then admit or reject.

use std::sync::Arc;

use chrono::Utc;
use orgreg_core::auth::{ROLE_AUTHORITY_PREFIX, SCOPE_AUTHORITY_PREFIX};
use orgreg_core::{AppError, Principal};
use orgreg_domain::{ScopeSet, TokenClaims};
use thiserror::Error;
use tracing::debug;

use crate::{ActiveAccount, IdentityLookup, TokenCodec, TokenError};

/// Prefix every protected request's `Authorization` header must carry.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Returns the token part of a well-formed bearer header.
#[must_use]
pub fn bearer_token(authorization_header: &str) -> Option<&str> {
    authorization_header.strip_prefix(BEARER_PREFIX)
}

/// Terminal authentication failure; every variant maps to HTTP 401.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthenticationFailure {
    /// The header is absent or lacks the bearer prefix.
    #[error("Authorization header is missing or invalid")]
    MissingOrMalformedHeader,

    /// The token verified but has expired.
    #[error("JWT token is expired")]
    TokenExpired,

    /// The token is malformed or its signature does not verify.
    #[error("Invalid JWT token")]
    TokenInvalid,

    /// The identity authority did not confirm an active matching account.
    #[error("Invalid or expired JWT token")]
    IdentityUnconfirmed,

    /// Any other decode failure, surfaced with its own message.
    #[error("{0}")]
    Rejected(String),
}

impl AuthenticationFailure {
    /// Returns the user-safe response message.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<TokenError> for AuthenticationFailure {
    fn from(value: TokenError) -> Self {
        match value {
            TokenError::Expired => Self::TokenExpired,
            TokenError::Malformed | TokenError::InvalidSignature => Self::TokenInvalid,
            TokenError::Other(message) => Self::Rejected(message),
        }
    }
}

impl From<AuthenticationFailure> for AppError {
    fn from(value: AuthenticationFailure) -> Self {
        AppError::Unauthorized(value.message())
    }
}

/// Application service establishing the request principal.
#[derive(Clone)]
pub struct AuthenticationService {
    token_codec: Arc<dyn TokenCodec>,
    identity_lookup: Arc<dyn IdentityLookup>,
}

impl AuthenticationService {
    /// Creates a service from its token codec and identity lookup.
    #[must_use]
    pub fn new(
        token_codec: Arc<dyn TokenCodec>,
        identity_lookup: Arc<dyn IdentityLookup>,
    ) -> Self {
        Self {
            token_codec,
            identity_lookup,
        }
    }

    /// Authenticates one request from its raw `Authorization` header.
    pub async fn authenticate(
        &self,
        authorization_header: Option<&str>,
    ) -> Result<Principal, AuthenticationFailure> {
        let header = authorization_header
            .filter(|header| header.starts_with(BEARER_PREFIX))
            .ok_or(AuthenticationFailure::MissingOrMalformedHeader)?;
        let token = bearer_token(header).ok_or(AuthenticationFailure::MissingOrMalformedHeader)?;

        let claims = self.token_codec.decode(token)?;
        if claims.is_expired_at(Utc::now()) {
            return Err(AuthenticationFailure::TokenExpired);
        }

        let Some(subject) = claims.subject() else {
            debug!("token carries no subject claim");
            return Err(AuthenticationFailure::IdentityUnconfirmed);
        };

        let account = self
            .identity_lookup
            .find_active_account(subject, header)
            .await
            .ok_or(AuthenticationFailure::IdentityUnconfirmed)?;

        if claims.is_expired_at(Utc::now()) {
            return Err(AuthenticationFailure::TokenExpired);
        }
        if !account.active {
            return Err(AuthenticationFailure::IdentityUnconfirmed);
        }

        if !account_matches_claims(&account, &claims, subject) {
            debug!("identity authority returned an account for a different identity");
            return Err(AuthenticationFailure::IdentityUnconfirmed);
        }

        Ok(build_principal(subject, &claims, account))
    }
}

fn account_matches_claims(account: &ActiveAccount, claims: &TokenClaims, subject: &str) -> bool {
    match claims.email() {
        Some(claimed_email) => account
            .email
            .as_deref()
            .is_some_and(|email| email.eq_ignore_ascii_case(claimed_email)),
        None => account.user_id.as_deref() == Some(subject),
    }
}

fn build_principal(subject: &str, claims: &TokenClaims, account: ActiveAccount) -> Principal {
    let mut authorities: Vec<String> = ScopeSet::parse(claims.scope())
        .tokens()
        .iter()
        .map(|scope| format!("{SCOPE_AUTHORITY_PREFIX}{scope}"))
        .collect();
    if let Some(role) = account.role.as_deref().filter(|role| !role.trim().is_empty()) {
        authorities.push(format!("{ROLE_AUTHORITY_PREFIX}{role}"));
    }

    let username = claims
        .username()
        .map(ToOwned::to_owned)
        .or(account.username)
        .or_else(|| account.email.clone())
        .unwrap_or_else(|| subject.to_owned());

    Principal::new(
        subject,
        username,
        account.email,
        claims.org_id().map(ToOwned::to_owned),
        authorities,
    )
}
