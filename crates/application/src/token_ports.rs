use chrono::Utc;
use orgreg_domain::TokenClaims;
use thiserror::Error;

/// Failure to decode a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token is not a structurally valid signed token.
    #[error("malformed token")]
    Malformed,

    /// The signature does not verify against the configured public key.
    #[error("token signature is invalid")]
    InvalidSignature,

    /// The token verified but its expiry has passed.
    #[error("token is expired")]
    Expired,

    /// Any other decode failure, carrying the underlying message.
    #[error("{0}")]
    Other(String),
}

/// Port for verifying signed bearer tokens and reading their claims.
///
/// Implementations hold only immutable key material, so every method is a pure
/// function of its input token.
pub trait TokenCodec: Send + Sync {
    /// Verifies signature and expiry and returns the claims.
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError>;

    /// Verifies the signature and returns the claims without checking expiry.
    fn read_claims(&self, token: &str) -> Result<TokenClaims, TokenError>;

    /// Returns whether the token's expiry has passed.
    fn is_expired(&self, token: &str) -> Result<bool, TokenError> {
        Ok(self.read_claims(token)?.is_expired_at(Utc::now()))
    }

    /// Returns the subject claim.
    fn subject(&self, token: &str) -> Result<Option<String>, TokenError> {
        Ok(self.read_claims(token)?.subject().map(ToOwned::to_owned))
    }

    /// Returns the raw scope claim.
    fn scope(&self, token: &str) -> Result<Option<String>, TokenError> {
        Ok(self.read_claims(token)?.scope().map(ToOwned::to_owned))
    }

    /// Returns the owning organization claim.
    fn org_id(&self, token: &str) -> Result<Option<String>, TokenError> {
        Ok(self.read_claims(token)?.org_id().map(ToOwned::to_owned))
    }

    /// Returns the username claim.
    fn username(&self, token: &str) -> Result<Option<String>, TokenError> {
        Ok(self.read_claims(token)?.username().map(ToOwned::to_owned))
    }

    /// Returns the user id claim.
    fn user_id(&self, token: &str) -> Result<Option<String>, TokenError> {
        Ok(self.read_claims(token)?.user_id().map(ToOwned::to_owned))
    }
}
