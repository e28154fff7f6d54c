//! RS256 bearer token verification against a fixed public key.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use orgreg_application::{TokenCodec, TokenError};
use orgreg_core::{AppError, AppResult};
use orgreg_domain::TokenClaims;

/// Token codec verifying RS256 signatures with a key loaded once at startup.
#[derive(Clone)]
pub struct RsaTokenCodec {
    decoding_key: DecodingKey,
    full_validation: Validation,
    signature_validation: Validation,
}

impl RsaTokenCodec {
    /// Loads the key from a base64 X.509 (SPKI) public key string.
    ///
    /// Whitespace is stripped before decoding, and PEM armour lines are
    /// tolerated so a pasted `.pem` file also works.
    pub fn from_base64_public_key(encoded: &str) -> AppResult<Self> {
        let body: String = encoded
            .lines()
            .filter(|line| !line.trim_start().starts_with("-----"))
            .flat_map(str::chars)
            .filter(|character| !character.is_whitespace())
            .collect();
        if body.is_empty() {
            return Err(AppError::Validation("JWT public key must not be empty".to_owned()));
        }

        let der = STANDARD.decode(body.as_bytes()).map_err(|error| {
            AppError::Validation(format!("JWT public key is not valid base64: {error}"))
        })?;

        Self::from_public_key_pem(spki_pem(&der).as_bytes())
    }

    /// Loads the key from a PEM-encoded RSA public key.
    pub fn from_public_key_pem(pem: &[u8]) -> AppResult<Self> {
        let decoding_key = DecodingKey::from_rsa_pem(pem).map_err(|error| {
            AppError::Validation(format!("JWT public key is not a valid RSA key: {error}"))
        })?;

        let mut full_validation = Validation::new(Algorithm::RS256);
        full_validation.leeway = 0;
        full_validation.validate_aud = false;
        full_validation.set_required_spec_claims(&["exp"]);

        let mut signature_validation = full_validation.clone();
        signature_validation.validate_exp = false;

        Ok(Self {
            decoding_key,
            full_validation,
            signature_validation,
        })
    }

    fn decode_with(&self, token: &str, validation: &Validation) -> Result<TokenClaims, TokenError> {
        jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, validation)
            .map(|data| data.claims)
            .map_err(token_error)
    }
}

impl TokenCodec for RsaTokenCodec {
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.decode_with(token, &self.full_validation)
    }

    fn read_claims(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.decode_with(token, &self.signature_validation)
    }
}

fn spki_pem(der: &[u8]) -> String {
    let encoded = STANDARD.encode(der);
    let mut pem = String::from("-----BEGIN PUBLIC KEY-----\n");
    for line in encoded.as_bytes().chunks(64) {
        pem.push_str(&String::from_utf8_lossy(line));
        pem.push('\n');
    }
    pem.push_str("-----END PUBLIC KEY-----\n");
    pem
}

fn token_error(error: JwtError) -> TokenError {
    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
            TokenError::Malformed
        }
        _ => TokenError::Other(error.to_string()),
    }
}

#[cfg(test)]
mod tests;
