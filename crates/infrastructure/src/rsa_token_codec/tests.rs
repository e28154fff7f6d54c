use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use orgreg_application::{TokenCodec, TokenError};
use orgreg_domain::TokenClaims;

use super::RsaTokenCodec;

const SIGNING_KEY: &str = include_str!("../../tests/fixtures/test_rsa_private.pem");
const FOREIGN_SIGNING_KEY: &str = include_str!("../../tests/fixtures/other_rsa_private.pem");
const PUBLIC_KEY: &str = include_str!("../../tests/fixtures/test_rsa_public.pem");

fn codec() -> RsaTokenCodec {
    match RsaTokenCodec::from_base64_public_key(PUBLIC_KEY) {
        Ok(codec) => codec,
        Err(error) => panic!("fixture public key should load: {error}"),
    }
}

fn sign(claims: &TokenClaims, private_key_pem: &str) -> String {
    let key = match EncodingKey::from_rsa_pem(private_key_pem.as_bytes()) {
        Ok(key) => key,
        Err(error) => panic!("fixture private key should load: {error}"),
    };
    match jsonwebtoken::encode(&Header::new(Algorithm::RS256), claims, &key) {
        Ok(token) => token,
        Err(error) => panic!("token should sign: {error}"),
    }
}

fn live_claims() -> TokenClaims {
    TokenClaims::new((Utc::now() + Duration::hours(1)).timestamp())
        .with_subject("alice")
        .with_username("alice")
        .with_user_id("user-1")
        .with_email("alice@example.com")
        .with_scope("org.view")
        .with_org_id("org-1")
}

fn expired_claims() -> TokenClaims {
    TokenClaims::new((Utc::now() - Duration::hours(1)).timestamp())
        .with_subject("alice")
        .with_username("alice")
        .with_user_id("user-1")
}

#[test]
fn decodes_tokens_signed_with_the_matching_key() {
    let claims = live_claims();
    let token = sign(&claims, SIGNING_KEY);

    let decoded = codec().decode(&token);

    assert_eq!(decoded, Ok(claims));
}

#[test]
fn accepts_the_key_as_bare_base64_with_whitespace() {
    let body: String = PUBLIC_KEY
        .lines()
        .filter(|line| !line.starts_with("-----"))
        .map(|line| format!("  {line}\n"))
        .collect();
    let codec = match RsaTokenCodec::from_base64_public_key(&body) {
        Ok(codec) => codec,
        Err(error) => panic!("bare base64 key should load: {error}"),
    };

    let token = sign(&live_claims(), SIGNING_KEY);

    assert!(codec.decode(&token).is_ok());
}

#[test]
fn rejects_keys_that_are_not_base64() {
    assert!(RsaTokenCodec::from_base64_public_key("not a key!").is_err());
    assert!(RsaTokenCodec::from_base64_public_key("   ").is_err());
}

#[test]
fn expired_tokens_fail_decode_but_remain_readable() {
    let codec = codec();
    let token = sign(&expired_claims(), SIGNING_KEY);

    assert_eq!(codec.decode(&token), Err(TokenError::Expired));
    assert_eq!(codec.is_expired(&token), Ok(true));
    assert_eq!(codec.username(&token), Ok(Some("alice".to_owned())));
    assert_eq!(codec.user_id(&token), Ok(Some("user-1".to_owned())));
}

#[test]
fn tokens_signed_by_another_key_are_rejected() {
    let codec = codec();
    let token = sign(&live_claims(), FOREIGN_SIGNING_KEY);

    assert_eq!(codec.decode(&token), Err(TokenError::InvalidSignature));
    assert_eq!(codec.read_claims(&token), Err(TokenError::InvalidSignature));
}

#[test]
fn garbage_is_malformed() {
    let codec = codec();

    assert_eq!(codec.decode("not-a-token"), Err(TokenError::Malformed));
    assert_eq!(codec.scope("a.b.c"), Err(TokenError::Malformed));
}

#[test]
fn tampered_payload_is_rejected() {
    let codec = codec();
    let token = sign(&live_claims(), SIGNING_KEY);
    let forged_payload = sign(&live_claims().with_scope("org.manage"), SIGNING_KEY);

    let mut parts: Vec<&str> = token.split('.').collect();
    let forged: Vec<&str> = forged_payload.split('.').collect();
    parts[1] = forged[1];
    let tampered = parts.join(".");

    assert_eq!(codec.decode(&tampered), Err(TokenError::InvalidSignature));
}

#[test]
fn absent_claims_read_as_none() {
    let codec = codec();
    let token = sign(
        &TokenClaims::new((Utc::now() + Duration::hours(1)).timestamp()),
        SIGNING_KEY,
    );

    assert_eq!(codec.is_expired(&token), Ok(false));
    assert_eq!(codec.subject(&token), Ok(None));
    assert_eq!(codec.scope(&token), Ok(None));
    assert_eq!(codec.org_id(&token), Ok(None));
    assert_eq!(codec.username(&token), Ok(None));
}

#[test]
fn repeated_reads_are_identical() {
    let codec = codec();
    let token = sign(&live_claims(), SIGNING_KEY);

    assert_eq!(codec.read_claims(&token), codec.read_claims(&token));
    assert_eq!(codec.org_id(&token), Ok(Some("org-1".to_owned())));
}
