use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use orgreg_application::{
    ActiveAccount, AuditRecorder, AuditSink, AuthenticationService, IdentityLookup,
    OrganizationAccessPolicy, OrganizationService, TokenCodec, TokenError,
};
use orgreg_domain::{AuditRecord, Organization, TokenClaims};
use orgreg_infrastructure::InMemoryOrganizationRepository;
use sqlx::postgres::PgPoolOptions;

use crate::state::AppState;

pub(crate) const ACTIVITY_PREFIX: &str = "Org Management - ";

/// Token codec answering from a fixed token table.
#[derive(Default)]
pub(crate) struct FakeTokenCodec {
    tokens: HashMap<String, TokenClaims>,
}

impl FakeTokenCodec {
    pub(crate) fn with_token(mut self, token: &str, claims: TokenClaims) -> Self {
        self.tokens.insert(token.to_owned(), claims);
        self
    }
}

impl TokenCodec for FakeTokenCodec {
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let claims = self.read_claims(token)?;
        if claims.is_expired_at(Utc::now()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn read_claims(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.tokens.get(token).cloned().ok_or(TokenError::Malformed)
    }
}

pub(crate) struct StaticIdentityLookup(pub(crate) Option<ActiveAccount>);

#[async_trait]
impl IdentityLookup for StaticIdentityLookup {
    async fn find_active_account(
        &self,
        _user_id: &str,
        _authorization_header: &str,
    ) -> Option<ActiveAccount> {
        self.0.clone()
    }
}

#[derive(Default)]
pub(crate) struct RecordingAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl RecordingAuditSink {
    pub(crate) fn snapshot(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn submit(&self, record: AuditRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }
}

fn expires_in(hours: i64) -> i64 {
    (Utc::now() + chrono::Duration::hours(hours)).timestamp()
}

fn alice_claims(hours: i64) -> TokenClaims {
    TokenClaims::new(expires_in(hours))
        .with_subject("user-1")
        .with_username("alice")
        .with_user_id("user-1")
        .with_email("alice@example.com")
}

/// Tokens known to [`test_state`].
pub(crate) fn token_table() -> FakeTokenCodec {
    FakeTokenCodec::default()
        .with_token(
            "view-token",
            alice_claims(1).with_scope("org.view").with_org_id("org-1"),
        )
        .with_token(
            "manage-token",
            alice_claims(1).with_scope("org.manage").with_org_id("org-1"),
        )
        .with_token(
            "unscoped-token",
            alice_claims(1).with_scope("profile.read").with_org_id("org-1"),
        )
        .with_token(
            "expired-token",
            alice_claims(-1).with_scope("org.view").with_org_id("org-1"),
        )
}

pub(crate) fn alice_account() -> ActiveAccount {
    ActiveAccount {
        active: true,
        user_id: Some("user-1".to_owned()),
        email: Some("alice@example.com".to_owned()),
        username: Some("alice".to_owned()),
        role: Some("ADMIN".to_owned()),
    }
}

pub(crate) fn organization(id: &str, name: &str, is_active: bool) -> Organization {
    Organization {
        organization_id: id.to_owned(),
        organization_name: name.to_owned(),
        unique_entity_number: format!("UEN-{id}"),
        sector_name: Some("Finance".to_owned()),
        primary_contact_name: "Alice".to_owned(),
        primary_contact_email: "alice@example.com".to_owned(),
        is_active,
    }
}

/// Builds state over fakes. Must be called inside a Tokio runtime.
pub(crate) fn test_state(account: Option<ActiveAccount>) -> (AppState, Arc<RecordingAuditSink>) {
    let token_codec: Arc<dyn TokenCodec> = Arc::new(token_table());
    let audit_sink = Arc::new(RecordingAuditSink::default());
    let repository = InMemoryOrganizationRepository::with_organizations([
        organization("org-1", "Acme", true),
        organization("org-2", "Globex", true),
        organization("org-3", "Initech", false),
    ]);

    let postgres_pool = match PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy("postgres://orgreg@127.0.0.1:1/orgreg")
    {
        Ok(pool) => pool,
        Err(error) => panic!("lazy pool should build: {error}"),
    };

    let state = AppState {
        authentication_service: AuthenticationService::new(
            token_codec.clone(),
            Arc::new(StaticIdentityLookup(account)),
        ),
        audit_recorder: AuditRecorder::new(audit_sink.clone(), token_codec.clone(), ACTIVITY_PREFIX),
        organization_access_policy: Arc::new(OrganizationAccessPolicy::new(token_codec)),
        organization_service: OrganizationService::new(Arc::new(repository)),
        postgres_pool,
    };

    (state, audit_sink)
}
