use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use orgreg_core::{AppError, AppResult};
use orgreg_domain::{AuditRecord, TokenClaims};

use crate::{ActiveAccount, AuditQueue, AuditSink, IdentityLookup, TokenCodec, TokenError};

/// Token codec answering from a fixed token table.
#[derive(Default)]
pub(crate) struct FakeTokenCodec {
    tokens: HashMap<String, Result<TokenClaims, TokenError>>,
}

impl FakeTokenCodec {
    pub(crate) fn with_token(mut self, token: &str, claims: TokenClaims) -> Self {
        self.tokens.insert(token.to_owned(), Ok(claims));
        self
    }

    pub(crate) fn with_failure(mut self, token: &str, error: TokenError) -> Self {
        self.tokens.insert(token.to_owned(), Err(error));
        self
    }
}

impl TokenCodec for FakeTokenCodec {
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let claims = self.read_claims(token)?;
        if claims.is_expired_at(chrono::Utc::now()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn read_claims(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.tokens
            .get(token)
            .cloned()
            .unwrap_or(Err(TokenError::Malformed))
    }
}

/// Identity lookup returning a fixed account and recording every call.
#[derive(Default)]
pub(crate) struct FakeIdentityLookup {
    pub(crate) account: Option<ActiveAccount>,
    pub(crate) calls: Mutex<Vec<(String, String)>>,
}

impl FakeIdentityLookup {
    pub(crate) fn returning(account: Option<ActiveAccount>) -> Self {
        Self {
            account,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }
}

#[async_trait]
impl IdentityLookup for FakeIdentityLookup {
    async fn find_active_account(
        &self,
        user_id: &str,
        authorization_header: &str,
    ) -> Option<ActiveAccount> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((user_id.to_owned(), authorization_header.to_owned()));
        }

        self.account.clone()
    }
}

/// Audit sink collecting submitted records.
#[derive(Default)]
pub(crate) struct RecordingAuditSink {
    pub(crate) records: Mutex<Vec<AuditRecord>>,
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

/// Audit queue collecting message bodies, optionally failing every send.
#[derive(Default)]
pub(crate) struct RecordingAuditQueue {
    pub(crate) fail: bool,
    pub(crate) messages: Mutex<Vec<String>>,
}

impl RecordingAuditQueue {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            messages: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AuditQueue for RecordingAuditQueue {
    async fn send_message(&self, body: String) -> AppResult<()> {
        if self.fail {
            return Err(AppError::Unavailable("queue service unavailable".to_owned()));
        }

        self.messages
            .lock()
            .map_err(|error| AppError::Internal(format!("failed to lock queue state: {error}")))?
            .push(body);
        Ok(())
    }
}

pub(crate) fn future_expiry() -> i64 {
    chrono::Utc::now().timestamp() + 3_600
}

pub(crate) fn past_expiry() -> i64 {
    chrono::Utc::now().timestamp() - 3_600
}
