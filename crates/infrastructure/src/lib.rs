//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod console_audit_queue;
mod http_identity_lookup;
mod in_memory_organization_repository;
mod postgres_organization_repository;
mod queued_audit_sink;
mod rsa_token_codec;
mod sqs_audit_queue;

pub use console_audit_queue::ConsoleAuditQueue;
pub use http_identity_lookup::HttpIdentityLookup;
pub use in_memory_organization_repository::InMemoryOrganizationRepository;
pub use postgres_organization_repository::PostgresOrganizationRepository;
pub use queued_audit_sink::{AuditDeliveryWorker, QueuedAuditSink};
pub use rsa_token_codec::RsaTokenCodec;
pub use sqs_audit_queue::SqsAuditQueue;
