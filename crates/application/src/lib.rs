//! Application services and ports.

#![forbid(unsafe_code)]

mod access_policy;
mod audit_ports;
mod audit_publisher;
mod audit_recorder;
mod authentication_service;
mod identity_ports;
mod organization_ports;
mod organization_service;
mod token_ports;

#[cfg(test)]
mod test_support;

pub use access_policy::{
    InstanceAccessPolicy, ORGANIZATION_ACCESS_DENIED_MESSAGE, OrganizationAccessPolicy,
};
pub use audit_ports::{AuditQueue, AuditSink};
pub use audit_publisher::{AuditPublisher, DEFAULT_MAX_MESSAGE_BYTES, TRUNCATION_MARKER};
pub use audit_recorder::AuditRecorder;
pub use authentication_service::{
    AuthenticationFailure, AuthenticationService, BEARER_PREFIX, bearer_token,
};
pub use identity_ports::{ActiveAccount, IdentityLookup};
pub use organization_ports::OrganizationRepository;
pub use organization_service::OrganizationService;
pub use token_ports::{TokenCodec, TokenError};
