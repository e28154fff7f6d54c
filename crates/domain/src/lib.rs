//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod audit;
mod organization;
mod scope;
mod token;
mod validation;

pub use audit::{AuditRecord, AuditResponseStatus, INVALID_USERNAME};
pub use organization::Organization;
pub use scope::{ScopeGrant, ScopeSet};
pub use token::TokenClaims;
pub use validation::{RejectionKind, ValidationResult};
