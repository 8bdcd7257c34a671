// campo-domain library entry point
pub mod case;
pub mod comments;
pub mod dates;
pub mod error;
pub mod role;
pub use case::{Activity, Case, CaseId, CaseStatus, NewCase, RiskClass};
pub use comments::{CommentEntry, CommentLog};
pub use error::DomainError;
pub use role::Role;
