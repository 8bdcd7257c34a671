//! campo-core: clasificación de plazos y acceso consistente a la tabla de
//! casos del Diário de Campo.
pub mod cache;
pub mod constants;
pub mod deadline;
pub mod errors;
pub mod report;
pub mod session;
pub mod store;
pub mod workflow;

pub use cache::TtlCache;
pub use deadline::{classify, classify_case, DeadlineStatus, DueDate, Severity};
pub use errors::{AuthError, StoreError, WorkflowError};
pub use report::{AlertSummary, BoardRow, CaseFilter, Indicators};
pub use session::{CredentialEntry, CredentialTable, Session};
pub use store::{CaseGateway, InMemoryTable, RawTable, TableConnector};
pub use workflow::{suggested_coordinator_deadline, CaseWorkflow, DeadlineEdit};
