//! Operaciones de usuario sobre casos.
//!
//! Cada operación es un ciclo completo leer -> modificar una fila ->
//! reescribir la tabla a través del `CaseGateway`. Los chequeos de permiso y
//! de estado ocurren antes de escribir: si fallan, la tabla no se toca.

pub mod service;

pub use service::{suggested_coordinator_deadline, CaseWorkflow, DeadlineEdit};
