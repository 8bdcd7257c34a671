//! Acceso a la tabla compartida de casos.
//!
//! - `table`: contrato `TableConnector` (lectura/escritura de la tabla cruda)
//!   y backend en memoria.
//! - `codec`: mapeo tabla cruda <-> `Case` (columnas, fechas, IDs).
//! - `gateway`: `CaseGateway`, caché de lectura + invalidación en escritura.

pub mod codec;
pub mod gateway;
pub mod table;

pub use codec::{decode, encode, COLUMNS};
pub use gateway::CaseGateway;
pub use table::{InMemoryTable, RawTable, TableConnector};
