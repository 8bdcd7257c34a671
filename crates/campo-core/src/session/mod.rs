//! Sesión explícita y tabla de credenciales.
//!
//! La sesión se crea al autenticarse, viaja como parámetro a cada operación y
//! se descarta en el logout; no hay estado global de login.

pub mod credentials;
pub mod session;

pub use credentials::{hash_password, CredentialEntry, CredentialTable};
pub use session::Session;
