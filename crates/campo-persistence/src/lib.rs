//! campo-persistence
//!
//! Backend de archivo plano para la tabla de casos y la tabla de
//! credenciales.
//!
//! Módulos:
//! - `csv_table`: `CsvTableConnector` (implementa `TableConnector`) y
//!   utilidades de lectura/escritura CSV.
//! - `connector`: conector compartido por proceso (`once_cell`).
//! - `credentials`: carga de `CredentialTable` desde CSV.
//! - `config`: configuración desde variables de entorno / `.env`.

pub mod config;
pub mod connector;
pub mod credentials;
pub mod csv_table;
pub mod error;

pub use config::{init_dotenv, StoreConfig};
pub use connector::shared_connector;
pub use credentials::{load_credentials, parse_credentials, write_credential_line};
pub use csv_table::{init_table, read_table, write_table, CsvTableConnector};
pub use error::PersistenceError;
