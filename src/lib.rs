//! diario-campo
//!
//! Binario de línea de comandos sobre la tabla compartida de casos:
//! - `cli`: definición de argumentos (`clap`).
//! - `commands`: ejecución de cada subcomando.
//! - `config`: configuración desde entorno / `.env`.
//! - `errors`: `AppError` y su código de salida.

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;

pub use cli::{Cli, Command};
pub use config::AppConfig;
pub use errors::AppError;
