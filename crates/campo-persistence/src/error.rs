//! Errores de persistencia.
//! Mapea errores de E/S y de CSV a variantes semánticas y luego a los errores
//! del core (`StoreError`, `AuthError`).

use std::path::PathBuf;

use campo_core::{AuthError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("configuração inválida: {0}")]
    Config(String),
    #[error("tabela não encontrada: {}", .0.display())]
    TableMissing(PathBuf),
    #[error("a tabela já existe: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("cabeçalho inválido em {}: {}", .0.display(), .1)]
    BadHeader(PathBuf, String),
    #[error("erro de E/S: {0}")]
    Io(#[from] std::io::Error),
    #[error("erro de CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Credentials(#[from] AuthError),
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::TableMissing(_) | PersistenceError::Config(_) => Self::Unavailable(err.to_string()),
            PersistenceError::BadHeader(..)
            | PersistenceError::Csv(_)
            | PersistenceError::AlreadyExists(_)
            | PersistenceError::Credentials(_) => Self::Malformed(err.to_string()),
            PersistenceError::Io(e) => Self::Io(e.to_string()),
        }
    }
}

impl From<PersistenceError> for AuthError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Credentials(e) => e,
            other => Self::MalformedTable(other.to_string()),
        }
    }
}
