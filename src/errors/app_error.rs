//! Error del binario: envuelve los errores de cada crate y los traduce a un
//! código de salida.
//!
//! | código | significado                                   |
//! |--------|-----------------------------------------------|
//! | 2      | uso incorrecto de la línea de comandos        |
//! | 3      | configuración ausente o inválida              |
//! | 4      | acción rechazada (credenciales, permiso, validación, caso inexistente) |
//! | 5      | falla del almacén o de la salida              |

use campo_core::{AuthError, StoreError, WorkflowError};
use campo_persistence::PersistenceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("uso inválido: {0}")]
    Usage(String),
    #[error("configuração: {0}")]
    Config(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("saída: {0}")]
    Output(String),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Usage(_) => 2,
            AppError::Config(_) => 3,
            AppError::Auth(AuthError::InvalidCredentials) => 4,
            AppError::Auth(AuthError::MalformedTable(_)) => 3,
            AppError::Workflow(WorkflowError::Store(_)) => 5,
            AppError::Workflow(_) => 4,
            AppError::Persistence(PersistenceError::Config(_)) => 3,
            AppError::Persistence(PersistenceError::AlreadyExists(_)) => 4,
            AppError::Persistence(_) => 5,
            AppError::Output(_) => 5,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Workflow(err.into())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Output(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Output(err.to_string())
    }
}
