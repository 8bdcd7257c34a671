//! Errores del core.
//!
//! Se separan dos familias:
//! - `StoreError`: fallas del almacén compartido. Son fatales para la
//!   operación en curso (no se continúa con datos parciales ni viejos).
//! - `WorkflowError`: rechazos de una acción de usuario (permiso, estado,
//!   validación). El almacén no se modifica.
//!
//! Los problemas de calidad por fila (fecha o ID ilegible) no son errores:
//! degradan sólo esa fila y se reportan vía `log::warn!`.

use campo_domain::{CaseId, DomainError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("armazenamento indisponível: {0}")]
    Unavailable(String),
    #[error("tabela malformada: {0}")]
    Malformed(String),
    #[error("erro de E/S no armazenamento: {0}")]
    Io(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("acesso negado: {0}")]
    Unauthorized(String),
    #[error("processo {0} não encontrado")]
    NotFound(CaseId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Mismo error para usuario inexistente y contraseña incorrecta.
    #[error("usuário ou senha inválidos")]
    InvalidCredentials,
    #[error("tabela de credenciais inválida: {0}")]
    MalformedTable(String),
}
