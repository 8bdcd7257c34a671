use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Perfil de acceso de un usuario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "inspetor")]
    Inspector,
    #[serde(rename = "coordenador")]
    Coordinator,
    #[serde(rename = "gerencia")]
    Management,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Inspector => "inspetor",
            Role::Coordinator => "coordenador",
            Role::Management => "gerencia",
        }
    }

    /// Coordinación y gerencia ven a todo el equipo y pueden fijar plazos.
    pub fn is_supervisor(&self) -> bool {
        matches!(self, Role::Coordinator | Role::Management)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inspetor" => Ok(Role::Inspector),
            "coordenador" => Ok(Role::Coordinator),
            "gerencia" => Ok(Role::Management),
            other => Err(DomainError::ValidationError(format!("perfil desconhecido: {other}"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
