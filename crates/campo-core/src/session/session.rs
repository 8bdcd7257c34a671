use campo_domain::{Case, Role};
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::WorkflowError;

/// Contexto de un usuario autenticado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    id: Uuid,
    username: String,
    role: Role,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Abre una sesión. En la aplicación la crea
    /// `CredentialTable::authenticate`.
    pub fn start(username: impl Into<String>, role: Role) -> Self {
        let session = Self { id: Uuid::new_v4(),
                             username: username.into(),
                             role,
                             started_at: Utc::now() };
        info!("session:start id={} user={} role={}", session.id, session.username, session.role);
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Inspectores sólo ven sus propios casos; coordinación y gerencia, todos.
    pub fn can_see(&self, case: &Case) -> bool {
        self.role.is_supervisor() || case.is_owned_by(&self.username)
    }

    pub fn require_supervisor(&self, action: &str) -> Result<(), WorkflowError> {
        if self.role.is_supervisor() {
            Ok(())
        } else {
            Err(WorkflowError::Unauthorized(format!("'{action}' é exclusivo de Coordenadores e Gerência")))
        }
    }

    /// Cierra la sesión consumiéndola.
    pub fn logout(self) {
        info!("session:end id={} user={}", self.id, self.username);
    }
}
