//! Tabla de credenciales con hash salado.
//!
//! Cada entrada guarda `SHA-256(salt || password)` en hex; la contraseña en
//! claro nunca se almacena ni se compara directamente.

use std::collections::HashMap;

use campo_domain::Role;
use log::{info, warn};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::Session;
use crate::errors::AuthError;

/// Hash hex de `salt || password`.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

// Comparación sin salida temprana sobre el contenido.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialEntry {
    pub username: String,
    pub role: Role,
    pub salt: String,
    pub password_hash: String,
}

impl CredentialEntry {
    /// Nueva entrada con sal aleatoria.
    pub fn new(username: impl Into<String>, role: Role, password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        Self::with_salt(username, role, password, salt)
    }

    pub fn with_salt(username: impl Into<String>, role: Role, password: &str, salt: impl Into<String>) -> Self {
        let salt = salt.into();
        let password_hash = hash_password(&salt, password);
        Self { username: username.into(),
               role,
               salt,
               password_hash }
    }

    pub fn verify(&self, password: &str) -> bool {
        let candidate = hash_password(&self.salt, password);
        constant_time_eq(candidate.as_bytes(), self.password_hash.trim().to_lowercase().as_bytes())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CredentialTable {
    entries: HashMap<String, CredentialEntry>,
}

impl CredentialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construye la tabla rechazando usuarios repetidos.
    pub fn from_entries<I>(entries: I) -> Result<Self, AuthError>
        where I: IntoIterator<Item = CredentialEntry>
    {
        let mut table = Self::new();
        for entry in entries {
            if table.entries.contains_key(&entry.username) {
                return Err(AuthError::MalformedTable(format!("usuário repetido: {}", entry.username)));
            }
            table.entries.insert(entry.username.clone(), entry);
        }
        Ok(table)
    }

    pub fn insert(&mut self, entry: CredentialEntry) {
        self.entries.insert(entry.username.clone(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Verifica usuario y contraseña y abre la sesión.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        match self.entries.get(username.trim()) {
            Some(entry) if entry.verify(password) => {
                info!("auth:ok user={}", entry.username);
                Ok(Session::start(entry.username.clone(), entry.role))
            }
            _ => {
                warn!("auth:rejected user={}", username.trim());
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted() {
        assert_ne!(hash_password("a", "insp123"), hash_password("b", "insp123"));
        assert_eq!(hash_password("a", "insp123").len(), 64);
    }

    #[test]
    fn stored_hash_is_not_the_password() {
        let entry = CredentialEntry::new("joao.insp", Role::Inspector, "insp123");
        assert_ne!(entry.password_hash, "insp123");
        assert!(entry.verify("insp123"));
        assert!(!entry.verify("insp124"));
    }

    #[test]
    fn verify_accepts_uppercase_stored_hash() {
        let mut entry = CredentialEntry::with_salt("maria.coord", Role::Coordinator, "coord456", "s4lt");
        entry.password_hash = entry.password_hash.to_uppercase();
        assert!(entry.verify("coord456"));
    }

    #[test]
    fn duplicate_users_are_rejected() {
        let a = CredentialEntry::new("joao.insp", Role::Inspector, "x");
        let b = CredentialEntry::new("joao.insp", Role::Management, "y");
        assert!(matches!(CredentialTable::from_entries([a, b]), Err(AuthError::MalformedTable(_))));
    }
}
