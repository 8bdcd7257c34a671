//! Configuración central de la aplicación.
//! Combina la configuración del almacén (`StoreConfig`) con la ruta de la
//! tabla de credenciales (`CAMPO_CREDENTIALS_PATH`).

use std::env;
use std::path::{Path, PathBuf};

use campo_persistence::config::init_dotenv;
use campo_persistence::StoreConfig;

use crate::errors::AppError;

pub const ENV_CREDENTIALS_PATH: &str = "CAMPO_CREDENTIALS_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    /// Sólo la exigen los comandos que abren sesión.
    pub credentials_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        init_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
        where F: Fn(&str) -> Option<String>
    {
        let store = StoreConfig::from_lookup(&lookup)?;
        let credentials_path = lookup(ENV_CREDENTIALS_PATH).map(|v| v.trim().to_string())
                                                           .filter(|v| !v.is_empty())
                                                           .map(PathBuf::from);
        Ok(Self { store, credentials_path })
    }

    pub fn credentials_path(&self) -> Result<&Path, AppError> {
        self.credentials_path
            .as_deref()
            .ok_or_else(|| AppError::Config(format!("{ENV_CREDENTIALS_PATH} não definido")))
    }
}
