//! Carga de configuración del almacén desde variables de entorno.
//! Convención: `CAMPO_TABLE_PATH` (obligatoria) y `CAMPO_CACHE_TTL_SECS`
//! (opcional, segundos). Un `.env` en el directorio actual se carga una sola
//! vez.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use campo_core::constants::DEFAULT_CACHE_TTL;
use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::error::PersistenceError;

pub const ENV_TABLE_PATH: &str = "CAMPO_TABLE_PATH";
pub const ENV_CACHE_TTL: &str = "CAMPO_CACHE_TTL_SECS";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub table_path: PathBuf,
    pub cache_ttl: Duration,
}

impl StoreConfig {
    pub fn new(table_path: impl Into<PathBuf>) -> Self {
        Self { table_path: table_path.into(),
               cache_ttl: DEFAULT_CACHE_TTL }
    }

    pub fn from_env() -> Result<Self, PersistenceError> {
        init_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero leyendo de `lookup`; permite probar sin
    /// tocar el entorno del proceso.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PersistenceError>
        where F: Fn(&str) -> Option<String>
    {
        let table_path = lookup(ENV_TABLE_PATH).map(|v| v.trim().to_string())
                                               .filter(|v| !v.is_empty())
                                               .ok_or_else(|| {
                                                   PersistenceError::Config(format!("{ENV_TABLE_PATH} não definido"))
                                               })?;
        let cache_ttl = match lookup(ENV_CACHE_TTL) {
            None => DEFAULT_CACHE_TTL,
            Some(raw) => raw.trim()
                            .parse::<u64>()
                            .map(Duration::from_secs)
                            .map_err(|_| PersistenceError::Config(format!("{ENV_CACHE_TTL} inválido: {raw:?}")))?,
        };
        Ok(Self { table_path: PathBuf::from(table_path),
                  cache_ttl })
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
