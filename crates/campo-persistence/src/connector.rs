//! Adquisición del conector compartido por proceso.

use log::info;
use once_cell::sync::OnceCell;

use crate::config::StoreConfig;
use crate::csv_table::CsvTableConnector;
use crate::error::PersistenceError;

static CONNECTOR: OnceCell<CsvTableConnector> = OnceCell::new();

/// Conector del proceso. Se adquiere en la primera llamada con la
/// configuración recibida; las siguientes devuelven el mismo conector. Si la
/// adquisición falla no queda nada en caché y la próxima llamada reintenta.
pub fn shared_connector(config: &StoreConfig) -> Result<&'static CsvTableConnector, PersistenceError> {
    CONNECTOR.get_or_try_init(|| {
                 let connector = CsvTableConnector::open(&config.table_path)?;
                 info!("store:connected path={}", config.table_path.display());
                 Ok(connector)
             })
}
