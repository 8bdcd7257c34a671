//! Gateway de la tabla de casos.
//!
//! Protocolo de actualización: leer la tabla completa, modificar una fila en
//! memoria, reescribir la tabla completa. No hay locks, transacciones ni
//! token de versión.
//!
//! Riesgo conocido (lost update): `save` sobrescribe con la copia que tiene
//! quien llama. Si otro proceso guardó entre nuestro `load` y nuestro `save`,
//! su cambio se pierde sin aviso. Se acepta para un equipo pequeño de pocos
//! usuarios simultáneos; el mutex interno sólo protege la caché de este
//! proceso.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use campo_domain::Case;
use log::debug;

use super::codec::{decode, encode};
use super::table::{RawTable, TableConnector};
use crate::cache::TtlCache;
use crate::constants::DEFAULT_CACHE_TTL;
use crate::errors::StoreError;

pub struct CaseGateway<C: TableConnector> {
    connector: C,
    cache: Mutex<TtlCache<Vec<Case>>>,
}

impl<C: TableConnector> CaseGateway<C> {
    /// Gateway con la ventana de caché por defecto (5 s).
    pub fn new(connector: C) -> Self {
        Self::with_ttl(connector, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(connector: C, ttl: Duration) -> Self {
        Self { connector,
               cache: Mutex::new(TtlCache::new(ttl)) }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    fn cache(&self) -> MutexGuard<'_, TtlCache<Vec<Case>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Devuelve todos los casos en el orden persistido, desde la caché si
    /// sigue vigente.
    pub fn load(&self) -> Result<Vec<Case>, StoreError> {
        if let Some(cached) = self.cache().get(Instant::now()) {
            debug!("load:cache hit rows={}", cached.len());
            return Ok(cached.clone());
        }
        let table = self.connector.fetch()?;
        let cases = decode(&table);
        debug!("load:fetched raw_rows={} cases={}", table.len(), cases.len());
        self.cache().put(cases.clone(), Instant::now());
        Ok(cases)
    }

    /// Reescribe la tabla completa. La caché se invalida antes de escribir,
    /// de modo que el próximo `load` de este proceso vea la escritura.
    pub fn save(&self, cases: &[Case]) -> Result<(), StoreError> {
        let table = encode(cases);
        self.invalidate();
        self.connector.overwrite(&table)?;
        debug!("save:done rows={}", table.len());
        Ok(())
    }

    pub fn invalidate(&self) {
        self.cache().invalidate();
    }

    /// Tabla completa ya normalizada, lista para exportar.
    pub fn export(&self) -> Result<RawTable, StoreError> {
        Ok(encode(&self.load()?))
    }
}
