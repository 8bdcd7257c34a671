//! Caché de lectura con expiración por tiempo (pull-based).
//!
//! Una entrada es `(valor, fetched_at)`; se considera vencida cuando
//! `now - fetched_at > ttl`. No hay tareas de fondo ni invalidación entre
//! procesos: la expiración se evalúa al leer y las escrituras llaman a
//! `invalidate()`.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    fetched_at: Instant,
}

#[derive(Debug, Clone)]
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Option<CacheEntry<T>>,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Devuelve el valor si sigue vigente en `now`.
    pub fn get(&self, now: Instant) -> Option<&T> {
        self.entry
            .as_ref()
            .filter(|e| now.saturating_duration_since(e.fetched_at) <= self.ttl)
            .map(|e| &e.value)
    }

    pub fn put(&mut self, value: T, fetched_at: Instant) {
        self.entry = Some(CacheEntry { value, fetched_at });
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}
