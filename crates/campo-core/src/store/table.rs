use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::errors::StoreError;

/// Tabla tal como la entrega el backend: encabezado + filas de texto.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new<I, S>(headers: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { headers: headers.into_iter().map(Into::into).collect(),
               rows: Vec::new() }
    }

    /// Posición de una columna por nombre (se ignoran espacios del encabezado).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn push_row<I, S>(&mut self, row: I)
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Conector hacia el almacén tabular externo (planilla, archivo plano...).
///
/// Contrato:
/// - `fetch` devuelve la tabla completa en el orden persistido.
/// - `overwrite` reemplaza la tabla completa (encabezado incluido); no es un
///   parche incremental.
/// - Un error es fatal para la operación en curso; no hay reintentos.
pub trait TableConnector: Send + Sync {
    fn fetch(&self) -> Result<RawTable, StoreError>;
    fn overwrite(&self, table: &RawTable) -> Result<(), StoreError>;
}

impl<T: TableConnector + ?Sized> TableConnector for &T {
    fn fetch(&self) -> Result<RawTable, StoreError> {
        (**self).fetch()
    }
    fn overwrite(&self, table: &RawTable) -> Result<(), StoreError> {
        (**self).overwrite(table)
    }
}

impl<T: TableConnector + ?Sized> TableConnector for Arc<T> {
    fn fetch(&self) -> Result<RawTable, StoreError> {
        (**self).fetch()
    }
    fn overwrite(&self, table: &RawTable) -> Result<(), StoreError> {
        (**self).overwrite(table)
    }
}

/// Backend en memoria (tests y prototipos). Cuenta lecturas y escrituras
/// para poder verificar el comportamiento de la caché.
#[derive(Debug, Default)]
pub struct InMemoryTable {
    inner: Mutex<RawTable>,
    fetches: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryTable {
    pub fn new(table: RawTable) -> Self {
        Self { inner: Mutex::new(table),
               fetches: AtomicUsize::new(0),
               writes: AtomicUsize::new(0) }
    }

    /// Copia del contenido actual, sin contar como lectura.
    pub fn snapshot(&self) -> RawTable {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl TableConnector for InMemoryTable {
    fn fetch(&self) -> Result<RawTable, StoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot())
    }

    fn overwrite(&self, table: &RawTable) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = table.clone();
        Ok(())
    }
}
