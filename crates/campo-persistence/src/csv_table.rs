//! Backend de archivo plano: la tabla de casos como un CSV con encabezado.
//!
//! Lectura tolerante (filas de largo variable se aceptan tal cual; el codec
//! del core completa lo que falte). La escritura reemplaza el archivo entero
//! escribiendo primero un temporal hermano y renombrándolo encima, de modo
//! que un corte a mitad de escritura no deja una tabla truncada. Esto no es
//! un lock: dos procesos que escriben a la vez siguen pudiendo perder una
//! actualización.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use campo_core::store::COLUMNS;
use campo_core::{RawTable, StoreError, TableConnector};
use log::debug;

use crate::error::PersistenceError;

/// Lee una tabla CSV completa (encabezado + filas).
pub fn read_table<R: Read>(reader: R) -> Result<RawTable, PersistenceError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);
    let mut table = RawTable::new(rdr.headers()?.iter());
    for record in rdr.records() {
        table.push_row(record?.iter());
    }
    Ok(table)
}

/// Escribe `table` como CSV con su encabezado.
pub fn write_table<W: Write>(writer: W, table: &RawTable) -> Result<(), PersistenceError> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Crea una tabla vacía con el encabezado fijo. Nunca pisa un archivo
/// existente.
pub fn init_table(path: &Path) -> Result<(), PersistenceError> {
    if path.exists() {
        return Err(PersistenceError::AlreadyExists(path.to_path_buf()));
    }
    let file = File::options().write(true).create_new(true).open(path)?;
    write_table(file, &RawTable::new(COLUMNS))?;
    debug!("init_table path={}", path.display());
    Ok(())
}

/// Conector `TableConnector` sobre un archivo CSV local.
#[derive(Debug, Clone)]
pub struct CsvTableConnector {
    path: PathBuf,
}

impl CsvTableConnector {
    /// Adquiere el conector: el archivo debe existir y tener encabezado
    /// legible.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        if !path.is_file() {
            return Err(PersistenceError::TableMissing(path));
        }
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(&path)?;
        let headers = rdr.headers()?;
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(PersistenceError::BadHeader(path, "cabeçalho vazio".into()));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self.path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        self.path.with_file_name(format!(".{name}.tmp"))
    }

    fn read(&self) -> Result<RawTable, PersistenceError> {
        match File::open(&self.path) {
            Ok(file) => read_table(file),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(PersistenceError::TableMissing(self.path.clone())),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, table: &RawTable) -> Result<(), PersistenceError> {
        let tmp = self.temp_path();
        let result = (|| -> Result<(), PersistenceError> {
            let mut file = File::create(&tmp)?;
            write_table(&mut file, table)?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        })();
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

impl TableConnector for CsvTableConnector {
    fn fetch(&self) -> Result<RawTable, StoreError> {
        let table = self.read()?;
        debug!("csv:fetch path={} rows={}", self.path.display(), table.len());
        Ok(table)
    }

    fn overwrite(&self, table: &RawTable) -> Result<(), StoreError> {
        self.write(table)?;
        debug!("csv:overwrite path={} rows={}", self.path.display(), table.len());
        Ok(())
    }
}
