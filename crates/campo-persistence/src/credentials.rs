//! Tabla de credenciales en CSV: `username,role,salt,password_hash`.

use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use campo_core::{AuthError, CredentialEntry, CredentialTable};
use campo_domain::Role;
use log::debug;

use crate::csv_table::read_table;
use crate::error::PersistenceError;

pub const CREDENTIAL_COLUMNS: [&str; 4] = ["username", "role", "salt", "password_hash"];

pub fn load_credentials(path: &Path) -> Result<CredentialTable, PersistenceError> {
    match File::open(path) {
        Ok(file) => parse_credentials(file),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(PersistenceError::TableMissing(path.to_path_buf())),
        Err(e) => Err(e.into()),
    }
}

/// Lee credenciales desde cualquier `Read`. Filas vacías se ignoran; un rol
/// desconocido o una columna faltante invalidan la tabla entera.
pub fn parse_credentials<R: Read>(reader: R) -> Result<CredentialTable, PersistenceError> {
    let raw = read_table(reader)?;
    let mut index = [0usize; 4];
    for (slot, column) in index.iter_mut().zip(CREDENTIAL_COLUMNS) {
        *slot = raw.column_index(column)
                   .ok_or_else(|| AuthError::MalformedTable(format!("coluna ausente: '{column}'")))?;
    }
    let mut entries = Vec::with_capacity(raw.len());
    for (line, row) in raw.rows.iter().enumerate() {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let cell = |i: usize| row.get(index[i]).map(|c| c.trim()).unwrap_or("");
        let role: Role = cell(1).parse()
                                .map_err(|_| AuthError::MalformedTable(format!("linha {}: perfil {:?}", line + 2, cell(1))))?;
        entries.push(CredentialEntry { username: cell(0).to_string(),
                                       role,
                                       salt: cell(2).to_string(),
                                       password_hash: cell(3).to_string() });
    }
    let table = CredentialTable::from_entries(entries)?;
    debug!("credentials:loaded users={}", table.len());
    Ok(table)
}

/// Una línea CSV lista para pegar en la tabla de credenciales.
pub fn write_credential_line<W: Write>(writer: W, entry: &CredentialEntry) -> Result<(), PersistenceError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([entry.username.as_str(), entry.role.as_str(), entry.salt.as_str(), entry.password_hash.as_str()])?;
    wtr.flush()?;
    Ok(())
}
