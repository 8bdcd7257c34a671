//! Mapeo entre la tabla cruda y `Case`.
//!
//! Lectura (`decode`):
//! - descarta filas completamente vacías;
//! - columnas ausentes se leen como celdas vacías;
//! - `ID` se convierte a entero; si no es numérico queda en 0 (con warning);
//! - columnas de fecha se interpretan como `YYYY-MM-DD`; lo ilegible queda
//!   ausente (con warning).
//!
//! Escritura (`encode`): encabezado fijo `COLUMNS`, fechas en `YYYY-MM-DD`,
//! ausentes como celda vacía.

use campo_domain::dates::{format_stored, parse_stored};
use campo_domain::{Case, CaseId, CaseStatus, CommentLog};
use chrono::NaiveDate;
use log::warn;

use super::table::RawTable;

pub const COL_ID: &str = "ID";
pub const COL_OWNER: &str = "inspetor_id";
pub const COL_ESTABLISHMENT: &str = "estabelecimento";
pub const COL_CNPJ: &str = "cnpj";
pub const COL_ACTIVITY: &str = "atividade";
pub const COL_RISK: &str = "risco";
pub const COL_INSPECTION_DATE: &str = "data_inspecao";
pub const COL_OBSERVATIONS: &str = "obs_inspetor";
pub const COL_INSPECTOR_DUE: &str = "prazo_retorno_inspetor";
pub const COL_COORDINATOR_DUE: &str = "prazo_retorno_coord";
pub const COL_STATUS: &str = "status";
pub const COL_COMMENTS: &str = "comentarios";
pub const COL_COMPLETION_DATE: &str = "data_conclusao";

/// Columnas de la tabla de casos, en el orden persistido.
pub const COLUMNS: [&str; 13] = [COL_ID,
                                 COL_OWNER,
                                 COL_ESTABLISHMENT,
                                 COL_CNPJ,
                                 COL_ACTIVITY,
                                 COL_RISK,
                                 COL_INSPECTION_DATE,
                                 COL_OBSERVATIONS,
                                 COL_INSPECTOR_DUE,
                                 COL_COORDINATOR_DUE,
                                 COL_STATUS,
                                 COL_COMMENTS,
                                 COL_COMPLETION_DATE];

// Vista de una fila con acceso por nombre de columna.
struct RowView<'a> {
    index: &'a [Option<usize>; 13],
    cells: &'a [String],
    line: usize,
}

impl<'a> RowView<'a> {
    fn cell(&self, column: &str) -> &'a str {
        COLUMNS.iter()
               .position(|c| *c == column)
               .and_then(|pos| self.index[pos])
               .and_then(|i| self.cells.get(i))
               .map(String::as_str)
               .unwrap_or("")
    }

    fn date(&self, column: &str) -> Option<NaiveDate> {
        match parse_stored(self.cell(column)) {
            Ok(d) => d,
            Err(raw) => {
                warn!("fila {}: fecha ilegible en '{column}': {raw:?} -> ausente", self.line);
                None
            }
        }
    }

    fn id(&self) -> CaseId {
        let raw = self.cell(COL_ID).trim();
        match coerce_id(raw) {
            Some(id) => id,
            None => {
                warn!("fila {}: ID no numérico {raw:?} -> 0", self.line);
                CaseId(0)
            }
        }
    }
}

/// `"12"` y `"12.0"` (celda numérica de planilla) -> 12. Negativos, fracciones
/// y texto -> `None`.
fn coerce_id(raw: &str) -> Option<CaseId> {
    if let Ok(n) = raw.parse::<u64>() {
        return Some(CaseId(n));
    }
    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(CaseId(f as u64))
    } else {
        None
    }
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

/// Tabla cruda -> casos, en el orden persistido.
pub fn decode(table: &RawTable) -> Vec<Case> {
    let mut index = [None; 13];
    for (slot, column) in index.iter_mut().zip(COLUMNS) {
        *slot = table.column_index(column);
    }
    table.rows
         .iter()
         .enumerate()
         .filter(|(_, cells)| !is_blank(cells))
         .map(|(i, cells)| {
             // +2: la línea 1 es el encabezado.
             let row = RowView { index: &index, cells, line: i + 2 };
             Case { id: row.id(),
                    owner_id: row.cell(COL_OWNER).trim().to_string(),
                    establishment: row.cell(COL_ESTABLISHMENT).to_string(),
                    cnpj: row.cell(COL_CNPJ).to_string(),
                    activity: row.cell(COL_ACTIVITY).to_string(),
                    risk: row.cell(COL_RISK).to_string(),
                    inspection_date: row.date(COL_INSPECTION_DATE),
                    observations: row.cell(COL_OBSERVATIONS).to_string(),
                    inspector_due_date: row.date(COL_INSPECTOR_DUE),
                    coordinator_due_date: row.date(COL_COORDINATOR_DUE),
                    status: CaseStatus::from_stored(row.cell(COL_STATUS)),
                    comments: CommentLog::from_stored(row.cell(COL_COMMENTS)),
                    completion_date: row.date(COL_COMPLETION_DATE) }
         })
         .collect()
}

/// Casos -> tabla cruda con el encabezado fijo.
pub fn encode(cases: &[Case]) -> RawTable {
    let mut table = RawTable::new(COLUMNS);
    for c in cases {
        table.push_row([c.id.to_string(),
                        c.owner_id.clone(),
                        c.establishment.clone(),
                        c.cnpj.clone(),
                        c.activity.clone(),
                        c.risk.clone(),
                        format_stored(c.inspection_date),
                        c.observations.clone(),
                        format_stored(c.inspector_due_date),
                        format_stored(c.coordinator_due_date),
                        c.status.as_str().to_string(),
                        c.comments.as_str().to_string(),
                        format_stored(c.completion_date)]);
    }
    table
}
