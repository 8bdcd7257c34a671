//! Formatos de fecha usados por la tabla persistida y por el historial de
//! comentarios.

use chrono::{NaiveDate, NaiveDateTime};

/// Formato fijo de las columnas de fecha en la tabla (`YYYY-MM-DD`).
pub const STORAGE_FORMAT: &str = "%Y-%m-%d";
/// Formato legible usado en los comentarios y mensajes (`DD/MM/YYYY`).
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

// Formatos con hora que aparecen cuando la hoja guarda la celda como datetime.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];
// Celdas editadas a mano en la planilla. El año de cuatro cifras evita la
// ambigüedad entre ambos.
const HAND_EDITED_FORMATS: [&str; 2] = [DISPLAY_FORMAT, "%Y/%m/%d"];

/// Interpreta una celda de fecha persistida.
///
/// - Celda vacía (o sólo espacios) -> `Ok(None)`.
/// - `YYYY-MM-DD`, con o sin hora -> `Ok(Some(fecha))`.
/// - `DD/MM/YYYY` o `YYYY/MM/DD` -> `Ok(Some(fecha))`; al guardar se
///   reescribe como `YYYY-MM-DD`.
/// - Cualquier otro contenido -> `Err(texto original)`.
pub fn parse_stored(raw: &str) -> Result<Option<NaiveDate>, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if let Ok(d) = NaiveDate::parse_from_str(value, STORAGE_FORMAT) {
        return Ok(Some(d));
    }
    if let Some(dt) = DATETIME_FORMATS.iter().find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok()) {
        return Ok(Some(dt.date()));
    }
    HAND_EDITED_FORMATS.iter()
                       .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                       .map(Some)
                       .ok_or_else(|| value.to_string())
}

/// Serializa una fecha opcional al formato de la tabla (ausente -> vacío).
pub fn format_stored(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(STORAGE_FORMAT).to_string()).unwrap_or_default()
}

pub fn format_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_plain_and_datetime_cells() {
        assert_eq!(parse_stored("2024-03-01"), Ok(Some(d(2024, 3, 1))));
        assert_eq!(parse_stored(" 2024-03-01 00:00:00 "), Ok(Some(d(2024, 3, 1))));
        assert_eq!(parse_stored("2024-03-01T12:30:00"), Ok(Some(d(2024, 3, 1))));
    }

    #[test]
    fn empty_cell_is_absent() {
        assert_eq!(parse_stored(""), Ok(None));
        assert_eq!(parse_stored("   "), Ok(None));
    }

    #[test]
    fn hand_edited_cells_are_understood() {
        assert_eq!(parse_stored("20/10/2026"), Ok(Some(d(2026, 10, 20))));
        assert_eq!(parse_stored(" 2026/10/20 "), Ok(Some(d(2026, 10, 20))));
        assert_eq!(parse_stored("31/02/2026"), Err("31/02/2026".to_string()));
    }

    #[test]
    fn garbage_is_reported_verbatim() {
        assert_eq!(parse_stored("amanhã"), Err("amanhã".to_string()));
        assert_eq!(parse_stored("2024-02-30"), Err("2024-02-30".to_string()));
    }

    #[test]
    fn storage_and_display_formats() {
        assert_eq!(format_stored(Some(d(2026, 1, 9))), "2026-01-09");
        assert_eq!(format_stored(None), "");
        assert_eq!(format_display(d(2026, 1, 9)), "09/01/2026");
    }
}
