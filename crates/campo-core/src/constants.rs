//! Constantes del core.

use std::time::Duration;

/// Días restantes (inclusive) hasta los cuales un plazo cuenta como
/// "vence pronto".
pub const DUE_SOON_DAYS: i64 = 3;

/// Ventana por defecto de la caché de lectura de la tabla de casos. Corta:
/// sólo evita relecturas dentro de una misma interacción.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5);
