//! Vistas derivadas de la tabla de casos: tablero con estado de plazo,
//! contadores de alerta e indicadores de gestión. Funciones puras sobre los
//! casos ya cargados.

pub mod board;
pub mod indicators;

pub use board::{alerts, board, visible_cases, AlertSummary, BoardRow, CaseFilter};
pub use indicators::{indicators, Indicators, InspectorProductivity, RiskStatusCount};
