//! Clasificación de plazos.
//!
//! Función pura: dado el estado de un caso, sus dos plazos candidatos y el día
//! de hoy (siempre inyectado, nunca leído del reloj), devuelve la etiqueta
//! legible y el nivel de severidad.

pub mod classifier;
pub mod severity;

pub use classifier::{classify, classify_case, DeadlineStatus, DueDate};
pub use severity::Severity;
