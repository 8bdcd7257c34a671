use serde::{Deserialize, Serialize};

/// Nivel de urgencia de un plazo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Concluded,
    Overdue,
    DueSoon,
    OnTrack,
    NoDeadline,
    DateError,
}

impl Severity {
    /// Color de resalte de la situación en el tablero.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Concluded | Severity::OnTrack => "green",
            Severity::Overdue => "red",
            Severity::DueSoon => "orange",
            Severity::NoDeadline | Severity::DateError => "gray",
        }
    }

    /// Vencido o por vencer: lo que cuentan los paneles de alerta.
    pub fn is_alert(&self) -> bool {
        matches!(self, Severity::Overdue | Severity::DueSoon)
    }
}
