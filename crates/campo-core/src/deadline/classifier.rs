use campo_domain::{Case, CaseStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Severity;
use crate::constants::DUE_SOON_DAYS;

/// Valor de una celda de plazo. `Malformed` conserva el texto crudo cuando la
/// celda no pudo interpretarse como fecha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueDate {
    Date(NaiveDate),
    Malformed(String),
}

impl From<NaiveDate> for DueDate {
    fn from(d: NaiveDate) -> Self {
        DueDate::Date(d)
    }
}

/// Resultado de la clasificación: etiqueta para mostrar + severidad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineStatus {
    pub label: String,
    pub severity: Severity,
}

impl DeadlineStatus {
    fn new(label: impl Into<String>, severity: Severity) -> Self {
        Self { label: label.into(), severity }
    }
}

/// Clasifica un plazo.
///
/// Reglas, en orden:
/// 1. caso concluido -> `Concluded`, sin mirar fechas;
/// 2. el plazo de coordinación, si existe, manda sobre el del inspector;
/// 3. sin plazo -> `NoDeadline`; plazo ilegible -> `DateError`;
/// 4. días restantes < 0 -> `Overdue`, 0..=3 -> `DueSoon`, resto `OnTrack`.
pub fn classify(status: &CaseStatus,
                coordinator_due: Option<&DueDate>,
                inspector_due: Option<&DueDate>,
                today: NaiveDate)
                -> DeadlineStatus {
    if status.is_concluded() {
        return DeadlineStatus::new("Concluído", Severity::Concluded);
    }
    let reference = match coordinator_due.or(inspector_due) {
        None => return DeadlineStatus::new("Sem Prazo", Severity::NoDeadline),
        Some(DueDate::Malformed(_)) => return DeadlineStatus::new("Erro de Data", Severity::DateError),
        Some(DueDate::Date(d)) => *d,
    };
    let days = (reference - today).num_days();
    if days < 0 {
        DeadlineStatus::new(format!("VENCIDO há {} dias", -days), Severity::Overdue)
    } else if days <= DUE_SOON_DAYS {
        DeadlineStatus::new(format!("VENCE em {days} dias"), Severity::DueSoon)
    } else {
        DeadlineStatus::new(format!("OK ({days} dias)"), Severity::OnTrack)
    }
}

/// Atajo sobre un `Case` ya cargado (fechas tipadas).
pub fn classify_case(case: &Case, today: NaiveDate) -> DeadlineStatus {
    let coordinator = case.coordinator_due_date.map(DueDate::from);
    let inspector = case.inspector_due_date.map(DueDate::from);
    classify(&case.status, coordinator.as_ref(), inspector.as_ref(), today)
}
