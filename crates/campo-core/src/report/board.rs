use campo_domain::{Case, CaseStatus};
use chrono::NaiveDate;
use serde::Serialize;

use crate::deadline::{classify_case, DeadlineStatus, Severity};
use crate::session::Session;

/// Filtro del tablero. Por defecto sólo casos `Em Andamento`, de cualquier
/// inspector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFilter {
    pub statuses: Vec<CaseStatus>,
    pub inspector: Option<String>,
}

impl Default for CaseFilter {
    fn default() -> Self {
        Self { statuses: vec![CaseStatus::InProgress],
               inspector: None }
    }
}

impl CaseFilter {
    pub fn matches(&self, case: &Case) -> bool {
        let status_ok = self.statuses.is_empty() || self.statuses.contains(&case.status);
        let inspector_ok = self.inspector.as_deref().map_or(true, |i| case.owner_id == i);
        status_ok && inspector_ok
    }
}

/// Fila del tablero: el caso con su clasificación de plazo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardRow {
    pub case: Case,
    pub deadline: DeadlineStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertSummary {
    pub in_progress: usize,
    pub due_soon: usize,
    pub overdue: usize,
}

pub fn visible_cases<'a>(cases: &'a [Case], session: &'a Session) -> impl Iterator<Item = &'a Case> + 'a {
    cases.iter().filter(move |c| session.can_see(c))
}

/// Casos visibles que pasan el filtro, ordenados por plazo del inspector
/// (ascendente, sin plazo al final).
pub fn board(cases: &[Case], session: &Session, filter: &CaseFilter, today: NaiveDate) -> Vec<BoardRow> {
    let mut rows: Vec<BoardRow> = visible_cases(cases, session).filter(|c| filter.matches(c))
                                                                .map(|c| BoardRow { case: c.clone(),
                                                                                    deadline: classify_case(c, today) })
                                                                .collect();
    rows.sort_by_key(|r| (r.case.inspector_due_date.is_none(), r.case.inspector_due_date));
    rows
}

/// Contadores del panel de alertas sobre los casos visibles en curso.
pub fn alerts(cases: &[Case], session: &Session, today: NaiveDate) -> AlertSummary {
    visible_cases(cases, session).filter(|c| c.status.is_in_progress())
                                 .fold(AlertSummary::default(), |mut acc, c| {
                                     acc.in_progress += 1;
                                     match classify_case(c, today).severity {
                                         Severity::DueSoon => acc.due_soon += 1,
                                         Severity::Overdue => acc.overdue += 1,
                                         _ => {}
                                     }
                                     acc
                                 })
}
