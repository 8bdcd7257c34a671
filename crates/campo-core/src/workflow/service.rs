use campo_domain::case::COORDINATION_TAG;
use campo_domain::dates::format_display;
use campo_domain::{Case, CaseId, CommentEntry, DomainError, NewCase};
use chrono::NaiveDate;
use log::info;

use crate::errors::WorkflowError;
use crate::report::{self, AlertSummary, BoardRow, CaseFilter, Indicators};
use crate::session::Session;
use crate::store::{CaseGateway, RawTable, TableConnector};

/// Edición de la coordinación: nuevo plazo obligatorio y comentario opcional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineEdit {
    pub case_id: CaseId,
    pub due_date: NaiveDate,
    pub comment: Option<String>,
}

/// Valor sugerido al editar el plazo de coordinación: el plazo de
/// coordinación vigente, si no el del inspector, si no hoy.
pub fn suggested_coordinator_deadline(case: &Case, today: NaiveDate) -> NaiveDate {
    case.coordinator_due_date.or(case.inspector_due_date).unwrap_or(today)
}

/// Orquestador de las acciones sobre la tabla de casos.
pub struct CaseWorkflow<C: TableConnector> {
    gateway: CaseGateway<C>,
}

impl<C: TableConnector> CaseWorkflow<C> {
    pub fn new(gateway: CaseGateway<C>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &CaseGateway<C> {
        &self.gateway
    }

    /// Aplica `f` sobre el caso `id` y guarda la tabla completa sólo si `f`
    /// terminó bien.
    fn mutate<F>(&self, id: CaseId, f: F) -> Result<Case, WorkflowError>
        where F: FnOnce(&mut Case) -> Result<(), WorkflowError>
    {
        let mut cases = self.gateway.load()?;
        let case = cases.iter_mut().find(|c| c.id == id).ok_or(WorkflowError::NotFound(id))?;
        f(case)?;
        let updated = case.clone();
        self.gateway.save(&cases)?;
        Ok(updated)
    }

    /// Registra una nueva inspección a nombre del usuario de la sesión.
    pub fn create_case(&self, session: &Session, new: NewCase, today: NaiveDate) -> Result<Case, WorkflowError> {
        let mut cases = self.gateway.load()?;
        let id = CaseId::next_after(cases.iter().map(|c| &c.id))?;
        let case = Case::open(id, session.username(), new, today)?;
        cases.push(case.clone());
        self.gateway.save(&cases)?;
        info!("create_case id={} user={} establishment={:?}", id, session.username(), case.establishment);
        Ok(case)
    }

    /// Marca un caso como concluido. Un inspector sólo puede concluir los
    /// suyos.
    pub fn conclude_case(&self,
                         session: &Session,
                         id: CaseId,
                         completion_date: NaiveDate,
                         today: NaiveDate)
                         -> Result<Case, WorkflowError> {
        let case = self.mutate(id, |case| {
                           if !session.role().is_supervisor() && !case.is_owned_by(session.username()) {
                               let msg = "Você só pode concluir seus próprios processos ativos.";
                               return Err(WorkflowError::Unauthorized(msg.into()));
                           }
                           case.conclude(completion_date, session.username(), today)?;
                           Ok(())
                       })?;
        info!("conclude_case id={} user={}", id, session.username());
        Ok(case)
    }

    /// Fija el plazo obligatorio de coordinación y deja constancia en el
    /// historial. Exclusivo de coordinación y gerencia.
    pub fn edit_coordinator_deadline(&self,
                                     session: &Session,
                                     edit: DeadlineEdit,
                                     today: NaiveDate)
                                     -> Result<Case, WorkflowError> {
        session.require_supervisor("editar prazo")?;
        let default_note = format!("Prazo da coordenação definido para {}.", format_display(edit.due_date));
        let note = edit.comment
                       .as_deref()
                       .map(str::trim)
                       .filter(|c| !c.is_empty())
                       .unwrap_or(default_note.as_str());
        let case = self.mutate(edit.case_id, |case| {
                           case.set_coordinator_due_date(edit.due_date, today)?;
                           case.append_comment(&CommentEntry::new(session.username(), today, note).tagged(COORDINATION_TAG));
                           Ok(())
                       })?;
        info!("edit_coordinator_deadline id={} user={} due={}", edit.case_id, session.username(), edit.due_date);
        Ok(case)
    }

    /// Agrega un comentario sin cambiar el estado. Coordinación y gerencia
    /// comentan cualquier caso; un inspector, sólo los suyos.
    pub fn comment_case(&self,
                        session: &Session,
                        id: CaseId,
                        text: &str,
                        today: NaiveDate)
                        -> Result<Case, WorkflowError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::ValidationError("comentário vazio".into()).into());
        }
        let case = self.mutate(id, |case| {
                           if !session.can_see(case) {
                               return Err(WorkflowError::Unauthorized(format!("processo {id} pertence a outro inspetor")));
                           }
                           let entry = CommentEntry::new(session.username(), today, text);
                           if session.role().is_supervisor() {
                               case.append_comment(&entry.tagged(COORDINATION_TAG));
                           } else {
                               case.append_comment(&entry);
                           }
                           Ok(())
                       })?;
        info!("comment_case id={} user={}", id, session.username());
        Ok(case)
    }

    /// Un caso visible para la sesión.
    pub fn case(&self, session: &Session, id: CaseId) -> Result<Case, WorkflowError> {
        let cases = self.gateway.load()?;
        let case = cases.into_iter().find(|c| c.id == id).ok_or(WorkflowError::NotFound(id))?;
        if session.can_see(&case) {
            Ok(case)
        } else {
            Err(WorkflowError::Unauthorized(format!("processo {id} pertence a outro inspetor")))
        }
    }

    pub fn board(&self, session: &Session, filter: &CaseFilter, today: NaiveDate) -> Result<Vec<BoardRow>, WorkflowError> {
        Ok(report::board(&self.gateway.load()?, session, filter, today))
    }

    pub fn alerts(&self, session: &Session, today: NaiveDate) -> Result<AlertSummary, WorkflowError> {
        Ok(report::alerts(&self.gateway.load()?, session, today))
    }

    pub fn indicators(&self, session: &Session) -> Result<Indicators, WorkflowError> {
        session.require_supervisor("indicadores")?;
        Ok(report::indicators(&self.gateway.load()?))
    }

    /// Tabla completa para descarga (CSV). Exclusivo de supervisores.
    pub fn export(&self, session: &Session) -> Result<RawTable, WorkflowError> {
        session.require_supervisor("exportar dados")?;
        Ok(self.gateway.export()?)
    }
}
