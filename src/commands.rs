//! Ejecución de cada subcomando sobre el flujo de casos.
//!
//! `execute` recibe la configuración, la fecha de hoy, el destino de la
//! salida y la forma de adquirir el conector, de modo que el binario usa el
//! conector compartido del proceso y las pruebas un archivo temporal.

use std::fs::File;
use std::io::Write;

use campo_core::{suggested_coordinator_deadline, BoardRow, CaseFilter, CaseGateway, CaseWorkflow, CredentialEntry,
                 DeadlineEdit, Session, TableConnector};
use campo_domain::dates::format_display;
use campo_domain::{CaseId, CaseStatus, NewCase};
use campo_persistence::{init_table, load_credentials, write_credential_line, write_table, PersistenceError,
                        StoreConfig};
use chrono::NaiveDate;
use log::info;
use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::errors::AppError;

/// Imprime la línea de credenciales de `hash-password`. No necesita
/// configuración.
pub fn hash_password<W: Write>(cli: &Cli, out: &mut W) -> Result<(), AppError> {
    let Command::HashPassword { username, role } = &cli.command else {
        return Err(AppError::Usage("esperado hash-password".into()));
    };
    let password = cli.password
                      .as_deref()
                      .filter(|p| !p.is_empty())
                      .ok_or_else(|| AppError::Usage("falta --password (ou CAMPO_PASSWORD)".into()))?;
    let entry = CredentialEntry::new(username.trim(), *role, password);
    write_credential_line(&mut *out, &entry)?;
    Ok(())
}

fn login(cli: &Cli, config: &AppConfig) -> Result<Session, AppError> {
    let user = cli.user.as_deref().ok_or_else(|| AppError::Usage("falta --user".into()))?;
    let password = cli.password
                      .as_deref()
                      .ok_or_else(|| AppError::Usage("falta --password (ou CAMPO_PASSWORD)".into()))?;
    let credentials = load_credentials(config.credentials_path()?).map_err(|e| AppError::Config(e.to_string()))?;
    Ok(credentials.authenticate(user, password)?)
}

fn emit_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn render_board<W: Write>(out: &mut W, rows: &[BoardRow]) -> Result<(), AppError> {
    writeln!(out,
             "  {:>4}  {:<30}  {:<14}  {:<10}  {:<10}  {:<6}  situação",
             "ID", "estabelecimento", "inspetor", "prazo insp", "prazo coord", "cor")?;
    for row in rows {
        let date = |d: Option<NaiveDate>| d.map(format_display).unwrap_or_else(|| "-".into());
        writeln!(out,
                 "{} {:>4}  {:<30}  {:<14}  {:<10}  {:<10}  {:<6}  {}",
                 if row.deadline.severity.is_alert() { '!' } else { ' ' },
                 row.case.id.0,
                 row.case.establishment,
                 row.case.owner_id,
                 date(row.case.inspector_due_date),
                 date(row.case.coordinator_due_date),
                 row.deadline.severity.color(),
                 row.deadline.label)?;
    }
    writeln!(out, "{} caso(s)", rows.len())?;
    Ok(())
}

fn board_filter(statuses: &[String], all: bool, inspector: &Option<String>) -> CaseFilter {
    let statuses = if all {
        Vec::new()
    } else if statuses.is_empty() {
        CaseFilter::default().statuses
    } else {
        statuses.iter().map(|s| CaseStatus::from_stored(s)).collect()
    };
    CaseFilter { statuses,
                 inspector: inspector.clone() }
}

/// Ejecuta el subcomando de `cli`.
pub fn execute<W, C, F>(cli: &Cli, config: &AppConfig, today: NaiveDate, out: &mut W, connect: F) -> Result<(), AppError>
    where W: Write,
          C: TableConnector,
          F: FnOnce(&StoreConfig) -> Result<C, PersistenceError>
{
    match &cli.command {
        Command::HashPassword { .. } => return hash_password(cli, out),
        Command::Init => {
            init_table(&config.store.table_path)?;
            info!("init path={}", config.store.table_path.display());
            writeln!(out, "tabela criada em {}", config.store.table_path.display())?;
            return Ok(());
        }
        _ => {}
    }

    let session = login(cli, config)?;
    let workflow = CaseWorkflow::new(CaseGateway::with_ttl(connect(&config.store)?, config.store.cache_ttl));

    match &cli.command {
        Command::Create { establishment,
                          cnpj,
                          activity,
                          risk,
                          inspection_date,
                          observations,
                          due, } => {
            let new = NewCase { establishment: establishment.clone(),
                                cnpj: cnpj.clone(),
                                activity: *activity,
                                risk: *risk,
                                inspection_date: *inspection_date,
                                observations: observations.clone(),
                                inspector_due_date: *due };
            let case = workflow.create_case(&session, new, today)?;
            if cli.json {
                emit_json(out, &case)?;
            } else {
                writeln!(out, "caso {} criado", case.id)?;
            }
        }
        Command::Conclude { id, date } => {
            let case = workflow.conclude_case(&session, CaseId(*id), date.unwrap_or(today), today)?;
            writeln!(out, "caso {} concluído", case.id)?;
        }
        Command::EditDeadline { id, due, comment } => {
            let id = CaseId(*id);
            let due_date = match due {
                Some(d) => *d,
                None => suggested_coordinator_deadline(&workflow.case(&session, id)?, today),
            };
            let edit = DeadlineEdit { case_id: id,
                                      due_date,
                                      comment: comment.clone() };
            let case = workflow.edit_coordinator_deadline(&session, edit, today)?;
            writeln!(out, "caso {}: prazo da coordenação {}", case.id, format_display(due_date))?;
        }
        Command::Comment { id, text } => {
            let case = workflow.comment_case(&session, CaseId(*id), text, today)?;
            writeln!(out, "comentário adicionado ao caso {}", case.id)?;
        }
        Command::Board { statuses, all, inspector } => {
            let rows = workflow.board(&session, &board_filter(statuses, *all, inspector), today)?;
            if cli.json {
                emit_json(out, &rows)?;
            } else {
                render_board(out, &rows)?;
            }
        }
        Command::Alerts => {
            let summary = workflow.alerts(&session, today)?;
            if cli.json {
                emit_json(out, &summary)?;
            } else {
                writeln!(out,
                         "em andamento: {}  vence em breve: {}  vencidos: {}",
                         summary.in_progress, summary.due_soon, summary.overdue)?;
            }
        }
        Command::Indicators => {
            let ind = workflow.indicators(&session)?;
            if cli.json {
                emit_json(out, &ind)?;
            } else {
                writeln!(out,
                         "total: {}  concluídos: {}  em andamento: {}  taxa de conclusão: {}",
                         ind.total, ind.concluded, ind.in_progress, ind.completion_rate)?;
                for g in &ind.by_risk_status {
                    writeln!(out, "  {:<8} {:<14} {}", g.risk, g.status, g.count)?;
                }
                for p in &ind.productivity {
                    writeln!(out,
                             "  {:<14} total {}  concluídos {}  em andamento {}",
                             p.inspector, p.total, p.concluded, p.in_progress)?;
                }
            }
        }
        Command::Export { output } => {
            let table = workflow.export(&session)?;
            match output {
                Some(path) => {
                    write_table(File::create(path)?, &table)?;
                    writeln!(out, "{} linha(s) exportadas para {}", table.len(), path.display())?;
                }
                None => write_table(&mut *out, &table)?,
            }
        }
        Command::HashPassword { .. } | Command::Init => {
            return Err(AppError::Usage("comando sem sessão".into()));
        }
    }
    session.logout();
    Ok(())
}
