//! Backend CSV real sobre archivos temporales.

use std::fs;
use std::time::Duration;

use campo_core::store::COLUMNS;
use campo_core::{CaseGateway, CaseWorkflow, Session, StoreError, TableConnector};
use campo_domain::{Activity, CaseStatus, NewCase, RiskClass, Role};
use campo_persistence::{init_table, load_credentials, CsvTableConnector, PersistenceError};
use chrono::NaiveDate;
use tempfile::tempdir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn form() -> NewCase {
    NewCase { establishment: "Padaria Central, Loja 2".into(),
              cnpj: "12.345.678/0001-90".into(),
              activity: Activity::Alimentos,
              risk: RiskClass::Medio,
              inspection_date: None,
              observations: "Sem \"alvará\" visível".into(),
              inspector_due_date: None }
}

#[test]
fn init_creates_header_only_table_and_refuses_to_clobber() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("casos.csv");
    init_table(&path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.trim_end(), COLUMNS.join(","));

    let err = init_table(&path).unwrap_err();
    assert!(matches!(err, PersistenceError::AlreadyExists(_)));
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn missing_table_is_fatal_on_open() {
    let dir = tempdir().unwrap();
    let err = CsvTableConnector::open(dir.path().join("nada.csv")).unwrap_err();
    assert!(matches!(err, PersistenceError::TableMissing(_)));
    assert!(matches!(StoreError::from(err), StoreError::Unavailable(_)));
}

#[test]
fn empty_file_has_no_usable_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vazio.csv");
    fs::write(&path, "").unwrap();
    assert!(matches!(CsvTableConnector::open(&path), Err(PersistenceError::BadHeader(..))));
}

#[test]
fn workflow_round_trips_through_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("casos.csv");
    init_table(&path).unwrap();

    let wf = CaseWorkflow::new(CaseGateway::with_ttl(CsvTableConnector::open(&path).unwrap(), Duration::from_secs(60)));
    let joao = Session::start("joao.insp", Role::Inspector);
    let case = wf.create_case(&joao, form(), today()).unwrap();
    wf.comment_case(&joao, case.id, "Retorno, com vírgula.", today()).unwrap();
    wf.conclude_case(&joao, case.id, today(), today()).unwrap();

    // Un proceso nuevo (otro conector) lee exactamente lo escrito.
    let fresh = CaseGateway::new(CsvTableConnector::open(&path).unwrap());
    let cases = fresh.load().unwrap();
    assert_eq!(cases.len(), 1);
    let stored = &cases[0];
    assert_eq!(stored.establishment, "Padaria Central, Loja 2");
    assert_eq!(stored.observations, "Sem \"alvará\" visível");
    assert_eq!(stored.status, CaseStatus::Concluded);
    assert_eq!(stored.completion_date, Some(today()));
    assert!(stored.comments.as_str().contains("Retorno, com vírgula."));

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("2026-11-03"));
    assert!(!dir.path().join(".casos.csv.tmp").exists());
}

#[test]
fn overwrite_replaces_whole_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("casos.csv");
    fs::write(&path, "status,ID,extra\nEm Andamento,3.0,x\n,,\n").unwrap();
    let gw = CaseGateway::new(CsvTableConnector::open(&path).unwrap());
    let cases = gw.load().unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].id.0, 3);
    gw.save(&cases).unwrap();

    let table = CsvTableConnector::open(&path).unwrap().fetch().unwrap();
    assert_eq!(table.headers, COLUMNS.map(String::from).to_vec());
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows[0][0], "3");
}

#[test]
fn credentials_file_loads_and_authenticates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("usuarios.csv");
    let entry = campo_core::CredentialEntry::with_salt("maria.coord", Role::Coordinator, "coord123", "sal");
    fs::write(&path,
              format!("username,role,salt,password_hash\n{},coordenador,{},{}\n",
                      entry.username, entry.salt, entry.password_hash)).unwrap();
    let table = load_credentials(&path).unwrap();
    let session = table.authenticate("maria.coord", "coord123").unwrap();
    assert_eq!(session.role(), Role::Coordinator);
    assert!(!fs::read_to_string(&path).unwrap().contains("coord123"));
    assert!(load_credentials(&dir.path().join("nada.csv")).is_err());
}
