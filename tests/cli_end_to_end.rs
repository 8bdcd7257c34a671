//! Subcomandos de punta a punta sobre archivos CSV temporales.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use campo_core::CredentialEntry;
use campo_domain::Role;
use campo_persistence::{write_credential_line, CsvTableConnector, StoreConfig};
use chrono::NaiveDate;
use clap::Parser;
use diario_campo::commands::{execute, hash_password};
use diario_campo::{AppConfig, AppError, Cli};
use tempfile::{tempdir, TempDir};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

struct Env {
    _dir: TempDir,
    config: AppConfig,
}

impl Env {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let table = dir.path().join("casos.csv");
        let creds = dir.path().join("usuarios.csv");
        let mut buf = b"username,role,salt,password_hash\n".to_vec();
        for (user, role, pw) in [("joao.insp", Role::Inspector, "insp123"),
                                 ("ana.insp", Role::Inspector, "insp456"),
                                 ("maria.coord", Role::Coordinator, "coord123")]
        {
            write_credential_line(&mut buf, &CredentialEntry::new(user, role, pw)).unwrap();
        }
        fs::write(&creds, buf).unwrap();
        let mut store = StoreConfig::new(&table);
        store.cache_ttl = Duration::from_secs(60);
        Self { _dir: dir,
               config: AppConfig { store,
                                   credentials_path: Some(creds) } }
    }

    fn table_path(&self) -> &Path {
        &self.config.store.table_path
    }

    fn run(&self, args: &[&str]) -> Result<String, AppError> {
        let mut argv = vec!["diario-campo"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        execute(&cli, &self.config, today(), &mut out, |store: &StoreConfig| {
            CsvTableConnector::open(store.table_path.clone())
        })?;
        Ok(String::from_utf8(out).unwrap())
    }
}

const JOAO: [&str; 4] = ["--user", "joao.insp", "--password", "insp123"];
const ANA: [&str; 4] = ["--user", "ana.insp", "--password", "insp456"];
const MARIA: [&str; 4] = ["--user", "maria.coord", "--password", "coord123"];

fn with(login: [&'static str; 4], rest: &[&'static str]) -> Vec<&'static str> {
    let mut v = login.to_vec();
    v.extend_from_slice(rest);
    v
}

fn create(env: &Env, login: [&'static str; 4], name: &'static str) {
    env.run(&with(login,
                  &["create", "--establishment", name, "--cnpj", "12.345.678/0001-90", "--activity", "Alimentos",
                    "--risk", "Alto"]))
       .unwrap();
}

#[test]
fn init_then_full_inspection_cycle() {
    let env = Env::new();
    assert!(env.run(&["init"]).unwrap().contains("casos.csv"));
    assert_eq!(env.run(&["init"]).unwrap_err().exit_code(), 4);

    create(&env, JOAO, "Padaria Central");
    create(&env, ANA, "Drogaria Sul");

    let board = env.run(&with(JOAO, &["board"])).unwrap();
    assert!(board.contains("Padaria Central"));
    assert!(!board.contains("Drogaria Sul"));
    assert!(board.contains("OK (15 dias)"));

    let out = env.run(&with(MARIA, &["edit-deadline", "1", "--due", "2026-10-20", "--comment", "Urgente."]))
                 .unwrap();
    assert!(out.contains("20/10/2026"));
    let alerts = env.run(&with(MARIA, &["--json", "alerts"])).unwrap();
    let alerts: serde_json::Value = serde_json::from_str(&alerts).unwrap();
    assert_eq!(alerts["in_progress"], 2);
    assert_eq!(alerts["due_soon"], 1);

    env.run(&with(JOAO, &["conclude", "1"])).unwrap();
    let raw = fs::read_to_string(env.table_path()).unwrap();
    assert!(raw.contains("Concluído"));
    assert!(raw.contains("[maria.coord em 19/10/2026 (COORD)]: Urgente."));

    let ind = env.run(&with(MARIA, &["indicators"])).unwrap();
    assert!(ind.contains("taxa de conclusão: 50.0%"));
}

#[test]
fn rejected_actions_leave_the_table_untouched() {
    let env = Env::new();
    env.run(&["init"]).unwrap();
    create(&env, JOAO, "Padaria Central");
    let before = fs::read(env.table_path()).unwrap();

    assert_eq!(env.run(&with(ANA, &["conclude", "1"])).unwrap_err().exit_code(), 4);
    assert_eq!(env.run(&with(JOAO, &["edit-deadline", "1"])).unwrap_err().exit_code(), 4);
    assert_eq!(env.run(&with(MARIA, &["conclude", "99"])).unwrap_err().exit_code(), 4);
    assert_eq!(env.run(&with(JOAO, &["indicators"])).unwrap_err().exit_code(), 4);
    assert_eq!(env.run(&with(JOAO, &["export"])).unwrap_err().exit_code(), 4);

    assert_eq!(fs::read(env.table_path()).unwrap(), before);
}

#[test]
fn bad_credentials_and_missing_user() {
    let env = Env::new();
    env.run(&["init"]).unwrap();
    let wrong = env.run(&["--user", "joao.insp", "--password", "x", "board"]).unwrap_err();
    let unknown = env.run(&["--user", "ninguem", "--password", "insp123", "board"]).unwrap_err();
    assert_eq!(wrong.to_string(), unknown.to_string());
    assert_eq!(wrong.exit_code(), 4);
    assert_eq!(env.run(&["--password", "x", "board"]).unwrap_err().exit_code(), 2);
}

#[test]
fn missing_table_is_a_store_failure() {
    let env = Env::new();
    let err = env.run(&with(JOAO, &["board"])).unwrap_err();
    assert_eq!(err.exit_code(), 5);
}

#[test]
fn edit_without_due_uses_suggested_deadline() {
    let env = Env::new();
    env.run(&["init"]).unwrap();
    create(&env, JOAO, "Padaria Central");
    let out = env.run(&with(MARIA, &["edit-deadline", "1"])).unwrap();
    assert!(out.contains("03/11/2026"));
    let raw = fs::read_to_string(env.table_path()).unwrap();
    assert!(raw.contains("Prazo da coordenação definido para 03/11/2026."));
}

#[test]
fn export_writes_csv_for_supervisors() {
    let env = Env::new();
    env.run(&["init"]).unwrap();
    create(&env, JOAO, "Padaria Central");
    let target: PathBuf = env.table_path().with_file_name("export.csv");
    let target_str = target.to_string_lossy().into_owned();
    let mut args: Vec<&str> = with(MARIA, &["export", "--output"]);
    args.push(&target_str);
    env.run(&args).unwrap();
    let exported = fs::read_to_string(&target).unwrap();
    assert!(exported.starts_with("ID,inspetor_id,estabelecimento"));
    assert!(exported.contains("Padaria Central"));

    let stdout = env.run(&with(MARIA, &["export"])).unwrap();
    assert_eq!(stdout, exported);
}

#[test]
fn hash_password_prints_a_loadable_line() {
    let cli = Cli::try_parse_from(["diario-campo", "--password", "s3gredo", "hash-password", "nova.coord", "--role",
                                   "coordenador"]).unwrap();
    let mut out = Vec::new();
    hash_password(&cli, &mut out).unwrap();
    let line = String::from_utf8(out).unwrap();
    assert!(line.starts_with("nova.coord,coordenador,"));
    assert!(!line.contains("s3gredo"));
}
