//! Gateway: caché de lectura, invalidación en escritura y ida y vuelta de la
//! tabla.

use std::time::Duration;

use campo_core::store::COLUMNS;
use campo_core::{classify_case, CaseGateway, CaseWorkflow, InMemoryTable, RawTable, Session, Severity};
use campo_domain::{Case, CaseId, CaseStatus, CommentLog, Role};
use chrono::NaiveDate;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn seeded() -> RawTable {
    let mut t = RawTable::new(COLUMNS);
    t.push_row(["1", "joao.insp", "Padaria Central", "12.345.678/0001-90", "Alimentos", "Médio", "2026-10-01",
                "Sem alvará", "2026-10-16", "2026-10-25", "Concluído", "[joao.insp em 01/10/2026]: Processo iniciado pelo inspetor.",
                "2026-10-18"]);
    t.push_row(["2", "ana.insp", "Drogaria Sul", "", "Saúde", "Alto", "", "", "", "", "Em Andamento", "", ""]);
    t
}

#[test]
fn repeated_loads_hit_the_cache() {
    let store = InMemoryTable::new(seeded());
    let gw = CaseGateway::with_ttl(&store, Duration::from_secs(60));
    let first = gw.load().unwrap();
    let second = gw.load().unwrap();
    assert_eq!(first, second);
    assert_eq!(store.fetch_count(), 1);
}

#[test]
fn expired_cache_refetches_same_values() {
    let store = InMemoryTable::new(seeded());
    let gw = CaseGateway::with_ttl(&store, Duration::ZERO);
    let first = gw.load().unwrap();
    std::thread::sleep(Duration::from_millis(2));
    let second = gw.load().unwrap();
    assert_eq!(first, second);
    assert_eq!(store.fetch_count(), 2);
}

#[test]
fn save_invalidates_even_with_long_ttl() {
    let store = InMemoryTable::new(seeded());
    let gw = CaseGateway::with_ttl(&store, Duration::from_secs(3600));
    let mut cases = gw.load().unwrap();
    cases[1].establishment = "Drogaria Sul Ltda".into();
    gw.save(&cases).unwrap();
    let reread = gw.load().unwrap();
    assert_eq!(reread[1].establishment, "Drogaria Sul Ltda");
    assert_eq!(store.fetch_count(), 2);
}

#[test]
fn save_of_load_is_a_no_op_on_content() {
    let store = InMemoryTable::new(seeded());
    let gw = CaseGateway::new(&store);
    let before = gw.load().unwrap();
    gw.save(&before).unwrap();
    gw.invalidate();
    let after = gw.load().unwrap();
    assert_eq!(before, after);

    let full = &after[0];
    assert_eq!(full.inspection_date, Some(d(2026, 10, 1)));
    assert_eq!(full.inspector_due_date, Some(d(2026, 10, 16)));
    assert_eq!(full.coordinator_due_date, Some(d(2026, 10, 25)));
    assert_eq!(full.completion_date, Some(d(2026, 10, 18)));

    let empty = &after[1];
    assert_eq!((empty.inspection_date, empty.inspector_due_date), (None, None));
    assert_eq!((empty.coordinator_due_date, empty.completion_date), (None, None));
    assert_eq!(store.snapshot(), seeded());
}

#[test]
fn save_replaces_the_whole_table_with_fixed_header() {
    let mut legacy = RawTable::new(["status", "ID", "extra"]);
    legacy.push_row(["Em Andamento", "5", "lixo"]);
    let store = InMemoryTable::new(legacy);
    let gw = CaseGateway::new(&store);
    let cases = gw.load().unwrap();
    assert_eq!(cases[0].id, CaseId(5));
    gw.save(&cases).unwrap();

    let written = store.snapshot();
    assert_eq!(written.headers, COLUMNS.map(String::from).to_vec());
    assert_eq!(written.rows[0][0], "5");
    assert_eq!(written.rows[0][10], "Em Andamento");
    assert!(!written.rows[0].iter().any(|c| c == "lixo"));
}

#[test]
fn saved_dates_use_iso_format() {
    let store = InMemoryTable::new(RawTable::new(COLUMNS));
    let gw = CaseGateway::new(&store);
    let case = Case { id: CaseId(1),
                      owner_id: "joao.insp".into(),
                      establishment: "Mercado Norte".into(),
                      cnpj: "1".into(),
                      activity: "Alimentos".into(),
                      risk: "Baixo".into(),
                      inspection_date: Some(d(2026, 1, 2)),
                      observations: String::new(),
                      inspector_due_date: Some(d(2026, 1, 17)),
                      coordinator_due_date: None,
                      status: CaseStatus::InProgress,
                      comments: CommentLog::default(),
                      completion_date: None };
    gw.save(&[case]).unwrap();
    let row = &store.snapshot().rows[0];
    assert_eq!(row[6], "2026-01-02");
    assert_eq!(row[8], "2026-01-17");
    assert_eq!(row[9], "");
    assert_eq!(row[12], "");
}

#[test]
fn hand_edited_coordinator_date_keeps_priority_and_survives_saves() {
    let mut t = RawTable::new(COLUMNS);
    t.push_row(["1", "joao.insp", "A", "1", "Outro", "Baixo", "", "", "2026-11-30", "20/10/2026", "Em Andamento", "", ""]);
    t.push_row(["2", "ana.insp", "B", "2", "Outro", "Baixo", "", "", "2026-11-30", "", "Em Andamento", "", ""]);
    let store = InMemoryTable::new(t);
    let today = d(2026, 10, 19);

    let wf = CaseWorkflow::new(CaseGateway::new(&store));
    let cases = wf.gateway().load().unwrap();
    assert_eq!(cases[0].coordinator_due_date, Some(d(2026, 10, 20)));
    let status = classify_case(&cases[0], today);
    assert_eq!(status.severity, Severity::DueSoon);
    assert_eq!(status.label, "VENCE em 1 dias");

    let ana = Session::start("ana.insp", Role::Inspector);
    wf.comment_case(&ana, CaseId(2), "Retorno agendado.", today).unwrap();
    assert_eq!(store.snapshot().rows[0][9], "2026-10-20");
}
