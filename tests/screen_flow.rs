//! End-to-end tests for the screen router.
//!
//! A session registers, logs in, uploads a dataset and runs the tools, with
//! a real CSV user file in a temporary directory and real bcrypt hashes.

use std::collections::HashMap;
use std::sync::Arc;

use tempfile::TempDir;

use lss_analytics::adapters::{
    default_parsers, exporter_for, BcryptHasher, CsvUserStore,
};
use lss_analytics::application::handlers::UploadCommand;
use lss_analytics::application::screens::{
    ChecklistInput, DpmoForm, IshikawaInput, LoginInput, NewCause, NewSheet, ParetoInput,
    RegisterInput, ScreenRequest,
};
use lss_analytics::application::{Page, ScreenRouter, Severity};
use lss_analytics::domain::analysis::{CauseCategory, FieldKind, FieldSpec, SheetKind};
use lss_analytics::domain::dataset::CapacityLimits;
use lss_analytics::domain::foundation::SessionId;
use lss_analytics::domain::navigation::{MenuState, Screen};
use lss_analytics::domain::report::ExportFormat;
use lss_analytics::domain::session::SessionContext;
use lss_analytics::ports::UserRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn router(users: Arc<CsvUserStore>) -> ScreenRouter {
    ScreenRouter::new(
        users,
        Arc::new(BcryptHasher::new(4)),
        default_parsers(),
        vec![exporter_for(ExportFormat::Csv), exporter_for(ExportFormat::Pdf)],
        CapacityLimits::default(),
        10,
    )
}

fn store(dir: &TempDir) -> Arc<CsvUserStore> {
    Arc::new(CsvUserStore::new(dir.path().join("users.csv")))
}

fn register(router: &ScreenRouter, session: &mut SessionContext) -> Page {
    router.render(
        session,
        ScreenRequest::Register(RegisterInput {
            username: "ana01".to_string(),
            email: "ana@example.com".to_string(),
            password: "Secret123".to_string(),
            confirm_password: "Secret123".to_string(),
        }),
    )
}

fn login(router: &ScreenRouter, session: &mut SessionContext, password: &str) -> Page {
    router.render(
        session,
        ScreenRequest::Login(LoginInput {
            username: "ana01".to_string(),
            password: password.to_string(),
        }),
    )
}

fn defects_csv() -> Vec<u8> {
    let mut csv = String::from("Defect,Cost\n");
    for (category, count) in [("A", 50), ("B", 30), ("C", 20)] {
        for _ in 0..count {
            csv.push_str(&format!("{},2.5\n", category));
        }
    }
    csv.into_bytes()
}

fn logged_in(dir: &TempDir) -> (ScreenRouter, SessionContext) {
    let router = router(store(dir));
    let mut session = SessionContext::new(SessionId::new());
    register(&router, &mut session);
    let page = login(&router, &mut session, "Secret123");
    assert!(!page.has_severity(Severity::Error), "{:?}", page.notices);
    (router, session)
}

fn upload_defects(router: &ScreenRouter, session: &mut SessionContext) -> Page {
    router.upload(
        session,
        UploadCommand {
            filename: "defects.csv".to_string(),
            bytes: defects_csv(),
        },
    )
}

// =============================================================================
// Navigation and accounts
// =============================================================================

#[test]
fn anonymous_request_for_tool_redirects_to_login() {
    let dir = TempDir::new().unwrap();
    let router = router(store(&dir));
    let mut session = SessionContext::new(SessionId::new());

    let page = router.render(&mut session, ScreenRequest::view(Screen::Pareto));

    assert_eq!(page.screen, Screen::Login);
    assert_eq!(page.redirect, Some(Screen::Login));
    assert!(page.has_severity(Severity::Warning));
    assert_eq!(page.menu, MenuState::Anonymous.screens().to_vec());
}

#[test]
fn register_then_login_reaches_authenticated_home() {
    let dir = TempDir::new().unwrap();
    let router = router(store(&dir));
    let mut session = SessionContext::new(SessionId::new());

    let page = register(&router, &mut session);
    assert_eq!(page.redirect, Some(Screen::Login));
    assert!(page.has_severity(Severity::Success));

    let page = login(&router, &mut session, "Secret123");
    assert_eq!(page.redirect, Some(Screen::Home));
    assert_eq!(page.username.as_deref(), Some("ana01"));
    assert!(session.is_authenticated());

    let home = router.render(&mut session, ScreenRequest::Home);
    assert!(home.text.iter().any(|line| line.contains("ana01")));
}

#[test]
fn wrong_password_keeps_session_anonymous() {
    let dir = TempDir::new().unwrap();
    let router = router(store(&dir));
    let mut session = SessionContext::new(SessionId::new());
    register(&router, &mut session);

    let page = login(&router, &mut session, "Wrong1234");

    assert!(page.has_severity(Severity::Error));
    assert!(!session.is_authenticated());
}

#[test]
fn duplicate_registration_is_reported() {
    let dir = TempDir::new().unwrap();
    let router = router(store(&dir));
    let mut session = SessionContext::new(SessionId::new());
    register(&router, &mut session);

    let page = register(&router, &mut session);

    assert!(page
        .notices
        .iter()
        .any(|n| n.severity == Severity::Error && n.message == "Username already exists"));
}

#[test]
fn accounts_survive_a_new_router() {
    let dir = TempDir::new().unwrap();
    {
        let router = router(store(&dir));
        let mut session = SessionContext::new(SessionId::new());
        register(&router, &mut session);
    }

    let users = store(&dir);
    let router = router(users.clone());
    let mut session = SessionContext::new(SessionId::new());
    login(&router, &mut session, "Secret123");

    assert!(session.is_authenticated());
    let record = users.find_by_username("ana01").unwrap().unwrap();
    assert!(record.last_login.is_some());
    assert!(record.password_hash.starts_with("$2"));
}

// =============================================================================
// Dataset tools
// =============================================================================

#[test]
fn tool_without_dataset_points_to_upload() {
    let dir = TempDir::new().unwrap();
    let (router, mut session) = logged_in(&dir);

    let page = router.render(&mut session, ScreenRequest::view(Screen::Histogram));

    assert_eq!(page.redirect, Some(Screen::Upload));
    assert!(page.has_severity(Severity::Warning));
}

#[test]
fn pareto_ranks_uploaded_defects() {
    let dir = TempDir::new().unwrap();
    let (router, mut session) = logged_in(&dir);

    let page = upload_defects(&router, &mut session);
    assert!(page.has_severity(Severity::Success), "{:?}", page.notices);
    assert!(session.dataset().is_some());

    let page = router.render(
        &mut session,
        ScreenRequest::Pareto(ParetoInput {
            category_column: Some("Defect".to_string()),
            export: Some(ExportFormat::Csv),
            ..Default::default()
        }),
    );

    let table = &page.tables[0];
    let cumulative: Vec<&str> = table.rows.iter().map(|r| r[3].as_str()).collect();
    assert_eq!(cumulative, vec!["50.00", "80.00", "100.00"]);
    let critical: Vec<&str> = page.tables[1].rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(critical, vec!["A", "B"]);

    assert_eq!(page.downloads, vec!["pareto.csv".to_string()]);
    let download = session.download("pareto.csv").unwrap();
    let text = String::from_utf8(download.bytes.clone()).unwrap();
    assert!(text.starts_with("Defect,Frequency,Percentage,Cumulative %"));
}

#[test]
fn pdf_export_produces_pdf_bytes() {
    let dir = TempDir::new().unwrap();
    let (router, mut session) = logged_in(&dir);
    upload_defects(&router, &mut session);

    let page = router.render(
        &mut session,
        ScreenRequest::Pareto(ParetoInput {
            export: Some(ExportFormat::Pdf),
            ..Default::default()
        }),
    );

    assert_eq!(page.downloads, vec!["pareto.pdf".to_string()]);
    let download = session.download("pareto.pdf").unwrap();
    assert!(download.bytes.starts_with(b"%PDF"));
}

#[test]
fn oversized_upload_is_rejected_without_replacing_dataset() {
    let dir = TempDir::new().unwrap();
    let (router, mut session) = logged_in(&dir);
    upload_defects(&router, &mut session);

    let header: Vec<String> = (0..21).map(|i| format!("c{}", i)).collect();
    let row: Vec<&str> = (0..21).map(|_| "1").collect();
    let csv = format!("{}\n{}\n", header.join(","), row.join(","));
    let page = router.upload(
        &mut session,
        UploadCommand {
            filename: "wide.csv".to_string(),
            bytes: csv.into_bytes(),
        },
    );

    assert!(page.has_severity(Severity::Warning));
    assert_eq!(session.dataset().map(|d| d.source_name()), Some("defects.csv"));
}

fn width_readings(rows: usize) -> UploadCommand {
    let mut csv = String::from("width\n");
    for i in 0..rows {
        csv.push_str(&format!("{}\n", 10.0 + (i % 7) as f64 * 0.1));
    }
    UploadCommand {
        filename: format!("widths_{}.csv", rows),
        bytes: csv.into_bytes(),
    }
}

#[test]
fn upload_at_default_row_cap_is_published() {
    let dir = TempDir::new().unwrap();
    let (router, mut session) = logged_in(&dir);
    let limits = CapacityLimits::default();

    let page = router.upload(&mut session, width_readings(limits.max_rows));

    assert!(page.has_severity(Severity::Success), "{:?}", page.notices);
    assert!(!page.has_severity(Severity::Warning));
    assert_eq!(session.dataset().map(|d| d.row_count()), Some(10_000));
}

#[test]
fn upload_one_row_over_default_cap_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (router, mut session) = logged_in(&dir);
    let limits = CapacityLimits::default();

    let page = router.upload(&mut session, width_readings(limits.max_rows + 1));

    assert!(page.has_severity(Severity::Warning), "{:?}", page.notices);
    assert!(session.dataset().is_none());
}

#[test]
fn logout_discards_working_state() {
    let dir = TempDir::new().unwrap();
    let (router, mut session) = logged_in(&dir);
    upload_defects(&router, &mut session);

    let page = router.render(&mut session, ScreenRequest::Logout);

    assert_eq!(page.redirect, Some(Screen::Home));
    assert!(!session.is_authenticated());
    assert!(session.dataset().is_none());
    assert_eq!(page.menu, MenuState::Anonymous.screens().to_vec());
}

// =============================================================================
// Session-held tools
// =============================================================================

#[test]
fn dpmo_calculator_reports_sigma_level() {
    let dir = TempDir::new().unwrap();
    let (router, mut session) = logged_in(&dir);

    let blank = router.render(&mut session, ScreenRequest::view(Screen::DpmoCalculator));
    assert_eq!(blank.tables[0].title, "Sigma reference");

    let page = router.render(
        &mut session,
        ScreenRequest::DpmoCalculator(DpmoForm {
            defects: Some(10),
            units: Some(1000),
            opportunities: Some(5),
            export: None,
        }),
    );
    let results: HashMap<&str, &str> = page.tables[0]
        .rows
        .iter()
        .map(|r| (r[0].as_str(), r[1].as_str()))
        .collect();
    assert_eq!(results["DPMO"], "2000.00");
    assert_eq!(results["Sigma level"], "4.38");
}

#[test]
fn dpmo_with_zero_units_is_an_error_notice() {
    let dir = TempDir::new().unwrap();
    let (router, mut session) = logged_in(&dir);

    let page = router.render(
        &mut session,
        ScreenRequest::DpmoCalculator(DpmoForm {
            defects: Some(1),
            units: Some(0),
            opportunities: Some(5),
            export: None,
        }),
    );

    assert!(page.has_severity(Severity::Error));
    assert!(page.tables.is_empty());
}

#[test]
fn ishikawa_causes_accumulate_in_session() {
    let dir = TempDir::new().unwrap();
    let (router, mut session) = logged_in(&dir);

    for (category, text) in [
        (CauseCategory::Machinery, "Worn spindle"),
        (CauseCategory::Methods, "No standard work"),
    ] {
        router.render(
            &mut session,
            ScreenRequest::Ishikawa(IshikawaInput {
                effect: Some("Late deliveries".to_string()),
                cause: Some(NewCause {
                    category,
                    text: text.to_string(),
                    whys: vec!["Skipped maintenance".to_string()],
                }),
                ..Default::default()
            }),
        );
    }

    assert_eq!(session.causes().cause_count(), 2);
    assert_eq!(session.causes().effect(), "Late deliveries");
}

#[test]
fn rejected_cause_leaves_effect_unchanged() {
    let dir = TempDir::new().unwrap();
    let (router, mut session) = logged_in(&dir);

    let page = router.render(
        &mut session,
        ScreenRequest::Ishikawa(IshikawaInput {
            effect: Some("Late deliveries".to_string()),
            cause: Some(NewCause {
                category: CauseCategory::Methods,
                text: "   ".to_string(),
                whys: vec![],
            }),
            ..Default::default()
        }),
    );

    assert!(page.has_severity(Severity::Error), "{:?}", page.notices);
    assert_eq!(session.causes().effect(), "Effect");
    assert!(session.causes().is_empty());
}

#[test]
fn checklist_records_and_analyses_fields() {
    let dir = TempDir::new().unwrap();
    let (router, mut session) = logged_in(&dir);

    router.render(
        &mut session,
        ScreenRequest::ChecklistSheet(ChecklistInput {
            create: Some(NewSheet {
                kind: SheetKind::DefectCount,
                title: "Line 3".to_string(),
                fields: vec![
                    FieldSpec::new("defect", FieldKind::Text),
                    FieldSpec::new("count", FieldKind::Numeric),
                ],
            }),
            ..Default::default()
        }),
    );
    for (defect, count) in [("scratch", "3"), ("dent", "1"), ("scratch", "2")] {
        let record = HashMap::from([
            ("defect".to_string(), defect.to_string()),
            ("count".to_string(), count.to_string()),
        ]);
        let page = router.render(
            &mut session,
            ScreenRequest::ChecklistSheet(ChecklistInput {
                record: Some(record),
                ..Default::default()
            }),
        );
        assert!(!page.has_severity(Severity::Error), "{:?}", page.notices);
    }

    let page = router.render(
        &mut session,
        ScreenRequest::ChecklistSheet(ChecklistInput {
            analyse: Some("defect".to_string()),
            ..Default::default()
        }),
    );

    assert_eq!(page.tables[0].rows.len(), 3);
    assert!(page.tables.len() > 1);
    assert!(!page.has_severity(Severity::Error));
}
