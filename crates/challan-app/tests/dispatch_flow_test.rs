//! Draft file -> print -> files on disk

use challan_app::app::{DispatchService, OutputOutcome};
use challan_app::config::Config;
use challan_app::repository::open_session_repo;
use challan_domain::model::{ItemField, ItemKind, LoadingSession};
use challan_domain::repository::SessionDraftRepository;
use chrono::NaiveDate;
use tempfile::tempdir;

const BOM: &str = "\u{feff}";

fn draft() -> LoadingSession {
    let mut s = LoadingSession::new(
        "Ranala Shivar, Nandurbar",
        NaiveDate::from_ymd_opt(2026, 1, 25).unwrap(),
    );
    s.header.challan_no = "CH-001".to_string();
    s.header.vehicle_no = "MH-18-BC-4412".to_string();
    s.header.dispatch_to = "Pune Depot".to_string();
    s.update_item(ItemKind::Regular, 0, ItemField::Product, "Freshkins Pant");
    s.update_item(ItemKind::Regular, 0, ItemField::Size, "M");
    s.update_item(ItemKind::Regular, 0, ItemField::TotalCtn, "100");
    s.update_item(ItemKind::Regular, 0, ItemField::AvgWeightKg, "12");
    let i = s.add_item(ItemKind::Regular);
    s.update_item(ItemKind::Regular, i, ItemField::Product, "Freshkins Pant");
    s.update_item(ItemKind::Regular, i, ItemField::Size, "L");
    s.update_item(ItemKind::Regular, i, ItemField::TotalCtn, "50");
    s.update_item(ItemKind::Regular, i, ItemField::AvgWeightKg, "20");
    s
}

#[test]
fn test_saved_draft_prints_pdf_and_csv() {
    let dir = tempdir().unwrap();
    let repo = open_session_repo(dir.path().join("draft.json")).unwrap();
    repo.save(&draft()).unwrap();

    let session = repo.load().unwrap();
    let service = DispatchService::new(Config::default().profile());
    let report = service.print(&session, &dir.path().join("out")).unwrap();
    assert!(report.all_written());

    let csv_path = dir.path().join("out").join("CHALLAN_CH-001.csv");
    assert_eq!(report.csv, OutputOutcome::Written(csv_path.clone()));

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with(BOM));
    let lines: Vec<&str> = csv.trim_start_matches(BOM).lines().collect();
    assert_eq!(lines[0], "LOADING CHALLAN");
    assert!(lines.contains(&"Ship From,\"Ranala Shivar, Nandurbar\""));
    assert!(lines.contains(&"Dispatch Date,2026-01-25"));
    assert!(lines.contains(&"1,Freshkins Pant (M),,100,12"));
    assert!(lines.contains(&",GRAND TOTAL,,150,2200 KG"));

    let pdf = std::fs::read(dir.path().join("out").join("CHALLAN_CH-001.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_toml_draft_exports_without_challan_no() {
    let dir = tempdir().unwrap();
    let repo = open_session_repo(dir.path().join("draft.toml")).unwrap();
    let mut s = draft();
    s.header.challan_no.clear();
    repo.save(&s).unwrap();

    let service = DispatchService::new(Config::default().profile());
    let session = repo.load().unwrap();
    assert!(service.print(&session, dir.path()).is_err());

    let path = service
        .export(&session, dir.path(), challan_types::ExportFormat::Csv)
        .unwrap();
    assert_eq!(path.file_name().unwrap(), "CHALLAN_export.csv");
}
