//! Data written through one `FlowService` is visible after reopening the
//! data directory, and every mutation leaves a trail record.

use chrono::{NaiveDate, Utc};
use flow_core::enums::{AuditStatus, EntityType, TrailOp, UserRole};
use flow_store::{FlowService, NewAudit};
use pretty_assertions::assert_eq;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn audits_and_findings_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let reference = {
        let svc = FlowService::open(dir.path(), true).unwrap();
        let lead = svc.create_user("kim", UserRole::LeadAuditor, false).unwrap();
        let audit = svc
            .create_audit(
                NewAudit {
                    name: "Base maintenance".into(),
                    audit_type: "product".into(),
                    start_date: Some(d("2025-01-10")),
                    end_date: Some(d("2025-01-20")),
                    ..NewAudit::default()
                },
                d("2025-01-15"),
            )
            .unwrap();
        svc.assign_user(&audit.reference, &lead.id, true).unwrap();

        let matrix = svc.active_matrix().unwrap();
        let mut session = svc.open_checklist(&audit.reference, &matrix, d("2025-01-15")).unwrap();
        session.set_has_finding("p-4", true).unwrap();
        session.edit_finding_text("p-4", "Tool calibration overdue").unwrap();
        session.commit_text().unwrap();
        audit.reference
    };

    assert!(dir.path().join("audits.json").exists());
    assert!(dir.path().join(format!("auditFindings.{reference}.json")).exists());

    let svc = FlowService::open(dir.path(), true).unwrap();
    let audit = svc.get_audit(&reference).unwrap();
    assert_eq!(audit.status, AuditStatus::OnSite);
    assert_eq!(audit.lead_auditor().map(|u| u.username.as_str()), Some("kim"));

    let matrix = svc.active_matrix().unwrap();
    let session = svc.open_checklist(&reference, &matrix, d("2025-01-16")).unwrap();
    let p4 = session.findings().get("p-4").unwrap();
    assert!(p4.has_finding);
    assert_eq!(p4.finding, "Tool calibration overdue");
}

#[test]
fn mutations_are_trailed() {
    let dir = tempfile::tempdir().unwrap();
    let svc = FlowService::open(dir.path(), true).unwrap();
    let user = svc.create_user("lee", UserRole::Auditor, false).unwrap();
    svc.delete_user(&user.id).unwrap();

    let records = svc.trail().read_day(Utc::now().date_naive()).unwrap();
    let ops: Vec<(TrailOp, EntityType)> = records.iter().map(|r| (r.op, r.entity)).collect();
    assert_eq!(
        ops,
        [
            (TrailOp::Create, EntityType::User),
            (TrailOp::Delete, EntityType::User)
        ]
    );
    assert!(records.iter().all(|r| r.key == user.id));
}

#[test]
fn disabled_trail_writes_no_directory() {
    let dir = tempfile::tempdir().unwrap();
    let svc = FlowService::open(dir.path(), false).unwrap();
    svc.set_theme("dark").unwrap();
    assert!(!dir.path().join("trail").exists());
    assert_eq!(svc.theme().unwrap().as_deref(), Some("dark"));
}

#[test]
fn references_with_separators_stay_inside_the_data_dir() {
    let root = tempfile::tempdir().unwrap();
    let data = root.path().join("data");
    let svc = FlowService::open(&data, false).unwrap();
    let matrix = svc.active_matrix().unwrap();

    for reference in ["QA/2025/01", "../outside"] {
        svc.create_audit(
            NewAudit {
                reference: Some(reference.into()),
                name: "Line station".into(),
                audit_type: "product".into(),
                ..NewAudit::default()
            },
            d("2025-01-15"),
        )
        .unwrap();
        let mut session = svc.open_checklist(reference, &matrix, d("2025-01-15")).unwrap();
        session.set_has_finding("p-1", true).unwrap();
        drop(session);

        let saved = svc.load_findings(reference).unwrap();
        assert!(saved.iter().any(|f| f.checklist_item_id == "p-1" && f.finding_identified()));
    }

    assert!(data.join("auditFindings.QA%2F2025%2F01.json").exists());
    assert!(data.join("auditFindings..%2Foutside.json").exists());
    let stray: Vec<_> = std::fs::read_dir(root.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(stray, [std::ffi::OsString::from("data")]);

    svc.delete_audit("QA/2025/01").unwrap();
    assert!(!data.join("auditFindings.QA%2F2025%2F01.json").exists());
}
