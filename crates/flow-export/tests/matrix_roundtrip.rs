//! An exported audit matrix imports back to the same checklists.

use std::io::Cursor;

use flow_export::{matrix_workbook, write_csv, xlsx_bytes};
use flow_matrix::AuditMatrix;
use pretty_assertions::assert_eq;

fn assert_same_checklists(imported: &AuditMatrix, original: &AuditMatrix) {
    assert_eq!(imported.item_count(), original.item_count());
    assert_eq!(
        imported.audit_types().collect::<Vec<_>>(),
        original.audit_types().collect::<Vec<_>>()
    );
    for audit_type in original.audit_types() {
        assert_eq!(
            imported.resolve(audit_type, None),
            original.resolve(audit_type, None),
            "{audit_type}"
        );
        assert_eq!(imported.subtypes_for(audit_type), original.subtypes_for(audit_type));
        for subtype in original.subtypes_for(audit_type) {
            assert_eq!(
                imported.resolve(audit_type, Some(subtype)),
                original.resolve(audit_type, Some(subtype)),
                "{audit_type} / {subtype}"
            );
        }
    }
}

#[test]
fn builtin_matrix_survives_xlsx() {
    let builtin = AuditMatrix::builtin();
    let bytes = xlsx_bytes(&matrix_workbook(&builtin)).unwrap();
    let imported = AuditMatrix::from_xlsx(Cursor::new(bytes)).unwrap();
    assert_same_checklists(&imported, &builtin);
}

#[test]
fn builtin_matrix_survives_csv() {
    let builtin = AuditMatrix::builtin();
    let workbook = matrix_workbook(&builtin);
    let mut buf = Vec::new();
    write_csv(&workbook.sheets[0], &mut buf).unwrap();
    let imported = AuditMatrix::from_csv(buf.as_slice()).unwrap();
    assert_same_checklists(&imported, &builtin);
}

#[test]
fn optional_items_stay_optional_through_xlsx() {
    let csv = "clause,auditType,description,objective,required,subtype\n\
               A.1 Scope,special,Check scope,Scope ok,no,Night\n\
               A.2 Tools,special,Check tools,Tools ok,yes,\n";
    let custom = AuditMatrix::from_csv(csv.as_bytes()).unwrap();
    let bytes = xlsx_bytes(&matrix_workbook(&custom)).unwrap();
    let imported = AuditMatrix::from_xlsx(Cursor::new(bytes)).unwrap();

    let items = imported.resolve("special", None);
    assert_eq!(
        items.iter().map(|i| (i.id.as_str(), i.required)).collect::<Vec<_>>(),
        [("special-1", false), ("special-2", true)]
    );
    assert_eq!(imported.resolve("special", Some("Night")).len(), 1);
}
