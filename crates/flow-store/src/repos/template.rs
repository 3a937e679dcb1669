//! Audit templates, keyed by lowercase audit type.

use flow_core::entities::AuditTemplate;
use flow_core::enums::{EntityType, TrailOp};

use crate::collection::Repository;
use crate::error::StoreError;
use crate::service::FlowService;

impl FlowService {
    /// Insert or replace the template for its audit type. Returns `true`
    /// when no template existed for the type.
    ///
    /// # Errors
    ///
    /// Validation for a blank audit type.
    pub fn save_template(&self, mut template: AuditTemplate) -> Result<bool, StoreError> {
        template.audit_type = template.audit_type.trim().to_lowercase();
        if template.audit_type.is_empty() {
            return Err(StoreError::validation("template audit type is required"));
        }
        let created = self.templates.save(&template)?;
        let op = if created { TrailOp::Create } else { TrailOp::Update };
        self.record(op, EntityType::Template, &template.audit_type, &template)?;
        Ok(created)
    }

    /// # Errors
    ///
    /// `NotFound` when no template exists for the type.
    pub fn get_template(&self, audit_type: &str) -> Result<AuditTemplate, StoreError> {
        let key = audit_type.trim().to_lowercase();
        self.templates
            .get(&key)?
            .ok_or_else(|| StoreError::not_found("template", audit_type))
    }

    /// # Errors
    ///
    /// Storage failure.
    pub fn list_templates(&self) -> Result<Vec<AuditTemplate>, StoreError> {
        self.templates.list()
    }

    /// # Errors
    ///
    /// `NotFound` when no template exists for the type.
    pub fn delete_template(&self, audit_type: &str) -> Result<(), StoreError> {
        let key = audit_type.trim().to_lowercase();
        if !self.templates.delete(&key)? {
            return Err(StoreError::not_found("template", audit_type));
        }
        self.record(TrailOp::Delete, EntityType::Template, &key, &key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{d, new_audit, test_service};

    fn template(audit_type: &str) -> AuditTemplate {
        AuditTemplate {
            audit_type: audit_type.into(),
            subtype: None,
            objective: "Verify Part-145 compliance".into(),
            scope: "All hangars".into(),
            introduction: "This audit covers".into(),
        }
    }

    #[test]
    fn keyed_by_lowercase_type() {
        let svc = test_service();
        assert!(svc.save_template(template("Compliance")).unwrap());
        assert!(!svc.save_template(template("compliance")).unwrap());
        assert_eq!(svc.list_templates().unwrap().len(), 1);
        assert_eq!(svc.get_template("COMPLIANCE").unwrap().scope, "All hangars");
        svc.delete_template("compliance").unwrap();
        assert!(svc.get_template("compliance").unwrap_err().is_not_found());
    }

    #[test]
    fn new_audit_inherits_template() {
        let svc = test_service();
        svc.save_template(template("compliance")).unwrap();
        let mut new = new_audit("A", "compliance");
        new.scope = Some("Hangar 3 only".into());
        let audit = svc.create_audit(new, d("2025-01-15")).unwrap();
        assert_eq!(audit.objective.as_deref(), Some("Verify Part-145 compliance"));
        assert_eq!(audit.scope.as_deref(), Some("Hangar 3 only"));
    }
}
