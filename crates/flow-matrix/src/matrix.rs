//! The audit matrix and checklist resolution.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use flow_core::entities::ChecklistItem;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::builtin;

static BUILTIN: LazyLock<AuditMatrix> = LazyLock::new(AuditMatrix::builtin_matrix);

/// The ordered checklist items for one audit type.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditTypeItems {
    /// Lowercase audit type key.
    pub audit_type: String,
    pub items: Vec<ChecklistItem>,
}

/// Maps audit types to checklist items, plus per-type subtype filters.
///
/// Audit type keys are stored lowercase and matched case-insensitively.
/// Subtype names are matched exactly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditMatrix {
    types: Vec<AuditTypeItems>,
    #[serde(default)]
    subtypes: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

/// One exported matrix row. Column names are the ones matrix import reads,
/// so an exported sheet can be imported again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatrixExportRow {
    pub id: String,
    pub audit_type: String,
    pub clause: String,
    pub objective: String,
    pub description: String,
    pub required: String,
    /// Subtypes listing this item, joined with `;`.
    pub subtype: String,
}

/// Resolve a checklist against the built-in matrix.
#[must_use]
pub fn resolve_checklist(audit_type: &str, subtype: Option<&str>) -> Vec<ChecklistItem> {
    BUILTIN.resolve(audit_type, subtype)
}

impl AuditMatrix {
    /// A clone of the built-in matrix.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    fn builtin_matrix() -> Self {
        let types = builtin::TYPES
            .iter()
            .map(|(audit_type, items)| AuditTypeItems {
                audit_type: (*audit_type).to_string(),
                items: items
                    .iter()
                    .map(|b| ChecklistItem {
                        id: b.id.to_string(),
                        clause: b.clause.to_string(),
                        objective: b.objective.to_string(),
                        description: b.description.to_string(),
                        required: true,
                    })
                    .collect(),
            })
            .collect();
        let subtypes = builtin::SUBTYPES
            .iter()
            .map(|(audit_type, table)| {
                let map = table
                    .iter()
                    .map(|(name, ids)| {
                        (
                            (*name).to_string(),
                            ids.iter().map(|id| (*id).to_string()).collect(),
                        )
                    })
                    .collect();
                ((*audit_type).to_string(), map)
            })
            .collect();
        Self { types, subtypes }
    }

    /// Build a matrix from already-validated parts. Type keys are lowercased.
    #[must_use]
    pub fn from_parts(
        types: Vec<AuditTypeItems>,
        subtypes: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    ) -> Self {
        let types = types
            .into_iter()
            .map(|t| AuditTypeItems {
                audit_type: t.audit_type.to_lowercase(),
                items: t.items,
            })
            .collect();
        let subtypes = subtypes
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Self { types, subtypes }
    }

    /// The ordered checklist for an audit type, filtered by subtype.
    ///
    /// Unknown types resolve to an empty list. A subtype with no mapping for
    /// the type leaves the base list unfiltered.
    #[must_use]
    pub fn resolve(&self, audit_type: &str, subtype: Option<&str>) -> Vec<ChecklistItem> {
        let key = audit_type.to_lowercase();
        let Some(base) = self.types.iter().find(|t| t.audit_type == key) else {
            return Vec::new();
        };
        let filter = subtype
            .filter(|s| !s.is_empty())
            .and_then(|s| self.subtypes.get(&key)?.get(s));
        match filter {
            Some(ids) => base
                .items
                .iter()
                .filter(|item| ids.contains(&item.id))
                .cloned()
                .collect(),
            None => base.items.clone(),
        }
    }

    /// Audit type keys in matrix order.
    pub fn audit_types(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.audit_type.as_str())
    }

    /// Subtype names defined for an audit type.
    #[must_use]
    pub fn subtypes_for(&self, audit_type: &str) -> Vec<&str> {
        self.subtypes
            .get(&audit_type.to_lowercase())
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.types.iter().map(|t| t.items.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// One row per item across all types, in matrix order.
    #[must_use]
    pub fn export_rows(&self) -> Vec<MatrixExportRow> {
        self.types
            .iter()
            .flat_map(|t| {
                let subtypes = self.subtypes.get(&t.audit_type);
                t.items.iter().map(move |item| MatrixExportRow {
                    id: item.id.clone(),
                    audit_type: t.audit_type.clone(),
                    clause: item.clause.clone(),
                    objective: item.objective.clone(),
                    description: item.description.clone(),
                    required: if item.required { "Yes" } else { "No" }.to_string(),
                    subtype: subtypes
                        .map(|m| {
                            m.iter()
                                .filter(|(_, ids)| ids.contains(&item.id))
                                .map(|(name, _)| name.as_str())
                                .collect::<Vec<_>>()
                                .join(";")
                        })
                        .unwrap_or_default(),
                })
            })
            .collect()
    }
}
