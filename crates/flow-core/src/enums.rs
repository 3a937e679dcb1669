//! Status enums, levels, roles, entity types and trail operations for AuditFlow.
//!
//! Display names (`"On-Site"`, `"Level 1"`, `"Lead Auditor"`) are the values
//! stored on disk and shown in exports, so serde renames follow them exactly.
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Normalize user input for lenient enum parsing: lowercase, no separators.
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn unknown_value(field: &str, raw: &str) -> CoreError {
    CoreError::Validation(format!("invalid {field} '{raw}'"))
}

// ---------------------------------------------------------------------------
// AuditStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an audit.
///
/// ```text
/// preparation ⇄ on-site ⇄ monitoring      (driven by dates)
///               on-site → closed
///            monitoring → closed            (report generation only)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum AuditStatus {
    Preparation,
    #[serde(rename = "On-Site")]
    OnSite,
    Monitoring,
    Closed,
}

impl AuditStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Preparation => &[Self::OnSite, Self::Monitoring],
            Self::OnSite => &[Self::Preparation, Self::Monitoring, Self::Closed],
            Self::Monitoring => &[Self::Preparation, Self::OnSite, Self::Closed],
            Self::Closed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preparation => "Preparation",
            Self::OnSite => "On-Site",
            Self::Monitoring => "Monitoring",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "preparation" => Ok(Self::Preparation),
            "onsite" => Ok(Self::OnSite),
            "monitoring" => Ok(Self::Monitoring),
            "closed" => Ok(Self::Closed),
            _ => Err(unknown_value("status", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// FindingLevel
// ---------------------------------------------------------------------------

/// Severity of a recorded finding.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum FindingLevel {
    #[serde(rename = "Level 1")]
    Level1,
    #[serde(rename = "Level 2")]
    Level2,
    #[default]
    Observation,
}

impl FindingLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Level1 => "Level 1",
            Self::Level2 => "Level 2",
            Self::Observation => "Observation",
        }
    }
}

impl fmt::Display for FindingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FindingLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "level1" | "1" => Ok(Self::Level1),
            "level2" | "2" => Ok(Self::Level2),
            "observation" => Ok(Self::Observation),
            _ => Err(unknown_value("finding level", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Role of an application user or of a user assigned to an audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum UserRole {
    General,
    Auditor,
    #[serde(rename = "Lead Auditor")]
    LeadAuditor,
    Admin,
}

impl UserRole {
    /// Roles that may be assigned to audits.
    #[must_use]
    pub const fn can_audit(self) -> bool {
        matches!(self, Self::Auditor | Self::LeadAuditor)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Auditor => "Auditor",
            Self::LeadAuditor => "Lead Auditor",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "general" => Ok(Self::General),
            "auditor" => Ok(Self::Auditor),
            "leadauditor" | "lead" => Ok(Self::LeadAuditor),
            "admin" => Ok(Self::Admin),
            _ => Err(unknown_value("role", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// SupportingKind
// ---------------------------------------------------------------------------

/// Which kind of supporting record a checklist clause collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SupportingKind {
    Staff,
    Tools,
    Components,
    Maintenance,
}

impl SupportingKind {
    /// The supporting-data kind relevant to a clause, if any.
    ///
    /// `145.A.35` collects certifying staff, `145.A.40` tools, `145.A.42`
    /// components and `145.A.45` maintenance data references.
    #[must_use]
    pub fn for_clause(clause: &str) -> Option<Self> {
        if clause.contains("145.A.35") {
            Some(Self::Staff)
        } else if clause.contains("145.A.40") {
            Some(Self::Tools)
        } else if clause.contains("145.A.42") {
            Some(Self::Components)
        } else if clause.contains("145.A.45") {
            Some(Self::Maintenance)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Tools => "tools",
            Self::Components => "components",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for SupportingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Persisted entity kinds, used by the change trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Audit,
    User,
    Template,
    Finding,
    HistoricalFinding,
    Matrix,
    Preference,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Audit => "audit",
            Self::User => "user",
            Self::Template => "template",
            Self::Finding => "finding",
            Self::HistoricalFinding => "historical_finding",
            Self::Matrix => "matrix",
            Self::Preference => "preference",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TrailOp
// ---------------------------------------------------------------------------

/// Kind of mutation recorded in the change trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrailOp {
    Create,
    Update,
    Delete,
    Transition,
    Import,
}

impl TrailOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Transition => "transition",
            Self::Import => "import",
        }
    }
}

impl fmt::Display for TrailOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected:expr) => {
            #[test]
            fn $name() {
                let val: $ty = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(status_on_site, AuditStatus, AuditStatus::OnSite, "On-Site");
    test_serde_roundtrip!(
        status_preparation,
        AuditStatus,
        AuditStatus::Preparation,
        "Preparation"
    );
    test_serde_roundtrip!(level_1, FindingLevel, FindingLevel::Level1, "Level 1");
    test_serde_roundtrip!(
        level_observation,
        FindingLevel,
        FindingLevel::Observation,
        "Observation"
    );
    test_serde_roundtrip!(
        role_lead_auditor,
        UserRole,
        UserRole::LeadAuditor,
        "Lead Auditor"
    );
    test_serde_roundtrip!(
        entity_historical,
        EntityType,
        EntityType::HistoricalFinding,
        "historical_finding"
    );
    test_serde_roundtrip!(trail_op_transition, TrailOp, TrailOp::Transition, "transition");

    // --- Transition tests ---

    #[test]
    fn date_driven_transitions_are_free() {
        assert!(AuditStatus::Preparation.can_transition_to(AuditStatus::OnSite));
        assert!(AuditStatus::Preparation.can_transition_to(AuditStatus::Monitoring));
        assert!(AuditStatus::OnSite.can_transition_to(AuditStatus::Preparation));
        assert!(AuditStatus::Monitoring.can_transition_to(AuditStatus::OnSite));
    }

    #[test]
    fn closing_requires_fieldwork() {
        assert!(!AuditStatus::Preparation.can_transition_to(AuditStatus::Closed));
        assert!(AuditStatus::OnSite.can_transition_to(AuditStatus::Closed));
        assert!(AuditStatus::Monitoring.can_transition_to(AuditStatus::Closed));
    }

    #[test]
    fn closed_is_terminal() {
        assert!(AuditStatus::Closed.is_terminal());
        assert!(AuditStatus::Closed.allowed_next_states().is_empty());
    }

    // --- Parsing ---

    #[rstest]
    #[case("on-site", AuditStatus::OnSite)]
    #[case("On-Site", AuditStatus::OnSite)]
    #[case("onsite", AuditStatus::OnSite)]
    #[case("CLOSED", AuditStatus::Closed)]
    fn parses_status(#[case] raw: &str, #[case] expected: AuditStatus) {
        assert_eq!(raw.parse::<AuditStatus>().unwrap(), expected);
    }

    #[rstest]
    #[case("Level 1", FindingLevel::Level1)]
    #[case("level-2", FindingLevel::Level2)]
    #[case("observation", FindingLevel::Observation)]
    fn parses_level(#[case] raw: &str, #[case] expected: FindingLevel) {
        assert_eq!(raw.parse::<FindingLevel>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_role() {
        let err = "auditee".parse::<UserRole>().unwrap_err();
        assert!(err.to_string().contains("invalid role 'auditee'"));
    }

    #[rstest]
    #[case("145.A.35 Certifying staff and support staff", Some(SupportingKind::Staff))]
    #[case("145.A.40 Equipment and tools", Some(SupportingKind::Tools))]
    #[case("145.A.42 Components", Some(SupportingKind::Components))]
    #[case("145.A.45 Maintenance data", Some(SupportingKind::Maintenance))]
    #[case("145.A.10 Scope", None)]
    fn supporting_kind_follows_clause(
        #[case] clause: &str,
        #[case] expected: Option<SupportingKind>,
    ) {
        assert_eq!(SupportingKind::for_clause(clause), expected);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", AuditStatus::OnSite), "On-Site");
        assert_eq!(format!("{}", FindingLevel::Level2), "Level 2");
        assert_eq!(format!("{}", UserRole::LeadAuditor), "Lead Auditor");
        assert_eq!(format!("{}", SupportingKind::Tools), "tools");
        assert_eq!(format!("{}", EntityType::Template), "template");
        assert_eq!(format!("{}", TrailOp::Import), "import");
    }
}
