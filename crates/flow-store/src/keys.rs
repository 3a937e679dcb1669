//! Storage keys. Each key is one JSON document at `<data_dir>/<key>.json`.

pub const USERS: &str = "auditUsers";
pub const AUDITS: &str = "audits";
pub const TEMPLATES: &str = "auditTemplates";
pub const HISTORICAL_FINDINGS: &str = "historicalFindings";
pub const MATRIX: &str = "auditMatrix";
pub const THEME: &str = "auditFlowTheme";
pub const CURRENT_USER: &str = "auditFlowUser";

const FINDINGS_PREFIX: &str = "auditFindings.";

/// Key of the finding set for one audit.
///
/// References are free text, so every byte outside `[A-Za-z0-9._-]` is
/// percent-encoded. The key never contains a path separator.
#[must_use]
pub fn findings(reference: &str) -> String {
    let mut key = String::with_capacity(FINDINGS_PREFIX.len() + reference.len());
    key.push_str(FINDINGS_PREFIX);
    for byte in reference.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
            key.push(char::from(byte));
        } else {
            key.push_str(&format!("%{byte:02X}"));
        }
    }
    key
}
