//! ID prefixes and random ID generation.
//!
//! IDs look like `aud-a3f8b2c1`: a short entity prefix followed by 8 hex chars.

use crate::errors::CoreError;

pub const PREFIX_AUDIT: &str = "aud";
pub const PREFIX_USER: &str = "usr";
pub const PREFIX_FINDING: &str = "fnd";
pub const PREFIX_STAFF: &str = "stf";
pub const PREFIX_TOOL: &str = "tol";
pub const PREFIX_COMPONENT: &str = "cmp";
pub const PREFIX_MAINTENANCE: &str = "mnt";

/// Generate a prefixed ID, e.g. `"fnd-a3f8b2c1"`.
///
/// # Errors
///
/// Returns `CoreError::Other` if the OS random source is unavailable.
pub fn generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes)
        .map_err(|e| CoreError::Other(anyhow::anyhow!("random id generation failed: {e}")))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_id_has_prefix_and_hex_suffix() {
        let id = generate_id(PREFIX_FINDING).unwrap();
        let (prefix, suffix) = id.split_once('-').unwrap();
        assert_eq!(prefix, "fnd");
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_ids_differ() {
        let a = generate_id(PREFIX_AUDIT).unwrap();
        let b = generate_id(PREFIX_AUDIT).unwrap();
        assert_ne!(a, b);
    }
}
