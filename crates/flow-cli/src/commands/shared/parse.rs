use std::str::FromStr;

use flow_core::errors::CoreError;

/// Parse an enum from user input using its lenient `FromStr`.
pub fn parse_enum<T>(raw: &str) -> anyhow::Result<T>
where
    T: FromStr<Err = CoreError>,
{
    raw.parse::<T>().map_err(anyhow::Error::from)
}

/// A CLI value for a clearable field: absent leaves it, empty clears it.
#[must_use]
pub fn clearable(value: Option<&String>) -> Option<Option<String>> {
    value.map(|v| {
        let v = v.trim();
        (!v.is_empty()).then(|| v.to_string())
    })
}

#[cfg(test)]
mod tests {
    use flow_core::enums::{AuditStatus, FindingLevel, UserRole};

    use super::{clearable, parse_enum};

    #[test]
    fn parses_display_names_leniently() {
        assert_eq!(parse_enum::<AuditStatus>("on-site").unwrap(), AuditStatus::OnSite);
        assert_eq!(parse_enum::<FindingLevel>("level 2").unwrap(), FindingLevel::Level2);
        assert_eq!(parse_enum::<UserRole>("Lead Auditor").unwrap(), UserRole::LeadAuditor);
    }

    #[test]
    fn errors_on_invalid_value() {
        let err = parse_enum::<UserRole>("pilot").unwrap_err();
        assert!(err.to_string().contains("invalid role 'pilot'"));
    }

    #[test]
    fn empty_string_clears() {
        assert_eq!(clearable(None), None);
        assert_eq!(clearable(Some(&String::new())), Some(None));
        assert_eq!(clearable(Some(&" QA ".to_string())), Some(Some("QA".into())));
    }
}
