use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// An API version such as `1.0`, `2.1` or `3.0-beta`.
///
/// Ordering is by major, then minor, then status, where a version without a
/// status sorts before any status-qualified version of the same number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
    pub status: Option<String>,
}

impl ApiVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Major, optional minor (omitted when zero), optional status.
    ///
    /// - `1.0` → `1`
    /// - `1.1` → `1.1`
    /// - `2.0-beta` → `2-beta`
    pub fn short_text(&self) -> String {
        let mut text = self.major.to_string();
        if self.minor != 0 {
            text.push('.');
            text.push_str(&self.minor.to_string());
        }
        if let Some(ref status) = self.status {
            text.push('-');
            text.push_str(status);
        }
        text
    }

    /// Group name used to key documents and URLs: `v` followed by [`short_text`](Self::short_text).
    pub fn group_name(&self) -> String {
        format!("v{}", self.short_text())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(ref status) = self.status {
            write!(f, "-{status}")?;
        }
        Ok(())
    }
}

impl FromStr for ApiVersion {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidVersion(s.to_string());

        let trimmed = s.trim();
        let trimmed = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let (number, status) = match trimmed.split_once('-') {
            Some((number, status)) if !status.is_empty() => (number, Some(status.to_string())),
            Some(_) => return Err(invalid()),
            None => (trimmed, None),
        };

        let (major, minor) = match number.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (number, None),
        };

        let major = major.parse::<u32>().map_err(|_| invalid())?;
        let minor = match minor {
            Some(m) => m.parse::<u32>().map_err(|_| invalid())?,
            None => 0,
        };

        Ok(Self {
            major,
            minor,
            status,
        })
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ApiVersion> for String {
    fn from(value: ApiVersion) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_major_only() {
        let v: ApiVersion = "2".parse().unwrap();
        assert_eq!(v, ApiVersion::new(2, 0));
    }

    #[test]
    fn test_parse_with_status_and_prefix() {
        let v: ApiVersion = "v3.1-beta".parse().unwrap();
        assert_eq!(v, ApiVersion::new(3, 1).with_status("beta"));
    }

    #[test]
    fn test_parse_invalid() {
        assert!("".parse::<ApiVersion>().is_err());
        assert!("one".parse::<ApiVersion>().is_err());
        assert!("1.x".parse::<ApiVersion>().is_err());
        assert!("1.0-".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_group_name_omits_zero_minor() {
        assert_eq!(ApiVersion::new(1, 0).group_name(), "v1");
        assert_eq!(ApiVersion::new(1, 1).group_name(), "v1.1");
        assert_eq!(
            ApiVersion::new(2, 0).with_status("beta").group_name(),
            "v2-beta"
        );
    }

    #[test]
    fn test_display_keeps_minor() {
        assert_eq!(ApiVersion::new(1, 0).to_string(), "1.0");
        assert_eq!(ApiVersion::new(2, 0).with_status("rc").to_string(), "2.0-rc");
    }

    #[test]
    fn test_ordering() {
        let mut versions = vec![
            ApiVersion::new(2, 0),
            ApiVersion::new(1, 1),
            ApiVersion::new(1, 0),
        ];
        versions.sort();
        assert_eq!(
            versions,
            vec![
                ApiVersion::new(1, 0),
                ApiVersion::new(1, 1),
                ApiVersion::new(2, 0)
            ]
        );
    }

    #[test]
    fn test_deserialize_from_yaml_string() {
        let v: ApiVersion = serde_yaml_ng::from_str("\"1.2\"").unwrap();
        assert_eq!(v, ApiVersion::new(1, 2));
    }
}
