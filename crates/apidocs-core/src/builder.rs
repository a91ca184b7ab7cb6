use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::VersionDescriptor;
use crate::document::{Info, License, SpecDocument};
use crate::error::ConfigError;

pub const DEFAULT_SERVICE_NAME: &str = "Api.Versioned";
pub const DEFAULT_DESCRIPTION: &str = "api versioned";

/// Sentence appended to the description of deprecated versions.
pub const DEPRECATION_NOTICE: &str = "This API version has been deprecated.";

/// Version of the service build, e.g. `1.4.2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BuildVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl BuildVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for BuildVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

impl fmt::Display for BuildVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for BuildVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::Invalid(format!("build version `{s}`"));

        // Pre-release and build suffixes are not part of the documented version.
        let core = s
            .trim()
            .split(['-', '+'])
            .next()
            .unwrap_or_default();

        let mut parts = core.split('.');
        let mut next = || -> Result<u64, ConfigError> {
            match parts.next() {
                Some(p) => p.parse().map_err(|_| invalid()),
                None => Ok(0),
            }
        };
        let major = next()?;
        let minor = next()?;
        let patch = next()?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::new(major, minor, patch))
    }
}

impl TryFrom<String> for BuildVersion {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BuildVersion> for String {
    fn from(value: BuildVersion) -> Self {
        value.to_string()
    }
}

/// Identity of the service whose versions are documented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildMetadata {
    pub name: String,
    pub description: String,
    pub version: BuildVersion,
}

impl Default for BuildMetadata {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVICE_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            version: BuildVersion::default(),
        }
    }
}

impl BuildMetadata {
    /// License text carrying the build version.
    pub fn license_name(&self) -> String {
        let v = &self.version;
        format!("App Version: {}.{}.{}", v.major, v.minor, v.patch)
    }
}

/// Build the document skeleton for one version.
///
/// The description always starts from the configured base text, so building
/// the same descriptor repeatedly never stacks deprecation notices.
pub fn build_document(descriptor: &VersionDescriptor, metadata: &BuildMetadata) -> SpecDocument {
    let info = Info {
        title: format!("{} {}", metadata.name, descriptor.group_name),
        version: metadata.version.to_string(),
        description: Some(describe(descriptor, &metadata.description)),
        license: Some(License {
            name: metadata.license_name(),
            url: None,
        }),
    };
    SpecDocument::new(info)
}

fn describe(descriptor: &VersionDescriptor, base: &str) -> String {
    let mut text = base.to_string();
    if descriptor.is_deprecated && !text.contains(DEPRECATION_NOTICE) {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(DEPRECATION_NOTICE);
    }
    text
}
