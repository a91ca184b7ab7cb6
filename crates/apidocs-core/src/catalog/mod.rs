pub mod version;

use std::collections::HashSet;

pub use version::ApiVersion;

use crate::error::CatalogError;

/// One exposed API version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDescriptor {
    pub group_name: String,
    pub api_version: ApiVersion,
    pub is_deprecated: bool,
}

impl VersionDescriptor {
    /// Descriptor whose group name is derived from the version (`v1`, `v1.1`, ...).
    pub fn new(api_version: ApiVersion, is_deprecated: bool) -> Self {
        Self {
            group_name: api_version.group_name(),
            api_version,
            is_deprecated,
        }
    }
}

/// Ordered, validated set of version descriptors.
///
/// Group names are non-empty and unique for the lifetime of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCatalog {
    descriptors: Vec<VersionDescriptor>,
}

impl VersionCatalog {
    /// Validate descriptors, keeping the given order.
    pub fn new(descriptors: Vec<VersionDescriptor>) -> Result<Self, CatalogError> {
        if descriptors.is_empty() {
            return Err(CatalogError::Empty);
        }

        validate_group_names(&descriptors)?;
        Ok(Self { descriptors })
    }

    /// Build a catalog from `(version, deprecated)` pairs, sorted by version.
    pub fn from_versions(
        versions: impl IntoIterator<Item = (ApiVersion, bool)>,
    ) -> Result<Self, CatalogError> {
        let mut descriptors: Vec<VersionDescriptor> = versions
            .into_iter()
            .map(|(version, deprecated)| VersionDescriptor::new(version, deprecated))
            .collect();
        descriptors.sort_by(|a, b| a.api_version.cmp(&b.api_version));
        Self::new(descriptors)
    }

    pub fn descriptors(&self) -> &[VersionDescriptor] {
        &self.descriptors
    }

    pub fn get(&self, group_name: &str) -> Option<&VersionDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.group_name == group_name)
    }

    /// Find the descriptor for an API version.
    pub fn find_version(&self, version: &ApiVersion) -> Option<&VersionDescriptor> {
        self.descriptors.iter().find(|d| &d.api_version == version)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

fn validate_group_names(descriptors: &[VersionDescriptor]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for descriptor in descriptors {
        if descriptor.group_name.trim().is_empty() {
            return Err(CatalogError::EmptyGroupName(
                descriptor.api_version.to_string(),
            ));
        }
        if !seen.insert(descriptor.group_name.as_str()) {
            return Err(CatalogError::DuplicateGroupName(
                descriptor.group_name.clone(),
            ));
        }
    }
    Ok(())
}
