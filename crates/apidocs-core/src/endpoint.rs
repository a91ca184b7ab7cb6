use serde::Serialize;

use crate::catalog::VersionCatalog;

pub const DEFAULT_ROOT: &str = "/";

/// Where one version's document is served and how the UI labels it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointEntry {
    pub group_name: String,
    pub url: String,
    pub display_label: String,
}

/// URL table for every version, plus the root serving the browsing UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointTable {
    pub root: String,
    pub entries: Vec<EndpointEntry>,
}

impl EndpointTable {
    pub fn get(&self, group_name: &str) -> Option<&EndpointEntry> {
        self.entries.iter().find(|e| e.group_name == group_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Served URL of a version's document.
pub fn document_url(group_name: &str) -> String {
    format!("/spec/{group_name}/document.json")
}

/// Normalize a root path to a leading slash and no trailing slash.
pub fn normalize_root(root: &str) -> String {
    let trimmed = root.trim().trim_matches('/');
    if trimmed.is_empty() {
        DEFAULT_ROOT.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Derive the endpoint table from the catalog, in catalog order.
pub fn map_endpoints(catalog: &VersionCatalog, root: &str) -> EndpointTable {
    let entries = catalog
        .descriptors()
        .iter()
        .map(|d| EndpointEntry {
            group_name: d.group_name.clone(),
            url: document_url(&d.group_name),
            display_label: d.group_name.to_uppercase(),
        })
        .collect();

    EndpointTable {
        root: normalize_root(root),
        entries,
    }
}
