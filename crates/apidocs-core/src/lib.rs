pub mod builder;
pub mod catalog;
pub mod config;
pub mod description;
pub mod document;
pub mod endpoint;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod security;
pub mod store;

pub use builder::{BuildMetadata, BuildVersion, build_document};
pub use catalog::{ApiVersion, VersionCatalog, VersionDescriptor};
pub use config::ServiceConfig;
pub use description::{ApiDescription, ApiOperation, ApiParameter};
pub use document::SpecDocument;
pub use endpoint::{EndpointEntry, EndpointTable, map_endpoints};
pub use filter::FilterChain;
pub use pipeline::{Pipeline, generate};
pub use security::SecuritySchemeRegistry;
pub use store::{DocumentSet, DocumentStore};
