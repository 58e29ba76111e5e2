/// Network adapters for the npm registry
mod caching_metadata_source;
mod npm_registry_client;

pub use caching_metadata_source::CachingMetadataSource;
pub use npm_registry_client::{NpmRegistryClient, DEFAULT_REGISTRY_URL};
