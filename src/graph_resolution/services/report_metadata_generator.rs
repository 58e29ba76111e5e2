use crate::graph_resolution::domain::ReportMetadata;
use chrono::Utc;
use uuid::Uuid;

/// Tool name recorded in generated reports
pub const TOOL_NAME: &str = "depgraph";

/// ReportMetadataGenerator service stamping reports with time and identity
pub struct ReportMetadataGenerator;

impl ReportMetadataGenerator {
    /// Generates metadata with the current timestamp and a fresh snapshot id
    pub fn generate(tool_name: &str, tool_version: &str) -> ReportMetadata {
        ReportMetadata::new(
            Utc::now().to_rfc3339(),
            tool_name.to_string(),
            tool_version.to_string(),
            format!("urn:uuid:{}", Uuid::new_v4()),
        )
    }

    /// Generates metadata for this build of the tool
    pub fn generate_default() -> ReportMetadata {
        Self::generate(TOOL_NAME, env!("CARGO_PKG_VERSION"))
    }
}
