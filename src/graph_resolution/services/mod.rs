mod graph_filter;
mod graph_generator;
mod graph_service;
mod report_metadata_generator;

pub use graph_filter::GraphFilter;
pub use graph_generator::{GraphGenerator, DEFAULT_WEBSITE_URL};
pub use graph_service::GraphService;
pub use report_metadata_generator::{ReportMetadataGenerator, TOOL_NAME};
