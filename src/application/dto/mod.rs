/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod graph_request;
mod output_format;

pub use graph_request::{GraphRequest, PackageSpec, ResolveMode};
pub use output_format::OutputFormat;
