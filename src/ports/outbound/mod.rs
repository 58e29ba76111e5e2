/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (registry, file system, layout,
/// rendering, console).
pub mod diagram_view;
pub mod formatter;
pub mod graph_layout;
pub mod manifest_reader;
pub mod metadata_source;
pub mod output_presenter;
pub mod package_search;
pub mod progress_reporter;

pub use diagram_view::DiagramView;
pub use formatter::GraphFormatter;
pub use graph_layout::GraphLayout;
pub use manifest_reader::ManifestReader;
pub use metadata_source::MetadataSource;
pub use output_presenter::OutputPresenter;
pub use package_search::{PackageSearch, SearchHit};
pub use progress_reporter::ProgressReporter;
