/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod node_modules_source;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use node_modules_source::NodeModulesMetadataSource;
