use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Where the report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl PresenterType {
    /// File output when a path is given, stdout otherwise
    pub fn from_output(output: Option<PathBuf>) -> Self {
        match output {
            Some(path) => PresenterType::File(path),
            None => PresenterType::Stdout,
        }
    }
}

/// Builds the presenter adapter for a [`PresenterType`]
pub struct PresenterFactory;

impl PresenterFactory {
    /// # Examples
    /// ```
    /// use depgraph_navigator::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::Stdout);
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_stdout_presenter() {
        let presenter = PresenterFactory::create(PresenterType::Stdout);
        assert!(presenter.present("{}\n").is_ok());
    }

    #[test]
    fn test_create_file_presenter_writes_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("graph.md");
        let presenter = PresenterFactory::create(PresenterType::File(path.clone()));

        presenter.present("# Dependency Graph\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# Dependency Graph\n"
        );
    }

    #[test]
    fn test_presenter_type_from_output_path() {
        assert_eq!(PresenterType::from_output(None), PresenterType::Stdout);
        assert_eq!(
            PresenterType::from_output(Some(PathBuf::from("graph.json"))),
            PresenterType::File(PathBuf::from("graph.json"))
        );
    }
}
