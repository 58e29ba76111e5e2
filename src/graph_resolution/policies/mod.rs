pub mod npm_range;
pub mod version_selection;

pub use npm_range::NpmRange;
pub use version_selection::VersionSelection;
