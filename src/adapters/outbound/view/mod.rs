/// View adapters that receive published diagrams
mod recording_view;

pub use recording_view::{RecordingView, ViewEvent};
