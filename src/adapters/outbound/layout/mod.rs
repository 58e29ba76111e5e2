/// Layout adapters that place the published graph on a 2D plane
mod layered_layout;

pub use layered_layout::LayeredLayout;
