//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of the graph for the view and formatters.

pub mod diagram_layout;
pub mod graph_report;
pub mod graph_view_model;

pub use diagram_layout::{DiagramLayout, NodePlacement, Point};
pub use graph_report::{GraphReport, GraphSummary};
pub use graph_view_model::{
    EdgeView, GraphViewModel, NodeView, PopupClass, PopupInfo, UNRESOLVED_HINT,
};
