//! UI components.

pub mod detail_panel;
pub mod tree_graph;
