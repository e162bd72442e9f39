//! Tree diagram of a parent/child record graph.
//!
//! The pipeline turns the backend's flat record list into a drawable scene:
//! - [`build_tree`] resolves child names into a single rooted tree
//! - [`layout_tree`] assigns tidy, non-overlapping coordinates
//! - [`Scene`] holds one shape per node and one path per link
//! - [`TreeGraphCanvas`] paints the scene and reports node clicks
//!
//! # Example
//!
//! ```ignore
//! use tree_graph::components::tree_graph::*;
//!
//! let records = vec![
//!     GraphRecord::new("Root", "Root node", &["Child1", "Child2"]),
//!     GraphRecord::new("Child1", "First child", &[]),
//!     GraphRecord::new("Child2", "Second child", &[]),
//! ];
//! let root = build_tree(&records).root.unwrap();
//! let config = LayoutConfig::default();
//! let scene = Scene::from_layout(&layout_tree(&root, &config), config.orientation);
//!
//! view! { <TreeGraphCanvas scene=Signal::stored(scene) on_select=|d| log::info!("{}", d.name) /> }
//! ```

mod component;
pub mod layout;
mod render;
pub mod scale;
pub mod scene;
mod state;
pub mod theme;
pub mod tree;
mod types;

pub use component::TreeGraphCanvas;
pub use layout::{LayoutConfig, Orientation, layout_tree};
pub use scene::Scene;
pub use theme::Theme;
pub use tree::{TreeBuild, TreeNode, build_tree};
pub use types::{GraphRecord, NodeDetail};
