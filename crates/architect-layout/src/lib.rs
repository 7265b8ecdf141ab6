//! Treemap Layouter: recursive area-proportional rectangle partitioning
//! over a sorted artifact tree. Pure function of the tree, the root
//! rectangle, a selection filter, and `architect_core::LayoutConstants`.

pub mod treemap;

pub use treemap::{layout_tree, ArtifactFilter};
