//! Metric & Pruner and Sorter stages.
//!
//! Both stages drive `architect_graph`'s kernel over each scope's own graph
//! and write their results back onto `architect_model::ArtifactArena`. They
//! run in this order: the Pruner fills in `linesOfCode` and the SCC/rank
//! metrics and removes transitively-redundant edges, then the Sorter reorders
//! every scope's children by those metrics.

pub mod pruner;
pub mod sorter;

pub use pruner::compute_metrics_and_prune;
pub use sorter::sort_children;
