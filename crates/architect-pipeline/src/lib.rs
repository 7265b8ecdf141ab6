//! Pipeline Controller: owns the observable `State` and sequences the
//! artifact model, graph kernel, builder, lifter, pruner, sorter, and
//! layouter from a located project through to a fully analyzed, laid-out
//! artifact tree.
//!
//! The external collaborators — file-system traversal/parsing and the
//! language-protocol client — are modeled here as the [`ProjectReader`] and
//! [`SymbolServer`] traits; the host application supplies real
//! implementations, while this crate's own test suite uses in-memory
//! fakes.

pub mod collaborators;
pub mod controller;
pub mod retrieval;
pub mod state;

pub use collaborators::{ProjectReader, SymbolServer};
pub use controller::{CancelToken, PipelineController};
pub use state::{State, Step};
