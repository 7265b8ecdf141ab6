//! Architecture Builder and Cross-Scope Lifter.
//!
//! The Builder walks the external collaborator's `CodeFolder`/`CodeFile`/
//! `CodeSymbolData` tree depth-first and materializes it into an
//! `architect_model::ArtifactArena`, deferring every declared reference into
//! a pending list rather than resolving it immediately. The Lifter then runs
//! a second pass, once every artifact in the tree exists, that resolves each
//! `Reference` into an edge in whichever scope's graph is the lowest common
//! ancestor of the two endpoints — whether that scope is a shared enclosing
//! symbol, file, or folder.

pub mod builder;
pub mod lifter;

pub use builder::build_artifact_tree;
pub use lifter::lift_references;
