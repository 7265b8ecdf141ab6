pub mod arena;
pub mod artifact;

pub use arena::ArtifactArena;
pub use artifact::{Artifact, ArtifactPayload, SymbolSourceInfo};
