use architect_core::{CodeFile, CodeFolder, CodeSymbolData, ProjectLocation, Reference, Result};
use async_trait::async_trait;

/// File-system traversal and source parsing, owned by an external
/// collaborator and described here only by the interface it presents to
/// the core.
#[async_trait]
pub trait ProjectReader: Send + Sync {
    async fn read(&self, location: &ProjectLocation) -> Result<CodeFolder>;
}

/// The language-protocol client yielding `CodeSymbolData` and reference
/// lists for a single file. Implementations are expected to be a shared
/// singleton guarded by serialized access; repeated failures should make
/// `is_working` return `false` so the pipeline can log once instead of per
/// file and continue with whatever partial symbol data it already has.
#[async_trait]
pub trait SymbolServer: Send + Sync {
    async fn symbols(&self, file_path: &str, file: &CodeFile) -> Result<Vec<CodeSymbolData>>;
    async fn references(&self, file_path: &str, file: &CodeFile) -> Result<Vec<Reference>>;
    fn is_working(&self) -> bool {
        true
    }
}
