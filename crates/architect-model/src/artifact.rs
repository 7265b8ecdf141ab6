use architect_core::{ArtifactId, CodeSymbolData, Metrics, SourceRange, SymbolKind};
use architect_graph::Graph;

/// The kind-specific payload of an artifact.
#[derive(Debug, Clone)]
pub enum ArtifactPayload {
    Folder,
    File {
        lines: Vec<String>,
    },
    Symbol {
        kind: SymbolKind,
        range: SourceRange,
        selection_range: SourceRange,
        /// The source slice this symbol spans, extracted from its file's
        /// lines at Builder time.
        content: String,
    },
}

impl ArtifactPayload {
    pub fn is_folder(&self) -> bool {
        matches!(self, ArtifactPayload::Folder)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, ArtifactPayload::File { .. })
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, ArtifactPayload::Symbol { .. })
    }
}

/// One node of the artifact forest.
///
/// Every artifact — folder, file, symbol, or subsymbol — carries the same
/// shape: a name, an ordered child list, a dependency graph over that child
/// list (the folder's part-graph / file's symbol-graph / symbol's
/// subsymbol-graph, unified here since the kernel in `architect-graph`
/// doesn't distinguish them), and a `Metrics` record. `parent` is a lookup
/// key only, never an owning reference: the arena owns every artifact
/// root-downward, and a child looks its parent up by id through the arena
/// rather than holding a pointer to it.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub id: ArtifactId,
    pub name: String,
    pub parent: Option<ArtifactId>,
    pub children: Vec<ArtifactId>,
    pub graph: Graph,
    pub metrics: Metrics,
    pub payload: ArtifactPayload,
}

impl Artifact {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Everything the Builder learns about a symbol that the Lifter still needs
/// after the tree is built — kept in a side table until the Lifter
/// finishes, then dropped.
#[derive(Debug, Clone)]
pub struct SymbolSourceInfo {
    pub file_path: String,
    pub range: SourceRange,
    pub raw: CodeSymbolData,
}
