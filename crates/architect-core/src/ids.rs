use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of an artifact (folder, file, symbol, or subsymbol), unique across
/// the whole tree.
///
/// Assigned from a process-wide monotonic counter rather than a random UUID:
/// the Sorter's final tiebreak and the graph kernel's smallest-member-id
/// tiebreaks both key on id ordering, so two runs over an identical
/// `CodeFolder` must assign ids in the same relative order for the pipeline's
/// determinism properties to hold run-to-run, not just within a single run.
/// Construction is always depth-first over the same input, so the counter
/// reproduces the same sequence every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactId(u64);

static NEXT_ARTIFACT_ID: AtomicU64 = AtomicU64::new(0);

impl ArtifactId {
    pub fn new() -> Self {
        Self(NEXT_ARTIFACT_ID.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for ArtifactId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "artifact#{}", self.0)
    }
}

/// Identity of an edge within a scope's graph. Edges are unweighted and
/// multiplicity is bounded (at most one per ordered pair), but each retains
/// its own id so callers can track provenance (which reference produced it).
///
/// Same process-wide monotonic-counter assignment as `ArtifactId`, for the
/// same determinism reason — a `Graph`'s edge ids are never used as a sort
/// key today, but keeping both id types assigned the same way avoids a
/// latent trap if that changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(u64);

static NEXT_EDGE_ID: AtomicU64 = AtomicU64::new(0);

impl EdgeId {
    pub fn new() -> Self {
        Self(NEXT_EDGE_ID.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge#{}", self.0)
    }
}
