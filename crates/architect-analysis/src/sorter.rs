use architect_core::{AnalyzerError, ArtifactId, Result};
use architect_model::{Artifact, ArtifactArena};
use std::cmp::Reverse;

/// Orders every scope's children by the artifact total order —
/// `componentRank` ascending, `sccIndexTopologicallySorted` ascending,
/// `linesOfCode` descending, name lexical, id as a final deterministic
/// tiebreak — and writes the order back into the arena.
///
/// Must run after the Pruner: it reads `componentRank`/`sccIndex`, which the
/// Pruner assigns. Applied depth-first, each scope independently — ordering
/// is stable within each scope, not across the whole tree.
pub fn sort_children(arena: &mut ArtifactArena) -> Result<()> {
    let root = arena
        .root_id()
        .ok_or_else(|| AnalyzerError::InternalInvariantViolation("arena has no root".into()))?;

    for id in arena.traverse_pre_order(root) {
        let children = arena.get(id).unwrap().children.clone();
        if children.len() < 2 {
            continue;
        }

        let mut keyed: Vec<(SortKey, ArtifactId)> = children
            .iter()
            .map(|&c| (SortKey::of(arena.get(c).unwrap()), c))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        let ordered = keyed.into_iter().map(|(_, id)| id).collect();
        arena.reorder_children(id, ordered)?;
    }

    Ok(())
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct SortKey(u32, u32, Reverse<u64>, String, ArtifactId);

impl SortKey {
    fn of(artifact: &Artifact) -> Self {
        SortKey(
            artifact.metrics.component_rank.unwrap_or(u32::MAX),
            artifact
                .metrics
                .scc_index_topologically_sorted
                .unwrap_or(u32::MAX),
            Reverse(artifact.metrics.lines_of_code),
            artifact.name.clone(),
            artifact.id,
        )
    }
}
