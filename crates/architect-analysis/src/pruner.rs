use architect_core::{AnalyzerError, ArtifactId, Result};
use architect_graph::{
    find_components, find_number_of_node_ancestors, find_strongly_connected_components,
    make_condensation_graph, make_minimum_equivalent_graph, CondensationGraph, Graph,
};
use architect_model::{ArtifactArena, ArtifactPayload};
use rustc_hash::FxHashMap;

/// A single post-order pass over the artifact tree that
///
/// 1. fills in every artifact's `linesOfCode` (leaves from their own source
///    range, folders/files by summing their children — already computed by
///    the time a post-order visit reaches the parent),
/// 2. for every scope with more than one child, runs the graph kernel over
///    that scope's dependency graph to assign `componentRank`,
///    `sccIndexTopologicallySorted`, and `isInACycle` to each child, and
/// 3. prunes every edge in that scope's graph that the condensation's
///    transitive reduction deems redundant.
///
/// Implemented with an explicit work-stack traversal (`ArtifactArena::
/// traverse_post_order`) rather than native recursion so deeply nested
/// artifact trees cannot exhaust the call stack.
pub fn compute_metrics_and_prune(arena: &mut ArtifactArena) -> Result<()> {
    let root = arena
        .root_id()
        .ok_or_else(|| AnalyzerError::InternalInvariantViolation("arena has no root".into()))?;
    let post_order = arena.traverse_post_order(root);

    for &id in &post_order {
        compute_own_loc(arena, id);
    }
    for &id in &post_order {
        analyze_scope(arena, id)?;
    }
    Ok(())
}

/// A symbol with no subsymbols is a leaf: its own LoC is its source span. A
/// symbol with subsymbols (a class with methods, a function with nested
/// functions) is a non-leaf like any folder or file, and must sum its
/// children instead — otherwise a parent scope's split-balance math would
/// weigh a nested-symbol scope by its raw span rather than the LoC its own
/// children already account for, double-counting or under-counting
/// depending on how the two diverge.
fn compute_own_loc(arena: &mut ArtifactArena, id: ArtifactId) {
    let (fallback, children) = {
        let artifact = arena.get(id).expect("id came from this arena's own traversal");
        let children = artifact.children.clone();
        let fallback = match &artifact.payload {
            ArtifactPayload::Symbol { range, .. } => {
                (range.end.line.saturating_sub(range.start.line) + 1) as u64
            }
            ArtifactPayload::File { lines } => lines.len() as u64,
            ArtifactPayload::Folder => 0,
        };
        (fallback, children)
    };

    let loc = if children.is_empty() {
        fallback
    } else {
        children
            .iter()
            .map(|&c| arena.get(c).unwrap().metrics.lines_of_code)
            .sum()
    };

    arena.get_mut(id).unwrap().metrics.lines_of_code = loc;
}

fn analyze_scope(arena: &mut ArtifactArena, id: ArtifactId) -> Result<()> {
    let children = arena.get(id).unwrap().children.clone();
    if children.is_empty() {
        return Ok(());
    }

    let graph: Graph = arena.get(id).unwrap().graph.clone();
    let loc_map: FxHashMap<ArtifactId, u64> = children
        .iter()
        .map(|&c| (c, arena.get(c).unwrap().metrics.lines_of_code))
        .collect();

    let components = find_components(&graph, &loc_map);
    for (rank, component) in components.iter().enumerate() {
        for &member in &component.members {
            if let Some(artifact) = arena.get_mut(member) {
                artifact.metrics.component_rank = Some(rank as u32);
            }
        }
    }

    let sccs = find_strongly_connected_components(&graph);
    let condensation = make_condensation_graph(&graph, &sccs);
    let ancestors = find_number_of_node_ancestors(&condensation);
    let topo_order = topological_scc_order(&condensation, &ancestors);

    for (topo_rank, &scc_id) in topo_order.iter().enumerate() {
        let node = &condensation.nodes[scc_id];
        let in_a_cycle = node.members.len() > 1;
        for &member in &node.members {
            if let Some(artifact) = arena.get_mut(member) {
                artifact.metrics.scc_index_topologically_sorted = Some(topo_rank as u32);
                artifact.metrics.is_in_a_cycle = in_a_cycle;
            }
        }
    }

    for &child in &children {
        let artifact = arena.get(child).unwrap();
        if artifact.metrics.component_rank.is_none()
            || artifact.metrics.scc_index_topologically_sorted.is_none()
        {
            return Err(AnalyzerError::InternalInvariantViolation(format!(
                "{child} has no component rank or SCC index after analysis"
            )));
        }
    }

    let reduced = make_minimum_equivalent_graph(&condensation);
    let redundant_edges: Vec<(ArtifactId, ArtifactId)> = graph
        .edges()
        .into_iter()
        .filter_map(|(from, to, _)| {
            let from_scc = condensation.scc_of(from)?;
            let to_scc = condensation.scc_of(to)?;
            if from_scc != to_scc && !reduced.contains(&(from_scc, to_scc)) {
                Some((from, to))
            } else {
                None
            }
        })
        .collect();

    if !redundant_edges.is_empty() {
        tracing::debug!(scope = %id, removed = redundant_edges.len(), "pruned transitively-redundant edges");
    }
    let scope = arena.get_mut(id).unwrap();
    for (from, to) in redundant_edges {
        scope.graph.remove_edge(from, to);
    }

    Ok(())
}

/// Orders SCC ids by ascending ancestor count, ties broken by ascending
/// smallest-member id, for a deterministic linear extension of the
/// condensation's partial order.
fn topological_scc_order(
    condensation: &CondensationGraph,
    ancestors: &FxHashMap<architect_graph::SccId, usize>,
) -> Vec<architect_graph::SccId> {
    let mut ids: Vec<architect_graph::SccId> = (0..condensation.nodes.len()).collect();
    ids.sort_by_key(|&scc_id| {
        let ancestor_count = ancestors.get(&scc_id).copied().unwrap_or(0);
        let smallest_member = *condensation.nodes[scc_id]
            .members
            .iter()
            .min()
            .expect("an SCC always has at least one member");
        (ancestor_count, smallest_member)
    });
    ids
}
