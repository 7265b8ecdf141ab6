use crate::condensation::{CondensationGraph, SccId};
use std::collections::{BTreeSet, HashMap};

/// The transitive reduction of a DAG: the unique edge-minimal graph with the
/// same reachability relation.
///
/// An edge `u -> v` is kept iff there is no alternate path `u -> ... -> v` of
/// length >= 2, i.e. iff no other direct successor `w` of `u` can also reach
/// `v`. This is computed from full descendant sets rather than the sparser
/// "longest path" method, trading some asymptotic efficiency for a
/// straightforward, obviously-correct implementation — condensation graphs
/// over a single source file's symbols or a folder's files are small enough
/// that this is not a bottleneck.
pub fn make_minimum_equivalent_graph(condensation: &CondensationGraph) -> BTreeSet<(SccId, SccId)> {
    let n = condensation.nodes.len();
    let descendants = descendant_sets(condensation, n);

    let mut kept = BTreeSet::new();
    for (u, v) in condensation.edges() {
        let redundant = condensation
            .successors(u)
            .filter(|&w| w != v)
            .any(|w| descendants[&w].contains(&v));
        if !redundant {
            kept.insert((u, v));
        }
    }
    kept
}

/// Full descendant set per node, via DFS from each node. `n` is the number
/// of condensation nodes (0..n).
fn descendant_sets(condensation: &CondensationGraph, n: usize) -> HashMap<SccId, BTreeSet<SccId>> {
    let mut memo: HashMap<SccId, BTreeSet<SccId>> = HashMap::new();

    fn visit(
        condensation: &CondensationGraph,
        node: SccId,
        memo: &mut HashMap<SccId, BTreeSet<SccId>>,
    ) {
        if memo.contains_key(&node) {
            return;
        }
        // Insert a placeholder so a node is never revisited even though the
        // condensation is acyclic (guards against re-entrant successors).
        memo.insert(node, BTreeSet::new());

        let mut reach = BTreeSet::new();
        for succ in condensation.successors(node) {
            reach.insert(succ);
            visit(condensation, succ, memo);
            reach.extend(memo[&succ].iter().copied());
        }
        memo.insert(node, reach);
    }

    for node in 0..n {
        visit(condensation, node, &mut memo);
    }
    memo
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condensation::make_condensation_graph;
    use crate::graph::Graph;
    use crate::scc::find_strongly_connected_components;
    use architect_core::ArtifactId;

    #[test]
    fn transitive_triangle_drops_the_shortcut_edge() {
        let mut graph = Graph::new();
        let (a, b, c) = (ArtifactId::new(), ArtifactId::new(), ArtifactId::new());
        graph.insert_edge(a, b).unwrap();
        graph.insert_edge(b, c).unwrap();
        graph.insert_edge(a, c).unwrap();

        let sccs = find_strongly_connected_components(&graph);
        let condensation = make_condensation_graph(&graph, &sccs);
        let reduced = make_minimum_equivalent_graph(&condensation);

        assert_eq!(reduced.len(), 2);
        let a_scc = condensation.scc_of(a).unwrap();
        let c_scc = condensation.scc_of(c).unwrap();
        assert!(!reduced.contains(&(a_scc, c_scc)));
    }

    #[test]
    fn diamond_is_already_minimal() {
        let mut graph = Graph::new();
        let (f1, f2, f3, f4) = (
            ArtifactId::new(),
            ArtifactId::new(),
            ArtifactId::new(),
            ArtifactId::new(),
        );
        graph.insert_edge(f1, f2).unwrap();
        graph.insert_edge(f1, f3).unwrap();
        graph.insert_edge(f2, f4).unwrap();
        graph.insert_edge(f3, f4).unwrap();

        let sccs = find_strongly_connected_components(&graph);
        let condensation = make_condensation_graph(&graph, &sccs);
        let reduced = make_minimum_equivalent_graph(&condensation);

        assert_eq!(reduced.len(), 4);
    }
}
