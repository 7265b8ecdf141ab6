use crate::graph::Graph;
use architect_core::ArtifactId;
use rustc_hash::FxHashMap as HashMap;
use std::collections::{BTreeSet, VecDeque};

/// Opaque id of a condensation node (one per SCC). Assigned by sorting SCCs
/// by their smallest member id ascending, so it is independent of whatever
/// order `find_strongly_connected_components` happened to discover them in.
pub type SccId = usize;

#[derive(Debug, Clone)]
pub struct CondensationNode {
    pub members: Vec<ArtifactId>,
}

/// The condensation DAG of a graph's SCCs: each condensation node carries
/// the set of original node ids; an edge exists iff any original edge
/// crosses the SCC boundary, and duplicate boundary edges are merged.
#[derive(Debug, Clone)]
pub struct CondensationGraph {
    pub nodes: Vec<CondensationNode>,
    edges: BTreeSet<(SccId, SccId)>,
    membership: HashMap<ArtifactId, SccId>,
}

impl CondensationGraph {
    pub fn scc_of(&self, id: ArtifactId) -> Option<SccId> {
        self.membership.get(&id).copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = (SccId, SccId)> + '_ {
        self.edges.iter().copied()
    }

    pub fn has_edge(&self, from: SccId, to: SccId) -> bool {
        self.edges.contains(&(from, to))
    }

    pub fn successors(&self, scc: SccId) -> impl Iterator<Item = SccId> + '_ {
        self.edges
            .iter()
            .filter(move |&&(from, _)| from == scc)
            .map(|&(_, to)| to)
    }

    pub fn predecessors(&self, scc: SccId) -> impl Iterator<Item = SccId> + '_ {
        self.edges
            .iter()
            .filter(move |&&(_, to)| to == scc)
            .map(|&(from, _)| from)
    }

    fn with_edges(nodes: Vec<CondensationNode>, edges: BTreeSet<(SccId, SccId)>) -> Self {
        let mut membership = HashMap::default();
        for (scc_id, node) in nodes.iter().enumerate() {
            for &member in &node.members {
                membership.insert(member, scc_id);
            }
        }
        Self {
            nodes,
            edges,
            membership,
        }
    }
}

/// Builds the condensation of `graph` given its SCCs.
pub fn make_condensation_graph(graph: &Graph, sccs: &[Vec<ArtifactId>]) -> CondensationGraph {
    let mut ordered: Vec<Vec<ArtifactId>> = sccs.to_vec();
    ordered.sort_by_key(|members| *members.iter().min().expect("SCC has a member"));

    let nodes: Vec<CondensationNode> = ordered
        .into_iter()
        .map(|members| CondensationNode { members })
        .collect();

    let mut membership = HashMap::default();
    for (scc_id, node) in nodes.iter().enumerate() {
        for &member in &node.members {
            membership.insert(member, scc_id);
        }
    }

    let mut edges = BTreeSet::new();
    for (from, to, _) in graph.edges() {
        let from_scc = membership[&from];
        let to_scc = membership[&to];
        if from_scc != to_scc {
            edges.insert((from_scc, to_scc));
        }
    }

    CondensationGraph::with_edges(nodes, edges)
}

/// For each condensation node, the count of nodes that can reach it —
/// transitive predecessors, exclusive. The condensation is always acyclic,
/// so this is well-defined via a bottom-up (topological) sweep rather than
/// needing cycle handling.
pub fn find_number_of_node_ancestors(condensation: &CondensationGraph) -> HashMap<SccId, usize> {
    let n = condensation.nodes.len();
    let mut in_degree = vec![0usize; n];
    for (_, to) in condensation.edges() {
        in_degree[to] += 1;
    }

    let mut ready: VecDeque<SccId> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut ancestors: Vec<BTreeSet<SccId>> = vec![BTreeSet::new(); n];
    let mut remaining = in_degree.clone();
    let mut order = Vec::with_capacity(n);

    while let Some(node) = ready.pop_front() {
        order.push(node);
        for succ in condensation.successors(node) {
            let mut merged = ancestors[succ].clone();
            merged.extend(ancestors[node].iter().copied());
            merged.insert(node);
            ancestors[succ] = merged;

            remaining[succ] -= 1;
            if remaining[succ] == 0 {
                ready.push_back(succ);
            }
        }
    }

    (0..n).map(|i| (i, ancestors[i].len())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scc::find_strongly_connected_components;

    #[test]
    fn diamond_condensation_keeps_all_four_edges() {
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
        assert_eq!(condensation.nodes.len(), 4);
        assert_eq!(condensation.edges().count(), 4);

        let ranks = find_number_of_node_ancestors(&condensation);
        let f1_scc = condensation.scc_of(f1).unwrap();
        let f4_scc = condensation.scc_of(f4).unwrap();
        assert_eq!(ranks[&f1_scc], 0);
        assert_eq!(ranks[&f4_scc], 3);
    }

    #[test]
    fn duplicate_boundary_edges_are_merged() {
        let mut graph = Graph::new();
        let (a1, a2, b1, b2) = (
            ArtifactId::new(),
            ArtifactId::new(),
            ArtifactId::new(),
            ArtifactId::new(),
        );
        // a1<->a2 and b1<->b2 are each one SCC; two edges cross the boundary.
        graph.insert_edge(a1, a2).unwrap();
        graph.insert_edge(a2, a1).unwrap();
        graph.insert_edge(b1, b2).unwrap();
        graph.insert_edge(b2, b1).unwrap();
        graph.insert_edge(a1, b1).unwrap();
        graph.insert_edge(a2, b2).unwrap();

        let sccs = find_strongly_connected_components(&graph);
        let condensation = make_condensation_graph(&graph, &sccs);
        assert_eq!(condensation.nodes.len(), 2);
        assert_eq!(condensation.edges().count(), 1);
    }
}
