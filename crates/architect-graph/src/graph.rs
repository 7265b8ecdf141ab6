use architect_core::{ArtifactId, EdgeId};
use rustc_hash::FxHashMap as HashMap;
use std::collections::BTreeSet;

/// A directed graph over opaque node ids, at most one edge per ordered pair
/// `(u, v)` with `u != v`. Node ids are artifact ids; self-loops are
/// forbidden.
///
/// One `Graph` lives per scope (a folder's part-graph, a file's
/// symbol-graph, a symbol's subsymbol-graph). The kernel itself has no idea
/// which scope it belongs to or what its nodes represent — that's
/// `architect-model`'s job.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeSet<ArtifactId>,
    outgoing: HashMap<ArtifactId, Vec<(ArtifactId, EdgeId)>>,
    incoming: HashMap<ArtifactId, Vec<(ArtifactId, EdgeId)>>,
    edge_ids: HashMap<(ArtifactId, ArtifactId), EdgeId>,
}

#[derive(Debug, thiserror::Error)]
pub enum GraphMutationError {
    #[error("self-edge not permitted: {0}")]
    SelfEdge(ArtifactId),
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node with no edges. A no-op if already present.
    pub fn add_node(&mut self, id: ArtifactId) {
        self.nodes.insert(id);
    }

    pub fn has_node(&self, id: ArtifactId) -> bool {
        self.nodes.contains(&id)
    }

    /// Node ids in ascending order — the canonical iteration order every
    /// deterministic algorithm in this crate seeds from.
    pub fn node_ids(&self) -> Vec<ArtifactId> {
        self.nodes.iter().copied().collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_ids.len()
    }

    /// Inserts a dependency edge `from -> to`. Self-edges are rejected.
    /// Re-inserting an existing edge is idempotent and returns the edge's
    /// existing id.
    pub fn insert_edge(
        &mut self,
        from: ArtifactId,
        to: ArtifactId,
    ) -> Result<EdgeId, GraphMutationError> {
        if from == to {
            tracing::debug!(node = %from, "rejected self-edge");
            return Err(GraphMutationError::SelfEdge(from));
        }
        self.nodes.insert(from);
        self.nodes.insert(to);

        if let Some(existing) = self.edge_ids.get(&(from, to)) {
            return Ok(*existing);
        }

        let edge_id = EdgeId::new();
        self.edge_ids.insert((from, to), edge_id);
        self.outgoing.entry(from).or_default().push((to, edge_id));
        self.incoming.entry(to).or_default().push((from, edge_id));
        Ok(edge_id)
    }

    pub fn has_edge(&self, from: ArtifactId, to: ArtifactId) -> bool {
        self.edge_ids.contains_key(&(from, to))
    }

    pub fn edge_id(&self, from: ArtifactId, to: ArtifactId) -> Option<EdgeId> {
        self.edge_ids.get(&(from, to)).copied()
    }

    /// Removes the edge `from -> to`, if present. Returns whether an edge
    /// was actually removed.
    pub fn remove_edge(&mut self, from: ArtifactId, to: ArtifactId) -> bool {
        if self.edge_ids.remove(&(from, to)).is_none() {
            return false;
        }
        if let Some(v) = self.outgoing.get_mut(&from) {
            v.retain(|(n, _)| *n != to);
        }
        if let Some(v) = self.incoming.get_mut(&to) {
            v.retain(|(n, _)| *n != from);
        }
        true
    }

    pub fn successors(&self, id: ArtifactId) -> impl Iterator<Item = ArtifactId> + '_ {
        self.outgoing
            .get(&id)
            .into_iter()
            .flatten()
            .map(|(n, _)| *n)
    }

    pub fn predecessors(&self, id: ArtifactId) -> impl Iterator<Item = ArtifactId> + '_ {
        self.incoming
            .get(&id)
            .into_iter()
            .flatten()
            .map(|(n, _)| *n)
    }

    /// All edges as `(from, to, edge_id)` triples, in an order determined
    /// only by internal hashing — callers that need determinism should sort
    /// the result themselves.
    pub fn edges(&self) -> Vec<(ArtifactId, ArtifactId, EdgeId)> {
        self.edge_ids
            .iter()
            .map(|(&(from, to), &id)| (from, to, id))
            .collect()
    }

    /// The induced subgraph over `node_ids`: every requested node, and every
    /// original edge whose endpoints are both in the set, with edge ids
    /// preserved.
    pub fn subgraph(&self, node_ids: &[ArtifactId]) -> Graph {
        let keep: std::collections::HashSet<ArtifactId> = node_ids.iter().copied().collect();
        let mut out = Graph::new();
        for &id in node_ids {
            out.add_node(id);
        }
        for (from, to, _) in self.edges() {
            if keep.contains(&from) && keep.contains(&to) {
                let _ = out.insert_edge(from, to);
            }
        }
        out
    }
}
