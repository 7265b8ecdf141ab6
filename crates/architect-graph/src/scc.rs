use crate::graph::Graph;
use architect_core::ArtifactId;
use std::collections::HashMap;

/// Strongly-connected components of `graph`, via Tarjan's algorithm,
/// hand-rolled with an explicit stack so it runs synchronously over an
/// in-memory graph without recursing.
///
/// The order of SCCs in the returned vector and the order of members within
/// each SCC are both unspecified here — callers that need a canonical
/// ordering (the condensation's topological rank) impose one themselves.
pub fn find_strongly_connected_components(graph: &Graph) -> Vec<Vec<ArtifactId>> {
    let mut state = TarjanState::default();

    for node in graph.node_ids() {
        if !state.indices.contains_key(&node) {
            tarjan_dfs(graph, node, &mut state);
        }
    }

    state.components
}

#[derive(Default)]
struct TarjanState {
    index_counter: usize,
    stack: Vec<ArtifactId>,
    indices: HashMap<ArtifactId, usize>,
    lowlinks: HashMap<ArtifactId, usize>,
    on_stack: std::collections::HashSet<ArtifactId>,
    components: Vec<Vec<ArtifactId>>,
}

/// Explicit-stack DFS for Tarjan's algorithm. Recursion into neighbors is
/// iterative (a frame per node with a resumable neighbor cursor) so that
/// deeply nested dependency chains cannot exhaust the call stack.
fn tarjan_dfs(graph: &Graph, start: ArtifactId, state: &mut TarjanState) {
    struct Frame {
        node: ArtifactId,
        neighbors: std::vec::IntoIter<ArtifactId>,
    }

    fn push_frame(graph: &Graph, node: ArtifactId, state: &mut TarjanState) -> Frame {
        state.indices.insert(node, state.index_counter);
        state.lowlinks.insert(node, state.index_counter);
        state.index_counter += 1;
        state.stack.push(node);
        state.on_stack.insert(node);

        let mut neighbors: Vec<ArtifactId> = graph.successors(node).collect();
        neighbors.sort();
        Frame {
            node,
            neighbors: neighbors.into_iter(),
        }
    }

    let mut call_stack = vec![push_frame(graph, start, state)];

    while let Some(frame) = call_stack.last_mut() {
        let node = frame.node;
        if let Some(neighbor) = frame.neighbors.next() {
            if !state.indices.contains_key(&neighbor) {
                call_stack.push(push_frame(graph, neighbor, state));
            } else if state.on_stack.contains(&neighbor) {
                let neighbor_index = state.indices[&neighbor];
                let current_lowlink = state.lowlinks[&node];
                state
                    .lowlinks
                    .insert(node, current_lowlink.min(neighbor_index));
            }
        } else {
            // Children fully explored: fold this node's lowlink into its
            // parent's before popping, then close off an SCC root.
            call_stack.pop();
            if let Some(parent) = call_stack.last() {
                let child_lowlink = state.lowlinks[&node];
                let parent_lowlink = state.lowlinks[&parent.node];
                state
                    .lowlinks
                    .insert(parent.node, parent_lowlink.min(child_lowlink));
            }

            if state.lowlinks[&node] == state.indices[&node] {
                let mut component = Vec::new();
                loop {
                    let w = state.stack.pop().expect("SCC root always on stack");
                    state.on_stack.remove(&w);
                    component.push(w);
                    if w == node {
                        break;
                    }
                }
                state.components.push(component);
            }
        }
    }
}
