use crate::graph::Graph;
use architect_core::ArtifactId;
use rustc_hash::FxHashMap as HashMap;
use std::collections::VecDeque;

/// A weakly-connected component: the set of member node ids and their
/// combined `linesOfCode`, as supplied by the caller (the kernel itself does
/// not know what a node "is").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub members: Vec<ArtifactId>,
    pub total_lines_of_code: u64,
}

/// Weakly-connected components of `graph`.
///
/// Determinism: each component is seeded by undirected BFS from the smallest
/// unvisited node id, which fixes the *membership discovery* order; the
/// *returned list* order is then independently sorted descending by total
/// `linesOfCode`, ties broken by the smallest member id, so rank 0 always
/// lands on the component of greatest total LoC.
pub fn find_components(graph: &Graph, lines_of_code: &HashMap<ArtifactId, u64>) -> Vec<Component> {
    let mut visited = std::collections::HashSet::new();
    let mut components = Vec::new();

    for &seed in &graph.node_ids() {
        if visited.contains(&seed) {
            continue;
        }

        let mut members = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(seed);
        visited.insert(seed);

        while let Some(current) = queue.pop_front() {
            members.push(current);
            let mut neighbors: Vec<ArtifactId> = graph
                .successors(current)
                .chain(graph.predecessors(current))
                .collect();
            neighbors.sort();
            neighbors.dedup();
            for neighbor in neighbors {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        let total_lines_of_code = members
            .iter()
            .map(|id| lines_of_code.get(id).copied().unwrap_or(0))
            .sum();

        components.push(Component {
            members,
            total_lines_of_code,
        });
    }

    components.sort_by(|a, b| {
        b.total_lines_of_code
            .cmp(&a.total_lines_of_code)
            .then_with(|| smallest_id(a).cmp(&smallest_id(b)))
    });

    components
}

fn smallest_id(component: &Component) -> ArtifactId {
    *component
        .members
        .iter()
        .min()
        .expect("components always have at least one member")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disconnected_components_rank_by_loc_descending() {
        let mut graph = Graph::new();
        let (a, b, c, d) = (
            ArtifactId::new(),
            ArtifactId::new(),
            ArtifactId::new(),
            ArtifactId::new(),
        );
        graph.insert_edge(a, b).unwrap();
        graph.insert_edge(c, d).unwrap();

        let mut loc = HashMap::default();
        loc.insert(a, 300u64);
        loc.insert(b, 100u64);
        loc.insert(c, 50u64);
        loc.insert(d, 50u64);

        let components = find_components(&graph, &loc);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].total_lines_of_code, 400);
        assert_eq!(components[1].total_lines_of_code, 100);
    }

    #[test]
    fn single_node_with_no_edges_is_its_own_component() {
        let mut graph = Graph::new();
        let a = ArtifactId::new();
        graph.add_node(a);

        let components = find_components(&graph, &HashMap::default());
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].members, vec![a]);
    }
}
