pub mod components;
pub mod condensation;
pub mod graph;
pub mod reduction;
pub mod scc;

pub use components::{find_components, Component};
pub use condensation::{
    find_number_of_node_ancestors, make_condensation_graph, CondensationGraph, CondensationNode,
    SccId,
};
pub use graph::{Graph, GraphMutationError};
pub use reduction::make_minimum_equivalent_graph;
pub use scc::find_strongly_connected_components;
