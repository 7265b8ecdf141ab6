use architect_core::{AnalyzerError, ArtifactId, EdgeId, Result, SourceRange, SymbolKind};
use architect_graph::Graph;
use rustc_hash::FxHashMap;

use crate::artifact::{Artifact, ArtifactPayload};

/// One contiguous backing store for an artifact forest, nodes referenced by
/// index. `parent` fields on the stored `Artifact`s are `ArtifactId` lookup
/// keys, never owning references, so the forest has no `Rc`/`RefCell`
/// cycles to manage.
///
/// The whole tree is rooted at exactly one folder, recorded in `root`.
#[derive(Debug, Default)]
pub struct ArtifactArena {
    slots: Vec<Artifact>,
    index: FxHashMap<ArtifactId, usize>,
    root: Option<ArtifactId>,
}

impl ArtifactArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_id(&self) -> Option<ArtifactId> {
        self.root
    }

    pub fn get(&self, id: ArtifactId) -> Option<&Artifact> {
        self.index.get(&id).map(|&slot| &self.slots[slot])
    }

    pub fn get_mut(&mut self, id: ArtifactId) -> Option<&mut Artifact> {
        self.index.get(&id).map(|&slot| &mut self.slots[slot])
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn insert_artifact(&mut self, artifact: Artifact) -> ArtifactId {
        let id = artifact.id;
        let slot = self.slots.len();
        self.slots.push(artifact);
        self.index.insert(id, slot);
        id
    }

    /// Creates the single root folder. Must be called at most once.
    pub fn create_root_folder(&mut self, name: impl Into<String>) -> Result<ArtifactId> {
        if self.root.is_some() {
            return Err(AnalyzerError::InvalidGraphMutation(
                "arena already has a root".into(),
            ));
        }
        let id = ArtifactId::new();
        let artifact = Artifact {
            id,
            name: name.into(),
            parent: None,
            children: Vec::new(),
            graph: Graph::new(),
            metrics: Default::default(),
            payload: ArtifactPayload::Folder,
        };
        self.insert_artifact(artifact);
        self.root = Some(id);
        Ok(id)
    }

    fn attach_child(&mut self, parent: ArtifactId, child: ArtifactId) -> Result<()> {
        let parent_slot = *self.index.get(&parent).ok_or_else(|| {
            AnalyzerError::InvalidGraphMutation(format!("unknown parent {parent}"))
        })?;
        let parent_artifact = &mut self.slots[parent_slot];
        if parent_artifact.children.contains(&child) {
            tracing::debug!(%parent, %child, "rejected duplicate child attach");
            return Err(AnalyzerError::InvalidGraphMutation(format!(
                "{child} is already a child of {parent}"
            )));
        }
        parent_artifact.children.push(child);
        parent_artifact.graph.add_node(child);
        Ok(())
    }

    pub fn create_folder(
        &mut self,
        parent: ArtifactId,
        name: impl Into<String>,
    ) -> Result<ArtifactId> {
        let id = ArtifactId::new();
        self.attach_child(parent, id)?;
        let artifact = Artifact {
            id,
            name: name.into(),
            parent: Some(parent),
            children: Vec::new(),
            graph: Graph::new(),
            metrics: Default::default(),
            payload: ArtifactPayload::Folder,
        };
        Ok(self.insert_artifact(artifact))
    }

    pub fn create_file(
        &mut self,
        parent: ArtifactId,
        name: impl Into<String>,
        lines: Vec<String>,
    ) -> Result<ArtifactId> {
        let id = ArtifactId::new();
        self.attach_child(parent, id)?;
        let artifact = Artifact {
            id,
            name: name.into(),
            parent: Some(parent),
            children: Vec::new(),
            graph: Graph::new(),
            metrics: Default::default(),
            payload: ArtifactPayload::File { lines },
        };
        Ok(self.insert_artifact(artifact))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_symbol(
        &mut self,
        parent: ArtifactId,
        name: impl Into<String>,
        kind: SymbolKind,
        range: SourceRange,
        selection_range: SourceRange,
        content: String,
    ) -> Result<ArtifactId> {
        let id = ArtifactId::new();
        self.attach_child(parent, id)?;
        let artifact = Artifact {
            id,
            name: name.into(),
            parent: Some(parent),
            children: Vec::new(),
            graph: Graph::new(),
            metrics: Default::default(),
            payload: ArtifactPayload::Symbol {
                kind,
                range,
                selection_range,
                content,
            },
        };
        Ok(self.insert_artifact(artifact))
    }

    /// Inserts a dependency edge into `scope`'s own graph (the folder's
    /// part-graph, a file's symbol-graph, or a symbol's subsymbol-graph).
    /// `from`/`to` must already be children of `scope`.
    pub fn insert_edge(
        &mut self,
        scope: ArtifactId,
        from: ArtifactId,
        to: ArtifactId,
    ) -> Result<EdgeId> {
        let slot = *self
            .index
            .get(&scope)
            .ok_or_else(|| AnalyzerError::InvalidGraphMutation(format!("unknown scope {scope}")))?;
        self.slots[slot]
            .graph
            .insert_edge(from, to)
            .map_err(|e| AnalyzerError::InvalidGraphMutation(e.to_string()))
    }

    /// Replaces a scope's child order in place, used by the Sorter. `order`
    /// must be a permutation of the existing child list.
    pub fn reorder_children(&mut self, id: ArtifactId, order: Vec<ArtifactId>) -> Result<()> {
        let slot = *self
            .index
            .get(&id)
            .ok_or_else(|| AnalyzerError::InvalidGraphMutation(format!("unknown artifact {id}")))?;
        let artifact = &mut self.slots[slot];
        if order.len() != artifact.children.len()
            || !order.iter().all(|c| artifact.children.contains(c))
        {
            return Err(AnalyzerError::InternalInvariantViolation(format!(
                "reorder_children on {id} is not a permutation of its existing children"
            )));
        }
        artifact.children = order;
        Ok(())
    }

    /// Depth-first pre-order traversal starting at `start`, implemented with
    /// an explicit work stack so deeply nested trees cannot exhaust the call
    /// stack.
    pub fn traverse_pre_order(&self, start: ArtifactId) -> Vec<ArtifactId> {
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(artifact) = self.get(id) {
                stack.extend(artifact.children.iter().rev().copied());
            }
        }
        out
    }

    /// Depth-first post-order traversal starting at `start` (children before
    /// their parent), also implemented with an explicit work stack rather
    /// than native recursion.
    pub fn traverse_post_order(&self, start: ArtifactId) -> Vec<ArtifactId> {
        let mut out = Vec::new();
        let mut stack = vec![(start, false)];
        while let Some((id, children_pushed)) = stack.pop() {
            if children_pushed {
                out.push(id);
                continue;
            }
            stack.push((id, true));
            if let Some(artifact) = self.get(id) {
                for &child in artifact.children.iter().rev() {
                    stack.push((child, false));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> SourceRange {
        use architect_core::Position;
        SourceRange {
            start: Position { line: 0, column: 0 },
            end: Position { line: 0, column: 1 },
        }
    }

    #[test]
    fn single_file_one_function_has_tree_depth_three() {
        let mut arena = ArtifactArena::new();
        let root = arena.create_root_folder("root").unwrap();
        let file = arena.create_file(root, "main.rs", vec!["fn f() {}".into()]).unwrap();
        let sym = arena
            .create_symbol(
                file,
                "f",
                SymbolKind::Function,
                range(),
                range(),
                "fn f() {}".into(),
            )
            .unwrap();

        assert!(arena.get(root).unwrap().is_root());
        assert_eq!(arena.get(file).unwrap().parent, Some(root));
        assert_eq!(arena.get(sym).unwrap().parent, Some(file));
        assert!(arena.get(sym).unwrap().children.is_empty());
    }

    #[test]
    fn duplicate_child_insertion_is_rejected() {
        let mut arena = ArtifactArena::new();
        let root = arena.create_root_folder("root").unwrap();
        let file = arena.create_file(root, "a.rs", vec![]).unwrap();
        // Simulate a double-attach of the same child id.
        let err = arena.attach_child(root, file).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidGraphMutation(_)));
    }

    #[test]
    fn self_edge_in_scope_graph_is_rejected() {
        let mut arena = ArtifactArena::new();
        let root = arena.create_root_folder("root").unwrap();
        let file = arena.create_file(root, "a.rs", vec![]).unwrap();
        let err = arena.insert_edge(root, file, file).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidGraphMutation(_)));
    }

    #[test]
    fn pre_and_post_order_visit_every_node_once() {
        let mut arena = ArtifactArena::new();
        let root = arena.create_root_folder("root").unwrap();
        let a = arena.create_file(root, "a.rs", vec![]).unwrap();
        let b = arena.create_file(root, "b.rs", vec![]).unwrap();

        let pre = arena.traverse_pre_order(root);
        let post = arena.traverse_post_order(root);
        assert_eq!(pre[0], root);
        assert_eq!(post.last().copied(), Some(root));
        assert_eq!(pre.len(), 3);
        assert_eq!(post.len(), 3);
        assert!(pre.contains(&a) && pre.contains(&b));
        assert!(post.contains(&a) && post.contains(&b));
    }

    #[test]
    fn reorder_children_rejects_non_permutation() {
        let mut arena = ArtifactArena::new();
        let root = arena.create_root_folder("root").unwrap();
        let a = arena.create_file(root, "a.rs", vec![]).unwrap();
        let err = arena.reorder_children(root, vec![a, ArtifactId::new()]).unwrap_err();
        assert!(matches!(err, AnalyzerError::InternalInvariantViolation(_)));
    }
}
