use architect_core::{ArtifactId, Position, Result, SourceRange};
use architect_model::ArtifactArena;
use rustc_hash::FxHashMap;

use crate::builder::PendingReference;
use architect_model::SymbolSourceInfo;

/// Resolves every `Reference` the Builder deferred into a dependency edge,
/// inserted into whichever scope's graph is the lowest common ancestor of
/// the reference's source and target artifacts.
///
/// Returns the number of edges actually inserted. References whose source or
/// target can't be located, or whose endpoints are in an ancestor/descendant
/// relationship (not expressible as a sibling-level edge), are dropped
/// silently — an external or unresolvable reference is an expected outcome,
/// not an error.
pub fn lift_references(
    arena: &mut ArtifactArena,
    side_table: &FxHashMap<ArtifactId, SymbolSourceInfo>,
    file_index: &FxHashMap<String, ArtifactId>,
    pending: &[PendingReference],
) -> Result<usize> {
    let mut inserted = 0usize;

    for item in pending {
        let Some(from) = resolve_endpoint(
            side_table,
            file_index,
            &item.file_path,
            item.reference.source_range.start,
        ) else {
            tracing::debug!(file = %item.file_path, "reference source could not be located, dropping");
            continue;
        };
        let Some(to) = resolve_endpoint(
            side_table,
            file_index,
            &item.reference.target_file_path,
            item.reference.target_range.start,
        ) else {
            tracing::debug!(
                target_file = %item.reference.target_file_path,
                "reference target could not be located, dropping"
            );
            continue;
        };

        if from == to {
            continue;
        }

        let Some((scope, from_child, to_child)) = find_sibling_edge_endpoints(arena, from, to)
        else {
            tracing::debug!("reference endpoints are in an ancestor/descendant relationship, dropping");
            continue;
        };

        arena.insert_edge(scope, from_child, to_child)?;
        inserted += 1;
    }

    Ok(inserted)
}

/// Finds the artifact a reference endpoint resolves to: the innermost symbol
/// in `file_path` whose range contains `point`, or the file artifact itself
/// if no symbol matches.
fn resolve_endpoint(
    side_table: &FxHashMap<ArtifactId, SymbolSourceInfo>,
    file_index: &FxHashMap<String, ArtifactId>,
    file_path: &str,
    point: Position,
) -> Option<ArtifactId> {
    let best = side_table
        .iter()
        .filter(|(_, info)| info.file_path == file_path && info.range.contains(point))
        .min_by_key(|(id, info)| (range_span(info.range), **id));

    match best {
        Some((&id, _)) => Some(id),
        None => file_index.get(file_path).copied(),
    }
}

fn position_offset(p: Position) -> i64 {
    (p.line as i64) * 1_000_000 + p.column as i64
}

fn range_span(r: SourceRange) -> i64 {
    position_offset(r.end) - position_offset(r.start)
}

/// Walks both endpoints up to the root, looking for the lowest artifact
/// present in both ancestor chains. Returns `(lca, from_child, to_child)`
/// where `from_child`/`to_child` are the immediate children of `lca` that
/// are (or contain) `from`/`to` — the edge is inserted between those
/// siblings, never directly between `from` and `to` if they sit at
/// different depths.
fn find_sibling_edge_endpoints(
    arena: &ArtifactArena,
    from: ArtifactId,
    to: ArtifactId,
) -> Option<(ArtifactId, ArtifactId, ArtifactId)> {
    let chain_from = ancestor_chain(arena, from);
    let chain_to = ancestor_chain(arena, to);

    let to_index: FxHashMap<ArtifactId, usize> = chain_to
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, i))
        .collect();

    for (i, &node) in chain_from.iter().enumerate() {
        if let Some(&j) = to_index.get(&node) {
            if i == 0 || j == 0 {
                return None;
            }
            return Some((node, chain_from[i - 1], chain_to[j - 1]));
        }
    }
    None
}

/// The artifact and every one of its ancestors, ordered from `start` up to
/// the tree root.
fn ancestor_chain(arena: &ArtifactArena, start: ArtifactId) -> Vec<ArtifactId> {
    let mut chain = vec![start];
    let mut current = start;
    while let Some(parent) = arena.get(current).and_then(|a| a.parent) {
        chain.push(parent);
        current = parent;
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use architect_core::{CodeFile, CodeFolder, CodeSymbolData, Reference, SymbolKind};
    use crate::builder::build_artifact_tree;

    fn pos(line: u32, column: u32) -> Position {
        Position { line, column }
    }

    fn range(sl: u32, sc: u32, el: u32, ec: u32) -> SourceRange {
        SourceRange {
            start: pos(sl, sc),
            end: pos(el, ec),
        }
    }

    fn two_functions_calling_each_other() -> CodeFolder {
        CodeFolder {
            name: "proj".into(),
            subfolders: vec![],
            files: vec![CodeFile {
                name: "main.rs".into(),
                lines: vec!["fn a() { b() }".into(), "fn b() { a() }".into()],
                symbols: vec![
                    CodeSymbolData {
                        name: "a".into(),
                        kind: SymbolKind::Function,
                        range: range(1, 0, 1, 14),
                        selection_range: range(1, 3, 1, 4),
                        children: vec![],
                    },
                    CodeSymbolData {
                        name: "b".into(),
                        kind: SymbolKind::Function,
                        range: range(2, 0, 2, 14),
                        selection_range: range(2, 3, 2, 4),
                        children: vec![],
                    },
                ],
                references: vec![
                    Reference {
                        source_range: range(1, 9, 1, 10),
                        target_file_path: "proj/main.rs".into(),
                        target_range: range(2, 3, 2, 4),
                    },
                    Reference {
                        source_range: range(2, 9, 2, 10),
                        target_file_path: "proj/main.rs".into(),
                        target_range: range(1, 3, 1, 4),
                    },
                ],
            }],
        }
    }

    #[test]
    fn mutually_calling_functions_get_reciprocal_edges_in_file_scope() {
        let mut output = build_artifact_tree(&two_functions_calling_each_other()).unwrap();
        let inserted = lift_references(
            &mut output.arena,
            &output.side_table,
            &output.file_index,
            &output.pending_references,
        )
        .unwrap();
        assert_eq!(inserted, 2);

        let file_id = *output.file_index.get("proj/main.rs").unwrap();
        let file = output.arena.get(file_id).unwrap();
        assert_eq!(file.graph.edge_count(), 2);
    }

    #[test]
    fn unresolvable_reference_is_dropped_without_error() {
        let mut folder = two_functions_calling_each_other();
        folder.files[0].references.push(Reference {
            source_range: range(1, 9, 1, 10),
            target_file_path: "proj/does_not_exist.rs".into(),
            target_range: range(1, 0, 1, 1),
        });
        let mut output = build_artifact_tree(&folder).unwrap();
        let inserted = lift_references(
            &mut output.arena,
            &output.side_table,
            &output.file_index,
            &output.pending_references,
        )
        .unwrap();
        assert_eq!(inserted, 2);
    }
}
