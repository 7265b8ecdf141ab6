use architect_core::{CodeFolder, CodeSymbolData, Result, SourceRange};
use architect_model::{ArtifactArena, SymbolSourceInfo};
use rustc_hash::FxHashMap;

use architect_core::{ArtifactId, Reference};

/// A reference that still needs the Lifter's second pass, carrying the
/// project-root-relative path of the file it was found in (the `CodeFolder`
/// nesting is walked once, here, to compute that path; `Reference` itself
/// only names the *target* file).
#[derive(Debug, Clone)]
pub struct PendingReference {
    pub file_path: String,
    pub reference: Reference,
}

/// Everything the Builder produces for the Lifter and the rest of the
/// pipeline to consume.
pub struct BuildOutput {
    pub arena: ArtifactArena,
    pub side_table: FxHashMap<ArtifactId, SymbolSourceInfo>,
    pub file_index: FxHashMap<String, ArtifactId>,
    pub pending_references: Vec<PendingReference>,
}

/// Depth-first construction of the artifact tree from the external
/// collaborator's `CodeFolder`. Folders become folder artifacts, files
/// become file artifacts, and `CodeSymbolData` nests into symbol/subsymbol
/// artifacts by the same rule applied recursively.
///
/// No edges are inserted here — that is the Lifter's job once every artifact
/// exists and a reference's source and target can both be located.
pub fn build_artifact_tree(root_folder: &CodeFolder) -> Result<BuildOutput> {
    let mut arena = ArtifactArena::new();
    let root_id = arena.create_root_folder(root_folder.name.clone())?;
    let mut side_table = FxHashMap::default();
    let mut file_index = FxHashMap::default();
    let mut pending_references = Vec::new();

    build_folder_contents(
        &mut arena,
        root_id,
        root_folder,
        &root_folder.name,
        &mut side_table,
        &mut file_index,
        &mut pending_references,
    )?;

    Ok(BuildOutput {
        arena,
        side_table,
        file_index,
        pending_references,
    })
}

#[allow(clippy::too_many_arguments)]
fn build_folder_contents(
    arena: &mut ArtifactArena,
    parent_id: ArtifactId,
    folder: &CodeFolder,
    path_prefix: &str,
    side_table: &mut FxHashMap<ArtifactId, SymbolSourceInfo>,
    file_index: &mut FxHashMap<String, ArtifactId>,
    pending: &mut Vec<PendingReference>,
) -> Result<()> {
    for file in &folder.files {
        let file_path = format!("{path_prefix}/{}", file.name);
        let file_id = arena.create_file(parent_id, file.name.clone(), file.lines.clone())?;
        file_index.insert(file_path.clone(), file_id);

        for symbol in &file.symbols {
            build_symbol(arena, file_id, &file.lines, &file_path, symbol, side_table)?;
        }
        for reference in &file.references {
            pending.push(PendingReference {
                file_path: file_path.clone(),
                reference: reference.clone(),
            });
        }
    }

    for subfolder in &folder.subfolders {
        let sub_path = format!("{path_prefix}/{}", subfolder.name);
        let sub_id = arena.create_folder(parent_id, subfolder.name.clone())?;
        build_folder_contents(
            arena,
            sub_id,
            subfolder,
            &sub_path,
            side_table,
            file_index,
            pending,
        )?;
    }

    Ok(())
}

fn build_symbol(
    arena: &mut ArtifactArena,
    parent_id: ArtifactId,
    file_lines: &[String],
    file_path: &str,
    symbol: &CodeSymbolData,
    side_table: &mut FxHashMap<ArtifactId, SymbolSourceInfo>,
) -> Result<ArtifactId> {
    let content = extract_source_slice(file_lines, symbol.range);
    let id = arena.create_symbol(
        parent_id,
        symbol.name.clone(),
        symbol.kind.clone(),
        symbol.range,
        symbol.selection_range,
        content,
    )?;
    side_table.insert(
        id,
        SymbolSourceInfo {
            file_path: file_path.to_string(),
            range: symbol.range,
            raw: symbol.clone(),
        },
    );

    for child in &symbol.children {
        build_symbol(arena, id, file_lines, file_path, child, side_table)?;
    }

    Ok(id)
}

/// Extracts the source text `range` spans out of a file's line array. Lines
/// are 0-indexed; `Position::line` is 1-based (per `architect_core::types`'s
/// convention), and column bounds are clamped rather than panicking on a
/// malformed range from an external collaborator.
fn extract_source_slice(lines: &[String], range: SourceRange) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let start_line = range.start.line.saturating_sub(1) as usize;
    let end_line = (range.end.line.saturating_sub(1) as usize).min(lines.len() - 1);
    if start_line > end_line || start_line >= lines.len() {
        return String::new();
    }

    if start_line == end_line {
        return slice_columns(&lines[start_line], range.start.column as usize, range.end.column as usize);
    }

    let mut out = String::new();
    for idx in start_line..=end_line {
        if idx == start_line {
            out.push_str(&slice_from(&lines[idx], range.start.column as usize));
        } else if idx == end_line {
            out.push_str(&slice_to(&lines[idx], range.end.column as usize));
        } else {
            out.push_str(&lines[idx]);
        }
        if idx != end_line {
            out.push('\n');
        }
    }
    out
}

fn slice_columns(line: &str, start_col: usize, end_col: usize) -> String {
    line.chars()
        .skip(start_col)
        .take(end_col.saturating_sub(start_col))
        .collect()
}

fn slice_from(line: &str, start_col: usize) -> String {
    line.chars().skip(start_col).collect()
}

fn slice_to(line: &str, end_col: usize) -> String {
    line.chars().take(end_col).collect()
}
