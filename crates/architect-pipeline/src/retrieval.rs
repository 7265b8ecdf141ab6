use architect_core::CodeFolder;
use crate::collaborators::SymbolServer;

use architect_core::CodeFile;

/// Flattens a `CodeFolder` tree into `(path, &mut CodeFile)` pairs, the path
/// being root-relative with `/`-joined segments — the same convention
/// `architect-builder`'s `build_folder_contents` uses for its `file_index`
/// keys, so references resolved against these paths line up with the
/// artifact tree the Builder later constructs from the same `CodeFolder`.
fn collect_files_mut<'a>(folder: &'a mut CodeFolder, prefix: &str, out: &mut Vec<(String, &'a mut CodeFile)>) {
    for file in folder.files.iter_mut() {
        let path = format!("{prefix}/{}", file.name);
        out.push((path, file));
    }
    for subfolder in folder.subfolders.iter_mut() {
        let sub_prefix = format!("{prefix}/{}", subfolder.name);
        collect_files_mut(subfolder, &sub_prefix, out);
    }
}

/// Populates every file's `symbols` via the language-protocol server. A
/// failure on one file is logged and that file keeps whatever symbols it
/// already had (possibly none) — an `LspUnreachable` non-fatal path that
/// degrades gracefully rather than aborting the pipeline.
pub async fn retrieve_symbols(
    folder: &mut CodeFolder,
    root_name: &str,
    server: &dyn SymbolServer,
) {
    let mut files = Vec::new();
    collect_files_mut(folder, root_name, &mut files);

    for (path, file) in files {
        match server.symbols(&path, file).await {
            Ok(symbols) => file.symbols = symbols,
            Err(err) => {
                tracing::warn!(
                    stage = "retrieveSymbols",
                    file = %path,
                    cause = %err,
                    "language server unreachable, continuing with partial symbol data"
                );
            }
        }
    }
}

/// Populates every file's `references` via the language-protocol server.
/// Same degrade-gracefully treatment as `retrieve_symbols`.
pub async fn retrieve_references(
    folder: &mut CodeFolder,
    root_name: &str,
    server: &dyn SymbolServer,
) {
    let mut files = Vec::new();
    collect_files_mut(folder, root_name, &mut files);

    for (path, file) in files {
        match server.references(&path, file).await {
            Ok(references) => file.references = references,
            Err(err) => {
                tracing::warn!(
                    stage = "retrieveReferences",
                    file = %path,
                    cause = %err,
                    "language server unreachable, continuing with partial reference data"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder() -> CodeFolder {
        CodeFolder {
            name: "proj".into(),
            subfolders: vec![CodeFolder {
                name: "inner".into(),
                subfolders: vec![],
                files: vec![CodeFile {
                    name: "b.rs".into(),
                    lines: vec![],
                    symbols: vec![],
                    references: vec![],
                }],
            }],
            files: vec![CodeFile {
                name: "a.rs".into(),
                lines: vec![],
                symbols: vec![],
                references: vec![],
            }],
        }
    }

    #[test]
    fn collect_files_mut_builds_joined_paths() {
        let mut f = folder();
        let mut files = Vec::new();
        collect_files_mut(&mut f, "proj", &mut files);
        let paths: Vec<&str> = files.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["proj/a.rs", "proj/inner/b.rs"]);
    }
}
