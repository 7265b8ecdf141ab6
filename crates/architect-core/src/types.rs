use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A symbol's position in source: 1-based line, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// An inclusive source range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: Position,
    pub end: Position,
}

impl SourceRange {
    pub fn contains(&self, pos: Position) -> bool {
        (pos.line > self.start.line
            || (pos.line == self.start.line && pos.column >= self.start.column))
            && (pos.line < self.end.line
                || (pos.line == self.end.line && pos.column <= self.end.column))
    }
}

/// Enumerated symbol kind. Left open-ended (`Other`) because the external
/// language-protocol server can report kinds this core does not special-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Function,
    Method,
    Class,
    Struct,
    Enum,
    Interface,
    Trait,
    Module,
    Variable,
    Constant,
    Field,
    Other(String),
}

/// A located project to analyze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLocation {
    pub folder_path: String,
    pub code_file_endings: HashSet<String>,
    pub language_id: String,
}

/// A folder as reported by the (external) file-system reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeFolder {
    pub name: String,
    pub subfolders: Vec<CodeFolder>,
    pub files: Vec<CodeFile>,
}

impl CodeFolder {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.subfolders.iter().all(CodeFolder::is_empty)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .subfolders
                .iter()
                .map(CodeFolder::file_count)
                .sum::<usize>()
    }
}

/// A source file as reported by the (external) file-system reader, carrying
/// whatever the (external) language-protocol client has resolved so far.
/// `symbols` and `references` may be partially populated if the server
/// degraded (`LspUnreachable`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeFile {
    pub name: String,
    pub lines: Vec<String>,
    pub symbols: Vec<CodeSymbolData>,
    pub references: Vec<Reference>,
}

/// A symbol reported by the language-protocol server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSymbolData {
    pub name: String,
    pub kind: SymbolKind,
    pub range: SourceRange,
    pub selection_range: SourceRange,
    pub children: Vec<CodeSymbolData>,
}

/// A reference edge reported by the language-protocol server: some range in
/// the current file refers to a symbol located at `target_range` in
/// `target_file_path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub source_range: SourceRange,
    pub target_file_path: String,
    pub target_range: SourceRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: u32, column: u32) -> Position {
        Position { line, column }
    }

    #[test]
    fn range_contains_inclusive_bounds() {
        let range = SourceRange {
            start: pos(1, 0),
            end: pos(3, 5),
        };
        assert!(range.contains(pos(1, 0)));
        assert!(range.contains(pos(2, 100)));
        assert!(range.contains(pos(3, 5)));
        assert!(!range.contains(pos(3, 6)));
        assert!(!range.contains(pos(0, 0)));
    }

    #[test]
    fn empty_folder_has_no_files() {
        let folder = CodeFolder {
            name: "root".into(),
            subfolders: vec![CodeFolder {
                name: "nested".into(),
                subfolders: vec![],
                files: vec![],
            }],
            files: vec![],
        };
        assert!(folder.is_empty());
        assert_eq!(folder.file_count(), 0);
    }
}
