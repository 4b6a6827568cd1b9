use std::collections::HashSet;

/// Separator used for every path written into the filters file.
pub const FILTER_SEPARATOR: char = '\\';

/// Directory and file names skipped during the walk. Matched by exact name.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    pub dirs: HashSet<String>,
    pub files: HashSet<String>,
}

impl ExclusionSet {
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.dirs.contains(name)
    }

    pub fn is_excluded_file(&self, name: &str) -> bool {
        self.files.contains(name)
    }
}

/// Represents the final configuration after merging presets with the defaults.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    pub exclusions: ExclusionSet,
    pub header_extensions: Vec<String>,
    pub source_extensions: Vec<String>,
    pub shader_extensions: Vec<String>,
    /// Filter every shader is assigned to, whatever folder it lives in.
    pub shader_filter: String,
}

/// One directory level and all of its ancestors, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterPath {
    segments: Vec<String>,
}

impl FilterPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// The project root itself.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Every ancestor-inclusive prefix, shortest first.
    pub fn prefixes(&self) -> impl Iterator<Item = FilterPath> + '_ {
        (1..=self.segments.len()).map(|len| FilterPath::new(self.segments[..len].to_vec()))
    }

    /// Backslash-joined form used in the filters file.
    pub fn to_filter_string(&self) -> String {
        self.segments.join(&FILTER_SEPARATOR.to_string())
    }

    /// Path of a file named `file_name` inside this folder, backslash-joined.
    pub fn join_file(&self, file_name: &str) -> String {
        if self.is_root() {
            file_name.to_string()
        } else {
            format!("{}{}{}", self.to_filter_string(), FILTER_SEPARATOR, file_name)
        }
    }
}

/// A folder visited by the walker, with its surviving subfolders and files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub path: FilterPath,
    pub subfolders: Vec<String>,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Header,
    Source,
    Shader,
}

impl Category {
    /// Element name used for entries of this category.
    pub fn element_name(self) -> &'static str {
        match self {
            Category::Header => "ClInclude",
            Category::Source => "ClCompile",
            Category::Shader => "CustomBuild",
        }
    }
}

/// A classified file. `filter` is `None` for files in the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub include: String,
    pub category: Category,
    pub filter: Option<String>,
}

/// A registered filter and the identifier it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    pub include: String,
    pub unique_identifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub filters: Vec<FilterEntry>,
    pub headers: Vec<FileEntry>,
    /// Compiled sources and shaders, in walk order.
    pub compiled: Vec<FileEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(parts: &[&str]) -> FilterPath {
        FilterPath::new(parts.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn prefixes_run_shortest_to_longest() {
        let prefixes: Vec<String> = path(&["Source", "Engine", "Math"])
            .prefixes()
            .map(|p| p.to_filter_string())
            .collect();
        assert_eq!(prefixes, vec!["Source", "Source\\Engine", "Source\\Engine\\Math"]);
    }

    #[test]
    fn root_has_no_prefixes() {
        let root = FilterPath::default();
        assert!(root.is_root());
        assert_eq!(root.prefixes().count(), 0);
        assert_eq!(root.join_file("main.cpp"), "main.cpp");
    }

    #[test]
    fn join_file_uses_backslashes() {
        assert_eq!(path(&["src", "core"]).join_file("a.cpp"), "src\\core\\a.cpp");
    }
}
