use crate::app::error::FilesystemError;
use crate::app::models::{ExclusionSet, FilterPath, Folder};
use ignore::{DirEntry, WalkBuilder};
use pathdiff::diff_paths;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Depth-first walk of the project directory, parents before children.
pub struct Scanner {
    root: PathBuf,
    exclusions: Arc<ExclusionSet>,
}

impl Scanner {
    pub fn new(root: PathBuf, exclusions: &ExclusionSet) -> Self {
        Self {
            root,
            exclusions: Arc::new(exclusions.clone()),
        }
    }

    /// Returns every visited folder in visit order. Excluded directories are
    /// pruned before descent, so nothing beneath them is ever read.
    pub fn scan(&self) -> Result<Vec<Folder>, FilesystemError> {
        if !self.root.is_dir() {
            return Err(FilesystemError::RootNotDirectory(self.root.clone()));
        }

        let exclusions = Arc::clone(&self.exclusions);
        // No .gitignore handling or hidden-file skipping; only the exclusion set prunes.
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| keep_entry(entry, &exclusions))
            .build();

        let mut folders: Vec<Folder> = Vec::new();
        let mut index: HashMap<PathBuf, usize> = HashMap::new();

        for result in walker {
            let entry = result?;
            let path = entry.path();
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());

            if is_dir {
                let relative = self.relative_segments(path)?;
                index.insert(path.to_path_buf(), folders.len());
                folders.push(Folder {
                    path: FilterPath::new(relative),
                    subfolders: Vec::new(),
                    files: Vec::new(),
                });
                if entry.depth() > 0 {
                    attach(&index, &mut folders, path, |folder, name| {
                        folder.subfolders.push(name)
                    })?;
                }
            } else if path.is_dir() {
                // Symlinked directory: listed by the OS but never descended into.
                log::debug!("Not following directory link {}", path.display());
            } else {
                attach(&index, &mut folders, path, |folder, name| {
                    folder.files.push(name)
                })?;
            }
        }

        Ok(folders)
    }

    fn relative_segments(&self, path: &Path) -> Result<Vec<String>, FilesystemError> {
        let Some(relative) = diff_paths(path, &self.root) else {
            return Ok(Vec::new());
        };
        let mut segments = Vec::new();
        for component in relative.components() {
            let segment = component
                .as_os_str()
                .to_str()
                .ok_or_else(|| FilesystemError::InvalidName(path.to_path_buf()))?;
            if segment != "." {
                segments.push(segment.to_string());
            }
        }
        Ok(segments)
    }
}

/// Appends the entry's name to its parent folder. Names must be valid UTF-8.
fn attach(
    index: &HashMap<PathBuf, usize>,
    folders: &mut [Folder],
    path: &Path,
    push: impl FnOnce(&mut Folder, String),
) -> Result<(), FilesystemError> {
    let Some(name) = path.file_name() else {
        return Ok(());
    };
    let name = name
        .to_str()
        .ok_or_else(|| FilesystemError::InvalidName(path.to_path_buf()))?;
    if let Some(&slot) = path.parent().and_then(|p| index.get(p)) {
        push(&mut folders[slot], name.to_string());
    }
    Ok(())
}

fn keep_entry(entry: &DirEntry, exclusions: &ExclusionSet) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
        return true;
    }
    // Non-UTF-8 names cannot be excluded; the walk rejects them when recorded.
    let Some(name) = entry.file_name().to_str() else {
        return true;
    };
    if exclusions.is_excluded_dir(name) {
        log::debug!("Skipping excluded directory {}", entry.path().display());
        return false;
    }
    true
}
