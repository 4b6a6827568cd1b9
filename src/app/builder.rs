use crate::app::identifier::IdentifierSource;
use crate::app::models::{
    BuilderConfig, Category, FileEntry, FilterEntry, FilterPath, Folder, Manifest,
};
use std::collections::HashSet;

/// Notified once for every file that is not on the exclusion list.
pub trait ProgressObserver {
    fn file_processed(&mut self, file_name: &str);
}

/// Logs each processed file name at info level.
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn file_processed(&mut self, file_name: &str) {
        log::info!("{}", file_name);
    }
}

/// Keeps the filter list free of duplicates and complete with ancestors.
pub struct FilterRegistrar<'a> {
    ids: &'a mut dyn IdentifierSource,
    registered: HashSet<String>,
    entries: Vec<FilterEntry>,
}

impl<'a> FilterRegistrar<'a> {
    pub fn new(ids: &'a mut dyn IdentifierSource) -> Self {
        Self {
            ids,
            registered: HashSet::new(),
            entries: Vec::new(),
        }
    }

    /// Registers every missing prefix of `folder`, shortest first.
    /// The root and folders whose full path is itself an excluded name add nothing.
    pub fn register(&mut self, folder: &FilterPath, config: &BuilderConfig) {
        if folder.is_root() || config.exclusions.is_excluded_dir(&folder.to_filter_string()) {
            return;
        }

        for prefix in folder.prefixes() {
            let include = prefix.to_filter_string();
            if self.registered.contains(&include) {
                continue;
            }
            let unique_identifier = format!("{{{}}}", self.ids.next_identifier());
            self.registered.insert(include.clone());
            self.entries.push(FilterEntry {
                include,
                unique_identifier,
            });
        }
    }

    pub fn into_entries(self) -> Vec<FilterEntry> {
        self.entries
    }
}

/// Decides the category of a file by its (case-sensitive) suffix.
pub fn classify(file_name: &str, config: &BuilderConfig) -> Option<Category> {
    let matches = |exts: &[String]| exts.iter().any(|ext| file_name.ends_with(ext.as_str()));

    if matches(&config.header_extensions) {
        Some(Category::Header)
    } else if matches(&config.source_extensions) {
        Some(Category::Source)
    } else if matches(&config.shader_extensions) {
        Some(Category::Shader)
    } else {
        None
    }
}

/// Turns one walk into a manifest.
pub struct ManifestBuilder<'a> {
    config: &'a BuilderConfig,
    ids: &'a mut dyn IdentifierSource,
    progress: &'a mut dyn ProgressObserver,
}

impl<'a> ManifestBuilder<'a> {
    pub fn new(
        config: &'a BuilderConfig,
        ids: &'a mut dyn IdentifierSource,
        progress: &'a mut dyn ProgressObserver,
    ) -> Self {
        Self {
            config,
            ids,
            progress,
        }
    }

    pub fn build(self, folders: &[Folder]) -> Manifest {
        let config = self.config;
        let progress = self.progress;
        let mut registrar = FilterRegistrar::new(self.ids);
        let mut headers = Vec::new();
        let mut compiled = Vec::new();

        for folder in folders {
            registrar.register(&folder.path, config);
            log::debug!(
                "Folder '{}': {} subfolders, {} files",
                folder.path.to_filter_string(),
                folder.subfolders.len(),
                folder.files.len()
            );

            let folder_filter = (!folder.path.is_root()).then(|| folder.path.to_filter_string());

            for file_name in &folder.files {
                if config.exclusions.is_excluded_file(file_name) {
                    continue;
                }

                progress.file_processed(file_name);

                let Some(category) = classify(file_name, config) else {
                    log::debug!("Skipping unrecognized file {}", file_name);
                    continue;
                };

                let filter = match category {
                    Category::Shader => Some(config.shader_filter.clone()),
                    Category::Header | Category::Source => folder_filter.clone(),
                };
                let entry = FileEntry {
                    include: folder.path.join_file(file_name),
                    category,
                    filter,
                };

                match category {
                    Category::Header => headers.push(entry),
                    Category::Source | Category::Shader => compiled.push(entry),
                }
            }
        }

        Manifest {
            filters: registrar.into_entries(),
            headers,
            compiled,
        }
    }
}
