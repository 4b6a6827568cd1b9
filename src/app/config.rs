use crate::app::models::{BuilderConfig, ExclusionSet};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".vs",
    ".idea",
    ".vscode",
    "node_modules",
    "Build",
    "GE3_GameEngine",
    "Resources\\Fonts",
    "Resources\\Models",
    "Resources\\Sounds",
    "Resources\\Textures",
];

const DEFAULT_EXCLUDED_FILES: &[&str] = &[".gitignore", ".editorconfig", "LICENSE.txt"];

const DEFAULT_HEADER_EXTENSIONS: &[&str] = &[".h"];
const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &[".cpp", ".c"];
const DEFAULT_SHADER_EXTENSIONS: &[&str] = &[".hlsl", ".fx"];
const DEFAULT_SHADER_FILTER: &str = "Resources\\Shaders";

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    excluded_dirs: Option<Vec<String>>,
    excluded_files: Option<Vec<String>>,
    header_extensions: Option<Vec<String>>,
    source_extensions: Option<Vec<String>>,
    shader_extensions: Option<Vec<String>>,
    shader_filter: Option<String>,
}

fn presets_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("filter_sync")
            .join("presets.toml")
    })
}

fn load_presets_file(path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read config at {:?}", path))?;

    let parsed: PresetsFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse presets at {:?}", path))?;

    Ok(parsed.presets)
}

/// Defaults first, then preset additions. Duplicates are dropped keeping order.
fn merge_vecs(defaults: &[&str], preset_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined: Vec<String> = defaults.iter().map(|s| s.to_string()).collect();
    if let Some(mut extra) = preset_vec {
        combined.append(&mut extra);
    }
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

fn build_config(preset: PresetConfig) -> BuilderConfig {
    BuilderConfig {
        exclusions: ExclusionSet {
            dirs: merge_vecs(DEFAULT_EXCLUDED_DIRS, preset.excluded_dirs)
                .into_iter()
                .collect(),
            files: merge_vecs(DEFAULT_EXCLUDED_FILES, preset.excluded_files)
                .into_iter()
                .collect(),
        },
        header_extensions: merge_vecs(DEFAULT_HEADER_EXTENSIONS, preset.header_extensions),
        source_extensions: merge_vecs(DEFAULT_SOURCE_EXTENSIONS, preset.source_extensions),
        shader_extensions: merge_vecs(DEFAULT_SHADER_EXTENSIONS, preset.shader_extensions),
        shader_filter: preset
            .shader_filter
            .unwrap_or_else(|| DEFAULT_SHADER_FILTER.to_string()),
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        build_config(PresetConfig::default())
    }
}

/// Resolves the configuration from an explicit presets file. The preset keyed
/// by `project_name` is applied if present.
pub fn resolve_config_from(presets_file: &Path, project_name: Option<&str>) -> Result<BuilderConfig> {
    let presets = load_presets_file(presets_file)?;

    let preset = project_name
        .and_then(|k| presets.get(k))
        .cloned()
        .unwrap_or_default();

    if let Some(name) = project_name.filter(|k| presets.contains_key(*k)) {
        log::debug!("Applying preset '{}' from {:?}", name, presets_file);
    }

    Ok(build_config(preset))
}

/// Resolves the configuration from `~/.config/filter_sync/presets.toml`.
pub fn resolve_config(project_name: Option<&str>) -> Result<BuilderConfig> {
    match presets_path() {
        Some(path) => resolve_config_from(&path, project_name),
        None => {
            log::debug!("No home directory, using built-in defaults");
            Ok(BuilderConfig::default())
        }
    }
}
