//! Conversion settings handed to the conversion engine

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::ConvDefaults;
use crate::file_type::FileType;

/// Texture type token (e.g. `diffuse`) -> resolved texture path
pub type TextureSlots = BTreeMap<String, String>;

/// Group key (material id or `.mtd` stem) -> texture slots
pub type TexturePaths = BTreeMap<String, TextureSlots>;

/// Validated conversion settings.
///
/// Built from [`ConvDefaults`], filled in by argument parsing and the
/// material manifest, then passed on by value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub in_file: PathBuf,
    /// Empty until supplied or derived from `in_file`
    pub out_file: PathBuf,
    /// Prefix prepended to every resolved texture path
    pub texture_load_dir: String,
    pub in_type: FileType,
    pub out_type: FileType,
    pub flip_v: bool,
    pub pack_colors: bool,
    pub verbose: bool,
    pub max_node_part_bones_count: i32,
    pub max_vertex_bones_count: i32,
    pub max_vertex_count: i32,
    pub max_index_count: i32,
    pub texture_paths: TexturePaths,
}

impl Settings {
    /// Settings with nothing but the defaults applied
    pub fn new(defaults: &ConvDefaults) -> Self {
        Self {
            in_file: PathBuf::new(),
            out_file: PathBuf::new(),
            texture_load_dir: String::new(),
            in_type: FileType::Auto,
            out_type: FileType::Auto,
            flip_v: false,
            pack_colors: false,
            verbose: false,
            max_node_part_bones_count: defaults.max_node_part_bones,
            max_vertex_bones_count: defaults.max_vertex_bones,
            max_vertex_count: defaults.max_vertex_count,
            max_index_count: defaults.max_vertex_count,
            texture_paths: TexturePaths::new(),
        }
    }

    /// Path of the material manifest next to the input file
    pub fn manifest_path(&self, defaults: &ConvDefaults) -> PathBuf {
        self.in_file.with_extension(&defaults.manifest_extension)
    }

    /// Number of texture entries across all groups
    pub fn texture_count(&self) -> usize {
        self.texture_paths.values().map(|slots| slots.len()).sum()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(&ConvDefaults::default())
    }
}

/// Output path derived from the input: `<stem><suffix>.<extension>` in the
/// input's directory.
pub fn derive_output_file(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = if extension.is_empty() {
        format!("{stem}{suffix}")
    } else {
        format!("{stem}{suffix}.{extension}")
    };
    input.with_file_name(name)
}
