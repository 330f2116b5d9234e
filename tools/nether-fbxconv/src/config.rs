//! fbxconv.toml defaults
//!
//! Every field is optional; anything left out keeps the built-in value.
//!
//! ```toml
//! max_node_part_bones = 12
//! max_vertex_bones = 4
//! max_vertex_count = 32767
//! output_suffix = "_mh"
//! output_extension = "fbx"
//! texture_types = ["diffuse", "normal", "specular"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Name of the optional defaults file looked up in the working directory
pub const DEFAULTS_FILE: &str = "fbxconv.toml";

/// Largest vertex or index count addressable with 16-bit indices
pub const MAX_VERTEX_COUNT: i32 = (1 << 15) - 1;

/// Largest number of bone weights a vertex may carry
pub const MAX_VERTEX_BONES: i32 = 8;

/// Defaults that argument parsing starts from
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvDefaults {
    /// Bones per node part (`-b`)
    #[serde(default = "default_max_node_part_bones")]
    pub max_node_part_bones: i32,

    /// Bone weights per vertex (`-w`)
    #[serde(default = "default_max_vertex_bones")]
    pub max_vertex_bones: i32,

    /// Vertices and indices per mesh (`-m`)
    #[serde(default = "default_max_vertex_count")]
    pub max_vertex_count: i32,

    /// Appended to the input stem when deriving the output file name
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Extension of the derived output file
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// Extension of the material manifest sitting next to the input
    #[serde(default = "default_manifest_extension")]
    pub manifest_extension: String,

    /// Extension given to resolved texture paths
    #[serde(default = "default_texture_extension")]
    pub texture_extension: String,

    /// Texture type suffixes kept from the manifest; others are skipped
    #[serde(default = "default_texture_types")]
    pub texture_types: Vec<String>,
}

fn default_max_node_part_bones() -> i32 {
    12
}

fn default_max_vertex_bones() -> i32 {
    4
}

fn default_max_vertex_count() -> i32 {
    MAX_VERTEX_COUNT
}

fn default_output_suffix() -> String {
    "_mh".to_string()
}

fn default_output_extension() -> String {
    "fbx".to_string()
}

fn default_manifest_extension() -> String {
    "txt".to_string()
}

fn default_texture_extension() -> String {
    "tga".to_string()
}

fn default_texture_types() -> Vec<String> {
    [
        "diffuse",
        "normal",
        "specular",
        "emissive",
        "ambient",
        "bump",
        "shininess",
        "reflection",
        "transparency",
        "height",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for ConvDefaults {
    fn default() -> Self {
        Self {
            max_node_part_bones: default_max_node_part_bones(),
            max_vertex_bones: default_max_vertex_bones(),
            max_vertex_count: default_max_vertex_count(),
            output_suffix: default_output_suffix(),
            output_extension: default_output_extension(),
            manifest_extension: default_manifest_extension(),
            texture_extension: default_texture_extension(),
            texture_types: default_texture_types(),
        }
    }
}

impl ConvDefaults {
    /// Load defaults from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read defaults: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid defaults file: {}", path.display()))
    }

    /// Parse defaults from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse fbxconv.toml")
    }

    /// Load `fbxconv.toml` from `dir` if it exists, built-in defaults otherwise
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(DEFAULTS_FILE);
        if path.is_file() {
            tracing::debug!("Loading defaults from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Whether `token` names a texture slot the converter understands
    pub fn is_texture_type(&self, token: &str) -> bool {
        self.texture_types.iter().any(|t| t == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_defaults() {
        let defaults = ConvDefaults::default();
        assert_eq!(defaults.max_node_part_bones, 12);
        assert_eq!(defaults.max_vertex_bones, 4);
        assert_eq!(defaults.max_vertex_count, 32767);
        assert_eq!(defaults.output_suffix, "_mh");
        assert!(defaults.is_texture_type("diffuse"));
        assert!(defaults.is_texture_type("normal"));
        assert!(!defaults.is_texture_type("albedo"));
    }

    #[test]
    fn test_partial_file_keeps_builtins() {
        let defaults = ConvDefaults::parse(
            r#"
max_vertex_bones = 2
texture_types = ["albedo"]
"#,
        )
        .unwrap();
        assert_eq!(defaults.max_vertex_bones, 2);
        assert_eq!(defaults.max_node_part_bones, 12);
        assert_eq!(defaults.texture_extension, "tga");
        assert!(defaults.is_texture_type("albedo"));
        assert!(!defaults.is_texture_type("diffuse"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ConvDefaults::parse("max_bones = 3").is_err());
    }

    #[test]
    fn test_discover_without_file() {
        let dir = tempdir().unwrap();
        let defaults = ConvDefaults::discover(dir.path()).unwrap();
        assert_eq!(defaults.output_extension, "fbx");
    }

    #[test]
    fn test_discover_with_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULTS_FILE), "output_suffix = \"_out\"\n").unwrap();
        let defaults = ConvDefaults::discover(dir.path()).unwrap();
        assert_eq!(defaults.output_suffix, "_out");
    }
}
