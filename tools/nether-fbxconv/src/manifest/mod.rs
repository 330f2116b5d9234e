//! Material manifest resolution
//!
//! The manifest is a text file next to the input asset (same name, `.txt`
//! extension) listing, for every material, the textures it uses:
//!
//! ```text
//! 101
//! N:\FRPG\Material\P[DSB]_Alp.mtd
//! N:\FRPG\data\Model\chr\c1010\tex\c1010_body_diffuse.tif
//! N:\FRPG\data\Model\chr\c1010\tex\c1010_body_normal.tif
//! 102
//! tex\c1010_eye_diffuse.tif
//! ```
//!
//! - An all-digit line starts a new material group keyed by that id.
//! - A `.mtd` line replaces the current group with an empty one keyed by the
//!   material file's stem; the numeric key and its textures are dropped.
//! - A `.tif` line adds a texture to the current group. The slot is the
//!   suffix after the last `_` of the file name; unknown slots are skipped and
//!   the first texture for a slot wins.
//! - Any other extension makes the whole manifest invalid.
//!
//! Textures listed before the first id go to the group keyed `""`.

mod line;


pub use line::{classify, ManifestLine, TextureRef, MATERIAL_EXTENSION, TEXTURE_EXTENSION};

use std::borrow::Cow;
use std::path::PathBuf;

use crate::config::ConvDefaults;
use crate::error::{ConvError, ConvResult};
use crate::settings::{Settings, TextureSlots, TexturePaths};

/// Parser state carried from one line to the next
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestState {
    /// Key of the group started by the most recent all-digit line, `""`
    /// before the first one
    pub last_group: String,
    /// Set once the current group has been renamed by a `.mtd` line
    pub rename_target: Option<String>,
}

impl ManifestState {
    /// Group that texture lines currently attach to
    pub fn active_group(&self) -> &str {
        self.rename_target.as_deref().unwrap_or(&self.last_group)
    }
}

/// Resolves one manifest into texture paths
pub struct ManifestParser<'a> {
    path: PathBuf,
    texture_load_dir: &'a str,
    defaults: &'a ConvDefaults,
}

impl<'a> ManifestParser<'a> {
    pub fn new(
        path: impl Into<PathBuf>,
        texture_load_dir: &'a str,
        defaults: &'a ConvDefaults,
    ) -> Self {
        Self {
            path: path.into(),
            texture_load_dir,
            defaults,
        }
    }

    /// Read and parse the manifest file
    pub fn parse_file(&self) -> ConvResult<TexturePaths> {
        let bytes = std::fs::read(&self.path).map_err(|source| ConvError::ManifestUnreadable {
            path: self.path.clone(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            tracing::warn!(
                "Texture manifest {} is not valid UTF-8, invalid bytes replaced",
                self.path.display()
            );
        }
        self.parse_str(&content)
    }

    /// Parse manifest text. Fails on the first malformed line.
    pub fn parse_str(&self, content: &str) -> ConvResult<TexturePaths> {
        tracing::info!("Texture directory: {}", self.texture_load_dir);

        let mut groups = TexturePaths::new();
        content
            .lines()
            .enumerate()
            .try_fold(ManifestState::default(), |state, (index, text)| {
                self.step(state, &mut groups, index + 1, text)
            })?;

        for (group, slots) in &groups {
            tracing::info!("Material {}: {} texture(s)", group, slots.len());
        }
        Ok(groups)
    }

    /// Apply one line (1-based `number`) and return the next state
    pub fn step(
        &self,
        mut state: ManifestState,
        groups: &mut TexturePaths,
        number: usize,
        text: &str,
    ) -> ConvResult<ManifestState> {
        let Some(line) = classify(text) else {
            return Ok(state);
        };

        match line {
            ManifestLine::Group(id) => {
                tracing::debug!("Material group {}", id);
                groups.entry(id.to_string()).or_default();
                state.last_group = id.to_string();
                state.rename_target = None;
            }
            ManifestLine::Material(name) => {
                tracing::debug!("Texture paths stored in material file: {}", text.trim());
                rename_group(groups, &state.last_group, name);
                state.rename_target = Some(name.to_string());
            }
            ManifestLine::Texture(texture) => {
                self.add_texture(groups, state.active_group(), &texture);
            }
            ManifestLine::Malformed => return Err(self.format_error(number, text)),
        }

        Ok(state)
    }

    fn add_texture(&self, groups: &mut TexturePaths, group: &str, texture: &TextureRef<'_>) {
        let Some(token) = texture
            .type_token
            .filter(|token| self.defaults.is_texture_type(token))
        else {
            tracing::debug!("Skipping {}: no known texture type", texture.stem);
            return;
        };

        let slots = groups.entry(group.to_string()).or_default();
        if let Some(existing) = slots.get(token) {
            tracing::debug!(
                "Skipping {}: {} {} already set to {}",
                texture.stem,
                group,
                token,
                existing
            );
            return;
        }

        let resolved = texture.resolve(self.texture_load_dir, &self.defaults.texture_extension);
        tracing::debug!("{} {} -> {}", group, token, resolved);
        slots.insert(token.to_string(), resolved);
    }

    fn format_error(&self, number: usize, text: &str) -> ConvError {
        ConvError::ManifestFormatError {
            path: self.path.clone(),
            line: number,
            text: text.trim().to_string(),
        }
    }
}

/// Replace the group keyed `old` by an empty group keyed `new`.
///
/// The new group is inserted first and only then is `old` removed. Nothing
/// carries over: slots of `old`, or of an earlier group already keyed `new`,
/// are dropped. Renaming a group to its own key empties it.
pub fn rename_group(groups: &mut TexturePaths, old: &str, new: &str) {
    groups.insert(new.to_string(), TextureSlots::new());
    if old != new {
        groups.remove(old);
    }
}

/// Resolve the manifest next to `settings.in_file` into texture paths
pub fn load_texture_paths(
    settings: &Settings,
    defaults: &ConvDefaults,
) -> ConvResult<TexturePaths> {
    let path = settings.manifest_path(defaults);
    ManifestParser::new(path, &settings.texture_load_dir, defaults).parse_file()
}
