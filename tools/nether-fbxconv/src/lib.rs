//! nether-fbxconv library
//!
//! Builds the settings for an FBX conversion from the command line and
//! resolves each material's textures from the manifest stored next to the
//! input model.

pub mod command;
pub mod config;
pub mod error;
pub mod file_type;
pub mod manifest;
pub mod settings;

pub use command::{help_text, parse_args, parse_flags, validate, Invocation};
pub use config::ConvDefaults;
pub use error::{ConvError, ConvResult};
pub use file_type::FileType;
pub use manifest::{load_texture_paths, ManifestParser, ManifestState};
pub use settings::{Settings, TexturePaths};
