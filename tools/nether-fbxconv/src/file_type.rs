//! Asset file types understood by the converter

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Source or destination asset format.
///
/// `Auto` means "not decided yet"; validation replaces it with a concrete
/// type inferred from the file extension where possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    #[default]
    Auto,
    Fbx,
    /// Binary G3D
    G3db,
    /// JSON G3D
    G3dj,
}

impl FileType {
    /// Match a type token (`fbx`, `g3db`, `g3dj`), ignoring ASCII case
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("fbx") {
            Some(FileType::Fbx)
        } else if token.eq_ignore_ascii_case("g3db") {
            Some(FileType::G3db)
        } else if token.eq_ignore_ascii_case("g3dj") {
            Some(FileType::G3dj)
        } else {
            None
        }
    }

    /// Infer the type from the text after the last `.` of `path`.
    ///
    /// Returns `default` when there is no extension or it names no known type.
    pub fn infer(path: &str, default: FileType) -> FileType {
        path.rfind('.')
            .and_then(|dot| Self::from_token(&path[dot + 1..]))
            .unwrap_or(default)
    }

    /// Same as [`FileType::infer`] for filesystem paths
    pub fn infer_path(path: &Path, default: FileType) -> FileType {
        path.to_str()
            .map(|p| Self::infer(p, default))
            .unwrap_or(default)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Auto => write!(f, "auto"),
            FileType::Fbx => write!(f, "FBX"),
            FileType::G3db => write!(f, "G3DB"),
            FileType::G3dj => write!(f, "G3DJ"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_case_insensitive() {
        assert_eq!(FileType::from_token("fbx"), Some(FileType::Fbx));
        assert_eq!(FileType::from_token("G3DB"), Some(FileType::G3db));
        assert_eq!(FileType::from_token("g3Dj"), Some(FileType::G3dj));
        assert_eq!(FileType::from_token("obj"), None);
        assert_eq!(FileType::from_token(""), None);
    }

    #[test]
    fn test_infer_uses_last_extension() {
        assert_eq!(FileType::infer("model.g3dj", FileType::Auto), FileType::G3dj);
        assert_eq!(FileType::infer("a.fbx.g3db", FileType::Auto), FileType::G3db);
        assert_eq!(FileType::infer("dir/MODEL.FBX", FileType::Auto), FileType::Fbx);
    }

    #[test]
    fn test_infer_falls_back_to_default() {
        assert_eq!(FileType::infer("model", FileType::Auto), FileType::Auto);
        assert_eq!(FileType::infer("model.obj", FileType::Fbx), FileType::Fbx);
        assert_eq!(FileType::infer("model.", FileType::G3db), FileType::G3db);
    }
}
