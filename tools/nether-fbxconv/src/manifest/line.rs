//! Classification of single manifest lines

/// Extension of material definition references (rename the current group)
pub const MATERIAL_EXTENSION: &str = "mtd";

/// Extension of texture references
pub const TEXTURE_EXTENSION: &str = "tif";

const SEPARATORS: &[char] = &['/', '\\'];

/// One non-blank manifest line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestLine<'a> {
    /// All-digit line: starts a new material group
    Group(&'a str),
    /// `.mtd` reference: the current group takes this stem as its key
    Material(&'a str),
    /// `.tif` reference
    Texture(TextureRef<'a>),
    /// Any other extension, or no extension at all
    Malformed,
}

/// Parts of a `.tif` reference needed to resolve it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureRef<'a> {
    /// Last path separator of the reference, if it has one
    pub separator: Option<char>,
    /// File name without extension (`char_101_diffuse`)
    pub stem: &'a str,
    /// Text after the last `_` of the stem (`diffuse`)
    pub type_token: Option<&'a str>,
}

impl TextureRef<'_> {
    /// `dir` + separator + stem + `.extension`
    ///
    /// A reference without a directory is joined with `/`.
    pub fn resolve(&self, dir: &str, extension: &str) -> String {
        let separator = self.separator.unwrap_or('/');
        format!("{dir}{separator}{}.{extension}", self.stem)
    }
}

/// Classify a raw manifest line. Returns `None` for blank lines.
pub fn classify(line: &str) -> Option<ManifestLine<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if line.bytes().all(|b| b.is_ascii_digit()) {
        return Some(ManifestLine::Group(line));
    }

    let Some(dot) = line.rfind('.') else {
        return Some(ManifestLine::Malformed);
    };
    let separator = line.rfind(SEPARATORS);
    // A dot inside a directory name leaves a separator in the extension,
    // which never matches below, so a match always has dot >= name_start.
    let name_start = separator.map_or(0, |pos| pos + 1);
    let extension = &line[dot + 1..];

    let classified = match extension {
        MATERIAL_EXTENSION => ManifestLine::Material(&line[name_start..dot]),
        TEXTURE_EXTENSION => {
            let stem = &line[name_start..dot];
            ManifestLine::Texture(TextureRef {
                separator: separator.and_then(|pos| line[pos..].chars().next()),
                stem,
                type_token: stem.rfind('_').map(|pos| &stem[pos + 1..]),
            })
        }
        _ => ManifestLine::Malformed,
    };
    Some(classified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("   \r"), None);
    }

    #[test]
    fn test_group_line() {
        assert_eq!(classify("101"), Some(ManifestLine::Group("101")));
        assert_eq!(classify(" 007\r"), Some(ManifestLine::Group("007")));
        assert_eq!(classify("10a"), Some(ManifestLine::Malformed));
    }

    #[test]
    fn test_material_line() {
        assert_eq!(
            classify("mat/shader.mtd"),
            Some(ManifestLine::Material("shader"))
        );
        assert_eq!(
            classify("N:\\FRPG\\Material\\P[DSB]_Alp.mtd"),
            Some(ManifestLine::Material("P[DSB]_Alp"))
        );
        assert_eq!(classify("plain.mtd"), Some(ManifestLine::Material("plain")));
        assert_eq!(classify("mat/.mtd"), Some(ManifestLine::Material("")));
        assert_eq!(classify(".mtd"), Some(ManifestLine::Material("")));
    }

    #[test]
    fn test_material_extension_is_case_sensitive() {
        assert_eq!(classify("mat/shader.MTD"), Some(ManifestLine::Malformed));
        assert_eq!(classify("tex/a_diffuse.TIF"), Some(ManifestLine::Malformed));
    }

    #[test]
    fn test_texture_line() {
        assert_eq!(
            classify("tex/char_101_diffuse.tif"),
            Some(ManifestLine::Texture(TextureRef {
                separator: Some('/'),
                stem: "char_101_diffuse",
                type_token: Some("diffuse"),
            }))
        );
        assert_eq!(
            classify("C:\\tex\\rock_normal.tif"),
            Some(ManifestLine::Texture(TextureRef {
                separator: Some('\\'),
                stem: "rock_normal",
                type_token: Some("normal"),
            }))
        );
    }

    #[test]
    fn test_texture_type_token_only_from_file_name() {
        assert_eq!(
            classify("tex_dir/diffuse.tif"),
            Some(ManifestLine::Texture(TextureRef {
                separator: Some('/'),
                stem: "diffuse",
                type_token: None,
            }))
        );
    }

    #[test]
    fn test_other_extensions_are_malformed() {
        assert_eq!(classify("tex/a_diffuse.png"), Some(ManifestLine::Malformed));
        assert_eq!(classify("no_extension"), Some(ManifestLine::Malformed));
        assert_eq!(classify("dir.tif/file"), Some(ManifestLine::Malformed));
    }

    #[test]
    fn test_resolve() {
        let texture = TextureRef {
            separator: Some('\\'),
            stem: "rock_normal",
            type_token: Some("normal"),
        };
        assert_eq!(texture.resolve("D:\\out", "tga"), "D:\\out\\rock_normal.tga");

        let bare = TextureRef {
            separator: None,
            stem: "rock_normal",
            type_token: Some("normal"),
        };
        assert_eq!(bare.resolve("textures", "tga"), "textures/rock_normal.tga");
    }
}
