//! Error types for argument parsing, validation and manifest resolution

use std::path::PathBuf;

/// Errors reported while building conversion settings.
///
/// Every variant is fatal: the first one encountered stops parsing and the
/// conversion engine is never invoked.
#[derive(Debug, thiserror::Error)]
pub enum ConvError {
    /// Flag not recognized (or missing its value)
    #[error("unknown command line option: {0}")]
    UnknownOption(String),

    /// More positional arguments than input, texture directory and output
    #[error("unexpected command line argument: {0}")]
    UnknownArgument(String),

    /// Input file or texture load directory not supplied
    #[error("missing input file or texture load directory")]
    MissingInputFile,

    /// Bone weights per vertex outside 0-8
    #[error("invalid bone weights per vertex: {0} (must be 0-8)")]
    InvalidVertexWeight(String),

    /// Bones per node part lower than bone weights per vertex
    #[error("invalid bones per node part: {node_part} (must be at least the {vertex} bone weights per vertex)")]
    InvalidBoneCount { node_part: String, vertex: i32 },

    /// Vertices per mesh outside 0-32767
    #[error("invalid vertex count: {0} (must be 0-32767)")]
    InvalidVertexCount(String),

    /// File type token other than fbx, g3db or g3dj
    #[error("unknown file type: {0} (use fbx, g3db or g3dj)")]
    UnknownFiletype(String),

    /// Material manifest could not be opened or read
    #[error("cannot open texture manifest {}: {source}", .path.display())]
    ManifestUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest line that is neither a material id, an .mtd nor a .tif reference
    #[error("texture manifest format error in {}:{line}: {text:?}", .path.display())]
    ManifestFormatError {
        path: PathBuf,
        line: usize,
        text: String,
    },
}

/// Result alias for settings construction
pub type ConvResult<T> = Result<T, ConvError>;
