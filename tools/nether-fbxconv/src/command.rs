//! Command line parsing and settings validation

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::{ConvDefaults, MAX_VERTEX_BONES, MAX_VERTEX_COUNT};
use crate::error::{ConvError, ConvResult};
use crate::file_type::FileType;
use crate::manifest::load_texture_paths;
use crate::settings::{derive_output_file, Settings};

/// Command line of nether-fbxconv
#[derive(Parser, Debug)]
#[command(name = "nether-fbxconv")]
#[command(about = "Convert FBX models, resolving material textures from the sibling .txt manifest")]
#[command(disable_help_flag = true, args_override_self = true)]
#[command(after_help = "<TYPE>: FBX, G3DJ (json) or G3DB (binary).")]
pub struct Cli {
    /// Display this help information
    #[arg(short = '?', action = ArgAction::Help)]
    help: Option<bool>,

    /// Set the type of the input file to <TYPE>
    #[arg(short = 'i', value_name = "TYPE", value_parser = file_type_token)]
    in_type: Option<FileType>,

    /// Set the type of the output file to <TYPE>
    #[arg(short = 'o', value_name = "TYPE", value_parser = file_type_token)]
    out_type: Option<FileType>,

    /// Flip the V texture coordinates
    #[arg(short = 'f')]
    flip_v: bool,

    /// Pack vertex colors to one float
    #[arg(short = 'p')]
    pack_colors: bool,

    /// The maximum amount of vertices or indices a mesh may contain (default: 32k)
    #[arg(short = 'm', value_name = "SIZE", allow_negative_numbers = true)]
    max_vertex_count: Option<i32>,

    /// The maximum amount of bones a nodepart can contain (default: 12)
    #[arg(short = 'b', value_name = "SIZE", allow_negative_numbers = true)]
    max_node_part_bones: Option<i32>,

    /// The maximum amount of bone weights per vertex (default: 4)
    #[arg(short = 'w', value_name = "SIZE", allow_negative_numbers = true)]
    max_vertex_bones: Option<i32>,

    /// Verbose: print additional progress information
    #[arg(short = 'v')]
    verbose: bool,

    /// The filename of the file to convert
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Directory prepended to every texture resolved from the manifest
    #[arg(value_name = "TEXTURE_DIR")]
    texture_dir: Option<String>,

    /// The filename of the converted file
    #[arg(value_name = "OUTPUT")]
    output: Option<String>,
}

/// What the command line asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// Print help and do not convert
    Help(String),
    /// Convert with these settings
    Convert(Settings),
}

/// Rendered help text
pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}

/// Parse the command line (program name first) and validate the result.
///
/// Validation resolves the texture manifest, so on success
/// `Settings::texture_paths` is filled in.
pub fn parse_args<I, T>(args: I, defaults: &ConvDefaults) -> ConvResult<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match parse_flags(args, defaults)? {
        Invocation::Convert(settings) => validate(settings, defaults).map(Invocation::Convert),
        other => Ok(other),
    }
}

/// Parse the command line without validating it.
///
/// Arguments are checked in order; the first bad flag, value or extra
/// positional is the error reported.
pub fn parse_flags<I, T>(args: I, defaults: &ConvDefaults) -> ConvResult<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() <= 1 {
        return Ok(Invocation::Help(help_text()));
    }

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) => return from_clap_error(err, defaults),
    };
    Ok(Invocation::Convert(cli.into_settings(defaults)))
}

impl Cli {
    fn into_settings(self, defaults: &ConvDefaults) -> Settings {
        let mut settings = Settings::new(defaults);
        settings.flip_v = self.flip_v;
        settings.pack_colors = self.pack_colors;
        settings.verbose = self.verbose;

        if let Some(file_type) = self.in_type {
            settings.in_type = file_type;
        }
        if let Some(file_type) = self.out_type {
            settings.out_type = file_type;
        }
        if let Some(count) = self.max_vertex_bones {
            settings.max_vertex_bones_count = count;
        }
        if let Some(count) = self.max_node_part_bones {
            settings.max_node_part_bones_count = count;
        }
        if let Some(count) = self.max_vertex_count {
            settings.max_vertex_count = count;
            settings.max_index_count = count;
        }

        settings.in_file = PathBuf::from(self.input.unwrap_or_default());
        settings.texture_load_dir = self.texture_dir.unwrap_or_default();
        settings.out_file = PathBuf::from(self.output.unwrap_or_default());
        settings
    }
}

/// Value parser for `-i`/`-o`
fn file_type_token(token: &str) -> Result<FileType, String> {
    FileType::from_token(token).ok_or_else(|| format!("unknown file type: {token}"))
}

fn from_clap_error(err: clap::Error, defaults: &ConvDefaults) -> ConvResult<Invocation> {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            Ok(Invocation::Help(err.render().to_string()))
        }
        ErrorKind::ValueValidation => Err(invalid_value(&err, defaults)),
        ErrorKind::UnknownArgument => {
            let arg = offending_arg(&err);
            if arg.starts_with('-') {
                Err(ConvError::UnknownOption(arg))
            } else {
                Err(ConvError::UnknownArgument(arg))
            }
        }
        // Missing or empty option values
        _ => Err(ConvError::UnknownOption(offending_arg(&err))),
    }
}

/// Map a rejected flag value to the error of the flag it was given to.
///
/// `-b` is checked before `-w` has been applied, so the reported weight count
/// is the default.
fn invalid_value(err: &clap::Error, defaults: &ConvDefaults) -> ConvError {
    let value = match err.get(ContextKind::InvalidValue) {
        Some(ContextValue::String(value)) => value.clone(),
        _ => String::new(),
    };
    match offending_arg(err).as_str() {
        "-w" => ConvError::InvalidVertexWeight(value),
        "-b" => ConvError::InvalidBoneCount {
            node_part: value,
            vertex: defaults.max_vertex_bones,
        },
        "-m" => ConvError::InvalidVertexCount(value),
        _ => ConvError::UnknownFiletype(value),
    }
}

/// The flag or argument clap complained about, without its value name
fn offending_arg(err: &clap::Error) -> String {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => arg
            .split_whitespace()
            .next()
            .unwrap_or(arg.as_str())
            .to_string(),
        _ => err.kind().to_string(),
    }
}

/// Check required fields, resolve the texture manifest, infer output name and
/// types, then check the numeric limits.
pub fn validate(mut settings: Settings, defaults: &ConvDefaults) -> ConvResult<Settings> {
    if settings.in_file.as_os_str().is_empty() || settings.texture_load_dir.is_empty() {
        return Err(ConvError::MissingInputFile);
    }

    settings.texture_paths = load_texture_paths(&settings, defaults)?;

    if settings.in_type == FileType::Auto {
        settings.in_type = FileType::infer_path(&settings.in_file, FileType::Fbx);
    }
    if settings.out_file.as_os_str().is_empty() {
        settings.out_file = derive_output_file(
            &settings.in_file,
            &defaults.output_suffix,
            &defaults.output_extension,
        );
    }
    if settings.out_type == FileType::Auto {
        settings.out_type = FileType::infer_path(&settings.out_file, FileType::Auto);
    }

    check_limits(&settings)?;
    Ok(settings)
}

fn check_limits(settings: &Settings) -> ConvResult<()> {
    let vertex_bones = settings.max_vertex_bones_count;
    if !(0..=MAX_VERTEX_BONES).contains(&vertex_bones) {
        return Err(ConvError::InvalidVertexWeight(vertex_bones.to_string()));
    }
    if settings.max_node_part_bones_count < vertex_bones {
        return Err(ConvError::InvalidBoneCount {
            node_part: settings.max_node_part_bones_count.to_string(),
            vertex: vertex_bones,
        });
    }
    if !(0..=MAX_VERTEX_COUNT).contains(&settings.max_vertex_count) {
        return Err(ConvError::InvalidVertexCount(
            settings.max_vertex_count.to_string(),
        ));
    }
    Ok(())
}
