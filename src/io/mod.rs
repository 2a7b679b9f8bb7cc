//! Caffe net I/O module
//!
//! Loading, saving, and validating nets in both on-disk encodings, plus the
//! one-shot file normalization pipeline.
//!
//! # Example
//!
//! ```ignore
//! use caffe_normalizer::io::{load_net, normalize_file, save_net, NormalizeOptions};
//!
//! // Load and save
//! let net = load_net("deploy.prototxt")?;
//! save_net(&net, "copy.prototxt")?;
//!
//! // One-shot normalization
//! let stats = normalize_file("deploy.prototxt", "output", &NormalizeOptions::default())?;
//! println!("Renamed {} tops", stats.transform.tops_renamed);
//! ```

pub mod reader;
pub mod validation;
pub mod writer;

// Re-exports
pub use reader::{
    get_net_info, load_net, load_net_binary, load_net_text, net_from_bytes, net_from_text, NetInfo,
};
pub use validation::{check_net, validate_net, ValidationResult};
pub use writer::{net_size, net_to_bytes, net_to_text, save_net, save_net_binary, save_net_text};

use std::path::{Path, PathBuf};

use crate::error::{CaffeResult, NormalizeError};
use crate::transformers::{normalize_net, TransformResult};

/// On-disk encoding of a net, determined by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetFormat {
    /// Binary protobuf (`.caffemodel`)
    Binary,
    /// Protobuf text format (`.prototxt`)
    Text,
}

impl NetFormat {
    /// Determine the encoding from a file path (case-insensitive extension)
    pub fn from_path<P: AsRef<Path>>(path: P) -> CaffeResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "caffemodel" => Ok(NetFormat::Binary),
            "prototxt" => Ok(NetFormat::Text),
            _ => Err(NormalizeError::UnknownExtension(
                path.display().to_string(),
            )),
        }
    }

    /// Output file name used for this encoding
    pub fn output_file_name(&self) -> &'static str {
        match self {
            NetFormat::Binary => "optimized.caffemodel",
            NetFormat::Text => "optimized.prototxt",
        }
    }

    /// Suffix for the per-input rename log file
    pub fn log_suffix(&self) -> &'static str {
        match self {
            NetFormat::Binary => "_model.log",
            NetFormat::Text => "_prototxt.log",
        }
    }
}

/// Options for file normalization
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Fail on structural validation errors before normalizing
    pub validate: bool,
    /// Copy the input through byte-identical when nothing was renamed
    pub copy_unmodified: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            validate: false,
            copy_unmodified: true,
        }
    }
}

/// Normalization statistics for one file
#[derive(Debug, Clone)]
pub struct NormalizeStats {
    /// Number of layers in the net
    pub layers: usize,
    /// Whether any name was rewritten
    pub modified: bool,
    /// Path the result was written to
    pub output_path: PathBuf,
    /// Rename accounting from the pass
    pub transform: TransformResult,
}

/// Normalize a net file and write the result into `output_dir`
///
/// Loads the net, runs the top-name normalization pass, and either encodes
/// the mutated net to `optimized.caffemodel` / `optimized.prototxt` in
/// `output_dir`, or copies the input file through unchanged when the pass
/// reports no renames. The output directory must already exist.
pub fn normalize_file<P1: AsRef<Path>, P2: AsRef<Path>>(
    input: P1,
    output_dir: P2,
    options: &NormalizeOptions,
) -> CaffeResult<NormalizeStats> {
    let input = input.as_ref();
    let format = NetFormat::from_path(input)?;

    let mut net = load_net(input)?;

    if options.validate {
        check_net(&net)?;
    }

    let result = normalize_net(&mut net);
    let output_path = output_dir.as_ref().join(format.output_file_name());

    if result.modified() {
        save_net(&net, &output_path)?;
    } else if options.copy_unmodified {
        std::fs::copy(input, &output_path)?;
    }

    Ok(NormalizeStats {
        layers: net.layer.len(),
        modified: result.modified(),
        output_path,
        transform: result,
    })
}
