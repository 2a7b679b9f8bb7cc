//! Caffe net reader
//!
//! Load nets from `.caffemodel` (binary) or `.prototxt` (text) files or
//! from raw bytes.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use prost::Message;
use prost_reflect::DynamicMessage;

use crate::error::{CaffeResult, NormalizeError};
use crate::graph::NetIndex;
use crate::io::NetFormat;
use crate::proto::{net_descriptor, NetParameter};

/// Load a net from a file path, choosing the decoder by extension
///
/// # Example
///
/// ```ignore
/// use caffe_normalizer::io::load_net;
///
/// let net = load_net("deploy.prototxt")?;
/// println!("Net name: {}", net.name());
/// ```
pub fn load_net<P: AsRef<Path>>(path: P) -> CaffeResult<NetParameter> {
    let path = path.as_ref();
    match NetFormat::from_path(path)? {
        NetFormat::Binary => load_net_binary(path),
        NetFormat::Text => load_net_text(path),
    }
}

/// Load a net from a binary `.caffemodel` file
pub fn load_net_binary<P: AsRef<Path>>(path: P) -> CaffeResult<NetParameter> {
    let bytes = read_file(path.as_ref())?;
    net_from_bytes(&bytes)
}

/// Load a net from a text `.prototxt` file
pub fn load_net_text<P: AsRef<Path>>(path: P) -> CaffeResult<NetParameter> {
    let bytes = read_file(path.as_ref())?;
    let text = String::from_utf8(bytes).map_err(|e| {
        NormalizeError::InvalidNet(format!(
            "File '{}' is not valid UTF-8: {}",
            path.as_ref().display(),
            e
        ))
    })?;
    net_from_text(&text)
}

/// Decode a net from binary protobuf bytes
pub fn net_from_bytes(bytes: &[u8]) -> CaffeResult<NetParameter> {
    NetParameter::decode(bytes)
        .map_err(|e| NormalizeError::InvalidNet(format!("Failed to decode caffemodel: {}", e)))
}

/// Parse a net from protobuf text format
pub fn net_from_text(text: &str) -> CaffeResult<NetParameter> {
    let dynamic = DynamicMessage::parse_text_format(net_descriptor(), text)?;
    let net = dynamic.transcode_to::<NetParameter>()?;
    Ok(net)
}

fn read_file(path: &Path) -> CaffeResult<Vec<u8>> {
    let file = File::open(path).map_err(|e| {
        NormalizeError::InvalidNet(format!("Failed to open file '{}': {}", path.display(), e))
    })?;

    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();

    reader.read_to_end(&mut buffer).map_err(|e| {
        NormalizeError::InvalidNet(format!("Failed to read file '{}': {}", path.display(), e))
    })?;

    Ok(buffer)
}

/// Net metadata extracted from a decoded net
#[derive(Debug, Clone)]
pub struct NetInfo {
    /// Net name
    pub name: String,
    /// Number of layers
    pub layer_count: usize,
    /// Blob names consumed but never produced (external inputs)
    pub inputs: Vec<String>,
    /// Blob names produced but never consumed (external outputs)
    pub outputs: Vec<String>,
}

impl NetInfo {
    /// Extract metadata from a net
    pub fn from_net(net: &NetParameter) -> Self {
        let index = NetIndex::new(net);

        Self {
            name: net.name().to_string(),
            layer_count: net.layer.len(),
            inputs: index
                .external_inputs()
                .into_iter()
                .map(str::to_string)
                .collect(),
            outputs: index
                .external_outputs()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Get net information from a file
pub fn get_net_info<P: AsRef<Path>>(path: P) -> CaffeResult<NetInfo> {
    let net = load_net(path)?;
    Ok(NetInfo::from_net(&net))
}
