//! Caffe net writer
//!
//! Save nets to `.caffemodel` (binary) or `.prototxt` (text) files or
//! encode them in memory.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use prost::Message;
use prost_reflect::text_format::FormatOptions;
use prost_reflect::DynamicMessage;

use crate::error::{CaffeResult, NormalizeError};
use crate::io::NetFormat;
use crate::proto::{net_descriptor, NetParameter};

/// Save a net to a file, choosing the encoder by extension
///
/// # Example
///
/// ```ignore
/// use caffe_normalizer::io::save_net;
///
/// save_net(&net, "output/optimized.prototxt")?;
/// ```
pub fn save_net<P: AsRef<Path>>(net: &NetParameter, path: P) -> CaffeResult<()> {
    let path = path.as_ref();
    match NetFormat::from_path(path)? {
        NetFormat::Binary => save_net_binary(net, path),
        NetFormat::Text => save_net_text(net, path),
    }
}

/// Save a net as binary protobuf
pub fn save_net_binary<P: AsRef<Path>>(net: &NetParameter, path: P) -> CaffeResult<()> {
    write_file(path.as_ref(), &net.encode_to_vec())
}

/// Save a net in protobuf text format
pub fn save_net_text<P: AsRef<Path>>(net: &NetParameter, path: P) -> CaffeResult<()> {
    let text = net_to_text(net)?;
    write_file(path.as_ref(), text.as_bytes())
}

/// Encode a net to binary protobuf bytes
pub fn net_to_bytes(net: &NetParameter) -> Vec<u8> {
    net.encode_to_vec()
}

/// Render a net in protobuf text format (pretty, multi-line)
pub fn net_to_text(net: &NetParameter) -> CaffeResult<String> {
    let bytes = net.encode_to_vec();
    let dynamic = DynamicMessage::decode(net_descriptor(), bytes.as_slice())?;
    Ok(dynamic.to_text_format_with_options(&FormatOptions::new().pretty(true)))
}

/// Size in bytes of the binary encoding
pub fn net_size(net: &NetParameter) -> usize {
    net.encoded_len()
}

fn write_file(path: &Path, bytes: &[u8]) -> CaffeResult<()> {
    let file = File::create(path).map_err(|e| {
        NormalizeError::InvalidNet(format!("Failed to create file '{}': {}", path.display(), e))
    })?;

    let mut writer = BufWriter::new(file);

    writer.write_all(bytes).map_err(|e| {
        NormalizeError::InvalidNet(format!("Failed to write file '{}': {}", path.display(), e))
    })?;

    writer.flush().map_err(|e| {
        NormalizeError::InvalidNet(format!("Failed to flush file '{}': {}", path.display(), e))
    })?;

    Ok(())
}
