//! Error types for caffe-normalizer
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Main error type for Caffe net operations
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// Invalid net structure
    #[error("Invalid net: {0}")]
    InvalidNet(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// File extension maps to no known encoding
    #[error("Unknown file extension: '{0}' (expected .caffemodel or .prototxt)")]
    UnknownExtension(String),

    /// Net validation failed
    #[error("Net validation failed: {0}")]
    ValidationFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Protobuf decode error
    #[error("Protobuf decode error: {0}")]
    ProtoDecode(#[from] prost::DecodeError),

    /// Protobuf encode error
    #[error("Protobuf encode error: {0}")]
    ProtoEncode(#[from] prost::EncodeError),

    /// Prototxt parse error
    #[error("Prototxt parse error: {0}")]
    TextParse(#[from] prost_reflect::text_format::ParseError),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Caffe net operations
pub type CaffeResult<T> = Result<T, NormalizeError>;
