//! Caffe Protocol Buffer types
//!
//! This module re-exports the generated protobuf types from `prost-build`.
//! Additional extension methods are provided in the `extensions` submodule.
//! The descriptor pool backing the prototxt codec is exposed here as well,
//! since it is generated from the same schema.

use std::sync::OnceLock;

use prost_reflect::{DescriptorPool, MessageDescriptor};

/// Generated Caffe protobuf types
#[allow(missing_docs)]
#[allow(clippy::all)]
pub mod caffe {
    include!(concat!(env!("OUT_DIR"), "/caffe.rs"));
}

// Re-export commonly used types at module level
pub use caffe::{BlobProto, BlobShape, LayerParameter, NetParameter, NetState, NetStateRule};

/// Extension methods for Caffe protobuf types
pub mod extensions;

/// Serialized file descriptor set for the vendored schema, emitted by the
/// build script alongside the generated types.
const DESCRIPTOR_SET: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/caffe_descriptor.bin"));

/// Fully-qualified name of the net message in the vendored schema
pub const NET_MESSAGE_NAME: &str = "caffe.NetParameter";

/// Get the descriptor pool for the vendored Caffe schema
pub fn descriptor_pool() -> &'static DescriptorPool {
    static POOL: OnceLock<DescriptorPool> = OnceLock::new();
    POOL.get_or_init(|| {
        DescriptorPool::decode(DESCRIPTOR_SET)
            .expect("embedded caffe descriptor set must be valid")
    })
}

/// Get the message descriptor for `caffe.NetParameter`
pub fn net_descriptor() -> MessageDescriptor {
    descriptor_pool()
        .get_message_by_name(NET_MESSAGE_NAME)
        .expect("caffe.NetParameter must exist in the embedded descriptor set")
}
