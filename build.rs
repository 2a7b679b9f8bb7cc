//! Build script for caffe-normalizer
//!
//! Generates Rust code from the vendored Caffe protobuf definitions using
//! prost-build, and writes a file descriptor set so the prototxt codec can
//! drive prost-reflect from the same schema.

use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_path = PathBuf::from("proto/caffe.proto");

    // Verify proto file exists
    if !proto_path.exists() {
        return Err(format!(
            "Caffe proto file not found at: {}\n\
             Please ensure proto/caffe.proto exists.",
            proto_path.display()
        )
        .into());
    }

    // Get output directory from cargo
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    // Configure prost-build
    let mut config = prost_build::Config::new();

    // Set output directory
    config.out_dir(&out_dir);

    // The text-format codec loads this descriptor set at runtime
    config.file_descriptor_set_path(out_dir.join("caffe_descriptor.bin"));

    // Compile Caffe proto
    config.compile_protos(&[&proto_path], &["proto/"])?;

    // Tell cargo to rerun if proto files change
    println!("cargo:rerun-if-changed=proto/caffe.proto");
    println!("cargo:rerun-if-changed=build.rs");

    Ok(())
}
