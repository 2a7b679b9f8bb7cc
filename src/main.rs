//! Command-line front end for caffe-normalizer
//!
//! Normalizes the top/bottom naming of one or more Caffe nets. Each input
//! is processed independently; a file that fails to decode is reported and
//! skipped.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use caffe_normalizer::io::{
    get_net_info, load_net, normalize_file, validate_net, NetFormat, NormalizeOptions,
};

#[derive(Parser)]
#[command(name = "caffe-normalizer")]
#[command(
    about = "Deserialize, modify, and serialize back a Caffe model or prototxt file so that \
             every top name matches the layer that produces it"
)]
#[command(version)]
struct Args {
    /// Caffe model (.caffemodel) or prototxt (.prototxt) files to update
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output folder
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Write a per-input rename log into the output folder
    #[arg(short, long)]
    logging: bool,

    /// Show net info only, don't normalize
    #[arg(long)]
    info: bool,

    /// Validate nets only, don't normalize
    #[arg(long)]
    validate: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.info {
        for file in &args.files {
            if let Err(e) = print_info(file) {
                eprintln!("{} - {:#}", file.display(), e);
            }
        }
        return Ok(());
    }

    if args.validate {
        for file in &args.files {
            if let Err(e) = print_validation(file) {
                eprintln!("{} - {:#}", file.display(), e);
            }
        }
        return Ok(());
    }

    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating output dir {}", args.output.display()))?;

    let options = NormalizeOptions::default();
    let mut failures = 0usize;

    for file in &args.files {
        if let Err(e) = process_file(file, &args.output, &options, args.logging) {
            eprintln!("{} - {:#}", file.display(), e);
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} file(s) failed", args.files.len());
    }
    Ok(())
}

fn process_file(
    file: &Path,
    output_dir: &Path,
    options: &NormalizeOptions,
    logging: bool,
) -> Result<()> {
    let format = NetFormat::from_path(file)?;
    let stats = normalize_file(file, output_dir, options)?;

    if stats.modified {
        println!(
            "updating {} ({} layers): {} tops renamed, {} bottoms rewritten -> {}",
            file.display(),
            stats.layers,
            stats.transform.tops_renamed,
            stats.transform.bottoms_rewritten,
            stats.output_path.display()
        );

        if logging {
            let stem = file
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("net");
            let log_path = output_dir.join(format!("{stem}{}", format.log_suffix()));
            let mut log = String::new();
            for event in &stats.transform.events {
                log.push_str(&event.to_string());
                log.push('\n');
            }
            fs::write(&log_path, log)
                .with_context(|| format!("writing rename log {}", log_path.display()))?;
        }
    } else {
        println!("nothing to update in {}", file.display());
    }

    Ok(())
}

fn print_info(file: &Path) -> Result<()> {
    let info = get_net_info(file)?;
    println!("{}:", file.display());
    println!("  Name: {}", info.name);
    println!("  Layers: {}", info.layer_count);
    println!("  Inputs: {:?}", info.inputs);
    println!("  Outputs: {:?}", info.outputs);
    Ok(())
}

fn print_validation(file: &Path) -> Result<()> {
    let net = load_net(file)?;
    let result = validate_net(&net);

    if result.is_valid {
        println!("{}: net is valid", file.display());
    } else {
        println!("{}: net has errors:", file.display());
        for err in &result.errors {
            println!("  - {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("  warnings:");
        for warn in &result.warnings {
            println!("  - {}", warn);
        }
    }

    Ok(())
}
