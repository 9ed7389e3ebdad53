//! Panorama CLI - equirectangular to cubemap converter.
//!
//! Converts a single panorama, or every JPEG/PNG in a directory, into
//! per-side cube face images.

use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

use panorama::batch::{convert_directory, convert_file, spinner, BatchError};
use panorama::{parse_faces, ConvertOptions};

/// Convert equirectangular panorama images to cubemap images.
#[derive(Parser)]
#[command(name = "panorama")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input image file path (required if --indir is not specified).
    #[arg(short = 'i', long = "in", conflicts_with = "indir", required_unless_present = "indir")]
    input: Option<PathBuf>,

    /// Input directory path (required if --in is not specified).
    #[arg(short = 'd', long)]
    indir: Option<PathBuf>,

    /// Output directory path [default: .].
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Edge length of a cube face in pixels [default: 1024].
    #[arg(short, long)]
    len: Option<u32>,

    /// Sides to render, comma separated: back,left,front,right,top,bottom [default: all].
    #[arg(short, long, value_delimiter = ',')]
    sides: Vec<String>,

    /// TOML file with conversion options; command line flags take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of images converted at once in directory mode [default: 10].
    #[arg(short, long)]
    jobs: Option<usize>,

    /// JPEG output quality, 1-100 [default: 75].
    #[arg(short, long)]
    quality: Option<u8>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Runs the conversion. Returns `Ok(false)` if some directory entries failed.
fn run(cli: Cli) -> Result<bool, BatchError> {
    let options = resolve_options(&cli)?;
    let start = Instant::now();

    if let Some(input) = &cli.input {
        let pb = spinner("Converting...", true);
        let result = convert_file(input, &options.output_dir, &options);
        match &result {
            Ok(_) => pb.finish_with_message("Complete converting!"),
            Err(_) => pb.abandon(),
        }
        result?;
        info!("Finished in {:.2?}", start.elapsed());
        return Ok(true);
    }

    let Some(indir) = &cli.indir else {
        // clap enforces one of --in / --indir
        return Ok(true);
    };

    let report = convert_directory(indir, &options, true)?;
    println!(
        "Processed {}/{} files in {:.2?}",
        report.converted,
        report.total,
        start.elapsed()
    );

    if !report.is_success() {
        println!("\nErrors:");
        for failure in &report.failures {
            println!("  {}: {}", failure.input.display(), failure.error);
        }
    }
    println!("\nProcessing complete.");

    Ok(report.is_success())
}

/// Merges the optional config file with command line overrides.
fn resolve_options(cli: &Cli) -> Result<ConvertOptions, BatchError> {
    let mut options = match &cli.config {
        Some(path) => ConvertOptions::load_from_file(path)?,
        None => ConvertOptions::default(),
    };

    if let Some(out) = &cli.out {
        options.output_dir = out.clone();
    }
    if let Some(len) = cli.len {
        options.edge_length = len;
    }
    if !cli.sides.is_empty() {
        options.faces = parse_faces(&cli.sides)?;
    }
    if let Some(jobs) = cli.jobs {
        options.max_concurrent_files = jobs;
    }
    if let Some(quality) = cli.quality {
        options.jpeg_quality = quality;
    }

    options.validate()?;
    Ok(options)
}
