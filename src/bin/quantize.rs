use clap::Parser;
use std::fs;
use std::path::PathBuf;
use image_quantize_wasm::{DEFAULT_K, DEFAULT_MAX_ITERATIONS, MAX_KMEANS_PIXELS, QuantizeOptions, quantize_bytes};
use anyhow::Context;
use anyhow::Result;
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Reduce images to a small k-means palette (native wrapper).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of palette colors
    #[arg(short = 'k', long, default_value_t = DEFAULT_K)]
    n_colors: usize,

    /// Pixel budget for the k-means sample (0 clusters at full resolution)
    #[arg(short, long, default_value_t = MAX_KMEANS_PIXELS)]
    max_pixels: usize,

    /// Stop k-means after this many passes even if it has not converged (0 runs until convergence)
    #[arg(short = 'i', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Output directory
    #[arg(short = 'd', long)]
    out_dir: Option<PathBuf>,

    /// Output filename prefix (ignored when --out-dir supplied)
    #[arg(short = 'p', long, default_value = "quantized_")]
    prefix: String,

    /// Print one JSON record per input instead of plain text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let options = QuantizeOptions {
        k: args.n_colors,
        max_pixels: Some(args.max_pixels),
        max_iterations: (args.max_iterations > 0).then_some(args.max_iterations),
    };

    for input in &args.inputs {
        let bytes = fs::read(input)
            .with_context(|| format!("reading {}", input.display()))?;
        let (png, palette) = quantize_bytes(&bytes, &options)
            .with_context(|| format!("quantizing {}", input.display()))?;

        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let out_path = if let Some(dir) = &args.out_dir {
            dir.join(format!("{stem}.png"))
        } else {
            input.with_file_name(format!("{}{}.png", args.prefix, stem))
        };

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out_path, png)?;

        if args.json {
            let record = json!({
                "input": input.display().to_string(),
                "output": out_path.display().to_string(),
                "palette": palette,
            });
            println!("{record}");
        } else {
            println!("Saved → {} [{}]", out_path.display(), palette.join(", "));
        }
    }

    Ok(())
}
