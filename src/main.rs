use std::path::PathBuf;

use anyhow::{ Context, Result };
use clap::Parser;
use log::info;

use glass_refraction::config::{ TaskConfig, VideoFormat };
use glass_refraction::generator::TaskGenerator;

/// Generates refraction tasks: before/after images, an optional animation and
/// a prompt for each sample.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// JSON config file. Missing fields use defaults.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Number of tasks to generate.
    #[clap(short = 'n', long)]
    num_samples: Option<usize>,

    /// Seed for reproducible output.
    #[clap(long)]
    seed: Option<u64>,

    /// Output directory.
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Skip animation rendering and encoding.
    #[clap(long)]
    no_videos: bool,

    /// Animation format: mp4 (needs ffmpeg) or gif.
    #[clap(long, possible_values = &["mp4", "gif"])]
    format: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => TaskConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => TaskConfig::default(),
    };

    if let Some(n) = args.num_samples {
        config.num_samples = n;
    }
    if args.seed.is_some() {
        config.random_seed = args.seed;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if args.no_videos {
        config.generate_videos = false;
    }
    match args.format.as_deref() {
        Some("gif") => config.video_format = VideoFormat::Gif,
        Some(_) => config.video_format = VideoFormat::Mp4,
        None => {},
    }

    let mut generator = TaskGenerator::new(config)
        .context("invalid configuration")?;
    let count = generator.generate_dataset()
        .context("generating dataset")?;

    info!("Wrote {} tasks to {}", count, generator.config.output_dir.display());
    Ok(())
}
