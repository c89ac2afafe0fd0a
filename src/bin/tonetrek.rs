use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tonetrek::{Color, ExtractConfig, Palette, PaletteSession, loader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Rgb,
    Hex,
    Json,
}

/// Extract a representative color palette from images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Random pixel samples per extraction
    #[arg(short = 'n', long, default_value_t = tonetrek::SAMPLE_SIZE)]
    samples: usize,

    /// Number of swatches in the palette
    #[arg(short, long, default_value_t = tonetrek::PALETTE_SIZE)]
    size: usize,

    /// Filler color for slots nothing else can fill
    #[arg(long, default_value = "rgb(200,200,200)")]
    fallback: Color,

    /// Lock a slot to a color, e.g. `1=#ff0000` (repeatable)
    #[arg(short, long = "lock", value_parser = parse_lock)]
    locks: Vec<(usize, Color)>,

    /// Re-extract this many extra times, keeping locked slots
    #[arg(short, long, default_value_t = 0)]
    refresh: u32,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Rgb)]
    format: Format,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_lock(s: &str) -> Result<(usize, Color)> {
    let (slot, color) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected SLOT=COLOR, got `{s}`"))?;
    let slot = slot.trim().parse().context("invalid slot index")?;
    let color = color.parse().context("invalid lock color")?;
    Ok((slot, color))
}

fn render(palette: &Palette, format: Format) -> String {
    match format {
        Format::Rgb => palette.to_rgb_strings().join("\n"),
        Format::Hex => palette.to_hex_strings().join("\n"),
        Format::Json => json!({
            "rgb": palette.to_rgb_strings(),
            "hex": palette.to_hex_strings(),
        })
        .to_string(),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "tonetrek=warn",
        1 => "tonetrek=info",
        _ => "tonetrek=debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = ExtractConfig::new()
        .sample_size(args.samples)
        .palette_size(args.size)
        .fallback(args.fallback);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let pixels = loader::load_upload(&bytes, None)
            .with_context(|| format!("loading {}", input.display()))?;

        let mut session = PaletteSession::new(config)?;
        session.load(pixels, &mut rng)?;
        for &(slot, color) in &args.locks {
            session.lock(slot)?;
            session.set_color(slot, color)?;
        }

        for _ in 0..args.refresh {
            session.refresh(&mut rng)?;
        }

        if args.inputs.len() > 1 {
            println!("{}:", input.display());
        }
        println!("{}", render(session.palette(), args.format));
    }

    Ok(())
}
