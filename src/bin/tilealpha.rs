use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser};
use tilealpha::{ConvertOpts, PixelCoord, Rgb8};

/// Convert a tile sheet to an RGBA image with a binary alpha channel.
#[derive(Parser, Debug)]
#[command(name = "tilealpha", version)]
struct Cli {
    /// Input tile sheet (format detected from content).
    input_file: PathBuf,

    /// Output image (format chosen from the extension).
    output_file: PathBuf,

    /// Mask image of the same size; black pixels become transparent.
    /// Overrides --tcoord, --terrain and --transparent.
    #[arg(long, value_name = "MASKFILE")]
    mask: Option<PathBuf>,

    /// Pixel to read the transparent color from [default: 0 32].
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    tcoord: Option<Vec<i64>>,

    /// Always-opaque boxes as `lx ly ux uy` groups [default: legacy 8x8 sheet layout].
    #[arg(long, num_args = 1.., value_name = "V", allow_negative_numbers = true)]
    terrain: Option<Vec<i64>>,

    /// Transparent color as RGB, each 0-255. Takes precedence over --tcoord.
    #[arg(long, num_args = 3, value_names = ["R", "G", "B"])]
    transparent: Option<Vec<u8>>,

    /// Load options from a JSON file; flags given on the command line win.
    #[arg(long, value_name = "JSON")]
    opts: Option<PathBuf>,

    /// Print the resolved options as JSON to stderr.
    #[arg(long)]
    dump_opts: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn flag_opts(&self) -> ConvertOpts {
        ConvertOpts {
            mask: self.mask.clone(),
            tcoord: self.tcoord.as_deref().map(|v| PixelCoord::new(v[0], v[1])),
            terrain: self.terrain.clone(),
            transparent: self
                .transparent
                .as_deref()
                .map(|v| Rgb8::new(v[0], v[1], v[2])),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let base = match &cli.opts {
        Some(path) => ConvertOpts::from_json_path(path)?,
        None => ConvertOpts::default(),
    };
    let opts = base.merged_with(cli.flag_opts());

    if cli.dump_opts {
        let json = serde_json::to_string_pretty(&opts).context("serialize options")?;
        eprintln!("{json}");
    }

    let report = tilealpha::convert_path(&cli.input_file, &cli.output_file, &opts)?;

    eprintln!(
        "wrote {} ({}x{}, {} transparent pixels)",
        cli.output_file.display(),
        report.width,
        report.height,
        report.transparent_pixels
    );
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
