use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use qrstyle::design::Design;
use qrstyle::encode::{encode, Correction, EncodeOptions, InputMode};
use qrstyle::logging::{init_logging, LoggingConfig};
use qrstyle::render::Renderer;

#[derive(Parser, Debug)]
#[command(name = "qrstyle", version, about = "Render a styled QR code to PNG or SVG")]
struct Args {
    /// Text to encode
    text: String,

    /// Output file; `.svg` writes a vector document, anything else a raster image
    #[arg(short, long, default_value = "qr.png")]
    output: PathBuf,

    /// Width and height of the output, in pixels
    #[arg(short, long, default_value_t = 250)]
    size: u32,

    /// Symbol version 1-40, 0 picks the smallest that fits
    #[arg(short = 't', long, default_value_t = 0)]
    type_number: i16,

    /// Error correction level (L, M, Q or H)
    #[arg(short, long, default_value = "M")]
    correction: Correction,

    /// Input mode (NUMBER, ALPHA_NUM or 8bit); detected from the text when omitted
    #[arg(short, long)]
    input_mode: Option<InputMode>,

    /// JSON design file
    #[arg(short, long)]
    design: Option<PathBuf>,

    /// Logo image, overriding the design's logo
    #[arg(long)]
    logo: Option<String>,

    /// Seed for jittered shapes; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::with_verbosity(args.verbose));

    let mut design = match &args.design {
        Some(path) => Design::from_json_file(path).with_context(|| format!("reading design {}", path.display()))?,
        None => Design::default(),
    };
    if args.logo.is_some() {
        design.logo_image_source = args.logo.clone();
    }

    let opts = EncodeOptions {
        type_number: args.type_number,
        correction: args.correction,
        input_mode: args.input_mode,
    };
    let matrix = encode(&args.text, &opts).context("encoding text")?;

    let mut renderer = match args.seed {
        Some(seed) => Renderer::with_seed(seed),
        None => Renderer::new(),
    };

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }

    let is_svg = args
        .output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        let svg = renderer.render_svg(&matrix, &design, args.size)?;
        fs::write(&args.output, svg).with_context(|| format!("writing {}", args.output.display()))?;
    } else {
        let image = renderer.render_image(&matrix, &design, args.size)?;
        image.save(&args.output).with_context(|| format!("writing {}", args.output.display()))?;
    }

    println!("Saved to: {}", args.output.display());
    Ok(())
}
