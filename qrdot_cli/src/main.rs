use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};

use qrdot_core::RenderOptions;
use qrdot_render::ImageKind;

mod serve;

#[derive(Parser)]
#[command(name = "qrdot")]
#[command(version)]
#[command(propagate_version = true)]
#[command(about = "Render styled QR codes from the command line or over HTTP", long_about = None)]
struct Cli {
    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase logging verbosity")]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a single QR code image.
    Render {
        #[arg(help = "Text to encode, read from stdin if unspecified")]
        text: Option<String>,
        #[arg(
            short,
            long,
            help = "Output file or stdout (as PNG) if unspecified",
            long_help = "Output file or stdout (as PNG) if unspecified. The output format is determined based on the \
            extension. Supported extensions are:\n\
            * .png\n\
            * .bmp"
        )]
        output: Option<PathBuf>,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Serve `GET /qrcode/generate` over HTTP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080", help = "Address to listen on")]
        bind: String,
        #[arg(long, help = "Number of worker threads, one per CPU if unspecified")]
        workers: Option<usize>,
        #[arg(long, default_value_t = 4096, help = "Largest accepted canvas width or height, in pixels")]
        max_canvas: u32,
    },
}

#[derive(Args)]
struct StyleArgs {
    #[arg(long, help = "Canvas width in pixels [default: 400]")]
    width: Option<u32>,
    #[arg(long, help = "Canvas height in pixels [default: 400]")]
    height: Option<u32>,
    #[arg(long, help = "Quiet zone in modules [default: 4]")]
    quiet: Option<u32>,
    #[arg(long, help = "Module color as #RRGGBB[AA] [default: #000000FF]")]
    foreground: Option<String>,
    #[arg(long, help = "Background color as #RRGGBB[AA] [default: #FFFFFFFF]")]
    background: Option<String>,
    #[arg(long, help = "Finder pattern outer color [default: foreground]")]
    outer: Option<String>,
    #[arg(long, help = "Finder pattern middle color [default: opaque background]")]
    middle: Option<String>,
    #[arg(long, help = "Finder pattern inner color [default: foreground]")]
    inner: Option<String>,
    #[arg(long = "type", help = "Module shape, 'rect' or 'point' [default: rect]")]
    shape: Option<String>,
    #[arg(long, help = "Scatter dots around the symbol (point shape only)")]
    round: bool,
    #[arg(long, help = "Error correction level: L, M, Q or H [default: H]")]
    ecl: Option<String>,
    #[arg(long, help = "Seed for the background dots")]
    seed: Option<u64>,
}

impl From<StyleArgs> for RenderOptions {
    fn from(args: StyleArgs) -> Self {
        Self {
            canvas_width: args.width,
            canvas_height: args.height,
            quiet_zone: args.quiet,
            foreground: args.foreground,
            background: args.background,
            outer_color: args.outer,
            middle_color: args.middle,
            inner_color: args.inner,
            shape_style: args.shape,
            background_round: Some(args.round),
            ecl: args.ecl,
            seed: args.seed,
        }
    }
}

enum Output {
    Stdout,
    File(PathBuf, ImageKind),
}

fn determine_output_kind(path: Option<PathBuf>) -> Result<Output> {
    let Some(path) = path else {
        return Ok(Output::Stdout);
    };
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => match ImageKind::from_extension(ext) {
            Some(kind) => Ok(Output::File(path, kind)),
            None => Err(anyhow::Error::msg(format!("invalid output extension '{}'", ext))),
        },
        None => Err(anyhow::Error::msg("requested output has no extension")),
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    });
    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Render { text, output, style } => {
            // Before doing anything, make sure the requested output is valid.
            let output = determine_output_kind(output)?;
            let text = match text {
                Some(text) => text,
                None => {
                    let mut text = String::new();
                    std::io::stdin().read_to_string(&mut text)?;
                    text.trim_end_matches(['\r', '\n']).to_owned()
                }
            };
            let image = qrdot_render::generate(&text, &style.into())?;
            match output {
                Output::File(path, kind) => {
                    let bytes = qrdot_render::encode_image(&image, kind)?;
                    let mut writer = BufWriter::new(File::create(&path)?);
                    writer.write_all(&bytes)?;
                    writer.flush()?;
                    log::info!("wrote {}x{} image to {}", image.width(), image.height(), path.display());
                }
                Output::Stdout => {
                    let bytes = qrdot_render::encode_image(&image, ImageKind::Png)?;
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&bytes)?;
                    stdout.flush()?;
                }
            }
        }
        Command::Serve {
            bind,
            workers,
            max_canvas,
        } => {
            serve::serve(serve::ServeConfig {
                bind,
                workers: workers.unwrap_or_else(num_cpus::get).max(1),
                max_canvas,
            })?;
        }
    }
    Ok(())
}
