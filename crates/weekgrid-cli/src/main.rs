mod bitmap;

use anyhow::{Context, Result};
use bitmap::BitmapCanvas;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weekgrid_core::{parser, render, RenderOptions, ScheduleError};

/// Exit code for the deliberate category-color abort; everything else
/// fails with 1.
const EXIT_BAD_CATEGORY_COLOR: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "weekgrid",
    version,
    about = "Render a weekly schedule text file as a calendar-grid PNG"
)]
struct Cli {
    /// Schedule text file
    input: PathBuf,

    /// Output image path (defaults to the input path with ".png" appended)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file with page options (days, dpi, paper size, margins, font)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured resolution
    #[arg(long)]
    dpi: Option<u32>,

    /// Override the day labels, in column order
    #[arg(long, num_args = 1..)]
    days: Option<Vec<String>>,

    /// Log at debug level
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let category_color = err
                .downcast_ref::<ScheduleError>()
                .is_some_and(ScheduleError::is_category_color);
            if category_color {
                ExitCode::from(EXIT_BAD_CATEGORY_COLOR)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = build_options(&cli)?;

    // The whole file must parse before anything is drawn; a malformed
    // schedule never produces an output image.
    let schedule = parser::load_schedule(&cli.input, &options.days)?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));
    info!(
        "Rendering {} event(s) to {} at {}x{}",
        schedule.events.len(),
        output.display(),
        options.width_px(),
        options.height_px()
    );

    let mut canvas = BitmapCanvas::new(&output, options.width_px(), options.height_px());
    render::render(&schedule, &options, &mut canvas)?;
    canvas.save()?;

    info!("Wrote {}", output.display());
    Ok(())
}

fn build_options(cli: &Cli) -> Result<RenderOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading options file {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("parsing options file {}", path.display()))?
        }
        None => RenderOptions::default(),
    };
    if let Some(dpi) = cli.dpi {
        options.dpi = dpi;
    }
    if let Some(days) = &cli.days {
        options.days = days.clone();
    }
    anyhow::ensure!(!options.days.is_empty(), "at least one day label is required");
    Ok(options)
}

/// `schedule.txt` becomes `schedule.txt.png`, keeping the input name visible
/// in the output.
fn default_output_path(input: &PathBuf) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".png");
    PathBuf::from(name)
}
