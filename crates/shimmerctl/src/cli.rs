use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use renderer::{SkeletonMetrics, SurfaceSize};
use shimmerconfig::Rgba;

#[derive(Parser, Debug)]
#[command(
    name = "shimmerctl",
    author,
    version,
    about = "Inspect shimmer configs and render skeleton-loading frames"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the derived gradient stops, geometry and sweep offsets.
    Inspect(InspectArgs),
    /// Render a shimmering skeleton list to numbered PNG frames.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Shimmer attribute file (TOML); built-in defaults when omitted.
    #[arg(long, value_name = "FILE", env = "SHIMMER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Surface size the geometry is resolved against (e.g. `360x640`).
    #[arg(
        long,
        value_name = "WIDTHxHEIGHT",
        value_parser = parse_surface_size,
        default_value = "360x640"
    )]
    pub size: SurfaceSize,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Shimmer attribute file (TOML); built-in defaults when omitted.
    #[arg(long, value_name = "FILE", env = "SHIMMER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output surface size (e.g. `360x640`).
    #[arg(
        long,
        value_name = "WIDTHxHEIGHT",
        value_parser = parse_surface_size,
        default_value = "360x640"
    )]
    pub size: SurfaceSize,

    /// Number of frames to write.
    #[arg(long, value_name = "COUNT", default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,

    /// Simulated frame rate of the stepped clock.
    #[arg(long, value_name = "FPS", default_value_t = 30.0, value_parser = parse_positive)]
    pub fps: f32,

    /// Timestamp frames with the system clock, paced at `--fps`, instead of
    /// a fixed simulated step.
    #[arg(long)]
    pub realtime: bool,

    /// Display density used to scale the skeleton list (1.0 = mdpi).
    #[arg(long, value_name = "SCALE", default_value_t = 1.0, value_parser = parse_density)]
    pub density: f32,

    /// Override the number of rows the reveal mask animates.
    #[arg(long, value_name = "COUNT", value_parser = clap::value_parser!(u32).range(1..))]
    pub items: Option<u32>,

    /// Opaque background behind the content (`#RRGGBB`).
    #[arg(long, value_name = "COLOR", value_parser = parse_color, default_value = "#FFFFFF")]
    pub background: Rgba,

    /// Directory receiving `frame-0000.png`, `frame-0001.png`, ...
    #[arg(long, value_name = "DIR")]
    pub out: PathBuf,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_surface_size(value: &str) -> Result<SurfaceSize, String> {
    let (width, height) = value
        .trim()
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| "expected WxH format, e.g. 360x640".to_string())?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| "invalid width in size specification".to_string())?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| "invalid height in size specification".to_string())?;
    if width == 0 || height == 0 {
        return Err("surface dimensions must be greater than zero".into());
    }
    Ok(SurfaceSize::new(width, height))
}

pub fn parse_color(value: &str) -> Result<Rgba, String> {
    let color: Rgba = value.parse().map_err(|err| format!("{err}"))?;
    if color.a != 255 {
        return Err("background color must be opaque".into());
    }
    Ok(color)
}

fn parse_positive(value: &str) -> Result<f32, String> {
    let parsed: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if !parsed.is_finite() || parsed <= 0.0 {
        return Err(format!("expected a positive number, got {parsed}"));
    }
    Ok(parsed)
}

fn parse_density(value: &str) -> Result<f32, String> {
    let density = parse_positive(value)?;
    if SkeletonMetrics::for_density(density).row_height() < 1.0 {
        return Err(format!("density {density} is too small to lay out a skeleton row"));
    }
    Ok(density)
}
