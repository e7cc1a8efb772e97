use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use renderer::export::{frame_path, write_png};
use renderer::{
    clock_for_policy, sweep_offset, ClockPolicy, ShimmerFrame, SkeletonList, SurfaceSize,
};
use shimmerconfig::{ShimmerAttributes, ShimmerBuilder, ShimmerConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::{InspectArgs, RenderArgs};

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Config plus the optional row count carried by an attribute file.
struct LoadedConfig {
    config: ShimmerConfig,
    item_count: Option<u32>,
}

fn load_config(path: Option<&Path>) -> Result<LoadedConfig> {
    let Some(path) = path else {
        return Ok(LoadedConfig {
            config: ShimmerBuilder::default().build(),
            item_count: None,
        });
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read shimmer config {}", path.display()))?;
    let attributes = ShimmerAttributes::from_toml_str(&raw)
        .with_context(|| format!("failed to parse shimmer config {}", path.display()))?;
    let config = attributes
        .to_builder()
        .with_context(|| format!("invalid shimmer config {}", path.display()))?
        .build();
    tracing::debug!(path = %path.display(), mode = ?config.highlight_mode(), "loaded shimmer config");

    Ok(LoadedConfig {
        config,
        item_count: attributes.item_count,
    })
}

pub fn inspect(args: InspectArgs) -> Result<()> {
    let LoadedConfig { config, item_count } = load_config(args.config.as_deref())?;
    let size = args.size;

    let colors: Vec<String> = config.colors().iter().map(ToString::to_string).collect();
    let positions: Vec<String> = config
        .positions()
        .iter()
        .map(|position| format!("{position:.4}"))
        .collect();

    println!("shape:          {}", config.shape());
    println!("direction:      {}", config.direction());
    println!("highlight:      {:?}", config.highlight_mode());
    println!("colors:         [{}]", colors.join(", "));
    println!("positions:      [{}]", positions.join(", "));
    println!("surface:        {}x{}", size.width, size.height);
    println!(
        "effective size: {}x{}",
        config.width(size.width),
        config.height(size.height)
    );
    let bounds = config.draw_bounds(size.width, size.height);
    println!(
        "draw bounds:    left={} top={} right={} bottom={}",
        bounds.left, bounds.top, bounds.right, bounds.bottom
    );
    println!(
        "timing:         duration={}ms delay={}ms repeat={:?} mode={:?}",
        config.duration().as_millis(),
        config.repeat_delay().as_millis(),
        config.repeat_count(),
        config.repeat_mode()
    );
    if let Some(items) = item_count {
        println!("items:          {items}");
    }
    for progress in [0.0_f32, 0.5, 1.0] {
        let (dx, dy) = sweep_offset(&config, size, progress);
        println!("offset @{progress:.1}:     dx={dx:.1} dy={dy:.1}");
    }
    Ok(())
}

pub fn render(args: RenderArgs) -> Result<()> {
    let LoadedConfig { config, item_count } = load_config(args.config.as_deref())?;
    let SurfaceSize { width, height } = args.size;

    let list = SkeletonList::layout(width, height, args.density);
    let (items, reveal_fraction) = match args.items.or(item_count) {
        Some(items) => (items, 1.0),
        None => (list.item_count(), list.reveal_fraction()),
    };

    let mut frame = ShimmerFrame::new(config);
    frame.layout(width, height);
    frame.set_content(
        list.rasterize()
            .context("failed to rasterize skeleton list")?,
    );
    frame
        .renderer_mut()
        .set_item_count(items)
        .context("invalid item count")?;
    frame.renderer_mut().set_reveal_fraction(reveal_fraction);
    if !frame.is_shimmer_started() {
        tracing::info!("auto start disabled; starting shimmer for export");
        frame.start_shimmer();
    }

    fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create output directory {}", args.out.display()))?;

    let policy = if args.realtime {
        ClockPolicy::Realtime
    } else {
        ClockPolicy::Stepped { fps: args.fps }
    };
    let pacing = args
        .realtime
        .then(|| Duration::from_secs_f64(1.0 / f64::from(args.fps)));
    let mut clock = clock_for_policy(policy)?;
    tracing::info!(
        width,
        height,
        frames = args.frames,
        fps = args.fps,
        items,
        ?policy,
        "rendering shimmer frames"
    );
    for _ in 0..args.frames {
        let tick = clock.tick();
        frame.tick(tick.now);
        let pixmap = frame
            .compose(args.background)
            .with_context(|| format!("failed to compose frame {}", tick.frame_index))?;
        write_png(&pixmap, &frame_path(&args.out, tick.frame_index))?;
        if let Some(interval) = pacing {
            thread::sleep(interval);
        }
    }

    println!(
        "wrote {} frames to {}",
        args.frames,
        args.out.display()
    );
    Ok(())
}
