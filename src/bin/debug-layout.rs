/// Diagnostic tool to verify tiles → weights → layout pipeline
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use marketmap::layout::validate::validate;
use marketmap::layout::{layout_with_config, LayoutConfig, Viewport};
use marketmap::tiles::{self, Tile};
use marketmap::weight::{weighted_refs, WeightTransform};

#[derive(Parser, Debug)]
#[command(name = "debug-layout")]
#[command(about = "Lay out a tile file as a squarified treemap and check the result")]
struct Args {
    /// JSON array of tiles (built-in sample snapshot when omitted)
    file: Option<PathBuf>,

    /// Viewport width
    #[arg(long, default_value_t = 1920.0)]
    width: f64,

    /// Viewport height
    #[arg(long, default_value_t = 1080.0)]
    height: f64,

    /// Magnitude → weight transform (linear, sqrt, log)
    #[arg(short, long, default_value_t = WeightTransform::Sqrt)]
    transform: WeightTransform,

    /// Smallest weight a tile is laid out with
    #[arg(long, default_value_t = LayoutConfig::DEFAULT_WEIGHT_FLOOR)]
    floor: f64,

    /// How many of the largest placements to print
    #[arg(long, default_value_t = 10)]
    top: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("marketmap=info".parse()?),
        )
        .init();

    let args = Args::parse();

    println!("=== DIAGNOSTIC: Tiles → Layout Pipeline ===");

    let tiles: Vec<Tile> = match &args.file {
        Some(path) => {
            println!("Loading: {}", path.display());
            tiles::load_tiles(path)?
        }
        None => {
            println!("Loading: built-in sample snapshot");
            tiles::sample_tiles()
        }
    };
    println!("\n[1] Tiles loaded: {}", tiles.len());

    let items = weighted_refs(&tiles, args.transform);
    let raw_total: f64 = items.iter().map(|i| i.weight).sum();
    println!(
        "\n[2] Weights derived with '{}' transform (raw total before flooring={:.3})",
        args.transform, raw_total
    );

    let viewport = Viewport::new(args.width, args.height);
    let config = LayoutConfig {
        weight_floor: args.floor,
    };
    let placements = layout_with_config(items, viewport, &config);
    println!(
        "\n[3] Layout computed: {} placements in {:.0}x{:.0}",
        placements.len(),
        viewport.width,
        viewport.height
    );

    println!("\n[4] Top {} placements by area:", args.top);
    let mut by_area: Vec<_> = placements.iter().collect();
    by_area.sort_by(|a, b| b.area().total_cmp(&a.area()));
    for (i, p) in by_area.iter().take(args.top).enumerate() {
        let change = p
            .payload
            .change_pct
            .map(|c| format!("{:+.2}%", c))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "    [{}] '{}' - rect: {:.1}x{:.1} ({:.0}px²) at ({:.1}, {:.1}) - aspect {:.2} - change {}",
            i,
            p.payload.label,
            p.width,
            p.height,
            p.area(),
            p.x,
            p.y,
            p.rect().aspect_ratio(),
            change
        );
    }

    println!("\n[5] Checking for anomalies:");
    let report = validate(&placements, viewport);
    println!("    Total rect area: {:.0}px²", report.covered_area);
    println!("    Viewport area:   {:.0}px²", report.viewport_area);
    println!("    Coverage:        {:.4}%", report.coverage * 100.0);
    println!("    Worst aspect:    {:.2}", report.worst_aspect);
    println!("    Degenerate:      {}", report.degenerate);
    println!("    Overlaps:        {}", report.overlapping_pairs);
    println!("    Out of bounds:   {}", report.out_of_bounds);

    if tiles.is_empty() || !viewport.is_drawable() {
        println!("\nNothing to lay out (empty input or non-drawable viewport).");
        return Ok(());
    }

    if !report.is_exact_tiling() {
        bail!("layout does not tile the viewport exactly: {:?}", report);
    }

    println!("\n✓ Layout tiles the viewport exactly");
    Ok(())
}
