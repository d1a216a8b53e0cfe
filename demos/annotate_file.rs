//! Annotate a saved screenshot.
//!
//! Demonstrates:
//! - Loading a screenshot from disk
//! - Resolving the arrow placement for an element box
//! - Drawing the highlight and cropping around the element
//!
//! Usage:
//!   cargo run --example annotate_file -- <input.png> <x1> <y1> <x2> <y2> [output.png]
//!   cargo run --example annotate_file -- page.png 400 300 640 360 --debug

// ============================================================================
// Imports
// ============================================================================

use anyhow::{Context, bail};
use element_annotator::{
    Annotator, BoundingBox, CanvasSize, ResizeMode, crop_around, find_placement, resize,
};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Constants
// ============================================================================

const DEFAULT_OUTPUT: &str = "annotated.png";
const SAFE_AREA: u32 = 400;

// ============================================================================
// Main
// ============================================================================

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let debug = args.iter().any(|a| a == "--debug");
    init_logging(debug);

    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();
    if let Err(e) = run(&positional) {
        eprintln!("\n[ERROR] {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &[&String]) -> anyhow::Result<()> {
    if args.len() < 5 {
        bail!("usage: annotate_file <input.png> <x1> <y1> <x2> <y2> [output.png]");
    }

    let coords = args[1..5]
        .iter()
        .map(|v| v.parse::<f64>().with_context(|| format!("not a number: {v}")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let bbox = BoundingBox::new(coords[0], coords[1], coords[2], coords[3])?;
    let output = args.get(5).map_or(DEFAULT_OUTPUT, |s| s.as_str());

    println!("[1] Loading {}...", args[0]);
    let screenshot = image::open(args[0])
        .with_context(|| format!("failed to open {}", args[0]))?
        .to_rgba8();
    println!("    ✓ {}x{}\n", screenshot.width(), screenshot.height());

    println!("[2] Resolving placement...");
    match find_placement(&bbox, CanvasSize::of(&screenshot)) {
        Some(placement) => println!(
            "    ✓ {:?} arrow at {}\n",
            placement.direction, placement.anchor
        ),
        None => println!("    ✓ No free space, outline only\n"),
    }

    println!("[3] Annotating...");
    let annotator = Annotator::default();
    let border = f64::from(annotator.style().border_width);
    let annotated = annotator.annotate(&bbox, screenshot)?;
    let cropped = crop_around(&annotated, &bbox.translate(border, border)?, SAFE_AREA);
    let finished = resize(&cropped, ResizeMode::default()).unwrap_or(cropped);
    println!("    ✓ {}x{}\n", finished.width(), finished.height());

    finished.save(output)?;
    println!("[Done] Saved to {output}");
    Ok(())
}

/// Initialize tracing/logging.
fn init_logging(debug: bool) {
    let filter = if debug {
        "element_annotator=debug"
    } else {
        "element_annotator=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}
