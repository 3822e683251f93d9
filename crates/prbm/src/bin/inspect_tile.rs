//! Print a summary of a PRBM tile file.
//!
//! Run: `cargo run -p prbm --features tools --bin inspect_tile -- <file.prbm> [tile_x tile_z] [--renderer] [--local] [--settings settings.json]`
//!
//! `--renderer` reads the format byte with the renderer's bit assignment.
//! Without tile coordinates the tile is assumed to be `(0, 0)`.

use std::env;
use std::error::Error;
use std::fs;

use glam::IVec2;
use prbm::{
    AttributeKind, DecodeOptions, HeaderLayout, MapSettings, PositionSpace, ScanOptions,
    decode_tile_with, scan_parsed,
};

struct Args {
    path: String,
    tile: IVec2,
    layout: HeaderLayout,
    settings: Option<String>,
    tile_local: bool,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut path = None;
    let mut coords = Vec::new();
    let mut layout = HeaderLayout::Packed;
    let mut settings = None;
    let mut tile_local = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--renderer" => layout = HeaderLayout::Renderer,
            "--local" => tile_local = true,
            "--settings" => {
                settings = Some(args.next().ok_or("--settings needs a path")?);
            }
            _ if path.is_none() => path = Some(arg),
            _ => coords.push(arg.parse::<i32>()?),
        }
    }

    let path = path.ok_or(
        "usage: inspect_tile <file.prbm> [tile_x tile_z] [--renderer] [--local] [--settings path]",
    )?;
    let tile = match coords.as_slice() {
        [] => IVec2::ZERO,
        [x, z] => IVec2::new(*x, *z),
        _ => return Err("expected exactly two tile coordinates".into()),
    };

    Ok(Args {
        path,
        tile,
        layout,
        settings,
        tile_local,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let args = parse_args()?;

    let grid = match &args.settings {
        Some(path) => MapSettings::from_json(&fs::read_to_string(path)?)?.grid()?,
        None => prbm::Grid::default(),
    };
    let options = ScanOptions {
        grid,
        decode: DecodeOptions {
            header_layout: args.layout,
            ..DecodeOptions::default()
        },
        positions: if args.tile_local {
            PositionSpace::TileLocal
        } else {
            PositionSpace::World
        },
        ..ScanOptions::default()
    };

    let bytes = fs::read(&args.path)?;
    println!("File: {} ({} bytes)", args.path, bytes.len());

    let tile = decode_tile_with(&bytes, &options.decode)?;
    let header = tile.header();
    println!("\n=== Header ===");
    println!("  version:     {}", header.version);
    println!("  indexed:     {}", header.indexed);
    println!("  endianness:  {}", if header.little_endian { "little" } else { "big" });
    println!("  values:      {}", header.num_values);
    println!("  indices:     {}", header.num_indices);
    println!("  triangles:   {}", tile.num_triangles());

    println!("\n=== Attributes ({}) ===", tile.attributes().len());
    for attribute in tile.attributes() {
        let d = &attribute.descriptor;
        let note = if matches!(d.kind, AttributeKind::Unknown(_)) {
            " (unknown)"
        } else {
            ""
        };
        println!(
            "  {:<12} {:?} x{}{}{}",
            d.name,
            d.element_type,
            d.cardinality,
            if d.normalized { " normalized" } else { "" },
            note
        );
    }

    println!("\n=== Material groups ({}) ===", tile.material_groups().len());
    for group in tile.material_groups() {
        println!(
            "  material {:>4}: indices {}..{}",
            group.material_id,
            group.start_index,
            group.end_index()
        );
    }

    let scan = scan_parsed(args.tile, &tile, &options)?;
    println!("\n=== Tile ({}, {}) ===", scan.tile.x, scan.tile.y);
    println!(
        "  world bounds: ({}, {}) .. ({}, {})",
        scan.bounds.min.x, scan.bounds.min.y, scan.bounds.max.x, scan.bounds.max.y
    );
    println!("  unique blocks: {}", scan.blocks.len());
    if let Some(stats) = scan.blocks.height_stats() {
        println!(
            "  heights: {} .. {} ({} levels)",
            stats.min_y,
            stats.max_y,
            stats.counts_by_y.len()
        );
    }

    let blocks = scan.blocks.into_sorted();
    for block in blocks.iter().take(10) {
        println!("    ({}, {}, {})", block.x, block.y, block.z);
    }
    if blocks.len() > 10 {
        println!("    ... {} more", blocks.len() - 10);
    }

    Ok(())
}
