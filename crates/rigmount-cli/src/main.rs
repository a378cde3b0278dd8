//! Rigmount driver - Main entry point
//!
//! Loads a sensor catalog, builds a demo vehicle in an in-memory scene,
//! and places the requested sensor rig the way a host adapter would.

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use rigmount_core::SensorCatalog;
use rigmount_scene::{
    create_all, resolve_chassis, AttrValue, MemoryScene, NodePath, PrimKind, SceneGraph,
    ATTR_TRANSLATE,
};

#[derive(Parser, Debug)]
#[command(name = "rigmount")]
#[command(about = "Sensor mock-up placement for a scene-graph host")]
#[command(version)]
struct Args {
    /// Path to sensor catalog file
    #[arg(short, long, default_value = "rigmount.toml")]
    config: PathBuf,

    /// Write the built-in catalog to a file and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// List available sensor types and exit
    #[arg(long)]
    list: bool,

    /// Comma-separated sensor tags to place (default: every registered type)
    #[arg(short, long)]
    sensors: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Rigmount v{}", env!("CARGO_PKG_VERSION"));

    if let Some(path) = &args.write_config {
        SensorCatalog::builtin().to_file(path)?;
        println!("Wrote built-in sensor catalog to {}", path.display());
        return Ok(());
    }

    let catalog = load_catalog(&args.config)?;

    if args.list {
        println!("Available sensor types:");
        for descriptor in catalog.iter() {
            println!(
                "  - {} ({}) as node '{}' at {}",
                descriptor.tag,
                descriptor.kind,
                descriptor.name,
                descriptor.relative_position
            );
        }
        return Ok(());
    }

    // Demo vehicle: a rover root with the chassis link the catalog names
    let mut scene = MemoryScene::new();
    let vehicle_root = NodePath::parse("/World/rover")?;
    scene.define(PrimKind::Xform, &vehicle_root)?;
    if let Ok(chassis) = vehicle_root.child(&catalog.mounting().chassis_reference) {
        scene.define(PrimKind::Xform, &chassis)?;
        scene.set_attr(&chassis, ATTR_TRANSLATE, AttrValue::Vector([0.0, 0.0, 0.25]))?;
    }

    let (chassis_path, chassis_pos) = resolve_chassis(
        &scene,
        &vehicle_root,
        &catalog.mounting().chassis_reference,
    );
    info!(chassis = %chassis_path, pos = %chassis_pos, "Chassis resolved");

    let tags: Vec<String> = match &args.sensors {
        Some(list) => list
            .split(',')
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect(),
        None => catalog
            .list_sensor_types()
            .into_iter()
            .map(String::from)
            .collect(),
    };
    let tag_refs: Vec<&str> = tags.iter().map(String::as_str).collect();

    let report = create_all(&mut scene, &catalog, &chassis_path, chassis_pos, &tag_refs);

    println!("Placed {}/{} sensors:", report.placed_count(), report.len());
    print!("{report}");

    println!("Scene tree:");
    for (path, kind) in scene.nodes() {
        let depth = path.matches('/').count().saturating_sub(1);
        println!("  {}{} [{:?}]", "  ".repeat(depth), path, kind);
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<SensorCatalog> {
    if path.exists() {
        Ok(SensorCatalog::from_file(path)?)
    } else {
        info!(
            path = %path.display(),
            "Catalog file not found, using built-in sensor table"
        );
        Ok(SensorCatalog::builtin())
    }
}
