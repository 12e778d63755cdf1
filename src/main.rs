use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use pe_shapes::engine::assets::AssetLoader;
use pe_shapes::engine::physics::{PhysicsWorld, Vector};
use pe_shapes::ShapeCache;

/// Inspect PhysicsEditor shape documents and drop their bodies into a test world.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Shape documents to load, relative to the asset root.
    #[arg(required = true)]
    files: Vec<String>,

    /// Asset root directory.
    #[arg(short, long, default_value = "assets")]
    root: PathBuf,

    /// Only instantiate these bodies (default: all).
    #[arg(short, long)]
    body: Vec<String>,

    /// Horizontal scale; defaults to 1 / ptm_ratio.
    #[arg(long)]
    scale_x: Option<f32>,

    /// Vertical scale; defaults to the horizontal scale.
    #[arg(long)]
    scale_y: Option<f32>,

    /// Number of simulation steps to run.
    #[arg(short, long, default_value_t = 60)]
    steps: u32,
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let assets = AssetLoader::new(&cli.root);

    let mut shapes = ShapeCache::new();
    for file in &cli.files {
        shapes
            .add_shapes_with_file(&assets, file)
            .with_context(|| format!("loading {}", assets.resolve_path(file).display()))?;
    }

    for file in shapes.loaded_files() {
        if let Some(metadata) = shapes.file_metadata(file) {
            println!(
                "{}: format {}, ptm_ratio {}",
                file, metadata.format, metadata.ptm_ratio
            );
        }
    }

    for name in shapes.body_names() {
        if let Some(template) = shapes.get(name) {
            let shapes_total: usize = template.fixtures().iter().map(|f| f.shape_count()).sum();
            println!(
                "  {:<24} {:<7} fixtures: {:<3} shapes: {}",
                name,
                if template.is_dynamic { "dynamic" } else { "static" },
                template.fixtures().len(),
                shapes_total
            );
        }
    }

    let scale_x = cli
        .scale_x
        .or_else(|| shapes.metadata().map(|m| m.meter_scale()))
        .unwrap_or(1.0);
    let scale_y = cli.scale_y.unwrap_or(scale_x);

    let names: Vec<String> = if cli.body.is_empty() {
        shapes.body_names().into_iter().map(String::from).collect()
    } else {
        cli.body.clone()
    };

    let mut world = PhysicsWorld::with_gravity(Vector::new(0.0, -9.81));
    let mut created = Vec::new();

    for (i, name) in names.iter().enumerate() {
        let Some(template) = shapes.get(name) else {
            anyhow::bail!("no body named \"{}\"", name);
        };

        // Spread bodies out so they do not start overlapping
        let def = template.body_def().position(i as f32 * 4.0, 0.0);
        if let Some(handle) = shapes.create_body_with_def(name, &mut world, &def, scale_x, scale_y) {
            created.push((name.as_str(), handle));
        }
    }

    info!(
        "Created {} bodies ({} colliders) at scale ({}, {}), stepping {} frames",
        created.len(),
        world.collider_count(),
        scale_x,
        scale_y,
        cli.steps
    );

    for _ in 0..cli.steps {
        world.step();
    }

    for (name, handle) in &created {
        if let Some(body) = world.get_rigid_body(*handle) {
            let t = body.translation();
            println!("{:<24} x: {:>8.3} y: {:>8.3}", name, t.x, t.y);
        }
    }

    let released = shapes.dispose();
    info!("Released {} templates", released);

    Ok(())
}
