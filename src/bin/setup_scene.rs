use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use sph_scene::{
    config::setup::SceneConfig, geometry::mesh::ObjLoader, report::LogObserver,
    system::ParticleSystem,
};

#[derive(Debug, clap::Parser)]
#[command(
    name = "setup_scene",
    about = "Discretize a scene description into its initial particle population"
)]
pub struct SetupCli {
    /// Scene description (.json, or YAML otherwise).
    pub scene: PathBuf,

    /// Directory that relative geometry paths are resolved against.
    /// Defaults to the directory holding the scene file.
    #[arg(short = 'm', long = "mesh-dir")]
    pub mesh_dir: Option<PathBuf>,
}

fn print_summary(system: &ParticleSystem) {
    let partition = system.partition();
    let registry = system.registry();
    println!(
        "\
Domain:
  Dimensions: {dim}
  Size: {size:?}
  Grid: {grid:?} cells of size {grid_size}

Particles:
  Radius: {radius}
  Diameter: {diameter}
  Volume: {volume:.3e}
  Mass: {mass:.3e}
  Support length: {support}

Objects:
  Count: {n_objects}
  Rigid object IDs: {rigid_ids:?}

Totals:
  Fluid particles: {n_fluid}
  Rigid particles: {n_rigid}
  All particles: {n_total}",
        dim = partition.dim,
        size = partition.domain_size().as_slice(),
        grid = partition.grid_num.as_slice(),
        grid_size = partition.grid_size,
        radius = partition.particle_radius,
        diameter = partition.particle_diameter,
        volume = partition.particle_volume,
        mass = partition.particle_mass(),
        support = partition.support_length,
        n_objects = registry.len(),
        rigid_ids = system
            .rigid_object_ids()
            .iter()
            .map(|id| id.0)
            .collect::<Vec<_>>(),
        n_fluid = registry.total_fluid(),
        n_rigid = registry.total_rigid(),
        n_total = registry.total(),
    );
}

fn main() -> ExitCode {
    env_logger::init();
    let args = SetupCli::parse();

    let config = match SceneConfig::parse(&args.scene) {
        Ok(config) => config,
        Err(e) => {
            error!("Could not load {}: {}", args.scene.display(), e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Loaded scene {}: {} fluid blocks, {} rigid bodies",
        args.scene.display(),
        config.fluid_blocks.len(),
        config.rigid_bodies.len()
    );

    let mesh_dir = args.mesh_dir.unwrap_or_else(|| {
        args.scene
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default()
    });
    let loader = ObjLoader::with_root(mesh_dir);

    match ParticleSystem::initialize(&config, &loader, &mut LogObserver) {
        Ok(system) => {
            print_summary(&system);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Scene setup failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
