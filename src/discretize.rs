pub mod fluid;
pub mod rigid;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    config::setup::objects::RigidBodyConfig, error::SetupError,
    geometry::mesh::GeometryProvider, registry::RigidBody,
};

/// Discretizes every rigid body, in configuration order. If several bodies
/// fail, the error reported is that of the first failing body in
/// configuration order, with or without the `parallel` feature.
pub fn discretize_rigid_bodies<G: GeometryProvider + ?Sized>(
    configs: &[RigidBodyConfig],
    particle_diameter: f64,
    provider: &G,
) -> Result<Vec<RigidBody>, SetupError> {
    // Every body is attempted so the reported failure does not depend on
    // thread scheduling.
    #[cfg(feature = "parallel")]
    let bodies: Vec<_> = configs
        .par_iter()
        .map(|config| rigid::discretize_rigid_body(config, particle_diameter, provider))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let bodies: Vec<_> = configs
        .iter()
        .map(|config| rigid::discretize_rigid_body(config, particle_diameter, provider))
        .collect();

    bodies.into_iter().collect()
}
