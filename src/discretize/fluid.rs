use nalgebra::DVector;

use crate::{
    config::setup::objects::FluidBlockConfig, error::ConfigValidationError, geometry::lattice_len,
    registry::FluidBlock,
};

/// Number of lattice points, spaced `pitch` apart from `start`, in the
/// half-open box `[start, end)`. Zero if the box is empty along any axis, and
/// `None` if the count does not fit in a `usize`.
pub fn fluid_particle_num(start: &DVector<f64>, end: &DVector<f64>, pitch: f64) -> Option<usize> {
    lattice_len(start, end, pitch)
}

pub fn discretize_fluid_block(
    config: &FluidBlockConfig,
    particle_diameter: f64,
) -> Result<FluidBlock, ConfigValidationError> {
    let particle_num = fluid_particle_num(&config.start(), &config.end(), particle_diameter)
        .ok_or(ConfigValidationError::ParticleCountOverflow(config.object_id))?;
    Ok(FluidBlock {
        particle_num,
        config: config.clone(),
    })
}
