use std::f64::consts::PI;

use nalgebra::DVector;
use num_traits::ToPrimitive;

use crate::error::ConfigValidationError;

use super::objects::check_components;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DomainConfig {
    pub domain_start: Vec<f64>,
    pub domain_end: Vec<f64>,
    pub particle_radius: f64,
    pub density0: f64,
}

impl DomainConfig {
    pub fn dim(&self) -> usize {
        self.domain_start.len()
    }

    pub fn particle_diameter(&self) -> f64 {
        2.0 * self.particle_radius
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let dim = self.dim();
        if !(2..=3).contains(&dim) {
            return Err(ConfigValidationError::UnsupportedDimension(dim));
        }
        check_components("Configuration.domainStart", &self.domain_start, dim)?;
        check_components("Configuration.domainEnd", &self.domain_end, dim)?;
        for (axis, (&start, &end)) in self
            .domain_start
            .iter()
            .zip(self.domain_end.iter())
            .enumerate()
        {
            if end <= start {
                return Err(ConfigValidationError::NonPositiveDomainExtent { axis, start, end });
            }
        }
        // Written to also reject NaN.
        if !(self.particle_radius > 0.0) || !self.particle_radius.is_finite() {
            return Err(ConfigValidationError::NonPositiveRadius(self.particle_radius));
        }
        if !(self.density0 > 0.0) || !self.density0.is_finite() {
            return Err(ConfigValidationError::NonPositiveDensity(self.density0));
        }
        Ok(())
    }
}

/// Particle sizes and the uniform background grid later used for neighbour
/// search. Everything is derived from the particle radius and domain bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionParams {
    pub dim: usize,
    pub domain_start: DVector<f64>,
    pub domain_end: DVector<f64>,
    pub density0: f64,
    pub particle_radius: f64,
    pub particle_diameter: f64,
    pub particle_volume: f64,
    pub support_length: f64,
    pub grid_size: f64,
    pub grid_num: DVector<usize>,
}

impl PartitionParams {
    pub fn new(config: &DomainConfig) -> Result<Self, ConfigValidationError> {
        config.validate()?;

        let dim = config.dim();
        let domain_start = DVector::from_column_slice(&config.domain_start);
        let domain_end = DVector::from_column_slice(&config.domain_end);
        let r = config.particle_radius;

        // The 4/3 pi r^D form is kept in 2D as well.
        let particle_volume = (4.0 / 3.0) * PI * r.powi(dim as i32);
        let support_length = 4.0 * r;
        let grid_size = support_length;

        let domain_size = &domain_end - &domain_start;
        let mut grid_num = DVector::from_element(dim, 1);
        for (axis, l) in domain_size.iter().enumerate() {
            let n = (l / grid_size)
                .ceil()
                .to_usize()
                .ok_or(ConfigValidationError::GridCellCountOverflow)?;
            // Extents are positive, so at least one cell even if the ratio underflows.
            grid_num[axis] = n.max(1);
        }
        grid_num
            .iter()
            .try_fold(1usize, |n, m| n.checked_mul(*m))
            .ok_or(ConfigValidationError::GridCellCountOverflow)?;

        Ok(PartitionParams {
            dim,
            domain_start,
            domain_end,
            density0: config.density0,
            particle_radius: r,
            particle_diameter: config.particle_diameter(),
            particle_volume,
            support_length,
            grid_size,
            grid_num,
        })
    }

    pub fn domain_size(&self) -> DVector<f64> {
        &self.domain_end - &self.domain_start
    }

    pub fn particle_mass(&self) -> f64 {
        self.density0 * self.particle_volume
    }

    pub fn grid_cell_count(&self) -> usize {
        self.grid_num.iter().product()
    }
}
