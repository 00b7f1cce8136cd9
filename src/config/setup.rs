pub mod objects;
pub mod parameters;

use std::{collections::HashSet, fs::File, io::Read, path::Path};

use crate::{
    discretize::fluid::fluid_particle_num,
    error::{ConfigError, ConfigValidationError, DuplicateObjectIdError},
};

use self::{
    objects::{FluidBlockConfig, ObjectId, RigidBodyConfig},
    parameters::{DomainConfig, PartitionParams},
};

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct SceneConfig {
    #[serde(rename = "Configuration")]
    pub configuration: DomainConfig,
    #[serde(rename = "FluidBlocks", default)]
    pub fluid_blocks: Vec<FluidBlockConfig>,
    #[serde(rename = "RigidBodies", default)]
    pub rigid_bodies: Vec<RigidBodyConfig>,
}

impl SceneConfig {
    /// Reads a scene description. `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut file = File::open(path).map_err(io_error)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(io_error)?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config: SceneConfig = if is_json {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn dim(&self) -> usize {
        self.configuration.dim()
    }

    /// Checks everything that can be checked without touching geometry files,
    /// including that the fluid particle counts can be totalled.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let partition = PartitionParams::new(&self.configuration)?;
        let dim = partition.dim;

        let mut fluid_total = 0usize;
        for block in &self.fluid_blocks {
            block.validate(dim)?;
            let diameter = partition.particle_diameter;
            fluid_total = fluid_particle_num(&block.start(), &block.end(), diameter)
                .and_then(|n| fluid_total.checked_add(n))
                .ok_or(ConfigValidationError::ParticleCountOverflow(block.object_id))?;
        }
        for body in &self.rigid_bodies {
            if dim != 3 {
                return Err(ConfigValidationError::RigidBodyInPlanarDomain(body.object_id));
            }
            body.transform()?;
        }

        let mut seen = HashSet::new();
        for id in self.object_ids() {
            if !seen.insert(id) {
                return Err(DuplicateObjectIdError(id).into());
            }
        }
        Ok(())
    }

    /// Fluid blocks first, then rigid bodies, each in file order.
    pub fn object_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.fluid_blocks
            .iter()
            .map(|b| b.object_id)
            .chain(self.rigid_bodies.iter().map(|b| b.object_id))
    }
}
