use std::collections::HashMap;

use nalgebra::{DVector, Point3};

use crate::{
    config::setup::objects::{FluidBlockConfig, ObjectId, RigidBodyConfig},
    error::{DuplicateObjectIdError, RegistryError},
    geometry::{lattice, mesh::TriangleMesh},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Material {
    Fluid,
    Rigid,
}

/// A fluid block together with its lattice particle count.
#[derive(Debug, Clone, PartialEq)]
pub struct FluidBlock {
    pub config: FluidBlockConfig,
    pub particle_num: usize,
}

impl FluidBlock {
    /// Lattice positions of the block's particles; `particle_num` of them when
    /// `pitch` is the diameter the block was counted with. `None` if the
    /// lattice at `pitch` has more points than a `usize` can count.
    pub fn positions(&self, pitch: f64) -> Option<Vec<DVector<f64>>> {
        lattice(&self.config.start(), &self.config.end(), pitch)
    }
}

/// A rigid body sampled into particles, with the world-space mesh it was
/// sampled from.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub config: RigidBodyConfig,
    pub points: Vec<Point3<f64>>,
    pub mesh: TriangleMesh,
}

impl RigidBody {
    pub fn particle_num(&self) -> usize {
        self.points.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    Fluid(FluidBlock),
    Rigid(RigidBody),
}

impl SceneObject {
    pub fn object_id(&self) -> ObjectId {
        match self {
            SceneObject::Fluid(b) => b.config.object_id,
            SceneObject::Rigid(b) => b.config.object_id,
        }
    }

    pub fn material(&self) -> Material {
        match self {
            SceneObject::Fluid(_) => Material::Fluid,
            SceneObject::Rigid(_) => Material::Rigid,
        }
    }

    pub fn particle_num(&self) -> usize {
        match self {
            SceneObject::Fluid(b) => b.particle_num,
            SceneObject::Rigid(b) => b.particle_num(),
        }
    }
}

/// Every scene object by id, in registration order, with running particle
/// totals. Objects can be added but never replaced or removed.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    objects: Vec<SceneObject>,
    index: HashMap<ObjectId, usize>,
    total_fluid_particle_num: usize,
    total_rigid_particle_num: usize,
    total_particle_num: usize,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object, leaving the registry untouched if its id is taken or
    /// its particles would overflow the running total.
    pub fn register(&mut self, object: SceneObject) -> Result<&SceneObject, RegistryError> {
        let id = object.object_id();
        if self.index.contains_key(&id) {
            return Err(DuplicateObjectIdError(id).into());
        }

        let n = object.particle_num();
        self.total_particle_num = self
            .total_particle_num
            .checked_add(n)
            .ok_or(RegistryError::ParticleCountOverflow(id))?;
        // Each per-material total is bounded by the overall one.
        match object.material() {
            Material::Fluid => self.total_fluid_particle_num += n,
            Material::Rigid => self.total_rigid_particle_num += n,
        }

        let i = self.objects.len();
        self.index.insert(id, i);
        self.objects.push(object);
        Ok(&self.objects[i])
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.index.get(&id).map(|&i| &self.objects[i])
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn fluid_blocks(&self) -> impl Iterator<Item = &FluidBlock> {
        self.objects.iter().filter_map(|o| match o {
            SceneObject::Fluid(b) => Some(b),
            SceneObject::Rigid(_) => None,
        })
    }

    pub fn rigid_bodies(&self) -> impl Iterator<Item = &RigidBody> {
        self.objects.iter().filter_map(|o| match o {
            SceneObject::Rigid(b) => Some(b),
            SceneObject::Fluid(_) => None,
        })
    }

    /// Ids of rigid objects, in registration order.
    pub fn rigid_object_ids(&self) -> Vec<ObjectId> {
        self.rigid_bodies().map(|b| b.config.object_id).collect()
    }

    pub fn total_fluid(&self) -> usize {
        self.total_fluid_particle_num
    }

    pub fn total_rigid(&self) -> usize {
        self.total_rigid_particle_num
    }

    pub fn total(&self) -> usize {
        self.total_particle_num
    }
}
