use log::debug;

use crate::{
    config::setup::{objects::ObjectId, parameters::PartitionParams, SceneConfig},
    discretize::{discretize_rigid_bodies, fluid::discretize_fluid_block},
    error::SetupError,
    geometry::mesh::GeometryProvider,
    registry::{ObjectRegistry, SceneObject},
    report::{SetupNotice, SetupObserver},
};

/// The initial particle population of a scene, ready for the solver.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    partition: PartitionParams,
    registry: ObjectRegistry,
    notices: Vec<SetupNotice>,
}

impl ParticleSystem {
    /// Validates the scene, derives the partition parameters, counts every
    /// fluid block and samples every rigid body. Any error aborts the whole
    /// setup.
    pub fn initialize<G, O>(
        config: &SceneConfig,
        provider: &G,
        observer: &mut O,
    ) -> Result<Self, SetupError>
    where
        G: GeometryProvider + ?Sized,
        O: SetupObserver + ?Sized,
    {
        config.validate()?;
        let partition = PartitionParams::new(&config.configuration)?;
        debug!(
            "Partition: dim {}, diameter {}, support {}, grid {:?}",
            partition.dim,
            partition.particle_diameter,
            partition.support_length,
            partition.grid_num.as_slice()
        );

        let mut registry = ObjectRegistry::new();
        let mut notices = Vec::new();

        for block_config in &config.fluid_blocks {
            let block = discretize_fluid_block(block_config, partition.particle_diameter)?;
            let object = registry.register(SceneObject::Fluid(block))?;
            observer.object_registered(object);
        }

        let bodies = discretize_rigid_bodies(
            &config.rigid_bodies,
            partition.particle_diameter,
            provider,
        )?;
        for body in bodies {
            let id = body.config.object_id;
            let degenerate = body.particle_num() == 0;
            let object = registry.register(SceneObject::Rigid(body))?;
            observer.object_registered(object);
            if degenerate {
                let notice = SetupNotice::DegenerateGeometry(id);
                observer.notice(&notice);
                notices.push(notice);
            }
        }

        observer.setup_complete(&registry);
        Ok(ParticleSystem {
            partition,
            registry,
            notices,
        })
    }

    pub fn partition(&self) -> &PartitionParams {
        &self.partition
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn notices(&self) -> &[SetupNotice] {
        &self.notices
    }

    pub fn rigid_object_ids(&self) -> Vec<ObjectId> {
        self.registry.rigid_object_ids()
    }

    pub fn total_particle_num(&self) -> usize {
        self.registry.total()
    }
}
