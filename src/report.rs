use log::{info, warn};

use crate::{
    config::setup::objects::ObjectId,
    registry::{ObjectRegistry, SceneObject},
};

/// Something worth reporting about a setup that still succeeded.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SetupNotice {
    #[display("object {_0} produced no particles")]
    DegenerateGeometry(ObjectId),
}

/// Hooks invoked as scene setup progresses. All default to doing nothing.
pub trait SetupObserver {
    fn object_registered(&mut self, _object: &SceneObject) {}

    fn notice(&mut self, _notice: &SetupNotice) {}

    fn setup_complete(&mut self, _registry: &ObjectRegistry) {}
}

pub struct NullObserver;

impl SetupObserver for NullObserver {}

/// Reports progress through the `log` facade.
#[derive(Default)]
pub struct LogObserver;

impl SetupObserver for LogObserver {
    fn object_registered(&mut self, object: &SceneObject) {
        let kind = match object {
            SceneObject::Fluid(_) => "fluid",
            SceneObject::Rigid(_) => "rigid body",
        };
        info!(
            "Object ID: {}, {} particle number: {}",
            object.object_id(),
            kind,
            object.particle_num()
        );
    }

    fn notice(&mut self, notice: &SetupNotice) {
        warn!("{}", notice);
    }

    fn setup_complete(&mut self, registry: &ObjectRegistry) {
        info!("Total fluid particle number: {}", registry.total_fluid());
        info!("Total rigid particle number: {}", registry.total_rigid());
        info!("Total particle number: {}", registry.total());
    }
}
