use std::path::PathBuf;

use thiserror::Error;

use crate::config::setup::objects::ObjectId;

/// Failure to read a scene description from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read scene file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse YAML scene: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("could not parse JSON scene: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ConfigValidationError),
}

/// Scene data that cannot describe a feasible simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("domain must be 2- or 3-dimensional, got {0} components")]
    UnsupportedDimension(usize),

    #[error("{field} has {found} components, expected {expected}")]
    DimensionMismatch {
        field: String,
        expected: usize,
        found: usize,
    },

    #[error("{field} contains a non-finite value")]
    NonFinite { field: String },

    #[error("domain extent along axis {axis} is not positive (start {start}, end {end})")]
    NonPositiveDomainExtent { axis: usize, start: f64, end: f64 },

    #[error("particle radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("rest density must be positive, got {0}")]
    NonPositiveDensity(f64),

    #[error("rigid body {0} has no rotationAxis")]
    MissingRotationAxis(ObjectId),

    #[error("rigid body {0} has a zero-length rotationAxis")]
    ZeroRotationAxis(ObjectId),

    #[error("rigid body {id} has non-positive scale {scale}")]
    NonPositiveScale { id: ObjectId, scale: f64 },

    #[error("rigid body {0} requires a three-dimensional domain")]
    RigidBodyInPlanarDomain(ObjectId),

    #[error("object {0} pushes the particle count past {}", usize::MAX)]
    ParticleCountOverflow(ObjectId),

    #[error("background grid has more cells than fit in a usize")]
    GridCellCountOverflow,

    #[error(transparent)]
    DuplicateObjectId(#[from] DuplicateObjectIdError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("object id {0} is used more than once")]
pub struct DuplicateObjectIdError(pub ObjectId);

/// Why an object was not added to the registry. The registry is unchanged
/// after either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error(transparent)]
    DuplicateObjectId(#[from] DuplicateObjectIdError),

    #[error("object {0} pushes the particle total past {}", usize::MAX)]
    ParticleCountOverflow(ObjectId),
}

/// A rigid-body mesh that could not be turned into a triangle mesh.
#[derive(Debug, Error)]
pub enum GeometryLoadError {
    #[error("geometry file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported geometry format for {}, expected a Wavefront .obj file", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("could not parse {}: {source}", path.display())]
    Obj {
        path: PathBuf,
        source: tobj::LoadError,
    },

    #[error("{} contains no triangles", .0.display())]
    EmptyMesh(PathBuf),

    #[error(
        "{} references vertex {index} but only has {n_vertices} vertices",
        path.display()
    )]
    FaceIndexOutOfRange {
        path: PathBuf,
        index: usize,
        n_vertices: usize,
    },
}

/// Anything that aborts scene setup. No partial registry survives one of these.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(ConfigValidationError),

    #[error("rigid body {id}: {source}")]
    GeometryLoad {
        id: ObjectId,
        source: GeometryLoadError,
    },

    #[error(transparent)]
    DuplicateObjectId(#[from] DuplicateObjectIdError),
}

impl From<ConfigValidationError> for SetupError {
    fn from(e: ConfigValidationError) -> Self {
        match e {
            ConfigValidationError::DuplicateObjectId(e) => SetupError::DuplicateObjectId(e),
            e => SetupError::Config(e),
        }
    }
}

impl From<RegistryError> for SetupError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::DuplicateObjectId(e) => SetupError::DuplicateObjectId(e),
            RegistryError::ParticleCountOverflow(id) => {
                SetupError::Config(ConfigValidationError::ParticleCountOverflow(id))
            }
        }
    }
}
