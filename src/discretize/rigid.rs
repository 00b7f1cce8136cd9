use log::debug;

use crate::{
    config::setup::objects::RigidBodyConfig,
    error::SetupError,
    geometry::mesh::{GeometryProvider, TriangleMesh},
    registry::RigidBody,
};

/// Loads the body's mesh and places it in world space: scaled, rotated about
/// its own centroid, then translated.
pub fn place_mesh<G: GeometryProvider + ?Sized>(
    config: &RigidBodyConfig,
    provider: &G,
) -> Result<TriangleMesh, SetupError> {
    let id = config.object_id;
    let transform = config.transform()?;

    let mut mesh = provider
        .load(&config.geometry_file)
        .map_err(|source| SetupError::GeometryLoad { id, source })?;

    mesh.scale(transform.scale);
    let pivot = mesh.centroid();
    mesh.rotate(transform.rotation_angle, &transform.rotation_axis, &pivot);
    mesh.translate(&transform.translation);
    debug!(
        "Rigid body {}: placed {} about {:?} by {} rad, bounds {:?}",
        id,
        config.geometry_file.display(),
        transform.rotation_axis.as_slice(),
        transform.rotation_angle,
        mesh.bounding_box()
    );
    Ok(mesh)
}

/// Samples a rigid body into particles one diameter apart.
pub fn discretize_rigid_body<G: GeometryProvider + ?Sized>(
    config: &RigidBodyConfig,
    particle_diameter: f64,
    provider: &G,
) -> Result<RigidBody, SetupError> {
    let mesh = place_mesh(config, provider)?;
    let points = mesh.voxelize_fill(particle_diameter);
    Ok(RigidBody {
        config: config.clone(),
        points,
        mesh,
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    use super::*;
    use crate::{
        config::setup::objects::ObjectId,
        error::{ConfigValidationError, GeometryLoadError},
        geometry::mesh::ObjLoader,
    };

    fn loader() -> ObjLoader {
        ObjLoader::with_root(Path::new(env!("CARGO_MANIFEST_DIR")).join("meshes"))
    }

    fn cube_body(scale: f64, angle: f64, translation: Vec<f64>) -> RigidBodyConfig {
        RigidBodyConfig {
            object_id: ObjectId(1),
            geometry_file: "cube.obj".into(),
            scale,
            translation,
            rotation_angle: angle,
            rotation_axis: Some(vec![0.0, 0.0, 1.0]),
        }
    }

    #[test]
    fn test_place_mesh_order() {
        // Scale to [0, 2]^3, quarter turn about the centroid (1, 1, 1), then shift.
        let mesh = place_mesh(&cube_body(2.0, 90.0, vec![10.0, 0.0, 0.0]), &loader()).unwrap();
        let bb = mesh.bounding_box().unwrap();
        assert_relative_eq!(bb.min, Point3::new(10.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(bb.max, Point3::new(12.0, 2.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(mesh.centroid(), Point3::new(11.0, 1.0, 1.0), epsilon = 1e-12);
        // The vertex that started at the origin ends at the rotated corner.
        assert_relative_eq!(mesh.vertices[0], Point3::new(12.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_discretize_cube() {
        let body =
            discretize_rigid_body(&cube_body(1.0, 0.0, vec![0.0; 3]), 0.25, &loader()).unwrap();
        assert_eq!(body.particle_num(), 125);
        assert_eq!(body.config.object_id, ObjectId(1));
        assert_relative_eq!(body.mesh.centroid(), Point3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_repeat_discretization_is_stable() {
        let config = cube_body(0.3, 37.0, vec![0.1, 0.2, 0.3]);
        let a = discretize_rigid_body(&config, 0.02, &loader()).unwrap();
        let b = discretize_rigid_body(&config, 0.02, &loader()).unwrap();
        assert_eq!(a.particle_num(), b.particle_num());
        assert_eq!(a.points, b.points);
        assert!(a.particle_num() > 0);
    }

    #[test]
    fn test_translation_shifts_points() {
        let at_origin =
            discretize_rigid_body(&cube_body(1.0, 0.0, vec![0.0; 3]), 0.25, &loader()).unwrap();
        let shifted =
            discretize_rigid_body(&cube_body(1.0, 0.0, vec![0.5, 0.0, 0.0]), 0.25, &loader())
                .unwrap();
        assert_eq!(at_origin.particle_num(), shifted.particle_num());
        for (p, q) in at_origin.points.iter().zip(shifted.points.iter()) {
            assert_relative_eq!(q - p, Vector3::new(0.5, 0.0, 0.0), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_missing_file_reports_body() {
        let mut config = cube_body(1.0, 0.0, vec![0.0; 3]);
        config.geometry_file = "nope.obj".into();
        match discretize_rigid_body(&config, 0.1, &loader()) {
            Err(SetupError::GeometryLoad {
                id,
                source: GeometryLoadError::NotFound(_),
            }) => assert_eq!(id, ObjectId(1)),
            other => panic!("unexpected result: {:?}", other.map(|b| b.particle_num())),
        }
    }

    #[test]
    fn test_missing_axis_is_checked_before_loading() {
        let mut config = cube_body(1.0, 0.0, vec![0.0; 3]);
        config.rotation_axis = None;
        config.geometry_file = "nope.obj".into();
        assert!(matches!(
            discretize_rigid_body(&config, 0.1, &loader()),
            Err(SetupError::Config(ConfigValidationError::MissingRotationAxis(_)))
        ));
    }
}
