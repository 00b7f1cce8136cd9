use std::path::{Path, PathBuf};

use log::debug;
use nalgebra::{Point3, Rotation3, UnitVector3, Vector3};
use tobj::LoadOptions;

use crate::error::GeometryLoadError;

use super::triangle::{BoundingBox, Triangle};

#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<[usize; 3]>,
}

impl TriangleMesh {
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<[usize; 3]>) -> Self {
        TriangleMesh { vertices, faces }
    }

    /// Mean of the vertex positions.
    pub fn centroid(&self) -> Point3<f64> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        (sum / self.vertices.len() as f64).into()
    }

    pub fn scale(&mut self, factor: f64) {
        for v in self.vertices.iter_mut() {
            v.coords *= factor;
        }
    }

    /// Rotates by `angle` radians about `axis` through `pivot`.
    pub fn rotate(&mut self, angle: f64, axis: &UnitVector3<f64>, pivot: &Point3<f64>) {
        let rot = Rotation3::from_axis_angle(axis, angle);
        for v in self.vertices.iter_mut() {
            *v = *pivot + rot * (*v - *pivot);
        }
    }

    pub fn translate(&mut self, offset: &Vector3<f64>) {
        for v in self.vertices.iter_mut() {
            *v += *offset;
        }
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(|[a, b, c]| {
            Triangle::new(self.vertices[*a], self.vertices[*b], self.vertices[*c])
        })
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.vertices)
    }
}

/// Source of rigid-body meshes.
pub trait GeometryProvider: Sync {
    fn load(&self, path: &Path) -> Result<TriangleMesh, GeometryLoadError>;
}

/// Loads Wavefront OBJ files. Relative paths are resolved against `root` when
/// one is set.
#[derive(Debug, Clone, Default)]
pub struct ObjLoader {
    pub root: Option<PathBuf>,
}

impl ObjLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        ObjLoader {
            root: Some(root.into()),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl GeometryProvider for ObjLoader {
    fn load(&self, path: &Path) -> Result<TriangleMesh, GeometryLoadError> {
        let path = self.resolve(path);
        let is_obj = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("obj"));
        if !is_obj {
            return Err(GeometryLoadError::UnsupportedFormat(path));
        }
        if !path.is_file() {
            return Err(GeometryLoadError::NotFound(path));
        }

        let (models, _) = tobj::load_obj(
            &path,
            &LoadOptions {
                single_index: false,
                triangulate: true,
                ignore_points: true,
                ignore_lines: true,
                ..Default::default()
            },
        )
        .map_err(|source| GeometryLoadError::Obj {
            path: path.clone(),
            source,
        })?;

        // Every model in the file goes into one mesh.
        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for model in &models {
            let mesh = &model.mesh;
            let offset = vertices.len();
            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Point3::new(p[0] as f64, p[1] as f64, p[2] as f64)),
            );
            for face in mesh.indices.chunks_exact(3) {
                faces.push([
                    offset + face[0] as usize,
                    offset + face[1] as usize,
                    offset + face[2] as usize,
                ]);
            }
        }

        if faces.is_empty() {
            return Err(GeometryLoadError::EmptyMesh(path));
        }
        if let Some(&index) = faces.iter().flatten().find(|&&i| i >= vertices.len()) {
            return Err(GeometryLoadError::FaceIndexOutOfRange {
                path,
                index,
                n_vertices: vertices.len(),
            });
        }

        debug!(
            "Loaded {}: {} vertices, {} faces",
            path.display(),
            vertices.len(),
            faces.len()
        );
        Ok(TriangleMesh::new(vertices, faces))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn meshes_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("meshes")
    }

    fn cube() -> TriangleMesh {
        ObjLoader::with_root(meshes_dir())
            .load(Path::new("cube.obj"))
            .unwrap()
    }

    #[test]
    fn test_load_cube() {
        let mesh = cube();
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.faces.len(), 12);
        assert_relative_eq!(mesh.centroid(), Point3::new(0.5, 0.5, 0.5));
        let total_area: f64 = mesh.triangles().map(|t| t.area()).sum();
        assert_relative_eq!(total_area, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_load_errors() {
        let loader = ObjLoader::with_root(meshes_dir());
        assert!(matches!(
            loader.load(Path::new("missing.obj")),
            Err(GeometryLoadError::NotFound(_))
        ));
        assert!(matches!(
            loader.load(Path::new("cube.stl")),
            Err(GeometryLoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_scale_then_translate() {
        let mut mesh = cube();
        mesh.scale(2.0);
        mesh.translate(&Vector3::new(-1.0, 0.0, 3.0));
        let bb = mesh.bounding_box().unwrap();
        assert_relative_eq!(bb.min, Point3::new(-1.0, 0.0, 3.0));
        assert_relative_eq!(bb.max, Point3::new(1.0, 2.0, 5.0));
    }

    #[test]
    fn test_rotation_about_centroid_keeps_centroid() {
        let mut mesh = cube();
        let pivot = mesh.centroid();
        let axis = UnitVector3::new_normalize(Vector3::new(1.0, 1.0, 0.0));
        mesh.rotate(0.7, &axis, &pivot);
        assert_relative_eq!(mesh.centroid(), pivot, epsilon = 1e-12);
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let mut mesh = TriangleMesh::new(
            vec![Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0)],
            vec![],
        );
        mesh.rotate(FRAC_PI_2, &Vector3::z_axis(), &Point3::origin());
        assert_relative_eq!(mesh.vertices[0], Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[1], Point3::origin());
    }
}
