//! Voxelization of triangle meshes, with interior fill.
//!
//! Voxel `(i, j, k)` is centred at `(i, j, k) * pitch` in world space, so grids
//! built from different meshes at the same pitch share one lattice.

use std::collections::{HashSet, VecDeque};

use log::debug;
use nalgebra::{Point3, Vector3};

use super::mesh::TriangleMesh;

// Triangles with area below this fraction of their longest edge squared are
// treated as having no surface.
const DEGENERATE_AREA_RATIO: f64 = 1e-12;

pub struct VoxelGrid {
    pub pitch: f64,
    /// Lattice index of the grid's first voxel.
    pub origin: Vector3<i64>,
    /// Number of voxels along each axis `[nx, ny, nz]`.
    pub shape: [usize; 3],
    /// Row-major `[x][y][z]` occupancy.
    occupied: Vec<bool>,
}

impl VoxelGrid {
    /// Marks every voxel that the mesh surface passes through.
    pub fn from_surface(mesh: &TriangleMesh, pitch: f64) -> Self {
        let mut hits: HashSet<Vector3<i64>> = HashSet::new();
        for triangle in mesh.triangles() {
            let max_edge = triangle.max_edge_length();
            if triangle.area() <= DEGENERATE_AREA_RATIO * max_edge * max_edge {
                continue;
            }
            // Half-pitch spacing so that no voxel the triangle crosses is skipped.
            for p in triangle.sample(0.5 * pitch) {
                hits.insert(p.coords.map(|x| (x / pitch).round() as i64));
            }
        }

        let Some(first) = hits.iter().next().copied() else {
            return VoxelGrid {
                pitch,
                origin: Vector3::zeros(),
                shape: [0, 0, 0],
                occupied: Vec::new(),
            };
        };
        let (min, max) = hits
            .iter()
            .fold((first, first), |(lo, hi), h| {
                (lo.zip_map(h, i64::min), hi.zip_map(h, i64::max))
            });
        let extent = max - min;
        let shape = [
            extent.x as usize + 1,
            extent.y as usize + 1,
            extent.z as usize + 1,
        ];

        let mut grid = VoxelGrid {
            pitch,
            origin: min,
            shape,
            occupied: vec![false; shape[0] * shape[1] * shape[2]],
        };
        for h in &hits {
            let d = h - min;
            let ix = grid.flat_index(d.x as usize, d.y as usize, d.z as usize);
            grid.occupied[ix] = true;
        }
        grid
    }

    fn flat_index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        let [_, ny, nz] = self.shape;
        ix * ny * nz + iy * nz + iz
    }

    /// Marks every voxel enclosed by occupied voxels. A voxel is exterior if a
    /// face-connected path of empty voxels links it to the outside of the grid.
    pub fn fill(&mut self) {
        let [nx, ny, nz] = self.shape;
        if self.occupied.is_empty() {
            return;
        }

        // One voxel of padding on every side so the outside is connected.
        let (px, py, pz) = (nx + 2, ny + 2, nz + 2);
        let padded = |x: usize, y: usize, z: usize| x * py * pz + y * pz + z;
        let is_wall = |x: usize, y: usize, z: usize| {
            (1..=nx).contains(&x)
                && (1..=ny).contains(&y)
                && (1..=nz).contains(&z)
                && self.occupied[self.flat_index(x - 1, y - 1, z - 1)]
        };

        let mut exterior = vec![false; px * py * pz];
        let mut queue: VecDeque<(usize, usize, usize)> = VecDeque::from([(0, 0, 0)]);
        exterior[padded(0, 0, 0)] = true;
        while let Some((x, y, z)) = queue.pop_front() {
            let neighbours = [
                (x.wrapping_sub(1), y, z),
                (x + 1, y, z),
                (x, y.wrapping_sub(1), z),
                (x, y + 1, z),
                (x, y, z.wrapping_sub(1)),
                (x, y, z + 1),
            ];
            for (x, y, z) in neighbours {
                if x >= px || y >= py || z >= pz {
                    continue;
                }
                let ix = padded(x, y, z);
                if !exterior[ix] && !is_wall(x, y, z) {
                    exterior[ix] = true;
                    queue.push_back((x, y, z));
                }
            }
        }

        for x in 0..nx {
            for y in 0..ny {
                for z in 0..nz {
                    if !exterior[padded(x + 1, y + 1, z + 1)] {
                        let ix = self.flat_index(x, y, z);
                        self.occupied[ix] = true;
                    }
                }
            }
        }
    }

    pub fn filled_count(&self) -> usize {
        self.occupied.iter().filter(|o| **o).count()
    }

    /// World-space centres of the occupied voxels, x-major.
    pub fn points(&self) -> Vec<Point3<f64>> {
        let [nx, ny, nz] = self.shape;
        let mut points = Vec::with_capacity(self.filled_count());
        for x in 0..nx {
            for y in 0..ny {
                for z in 0..nz {
                    if self.occupied[self.flat_index(x, y, z)] {
                        let index = self.origin + Vector3::new(x as i64, y as i64, z as i64);
                        points.push(Point3::from(index.map(|i| i as f64 * self.pitch)));
                    }
                }
            }
        }
        points
    }
}

impl TriangleMesh {
    /// Voxel centres covering the surface and interior of the mesh.
    pub fn voxelize_fill(&self, pitch: f64) -> Vec<Point3<f64>> {
        let mut grid = VoxelGrid::from_surface(self, pitch);
        let n_surface = grid.filled_count();
        grid.fill();
        debug!(
            "Voxelized at pitch {}: grid {:?}, {} surface voxels, {} after fill",
            pitch,
            grid.shape,
            n_surface,
            grid.filled_count()
        );
        grid.points()
    }
}
