use nalgebra::{Point3, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn from_points<'a, I: IntoIterator<Item = &'a Point3<f64>>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(
            BoundingBox {
                min: *first,
                max: *first,
            },
            |bb, p| BoundingBox {
                min: bb.min.inf(p),
                max: bb.max.sup(p),
            },
        ))
    }

    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }
}

#[derive(Debug, Clone)]
pub struct Triangle {
    pub p0: Point3<f64>,
    pub p1: Point3<f64>,
    pub p2: Point3<f64>,
}

impl Triangle {
    pub fn new(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>) -> Self {
        Triangle { p0, p1, p2 }
    }

    pub fn centroid(&self) -> Point3<f64> {
        ((self.p0.coords + self.p1.coords + self.p2.coords) / 3.0).into()
    }

    pub fn area(&self) -> f64 {
        let a = self.p1 - self.p0;
        let b = self.p2 - self.p0;
        0.5 * a.cross(&b).norm()
    }

    pub fn max_edge_length(&self) -> f64 {
        (self.p1 - self.p0)
            .norm()
            .max((self.p2 - self.p1).norm())
            .max((self.p0 - self.p2).norm())
    }

    /// Points on a barycentric lattice covering the triangle, with neighbouring
    /// samples no further apart than `spacing` along either edge from `p0`.
    pub fn sample(&self, spacing: f64) -> Vec<Point3<f64>> {
        let n = (self.max_edge_length() / spacing).ceil().max(1.0) as usize;
        let a = self.p1 - self.p0;
        let b = self.p2 - self.p0;
        let mut samples = Vec::with_capacity((n + 1) * (n + 2) / 2);
        for i in 0..=n {
            for j in 0..=(n - i) {
                let u = i as f64 / n as f64;
                let v = j as f64 / n as f64;
                samples.push(self.p0 + a * u + b * v);
            }
        }
        samples
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            min: self.p0.inf(&self.p1).inf(&self.p2),
            max: self.p0.sup(&self.p1).sup(&self.p2),
        }
    }
}
