use nalgebra::DVector;
use num_traits::ToPrimitive;

pub mod mesh;
pub mod triangle;
pub mod voxel;

/// Number of values in `start, start + step, ...` strictly below `stop`, or
/// `None` if there are more than a `usize` can count.
pub fn arange_len(start: f64, stop: f64, step: f64) -> Option<usize> {
    if !(step > 0.0) || stop <= start {
        return Some(0);
    }
    ((stop - start) / step).ceil().to_usize()
}

pub fn arange(start: f64, stop: f64, step: f64) -> Option<Vec<f64>> {
    let n = arange_len(start, stop, step)?;
    Some((0..n).map(|i| start + i as f64 * step).collect())
}

/// Number of points `lattice` returns for the same arguments, or `None` on
/// overflow.
pub fn lattice_len(start: &DVector<f64>, end: &DVector<f64>, step: f64) -> Option<usize> {
    start
        .iter()
        .zip(end.iter())
        .try_fold(1usize, |n, (s, e)| n.checked_mul(arange_len(*s, *e, step)?))
}

/// Regular lattice filling the half-open box `[start, end)` at spacing `step`.
/// The first axis varies slowest. `None` if the point count overflows.
pub fn lattice(
    start: &DVector<f64>,
    end: &DVector<f64>,
    step: f64,
) -> Option<Vec<DVector<f64>>> {
    let n = lattice_len(start, end, step)?;
    if start.is_empty() || n == 0 {
        return Some(Vec::new());
    }
    let axes = start
        .iter()
        .zip(end.iter())
        .map(|(s, e)| arange(*s, *e, step))
        .collect::<Option<Vec<_>>>()?;

    let mut samples = vec![Vec::with_capacity(axes.len())];
    for axis in &axes {
        samples = samples
            .iter()
            .flat_map(|prefix| {
                axis.iter().map(move |x| {
                    let mut p = prefix.clone();
                    p.push(*x);
                    p
                })
            })
            .collect();
    }
    Some(samples.into_iter().map(DVector::from_vec).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    #[test]
    fn test_arange_is_half_open() {
        assert_eq!(arange_len(0.0, 1.0, 0.25), Some(4));
        assert_eq!(arange_len(0.0, 1.0, 0.3), Some(4));
        assert_eq!(arange_len(0.0, 0.9, 0.3), Some(3));
        assert_eq!(arange_len(0.0, 1.0, 0.02), Some(50));
        assert_eq!(arange_len(0.1, 1.2, 0.02), Some(55));
        let xs = arange(-0.5, 0.5, 0.25).unwrap();
        assert_eq!(xs.len(), 4);
        assert_relative_eq!(xs[0], -0.5);
        assert_relative_eq!(xs[3], 0.25);
    }

    #[test]
    fn test_arange_empty_range() {
        assert_eq!(arange_len(1.0, 1.0, 0.1), Some(0));
        assert_eq!(arange_len(1.0, 0.0, 0.1), Some(0));
        assert_eq!(arange_len(0.0, 1.0, 0.0), Some(0));
        assert_eq!(arange(2.0, 1.0, 0.1), Some(Vec::new()));
    }

    #[test]
    fn test_arange_len_too_large_to_count() {
        assert_eq!(arange_len(0.0, 1e30, 0.02), None);
        assert_eq!(arange(0.0, 1e30, 0.02), None);
    }

    #[test]
    fn test_lattice() {
        let points = lattice(&dvector![0.0, 0.0], &dvector![0.3, 0.2], 0.1).unwrap();
        assert_eq!(points.len(), 3 * 2);
        assert_eq!(lattice_len(&dvector![0.0, 0.0], &dvector![0.3, 0.2], 0.1), Some(6));
        assert_relative_eq!(points[0], dvector![0.0, 0.0]);
        assert_relative_eq!(points[1], dvector![0.0, 0.1]);
        assert_relative_eq!(points[5], dvector![0.2, 0.1]);

        assert_eq!(lattice(&dvector![0.0, 0.0], &dvector![0.3, 0.0], 0.1), Some(Vec::new()));
    }

    #[test]
    fn test_lattice_len_overflow() {
        // 5e7 points per axis: 1.25e23 in total.
        let end = dvector![1e6, 1e6, 1e6];
        assert_eq!(lattice_len(&DVector::zeros(3), &end, 0.02), None);
        assert_eq!(lattice(&DVector::zeros(3), &end, 0.02), None);
    }
}
