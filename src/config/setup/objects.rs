use std::path::PathBuf;

use nalgebra::{DVector, UnitVector3, Vector3};

use crate::error::ConfigValidationError;

#[derive(
    serde::Serialize,
    serde::Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FluidBlockConfig {
    pub object_id: ObjectId,
    pub start: Vec<f64>,
    pub end: Vec<f64>,
}

impl FluidBlockConfig {
    pub fn start(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.start)
    }

    pub fn end(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.end)
    }

    pub fn validate(&self, dim: usize) -> Result<(), ConfigValidationError> {
        let label = |name: &str| format!("FluidBlocks[{}].{}", self.object_id, name);
        check_components(&label("start"), &self.start, dim)?;
        check_components(&label("end"), &self.end, dim)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RigidBodyConfig {
    pub object_id: ObjectId,
    pub geometry_file: PathBuf,
    pub scale: f64,
    pub translation: Vec<f64>,
    // Degrees.
    pub rotation_angle: f64,
    // Optional only so that its absence is reported as a validation error
    // naming the body, rather than as a parse failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_axis: Option<Vec<f64>>,
}

/// World placement of a rigid-body mesh, applied as scale, then rotation about
/// the scaled mesh's centroid, then translation.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidTransform {
    pub scale: f64,
    // Radians.
    pub rotation_angle: f64,
    pub rotation_axis: UnitVector3<f64>,
    pub translation: Vector3<f64>,
}

impl RigidBodyConfig {
    pub fn transform(&self) -> Result<RigidTransform, ConfigValidationError> {
        let id = self.object_id;
        let label = |name: &str| format!("RigidBodies[{}].{}", id, name);

        if !self.scale.is_finite() {
            return Err(ConfigValidationError::NonFinite {
                field: label("scale"),
            });
        }
        if self.scale <= 0.0 {
            return Err(ConfigValidationError::NonPositiveScale {
                id,
                scale: self.scale,
            });
        }
        if !self.rotation_angle.is_finite() {
            return Err(ConfigValidationError::NonFinite {
                field: label("rotationAngle"),
            });
        }

        check_components(&label("translation"), &self.translation, 3)?;

        let axis = self
            .rotation_axis
            .as_ref()
            .ok_or(ConfigValidationError::MissingRotationAxis(id))?;
        check_components(&label("rotationAxis"), axis, 3)?;
        let rotation_axis = UnitVector3::try_new(Vector3::from_column_slice(axis), f64::EPSILON)
            .ok_or(ConfigValidationError::ZeroRotationAxis(id))?;

        Ok(RigidTransform {
            scale: self.scale,
            rotation_angle: self.rotation_angle.to_radians(),
            rotation_axis,
            translation: Vector3::from_column_slice(&self.translation),
        })
    }
}

pub(crate) fn check_components(
    field: &str,
    values: &[f64],
    expected: usize,
) -> Result<(), ConfigValidationError> {
    if values.len() != expected {
        return Err(ConfigValidationError::DimensionMismatch {
            field: field.to_string(),
            expected,
            found: values.len(),
        });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ConfigValidationError::NonFinite {
            field: field.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use super::*;

    fn rigid(axis: Option<Vec<f64>>) -> RigidBodyConfig {
        RigidBodyConfig {
            object_id: ObjectId(3),
            geometry_file: "meshes/cube.obj".into(),
            scale: 2.0,
            translation: vec![1.0, 0.0, -1.0],
            rotation_angle: 90.0,
            rotation_axis: axis,
        }
    }

    #[test]
    fn test_transform_converts_degrees_and_normalizes_axis() {
        let t = rigid(Some(vec![0.0, 0.0, 5.0])).transform().unwrap();
        assert_relative_eq!(t.rotation_angle, std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(t.rotation_axis.into_inner(), Vector3::z());
        assert_relative_eq!(t.translation, Vector3::new(1.0, 0.0, -1.0));
        assert_relative_eq!(t.scale, 2.0);
    }

    #[test]
    fn test_missing_axis_is_rejected() {
        assert_eq!(
            rigid(None).transform(),
            Err(ConfigValidationError::MissingRotationAxis(ObjectId(3)))
        );
    }

    #[test]
    fn test_zero_axis_is_rejected() {
        assert_eq!(
            rigid(Some(vec![0.0, 0.0, 0.0])).transform(),
            Err(ConfigValidationError::ZeroRotationAxis(ObjectId(3)))
        );
    }

    #[test]
    fn test_malformed_translation_is_rejected() {
        let mut config = rigid(Some(vec![1.0, 0.0, 0.0]));
        config.translation = vec![1.0, 2.0];
        assert!(matches!(
            config.transform(),
            Err(ConfigValidationError::DimensionMismatch {
                expected: 3,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_scale_is_rejected() {
        let mut config = rigid(Some(vec![1.0, 0.0, 0.0]));
        config.scale = 0.0;
        assert!(matches!(
            config.transform(),
            Err(ConfigValidationError::NonPositiveScale { .. })
        ));
    }

    #[test]
    fn test_fluid_block_dimension_check() {
        let block = FluidBlockConfig {
            object_id: ObjectId(0),
            start: vec![0.0, 0.0],
            end: vec![1.0, 1.0, 1.0],
        };
        assert!(block.validate(2).is_err());
        assert!(block.validate(3).is_err());
    }
}
