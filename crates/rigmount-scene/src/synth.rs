//! Geometry synthesis - Turns a sensor descriptor into placed primitives
//!
//! One synthesis routine per recipe kind, shared by every sensor identity
//! using that kind. Dimension validation lives here: descriptors arrive
//! unchecked, and non-finite or non-positive dimensions fail the one
//! sensor being synthesized.

use thiserror::Error;
use tracing::debug;

use rigmount_core::{CubeSize, GeometryRecipe, SensorDescriptor, Vec3};

use crate::graph::{AttrValue, PrimKind, SceneError, SceneGraph, ATTR_TRANSLATE};
use crate::path::NodePath;

/// Child node name for the active sensing element
pub const CHILD_SENSOR: &str = "sensor";
/// Child node name for the lidar mounting base
pub const CHILD_BASE: &str = "base";
/// Child node name for the camera housing
pub const CHILD_HOUSING: &str = "housing";
/// Child node name for the camera lens
pub const CHILD_LENS: &str = "lens";

#[derive(Error, Debug)]
pub enum SynthError {
    #[error("{shape} {field} must be finite and positive, got {value}")]
    BadDimension {
        shape: &'static str,
        field: &'static str,
        value: f64,
    },
    #[error("Camera spec '{0}' is missing or not numeric")]
    MissingCameraSpec(&'static str),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Place one sensor: a transform node at `world_pos` under `parent`, with
/// the recipe's primitive shapes as children.
///
/// Returns the path of the sensor's transform node. On error the scene is
/// not rolled back; nodes defined before the failure remain.
pub fn synthesize_sensor(
    scene: &mut dyn SceneGraph,
    parent: &NodePath,
    descriptor: &SensorDescriptor,
    world_pos: Vec3,
) -> Result<NodePath, SynthError> {
    let sensor_path = parent.child(&descriptor.name)?;
    scene.define(PrimKind::Xform, &sensor_path)?;
    scene.set_attr(&sensor_path, ATTR_TRANSLATE, AttrValue::from(world_pos))?;

    match &descriptor.geometry {
        GeometryRecipe::Cylinder { radius, height } => {
            emit_cylinder(scene, &sensor_path, CHILD_SENSOR, "cylinder", *radius, *height)?;
        }
        GeometryRecipe::LidarCylinder {
            base_radius,
            base_height,
            sensor_radius,
            sensor_height,
        } => {
            emit_cylinder(
                scene,
                &sensor_path,
                CHILD_BASE,
                "lidar base",
                *base_radius,
                *base_height,
            )?;
            emit_cylinder(
                scene,
                &sensor_path,
                CHILD_SENSOR,
                "lidar drum",
                *sensor_radius,
                *sensor_height,
            )?;
        }
        GeometryRecipe::Cube { size } => {
            emit_cube(scene, &sensor_path, CHILD_SENSOR, *size)?;
        }
        GeometryRecipe::Sphere { radius } => {
            let radius = dim("sphere", "radius", *radius)?;
            let shape_path = sensor_path.child(CHILD_SENSOR)?;
            scene.define(PrimKind::Sphere, &shape_path)?;
            scene.set_attr(&shape_path, "radius", AttrValue::Scalar(radius))?;
            debug!(path = %shape_path, radius, "Defined sphere");
        }
        GeometryRecipe::CameraAssembly {
            housing_size,
            lens_radius,
            lens_height,
        } => {
            emit_cube(scene, &sensor_path, CHILD_HOUSING, CubeSize::Uniform(*housing_size))?;
            emit_cylinder(scene, &sensor_path, CHILD_LENS, "lens", *lens_radius, *lens_height)?;

            let focal_length = camera_spec(descriptor, "focal_length")?;
            let aperture = camera_spec(descriptor, "aperture")?;
            let camera_path = sensor_path.child(CHILD_SENSOR)?;
            scene.define(PrimKind::Camera, &camera_path)?;
            scene.set_attr(&camera_path, "focalLength", AttrValue::Scalar(focal_length))?;
            scene.set_attr(
                &camera_path,
                "horizontalAperture",
                AttrValue::Scalar(aperture),
            )?;
            scene.set_attr(&camera_path, "verticalAperture", AttrValue::Scalar(aperture))?;
            debug!(path = %camera_path, focal_length, aperture, "Defined camera");
        }
        GeometryRecipe::Box3 {
            width,
            height,
            depth,
        } => {
            emit_cube(
                scene,
                &sensor_path,
                CHILD_SENSOR,
                CubeSize::Extents([*width, *height, *depth]),
            )?;
        }
    }

    debug!(
        tag = %descriptor.tag,
        path = %sensor_path,
        shape = descriptor.geometry.type_name(),
        pos = %world_pos,
        "Sensor geometry synthesized"
    );
    Ok(sensor_path)
}

fn emit_cylinder(
    scene: &mut dyn SceneGraph,
    parent: &NodePath,
    name: &str,
    shape: &'static str,
    radius: f64,
    height: f64,
) -> Result<(), SynthError> {
    let radius = dim(shape, "radius", radius)?;
    let height = dim(shape, "height", height)?;
    let shape_path = parent.child(name)?;
    scene.define(PrimKind::Cylinder, &shape_path)?;
    scene.set_attr(&shape_path, "radius", AttrValue::Scalar(radius))?;
    scene.set_attr(&shape_path, "height", AttrValue::Scalar(height))?;
    debug!(path = %shape_path, radius, height, "Defined cylinder");
    Ok(())
}

fn emit_cube(
    scene: &mut dyn SceneGraph,
    parent: &NodePath,
    name: &str,
    size: CubeSize,
) -> Result<(), SynthError> {
    let value = match size {
        CubeSize::Uniform(edge) => AttrValue::Scalar(dim("cube", "size", edge)?),
        CubeSize::Extents([width, height, depth]) => AttrValue::Vector([
            dim("cube", "width", width)?,
            dim("cube", "height", height)?,
            dim("cube", "depth", depth)?,
        ]),
    };
    let shape_path = parent.child(name)?;
    scene.define(PrimKind::Cube, &shape_path)?;
    scene.set_attr(&shape_path, "size", value)?;
    debug!(path = %shape_path, "Defined cube");
    Ok(())
}

fn dim(shape: &'static str, field: &'static str, value: f64) -> Result<f64, SynthError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SynthError::BadDimension { shape, field, value })
    }
}

fn camera_spec(descriptor: &SensorDescriptor, key: &'static str) -> Result<f64, SynthError> {
    descriptor
        .specs
        .get(key)
        .and_then(|value| value.as_f64())
        .ok_or(SynthError::MissingCameraSpec(key))
}
