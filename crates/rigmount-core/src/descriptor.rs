//! Sensor descriptors - Declarative records for sensor mock-up placement
//!
//! A descriptor captures everything needed to place one sensor type on the
//! vehicle: where it mounts relative to the chassis, which primitive shapes
//! represent it, and the nominal spec sheet carried alongside as metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;

/// A position or offset in meters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Copy of this vector with `dz` added to the z component
    pub fn lifted(self, dz: f64) -> Self {
        Self {
            z: self.z + dz,
            ..self
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Edge length of a cube: uniform, or per-axis extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CubeSize {
    Uniform(f64),
    Extents([f64; 3]),
}

/// Primitive-shape layout for one sensor type
///
/// The tag set is closed: a recipe with an unrecognized `type` fails to
/// parse instead of reaching the synthesizer half-formed. Dimension values
/// are not checked here; the synthesizer rejects non-finite or
/// non-positive dimensions when it emits shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeometryRecipe {
    /// Single upright cylinder
    Cylinder { radius: f64, height: f64 },
    /// Spinning-lidar stack: mounting base with the emitter drum on top
    LidarCylinder {
        base_radius: f64,
        base_height: f64,
        sensor_radius: f64,
        sensor_height: f64,
    },
    /// Single cube, uniform or per-axis size
    Cube { size: CubeSize },
    /// Single sphere
    Sphere { radius: f64 },
    /// Camera body: housing cube, lens cylinder, and a camera node
    #[serde(rename = "cube+cylinder")]
    CameraAssembly {
        housing_size: f64,
        lens_radius: f64,
        lens_height: f64,
    },
    /// Single box with explicit width/height/depth
    #[serde(rename = "rectangle")]
    Box3 { width: f64, height: f64, depth: f64 },
}

impl GeometryRecipe {
    /// The recipe's `type` tag as written in catalog files
    pub fn type_name(&self) -> &'static str {
        match self {
            GeometryRecipe::Cylinder { .. } => "cylinder",
            GeometryRecipe::LidarCylinder { .. } => "lidar_cylinder",
            GeometryRecipe::Cube { .. } => "cube",
            GeometryRecipe::Sphere { .. } => "sphere",
            GeometryRecipe::CameraAssembly { .. } => "cube+cylinder",
            GeometryRecipe::Box3 { .. } => "rectangle",
        }
    }
}

/// Static record describing one sensor type
///
/// Descriptors are immutable once registered; re-registering a tag
/// replaces the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDescriptor {
    /// Catalog key (e.g., "camera_front")
    pub tag: String,
    /// Sensor category (lidar, camera, ultrasonic, ...), metadata only
    #[serde(default)]
    pub kind: String,
    /// Scene node name for the sensor's transform (e.g., "lidar_2d")
    pub name: String,
    /// Mount offset from the chassis reference, in meters
    #[serde(default)]
    pub relative_position: Vec3,
    /// Primitive shapes representing the sensor
    pub geometry: GeometryRecipe,
    /// Nominal spec sheet (range, FOV, rates, ...)
    ///
    /// Carried as opaque metadata. The one exception is the camera
    /// assembly, whose synthesis reads `focal_length` and `aperture`.
    #[serde(default)]
    pub specs: BTreeMap<String, serde_json::Value>,
}

/// Global mounting policy applied to every sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountingConfig {
    /// Name of the chassis node under the vehicle root
    #[serde(default = "default_chassis_reference")]
    pub chassis_reference: String,
    /// Uniform z correction in meters, absorbing the gap between the
    /// chassis origin convention and the authored mount heights
    #[serde(default)]
    pub correction_offset: f64,
    /// Nominal mounting-plate thickness in meters, documentation only
    #[serde(default)]
    pub sensor_thickness: f64,
}

fn default_chassis_reference() -> String {
    "chassis_link".to_string()
}

impl Default for MountingConfig {
    fn default() -> Self {
        Self {
            chassis_reference: default_chassis_reference(),
            correction_offset: 0.0,
            sensor_thickness: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_add_and_lift() {
        let a = Vec3::new(0.5, 0.0, -0.25);
        let b = Vec3::new(0.0, 0.25, 0.25);
        let sum = a + b;
        assert_eq!(sum, Vec3::new(0.5, 0.25, 0.0));
        assert_eq!(sum.lifted(-0.125), Vec3::new(0.5, 0.25, -0.125));
        assert_eq!(Vec3::ZERO.lifted(0.1).to_array(), [0.0, 0.0, 0.1]);
    }

    #[test]
    fn test_vec3_display() {
        let v = Vec3::new(0.15, 0.0, -0.08);
        assert_eq!(v.to_string(), "(0.150, 0.000, -0.080)");
    }

    #[test]
    fn test_vec3_partial_fields_default_to_zero() {
        let v: Vec3 = toml::from_str("z = -0.1").unwrap();
        assert_eq!(v, Vec3::new(0.0, 0.0, -0.1));
    }

    #[test]
    fn test_parse_cylinder_recipe() {
        let recipe: GeometryRecipe = toml::from_str(
            r#"
            type = "cylinder"
            radius = 0.02
            height = 0.01
        "#,
        )
        .unwrap();
        assert_eq!(
            recipe,
            GeometryRecipe::Cylinder {
                radius: 0.02,
                height: 0.01
            }
        );
        assert_eq!(recipe.type_name(), "cylinder");
    }

    #[test]
    fn test_parse_lidar_cylinder_recipe() {
        let recipe: GeometryRecipe = toml::from_str(
            r#"
            type = "lidar_cylinder"
            base_radius = 0.04
            base_height = 0.005
            sensor_radius = 0.035
            sensor_height = 0.04
        "#,
        )
        .unwrap();
        assert_eq!(recipe.type_name(), "lidar_cylinder");
    }

    #[test]
    fn test_parse_cube_recipe_uniform_and_extents() {
        let uniform: GeometryRecipe = toml::from_str(
            r#"
            type = "cube"
            size = 0.015
        "#,
        )
        .unwrap();
        assert_eq!(
            uniform,
            GeometryRecipe::Cube {
                size: CubeSize::Uniform(0.015)
            }
        );

        let extents: GeometryRecipe = toml::from_str(
            r#"
            type = "cube"
            size = [0.06, 0.04, 0.01]
        "#,
        )
        .unwrap();
        assert_eq!(
            extents,
            GeometryRecipe::Cube {
                size: CubeSize::Extents([0.06, 0.04, 0.01])
            }
        );
    }

    #[test]
    fn test_parse_camera_assembly_recipe() {
        let recipe: GeometryRecipe = toml::from_str(
            r#"
            type = "cube+cylinder"
            housing_size = 0.025
            lens_radius = 0.012
            lens_height = 0.015
        "#,
        )
        .unwrap();
        assert_eq!(
            recipe,
            GeometryRecipe::CameraAssembly {
                housing_size: 0.025,
                lens_radius: 0.012,
                lens_height: 0.015
            }
        );
    }

    #[test]
    fn test_unknown_recipe_type_is_rejected() {
        let result: Result<GeometryRecipe, _> = toml::from_str(
            r#"
            type = "torus"
            major_radius = 0.05
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_recipe_toml_round_trip() {
        let recipe = GeometryRecipe::Box3 {
            width: 0.06,
            height: 0.04,
            depth: 0.01,
        };
        let text = toml::to_string(&recipe).unwrap();
        assert!(text.contains("type = \"rectangle\""));
        let back: GeometryRecipe = toml::from_str(&text).unwrap();
        assert_eq!(back, recipe);
    }

    #[test]
    fn test_parse_full_descriptor() {
        let descriptor: SensorDescriptor = toml::from_str(
            r#"
            tag = "ultrasonic_front"
            kind = "ultrasonic"
            name = "ultrasonic_front"

            [relative_position]
            x = 0.15
            z = -0.08

            [geometry]
            type = "cylinder"
            radius = 0.02
            height = 0.01

            [specs]
            range_min = 0.02
            range_max = 4.0
            beam_angle = 15.0
        "#,
        )
        .unwrap();
        assert_eq!(descriptor.tag, "ultrasonic_front");
        assert_eq!(descriptor.relative_position, Vec3::new(0.15, 0.0, -0.08));
        assert_eq!(
            descriptor.specs.get("range_max").and_then(|v| v.as_f64()),
            Some(4.0)
        );
    }

    #[test]
    fn test_descriptor_defaults() {
        // kind, relative_position, and specs are all optional
        let descriptor: SensorDescriptor = toml::from_str(
            r#"
            tag = "beacon"
            name = "beacon"

            [geometry]
            type = "sphere"
            radius = 0.01
        "#,
        )
        .unwrap();
        assert_eq!(descriptor.kind, "");
        assert_eq!(descriptor.relative_position, Vec3::ZERO);
        assert!(descriptor.specs.is_empty());
    }

    #[test]
    fn test_mounting_config_defaults() {
        let mounting: MountingConfig = toml::from_str("").unwrap();
        assert_eq!(mounting.chassis_reference, "chassis_link");
        assert_eq!(mounting.correction_offset, 0.0);
        assert_eq!(mounting.sensor_thickness, 0.0);
    }
}
