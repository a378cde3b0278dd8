//! Sensor catalog - Keyed table of sensor descriptors plus mounting policy
//!
//! The catalog maps type tags (e.g., "camera_front") to descriptors and
//! carries the reserved mounting entry. It loads from TOML, can be extended
//! at runtime, and preserves registration order for listing and batch
//! placement.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::descriptor::{CubeSize, GeometryRecipe, MountingConfig, SensorDescriptor, Vec3};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read sensor catalog: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse sensor catalog: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize sensor catalog: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// The sensor descriptor table
///
/// Registration order is observable: `list_sensor_types` and iteration
/// return descriptors in the order they were first registered.
/// Re-registering a tag replaces the descriptor in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorCatalog {
    /// Mounting policy shared by every sensor
    #[serde(default)]
    mounting: MountingConfig,
    /// Descriptor entries in registration order
    #[serde(default, rename = "sensor")]
    sensors: Vec<SensorDescriptor>,
}

impl Default for SensorCatalog {
    fn default() -> Self {
        Self::new(MountingConfig::default())
    }
}

impl SensorCatalog {
    /// Create an empty catalog with the given mounting policy
    pub fn new(mounting: MountingConfig) -> Self {
        Self {
            mounting,
            sensors: Vec::new(),
        }
    }

    /// Load a catalog from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml(&content)?;
        info!(
            path = %path.display(),
            count = catalog.len(),
            "Loaded sensor catalog"
        );
        Ok(catalog)
    }

    /// Load a catalog from a TOML string
    ///
    /// Duplicate tags collapse with later entries winning, at the position
    /// the tag first appeared.
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let parsed: SensorCatalog = toml::from_str(content)?;
        let mut catalog = Self::new(parsed.mounting);
        for descriptor in parsed.sensors {
            catalog.register(descriptor);
        }
        Ok(catalog)
    }

    /// Serialize the catalog to a TOML string
    pub fn to_toml(&self) -> Result<String, CatalogError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the catalog to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<(), CatalogError> {
        std::fs::write(path, self.to_toml()?)?;
        info!(path = %path.display(), count = self.len(), "Wrote sensor catalog");
        Ok(())
    }

    /// Look up a descriptor by type tag
    pub fn get(&self, tag: &str) -> Option<&SensorDescriptor> {
        self.sensors.iter().find(|d| d.tag == tag)
    }

    /// Register a descriptor, replacing any existing entry with the same tag
    ///
    /// Returns true when an existing descriptor was replaced. Replacement
    /// keeps the tag's original position in the listing order.
    pub fn register(&mut self, descriptor: SensorDescriptor) -> bool {
        match self.sensors.iter_mut().find(|d| d.tag == descriptor.tag) {
            Some(existing) => {
                debug!(tag = %descriptor.tag, "Replacing sensor descriptor");
                *existing = descriptor;
                true
            }
            None => {
                self.sensors.push(descriptor);
                false
            }
        }
    }

    /// All registered type tags, in registration order
    pub fn list_sensor_types(&self) -> Vec<&str> {
        self.sensors.iter().map(|d| d.tag.as_str()).collect()
    }

    /// Iterate descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &SensorDescriptor> {
        self.sensors.iter()
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// The mounting policy
    pub fn mounting(&self) -> &MountingConfig {
        &self.mounting
    }

    pub fn set_mounting(&mut self, mounting: MountingConfig) {
        self.mounting = mounting;
    }

    /// The built-in sensor table for the demo rover rig
    ///
    /// Seven sensor types covering every geometry recipe, plus a mounting
    /// policy with a -0.15 m vertical correction.
    pub fn builtin() -> Self {
        let mut catalog = Self::new(MountingConfig {
            chassis_reference: "chassis_link".to_string(),
            correction_offset: -0.15,
            sensor_thickness: 0.005,
        });

        catalog.register(SensorDescriptor {
            tag: "lidar".to_string(),
            kind: "lidar".to_string(),
            name: "lidar_2d".to_string(),
            relative_position: Vec3::new(0.0, 0.0, -0.10),
            geometry: GeometryRecipe::LidarCylinder {
                base_radius: 0.04,
                base_height: 0.005,
                sensor_radius: 0.035,
                sensor_height: 0.04,
            },
            specs: spec_entries(&[
                ("range_min", json!(0.1)),
                ("range_max", json!(30.0)),
                ("horizontal_fov", json!(360.0)),
                ("vertical_fov", json!(1.0)),
                ("rotation_rate", json!(10.0)),
            ]),
        });

        catalog.register(SensorDescriptor {
            tag: "camera_front".to_string(),
            kind: "camera".to_string(),
            name: "camera_front".to_string(),
            relative_position: Vec3::new(0.12, 0.0, -0.05),
            geometry: GeometryRecipe::CameraAssembly {
                housing_size: 0.025,
                lens_radius: 0.012,
                lens_height: 0.015,
            },
            specs: spec_entries(&[
                ("resolution", json!([640, 480])),
                ("fov", json!(60.0)),
                ("focal_length", json!(24.0)),
                ("aperture", json!(20.955)),
            ]),
        });

        catalog.register(SensorDescriptor {
            tag: "camera_rear".to_string(),
            kind: "camera".to_string(),
            name: "camera_rear".to_string(),
            relative_position: Vec3::new(-0.12, 0.0, -0.05),
            geometry: GeometryRecipe::CameraAssembly {
                housing_size: 0.020,
                lens_radius: 0.010,
                lens_height: 0.012,
            },
            specs: spec_entries(&[
                ("resolution", json!([640, 480])),
                ("fov", json!(120.0)),
                ("focal_length", json!(24.0)),
                ("aperture", json!(20.955)),
            ]),
        });

        catalog.register(SensorDescriptor {
            tag: "ultrasonic_front".to_string(),
            kind: "ultrasonic".to_string(),
            name: "ultrasonic_front".to_string(),
            relative_position: Vec3::new(0.15, 0.0, -0.08),
            geometry: GeometryRecipe::Cylinder {
                radius: 0.02,
                height: 0.01,
            },
            specs: spec_entries(&[
                ("frequency_khz", json!(40)),
                ("range_min", json!(0.02)),
                ("range_max", json!(4.0)),
                ("beam_angle", json!(15.0)),
            ]),
        });

        catalog.register(SensorDescriptor {
            tag: "imu".to_string(),
            kind: "imu".to_string(),
            name: "imu_center".to_string(),
            relative_position: Vec3::ZERO,
            geometry: GeometryRecipe::Cube {
                size: CubeSize::Uniform(0.015),
            },
            specs: spec_entries(&[
                ("accelerometer_range_g", json!([-16, 16])),
                ("gyroscope_range_dps", json!([-2000, 2000])),
                ("update_rate_hz", json!(100)),
            ]),
        });

        catalog.register(SensorDescriptor {
            tag: "temperature".to_string(),
            kind: "temperature".to_string(),
            name: "temperature_sensor".to_string(),
            relative_position: Vec3::new(0.0, 0.0, -0.05),
            geometry: GeometryRecipe::Sphere { radius: 0.005 },
            specs: spec_entries(&[
                ("range_c", json!([-40, 125])),
                ("accuracy_c", json!(0.5)),
                ("response_time_s", json!(1.0)),
            ]),
        });

        catalog.register(SensorDescriptor {
            tag: "radar_side".to_string(),
            kind: "radar".to_string(),
            name: "radar_side_left".to_string(),
            relative_position: Vec3::new(0.0, 0.15, -0.05),
            geometry: GeometryRecipe::Box3 {
                width: 0.06,
                height: 0.04,
                depth: 0.01,
            },
            specs: spec_entries(&[
                ("frequency_ghz", json!(77)),
                ("range_m", json!([0.5, 100])),
                ("resolution_m", json!(0.1)),
            ]),
        });

        catalog
    }
}

fn spec_entries(entries: &[(&str, serde_json::Value)]) -> BTreeMap<String, serde_json::Value> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}
