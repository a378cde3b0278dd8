//! Rigmount Core - Sensor descriptors, catalog loading, and placement math
//!
//! This crate provides the foundational types for Rigmount:
//! - Declarative sensor descriptors: mount offset, geometry recipe, spec sheet
//! - The sensor catalog: a keyed descriptor table plus global mounting policy
//! - Placement math combining chassis position, mount offset, and the
//!   mounting correction

pub mod catalog;
pub mod descriptor;
pub mod placement;

pub use catalog::{CatalogError, SensorCatalog};
pub use descriptor::{CubeSize, GeometryRecipe, MountingConfig, SensorDescriptor, Vec3};
pub use placement::compute_world_position;
