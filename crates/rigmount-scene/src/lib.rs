//! Rigmount Scene - Scene-graph contract, geometry synthesis, and batch placement
//!
//! The scene graph itself belongs to the host environment; this crate
//! defines the narrow contract Rigmount needs from it, an in-memory
//! implementation for tests and demos, and the synthesis pipeline that
//! turns sensor descriptors into placed primitive shapes.

pub mod batch;
pub mod graph;
pub mod memory;
pub mod path;
pub mod synth;

pub use batch::{
    create_all, resolve_chassis, PlacementOutcome, PlacementReport, DEFAULT_CHASSIS_POS,
};
pub use graph::{AttrValue, PrimKind, SceneError, SceneGraph, ATTR_TRANSLATE};
pub use memory::MemoryScene;
pub use path::NodePath;
pub use synth::{synthesize_sensor, SynthError};
