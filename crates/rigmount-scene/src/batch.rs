//! Batch placement - Chassis resolution and per-sensor outcome tracking

use std::fmt;

use tracing::{info, warn};

use rigmount_core::{compute_world_position, SensorCatalog, Vec3};

use crate::graph::SceneGraph;
use crate::path::NodePath;
use crate::synth::{synthesize_sensor, SynthError};

/// Chassis position assumed when no usable chassis node is found
pub const DEFAULT_CHASSIS_POS: Vec3 = Vec3 {
    x: 0.0,
    y: 0.0,
    z: 0.1,
};

/// Locate the chassis reference node under the vehicle root
///
/// Falls back to the vehicle root at [`DEFAULT_CHASSIS_POS`] when the
/// reference node is missing or carries no translation. A missing chassis
/// degrades placement, it never aborts it.
pub fn resolve_chassis(
    scene: &dyn SceneGraph,
    vehicle_root: &NodePath,
    chassis_reference: &str,
) -> (NodePath, Vec3) {
    if let Ok(chassis_path) = vehicle_root.child(chassis_reference) {
        if let Some(pos) = scene.translation(&chassis_path) {
            return (chassis_path, pos);
        }
    }
    warn!(
        root = %vehicle_root,
        reference = chassis_reference,
        "Chassis node unresolvable, using vehicle root with default position"
    );
    (vehicle_root.clone(), DEFAULT_CHASSIS_POS)
}

/// Result of placing one requested sensor type
#[derive(Debug)]
pub enum PlacementOutcome {
    /// Sensor placed; path of its transform node
    Placed(NodePath),
    /// No descriptor registered for the tag; nothing was placed
    Skipped,
    /// Synthesis failed; other sensors in the batch are unaffected
    Failed(SynthError),
}

/// Per-tag outcomes of a batch placement, in request order
#[derive(Debug, Default)]
pub struct PlacementReport {
    outcomes: Vec<(String, PlacementOutcome)>,
}

impl PlacementReport {
    /// Outcome recorded for `tag`, if it was part of the batch
    pub fn outcome_for(&self, tag: &str) -> Option<&PlacementOutcome> {
        self.outcomes
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, outcome)| outcome)
    }

    /// Tags that placed successfully, with their node paths
    pub fn placed(&self) -> impl Iterator<Item = (&str, &NodePath)> {
        self.outcomes.iter().filter_map(|(tag, outcome)| match outcome {
            PlacementOutcome::Placed(path) => Some((tag.as_str(), path)),
            _ => None,
        })
    }

    /// Tags skipped because no descriptor was registered
    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().filter_map(|(tag, outcome)| match outcome {
            PlacementOutcome::Skipped => Some(tag.as_str()),
            _ => None,
        })
    }

    /// Tags whose synthesis failed, with the error
    pub fn failures(&self) -> impl Iterator<Item = (&str, &SynthError)> {
        self.outcomes.iter().filter_map(|(tag, outcome)| match outcome {
            PlacementOutcome::Failed(err) => Some((tag.as_str(), err)),
            _ => None,
        })
    }

    /// All outcomes in request order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlacementOutcome)> {
        self.outcomes
            .iter()
            .map(|(tag, outcome)| (tag.as_str(), outcome))
    }

    pub fn placed_count(&self) -> usize {
        self.placed().count()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn record(&mut self, tag: &str, outcome: PlacementOutcome) {
        self.outcomes.push((tag.to_string(), outcome));
    }
}

impl fmt::Display for PlacementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (tag, outcome) in &self.outcomes {
            match outcome {
                PlacementOutcome::Placed(path) => writeln!(f, "  {tag}: placed at {path}")?,
                PlacementOutcome::Skipped => writeln!(f, "  {tag}: skipped (no descriptor)")?,
                PlacementOutcome::Failed(err) => writeln!(f, "  {tag}: failed ({err})")?,
            }
        }
        Ok(())
    }
}

/// Place every requested sensor type under the chassis, in request order
///
/// Unknown tags are recorded as skipped and a failing synthesis is
/// recorded against its tag; neither stops the rest of the batch.
pub fn create_all(
    scene: &mut dyn SceneGraph,
    catalog: &SensorCatalog,
    chassis_path: &NodePath,
    chassis_pos: Vec3,
    tags: &[&str],
) -> PlacementReport {
    info!(
        count = tags.len(),
        chassis = %chassis_path,
        pos = %chassis_pos,
        "Placing sensor batch"
    );
    let correction = catalog.mounting().correction_offset;
    let mut report = PlacementReport::default();

    for &tag in tags {
        let Some(descriptor) = catalog.get(tag) else {
            warn!(tag, "No descriptor for requested sensor type, skipping");
            report.record(tag, PlacementOutcome::Skipped);
            continue;
        };
        let world_pos =
            compute_world_position(chassis_pos, descriptor.relative_position, correction);
        match synthesize_sensor(scene, chassis_path, descriptor, world_pos) {
            Ok(path) => {
                info!(tag, path = %path, pos = %world_pos, "Sensor placed");
                report.record(tag, PlacementOutcome::Placed(path));
            }
            Err(err) => {
                warn!(tag, error = %err, "Sensor placement failed");
                report.record(tag, PlacementOutcome::Failed(err));
            }
        }
    }

    info!(
        placed = report.placed_count(),
        total = report.len(),
        "Sensor batch complete"
    );
    report
}
