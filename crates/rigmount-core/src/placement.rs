//! Placement math - Chassis position, mount offset, and mounting correction

use crate::descriptor::Vec3;

/// Compute a sensor's world position from the chassis position, the
/// sensor's mount offset, and the global correction offset.
///
/// Chassis transforms and mount offsets are authored independently;
/// `correction_offset` absorbs the systematic vertical gap between the
/// chassis origin convention and the authored mount heights, without
/// editing every descriptor.
pub fn compute_world_position(
    chassis_pos: Vec3,
    relative_position: Vec3,
    correction_offset: f64,
) -> Vec3 {
    (chassis_pos + relative_position).lifted(correction_offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_wise_sum_with_z_correction() {
        let world = compute_world_position(
            Vec3::new(1.0, 2.0, 0.25),
            Vec3::new(0.5, -0.25, -0.125),
            -0.5,
        );
        assert_eq!(world, Vec3::new(1.5, 1.75, -0.375));
    }

    #[test]
    fn test_correction_only_affects_z() {
        let chassis = Vec3::new(3.0, -1.0, 0.5);
        let offset = Vec3::new(0.25, 0.75, 0.0);
        let corrected = compute_world_position(chassis, offset, -2.0);
        let uncorrected = compute_world_position(chassis, offset, 0.0);
        assert_eq!(corrected.x, uncorrected.x);
        assert_eq!(corrected.y, uncorrected.y);
        assert_eq!(corrected.z, uncorrected.z - 2.0);
    }

    #[test]
    fn test_zero_inputs() {
        assert_eq!(
            compute_world_position(Vec3::ZERO, Vec3::ZERO, 0.0),
            Vec3::ZERO
        );
    }

    #[test]
    fn test_matches_vector_sum() {
        let chassis = Vec3::new(0.5, 0.25, 0.125);
        let offset = Vec3::new(-0.25, 0.5, -0.125);
        let correction = 0.25;
        assert_eq!(
            compute_world_position(chassis, offset, correction),
            chassis + offset + Vec3::new(0.0, 0.0, correction)
        );
    }
}
