//! Floor-plane picking: pointer position → selected instance.
//!
//! The presenter owns the actual raycast; by the time a click reaches
//! this module it has been projected onto the floor plane (y = 0). We
//! resolve which live instance the point lands on, nearest-first so
//! overlapping footprints behave predictably.

use rd_core::{InstanceId, RoomPlan, Vec3};

/// Horizontal footprint radius of an unscaled instance, meters.
pub const PICK_RADIUS: f32 = 0.5;

/// Find the instance whose footprint contains the floor point `(x, z)`.
/// Returns `None` for a background click.
pub fn pick_instance(plan: &RoomPlan, x: f32, z: f32) -> Option<InstanceId> {
    let mut best: Option<(InstanceId, f32)> = None;
    for (id, inst) in plan.iter() {
        let dx = inst.position.x - x;
        let dz = inst.position.z - z;
        let dist2 = dx * dx + dz * dz;
        let radius = PICK_RADIUS * inst.scale.max(0.0);
        if dist2 <= radius * radius && best.is_none_or(|(_, d)| dist2 < d) {
            best = Some((id, dist2));
        }
    }
    best.map(|(id, _)| id)
}

/// Snap a floor point to the nearest placement spot, if it lands on one.
/// Spot targets report the floor height (y = 0), not the render lift.
pub fn pick_spot(x: f32, z: f32) -> Option<Vec3> {
    use crate::snapshot::{SPOT_GRID_EXTENT, SPOT_SPACING};

    let snap = |v: f32| (v / SPOT_SPACING).round() * SPOT_SPACING;
    let (sx, sz) = (snap(x), snap(z));
    if sx.abs() > SPOT_GRID_EXTENT || sz.abs() > SPOT_GRID_EXTENT {
        return None;
    }
    let (dx, dz) = (x - sx, z - sz);
    if dx * dx + dz * dz <= PICK_RADIUS * PICK_RADIUS {
        Some(Vec3::new(sx, 0.0, sz))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_core::{Catalog, InstancePatch, ProductId, Vec3};

    fn plan_with_positions(positions: &[(f32, f32)]) -> (RoomPlan, Vec<InstanceId>) {
        let catalog = Catalog::builtin();
        let mut plan = RoomPlan::new();
        let ids: Vec<_> = positions
            .iter()
            .map(|&(x, z)| {
                let id = plan
                    .add_instance(&catalog, ProductId::intern("yellow_sofa"))
                    .unwrap();
                plan.update_instance(
                    id,
                    &InstancePatch {
                        position: Some(Vec3::new(x, 0.0, z)),
                        ..Default::default()
                    },
                )
                .unwrap();
                id
            })
            .collect();
        (plan, ids)
    }

    #[test]
    fn hit_inside_footprint() {
        let (plan, ids) = plan_with_positions(&[(1.0, 1.0)]);
        assert_eq!(pick_instance(&plan, 1.2, 0.9), Some(ids[0]));
        assert_eq!(pick_instance(&plan, 3.0, 3.0), None);
    }

    #[test]
    fn nearest_wins_on_overlap() {
        let (plan, ids) = plan_with_positions(&[(0.0, 0.0), (0.6, 0.0)]);
        // Point inside both footprints, closer to the second.
        assert_eq!(pick_instance(&plan, 0.45, 0.0), Some(ids[1]));
    }

    #[test]
    fn scale_grows_the_footprint() {
        let (mut plan, ids) = plan_with_positions(&[(0.0, 0.0)]);
        assert_eq!(pick_instance(&plan, 0.8, 0.0), None);
        plan.update_instance(
            ids[0],
            &InstancePatch {
                scale: Some(2.0),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(pick_instance(&plan, 0.8, 0.0), Some(ids[0]));
    }

    #[test]
    fn spots_snap_within_grid() {
        assert_eq!(pick_spot(2.1, -1.9), Some(Vec3::new(2.0, 0.0, -2.0)));
        assert_eq!(pick_spot(1.0, 1.0), None); // between spots
        assert_eq!(pick_spot(6.0, 0.0), None); // outside the grid
    }
}
