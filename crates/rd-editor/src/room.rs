//! Room configuration editor.
//!
//! Dimension edits arrive as stepper clicks or direct entry; both go
//! through the same clamp, so the stored config never leaves the legal
//! range regardless of where the value came from.

use rd_core::{Color, FloorFinish, HEIGHT_RANGE, LENGTH_RANGE, RoomConfigPatch, WIDTH_RANGE};

/// Stepper increment for all three dimensions, meters.
pub const DIMENSION_STEP: f32 = 0.1;

/// Which room dimension a stepper edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomDimension {
    Width,
    Length,
    Height,
}

impl RoomDimension {
    pub fn range(self) -> std::ops::RangeInclusive<f32> {
        match self {
            RoomDimension::Width => WIDTH_RANGE,
            RoomDimension::Length => LENGTH_RANGE,
            RoomDimension::Height => HEIGHT_RANGE,
        }
    }
}

/// One stepper click. `current` is the value shown in the editor; the
/// result is rounded to one decimal so repeated clicks don't accumulate
/// float drift.
pub fn step_dimension(dimension: RoomDimension, current: f32, up: bool) -> RoomConfigPatch {
    let step = if up { DIMENSION_STEP } else { -DIMENSION_STEP };
    let next = ((current + step) * 10.0).round() / 10.0;
    set_dimension(dimension, next)
}

/// Direct entry of a dimension value. Clamping happens when the patch
/// is applied to the plan.
pub fn set_dimension(dimension: RoomDimension, value: f32) -> RoomConfigPatch {
    match dimension {
        RoomDimension::Width => RoomConfigPatch {
            width: Some(value),
            ..Default::default()
        },
        RoomDimension::Length => RoomConfigPatch {
            length: Some(value),
            ..Default::default()
        },
        RoomDimension::Height => RoomConfigPatch {
            height: Some(value),
            ..Default::default()
        },
    }
}

pub fn set_wall_color(color: Color) -> RoomConfigPatch {
    RoomConfigPatch {
        wall_color: Some(color),
        ..Default::default()
    }
}

pub fn set_floor_finish(finish: FloorFinish) -> RoomConfigPatch {
    RoomConfigPatch {
        floor_finish: Some(finish),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rd_core::RoomConfig;

    fn apply(config: &mut RoomConfig, patch: RoomConfigPatch) {
        patch.apply(config);
    }

    #[test]
    fn stepper_moves_by_tenths() {
        let mut config = RoomConfig::default();
        let patch = step_dimension(RoomDimension::Width, config.width, true);
        apply(&mut config, patch);
        assert_eq!(config.width, 8.1);

        let patch = step_dimension(RoomDimension::Width, config.width, false);
        apply(&mut config, patch);
        let patch = step_dimension(RoomDimension::Width, config.width, false);
        apply(&mut config, patch);
        assert_eq!(config.width, 7.9);
    }

    #[test]
    fn stepper_clamps_at_the_rails() {
        let mut config = RoomConfig::default();
        apply(&mut config, set_dimension(RoomDimension::Height, 4.0));
        let patch = step_dimension(RoomDimension::Height, config.height, true);
        apply(&mut config, patch);
        assert_eq!(config.height, 4.0);

        apply(&mut config, set_dimension(RoomDimension::Width, 3.0));
        let patch = step_dimension(RoomDimension::Width, config.width, false);
        apply(&mut config, patch);
        assert_eq!(config.width, 3.0);
    }

    #[test]
    fn direct_entry_clamps_too() {
        let mut config = RoomConfig::default();
        apply(&mut config, set_dimension(RoomDimension::Length, 50.0));
        assert_eq!(config.length, 10.0);

        apply(&mut config, set_dimension(RoomDimension::Length, -1.0));
        assert_eq!(config.length, 3.0);
    }

    #[test]
    fn wall_color_and_finish_leave_dimensions_alone() {
        let mut config = RoomConfig::default();
        apply(&mut config, set_wall_color(Color::rgb(0.9, 0.9, 0.8)));
        apply(&mut config, set_floor_finish(FloorFinish::Tile));

        assert_eq!(config.width, 8.0);
        assert_eq!(config.wall_color, Color::rgb(0.9, 0.9, 0.8));
        assert_eq!(config.floor_finish, FloorFinish::Tile);
    }
}
