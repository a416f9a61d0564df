//! Core data model for room plans.
//!
//! A plan is a flat set of furniture instances placed inside one room.
//! Transforms use explicit unit semantics: positions are world-space
//! meters, rotations are Euler angles in radians, scale is a uniform
//! positive scalar. There is no scene hierarchy — the presenter owns
//! grouping, cameras, and everything visual.

use crate::id::ProductId;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

// ─── Vectors ─────────────────────────────────────────────────────────────

/// Fixed-arity 3-component vector. Meters for positions, radians for
/// Euler rotation vectors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    #[must_use]
    pub fn mul(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    #[must_use]
    pub fn neg(self) -> Self {
        self.mul(-1.0)
    }

    /// Component-wise comparison within `eps` — floating-point tolerant.
    pub fn approx_eq(self, other: Self, eps: f32) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
    }
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let byte = |range| u8::from_str_radix(hex.get(range)?, 16).ok();
        let nibble = |i| {
            hex.get(i..i + 1)
                .and_then(|d| u8::from_str_radix(d, 16).ok())
        };

        match hex.len() {
            3 => {
                let (r, g, b) = (nibble(0)?, nibble(1)?, nibble(2)?);
                Some(Self::rgb(
                    (r * 17) as f32 / 255.0,
                    (g * 17) as f32 / 255.0,
                    (b * 17) as f32 / 255.0,
                ))
            }
            4 => {
                let (r, g, b, a) = (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?);
                Some(Self::rgba(
                    (r * 17) as f32 / 255.0,
                    (g * 17) as f32 / 255.0,
                    (b * 17) as f32 / 255.0,
                    (a * 17) as f32 / 255.0,
                ))
            }
            6 => Some(Self::rgb(
                byte(0..2)? as f32 / 255.0,
                byte(2..4)? as f32 / 255.0,
                byte(4..6)? as f32 / 255.0,
            )),
            8 => Some(Self::rgba(
                byte(0..2)? as f32 / 255.0,
                byte(2..4)? as f32 / 255.0,
                byte(4..6)? as f32 / 255.0,
                byte(6..8)? as f32 / 255.0,
            )),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let r = (self.r * 255.0).round() as u8;
        let g = (self.g * 255.0).round() as u8;
        let b = (self.b * 255.0).round() as u8;
        let a = (self.a * 255.0).round() as u8;
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

// ─── Furniture instances ─────────────────────────────────────────────────

/// One placed piece of furniture.
///
/// `product` is immutable once placed; the transform and color override
/// are mutated in place by the editor while the instance is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureInstance {
    /// Catalog entry this instance was placed from.
    pub product: ProductId,

    /// World-space position in meters.
    pub position: Vec3,

    /// Euler rotation in radians.
    pub rotation: Vec3,

    /// Uniform scale factor (positive).
    pub scale: f32,

    /// When set, the presenter tints the model with this color instead of
    /// the catalog item's default appearance.
    pub color_override: Option<Color>,
}

impl FurnitureInstance {
    /// A freshly placed instance: origin, unrotated, unit scale, no tint.
    pub fn new(product: ProductId) -> Self {
        Self {
            product,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            color_override: None,
        }
    }
}

/// Partial update applied to one instance. `None` fields are untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstancePatch {
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub scale: Option<f32>,
    /// `Some(None)` clears the override, `Some(Some(c))` sets it.
    pub color_override: Option<Option<Color>>,
}

impl InstancePatch {
    pub fn apply(&self, instance: &mut FurnitureInstance) {
        if let Some(p) = self.position {
            instance.position = p;
        }
        if let Some(r) = self.rotation {
            instance.rotation = r;
        }
        if let Some(s) = self.scale {
            instance.scale = s;
        }
        if let Some(c) = self.color_override {
            instance.color_override = c;
        }
    }
}

// ─── Room configuration ──────────────────────────────────────────────────

/// Editable range for room width and length, meters.
pub const WIDTH_RANGE: RangeInclusive<f32> = 3.0..=10.0;
/// Editable range for room length, meters.
pub const LENGTH_RANGE: RangeInclusive<f32> = 3.0..=10.0;
/// Editable range for room height, meters.
pub const HEIGHT_RANGE: RangeInclusive<f32> = 2.0..=4.0;

/// Floor surface finish offered by the room editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FloorFinish {
    #[default]
    Wood,
    Tile,
    Carpet,
}

/// The room shell: dimensions, wall color, floor finish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Width in meters, clamped to [`WIDTH_RANGE`].
    pub width: f32,
    /// Length in meters, clamped to [`LENGTH_RANGE`].
    pub length: f32,
    /// Height in meters, clamped to [`HEIGHT_RANGE`].
    pub height: f32,
    /// Applied uniformly to all wall surfaces.
    pub wall_color: Color,
    pub floor_finish: FloorFinish,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            width: 8.0,
            length: 8.0,
            height: 4.0,
            wall_color: Color::WHITE,
            floor_finish: FloorFinish::Wood,
        }
    }
}

/// Partial update of the room shell. Dimension writes clamp to their valid
/// range — every entry path clamps, steppers and direct numeric entry alike.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomConfigPatch {
    pub width: Option<f32>,
    pub length: Option<f32>,
    pub height: Option<f32>,
    pub wall_color: Option<Color>,
    pub floor_finish: Option<FloorFinish>,
}

impl RoomConfigPatch {
    pub fn apply(&self, config: &mut RoomConfig) {
        if let Some(w) = self.width {
            config.width = w.clamp(*WIDTH_RANGE.start(), *WIDTH_RANGE.end());
        }
        if let Some(l) = self.length {
            config.length = l.clamp(*LENGTH_RANGE.start(), *LENGTH_RANGE.end());
        }
        if let Some(h) = self.height {
            config.height = h.clamp(*HEIGHT_RANGE.start(), *HEIGHT_RANGE.end());
        }
        if let Some(c) = self.wall_color {
            config.wall_color = c;
        }
        if let Some(f) = self.floor_finish {
            config.floor_finish = f;
        }
    }
}
