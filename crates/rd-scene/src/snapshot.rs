//! Render-agnostic scene snapshots.
//!
//! The presenter (whatever 3D library the host embeds) consumes one
//! `SceneSnapshot` per frame and owns everything visual: asset loading,
//! cameras, shadows, raycasting. The snapshot is plain data — surfaces
//! with texture references, props with transforms, the lighting rig, and
//! the placement-spot grid shown while an instance is selected.
//!
//! An instance may appear in a snapshot before its model has finished
//! loading; the presenter renders a placeholder in that interval.

use rd_core::{Catalog, Color, FloorFinish, InstanceId, ProductId, RoomPlan, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

// ─── Textures ────────────────────────────────────────────────────────────

/// PBR texture map paths plus UV repeat factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSet {
    pub color_map: String,
    pub normal_map: String,
    pub roughness_map: String,
    pub displacement_map: String,
    /// UV repeat along the surface's two axes.
    pub repeat: (f32, f32),
}

impl TextureSet {
    fn from_base(dir: &str, base: &str, repeat: (f32, f32)) -> Self {
        Self {
            color_map: format!("/textures/{dir}/{base}_1K-JPG_Color.jpg"),
            normal_map: format!("/textures/{dir}/{base}_1K-JPG_NormalGL.jpg"),
            roughness_map: format!("/textures/{dir}/{base}_1K-JPG_Roughness.jpg"),
            displacement_map: format!("/textures/{dir}/{base}_1K-JPG_Displacement.jpg"),
            repeat,
        }
    }
}

fn floor_texture(finish: FloorFinish, repeat: (f32, f32)) -> TextureSet {
    match finish {
        FloorFinish::Wood => TextureSet::from_base("wood-floor", "WoodFloor064", repeat),
        FloorFinish::Tile => TextureSet::from_base("tile", "Tiles074", repeat),
        FloorFinish::Carpet => TextureSet::from_base("carpet", "Carpet004", repeat),
    }
}

fn wall_texture(repeat: (f32, f32)) -> TextureSet {
    TextureSet::from_base("plaster", "Plaster001", repeat)
}

// ─── Surfaces ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    Floor,
    WallBack,
    WallLeft,
    WallRight,
}

/// One textured quad of the room shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub kind: SurfaceKind,
    pub center: Vec3,
    /// Quad extent along its local axes, meters.
    pub size: (f32, f32),
    /// Euler rotation in radians.
    pub rotation: Vec3,
    /// Tint multiplied over the texture (wall color); `None` = untinted.
    pub tint: Option<Color>,
    pub texture: TextureSet,
}

// ─── Lights ──────────────────────────────────────────────────────────────

/// The reference lighting rig, as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Light {
    Ambient {
        intensity: f32,
    },
    Directional {
        position: Vec3,
        intensity: f32,
        cast_shadow: bool,
    },
    Point {
        position: Vec3,
        intensity: f32,
    },
}

// ─── Props ───────────────────────────────────────────────────────────────

/// One furniture instance, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    pub id: InstanceId,
    pub product: ProductId,
    /// Asset path from the catalog entry.
    pub model_path: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
    /// Color override, when the user customized this instance.
    pub tint: Option<Color>,
    /// Selected props get the highlight marker.
    pub selected: bool,
}

// ─── Snapshot ────────────────────────────────────────────────────────────

/// Horizontal half-extent of the placement-spot grid, meters.
pub const SPOT_GRID_EXTENT: f32 = 4.0;
/// Spacing between placement spots, meters.
pub const SPOT_SPACING: f32 = 2.0;
/// Spots sit just above the floor so they never z-fight with it.
pub const SPOT_LIFT: f32 = 0.01;

/// Everything the presenter needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub surfaces: Vec<Surface>,
    pub props: Vec<Prop>,
    pub lights: Vec<Light>,
    /// Snap-placement spots; empty unless an instance is selected.
    pub spots: Vec<Vec3>,
}

/// Build a snapshot of the current plan state.
pub fn build_snapshot(plan: &RoomPlan, catalog: &Catalog) -> SceneSnapshot {
    let config = plan.config();
    let (w, l, h) = (config.width, config.length, config.height);
    let tint = Some(config.wall_color);

    let surfaces = vec![
        Surface {
            kind: SurfaceKind::Floor,
            center: Vec3::ZERO,
            size: (w, l),
            rotation: Vec3::new(-FRAC_PI_2, 0.0, 0.0),
            tint: None,
            texture: floor_texture(config.floor_finish, (w / 2.0, l / 2.0)),
        },
        Surface {
            kind: SurfaceKind::WallBack,
            center: Vec3::new(0.0, h / 2.0, -l / 2.0),
            size: (w, h),
            rotation: Vec3::ZERO,
            tint,
            texture: wall_texture((w / 2.0, h / 2.0)),
        },
        Surface {
            kind: SurfaceKind::WallLeft,
            center: Vec3::new(-w / 2.0, h / 2.0, 0.0),
            size: (l, h),
            rotation: Vec3::new(0.0, FRAC_PI_2, 0.0),
            tint,
            texture: wall_texture((w / 2.0, h / 2.0)),
        },
        Surface {
            kind: SurfaceKind::WallRight,
            center: Vec3::new(w / 2.0, h / 2.0, 0.0),
            size: (l, h),
            rotation: Vec3::new(0.0, -FRAC_PI_2, 0.0),
            tint,
            texture: wall_texture((w / 2.0, h / 2.0)),
        },
    ];

    let selected = plan.selected();
    let props = plan
        .iter()
        .map(|(id, inst)| Prop {
            id,
            product: inst.product,
            model_path: match catalog.get(inst.product) {
                Some(item) => item.model_path.clone(),
                None => {
                    // Catalog shrank under a live plan; presenter shows a placeholder.
                    log::warn!("no catalog entry for placed product {}", inst.product);
                    String::new()
                }
            },
            position: inst.position,
            rotation: inst.rotation,
            scale: inst.scale,
            tint: inst.color_override,
            selected: selected == Some(id),
        })
        .collect();

    let spots = if selected.is_some() {
        spot_grid()
    } else {
        Vec::new()
    };

    SceneSnapshot {
        surfaces,
        props,
        lights: lighting_rig(),
        spots,
    }
}

/// The fixed 5×5 snap grid on the floor plane.
pub fn spot_grid() -> Vec<Vec3> {
    let mut spots = Vec::new();
    let mut x = -SPOT_GRID_EXTENT;
    while x <= SPOT_GRID_EXTENT {
        let mut z = -SPOT_GRID_EXTENT;
        while z <= SPOT_GRID_EXTENT {
            spots.push(Vec3::new(x, SPOT_LIFT, z));
            z += SPOT_SPACING;
        }
        x += SPOT_SPACING;
    }
    spots
}

fn lighting_rig() -> Vec<Light> {
    vec![
        Light::Ambient { intensity: 0.4 },
        Light::Directional {
            position: Vec3::new(5.0, 5.0, 5.0),
            intensity: 0.8,
            cast_shadow: true,
        },
        Light::Point {
            position: Vec3::new(-2.0, 2.0, -2.0),
            intensity: 0.3,
        },
        Light::Point {
            position: Vec3::new(2.0, 2.0, -2.0),
            intensity: 0.3,
        },
        Light::Point {
            position: Vec3::new(-2.0, 2.0, 2.0),
            intensity: 0.3,
        },
    ]
}
