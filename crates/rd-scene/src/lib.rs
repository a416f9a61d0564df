pub mod pick;
pub mod presenter;
pub mod snapshot;

pub use pick::{PICK_RADIUS, pick_instance, pick_spot};
pub use presenter::{KeyInput, NullPresenter, ScenePresenter, ViewerEvent};
pub use snapshot::{
    Light, Prop, SceneSnapshot, Surface, SurfaceKind, TextureSet, build_snapshot, spot_grid,
};
