pub mod defaults;
pub mod drag;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod render;
pub mod runtime_context;

pub use defaults::default_configuration;
pub use drag::{classify_drop, drop_action, DropIntent};
pub use model::*;
pub use persistence::{load_layout, save_layout, LayoutCodecError, LayoutStorageKeys, PersistenceError};
pub use reducer::{reduce_launcher, LauncherAction, PlacementError, RuntimeEffect};
pub use render::{LauncherView, SlotView};
pub use runtime_context::LauncherRuntime;
