//! Interactive 3D node graph rendered on a 2D canvas.
//!
//! Build a [`GraphModel`] from authored [`GraphNode`]s, then mount it with
//! [`IdentityGraphCanvas`]. Layout targets come from [`compute_layout`].

mod animation;
mod camera;
mod component;
mod error;
mod interaction;
mod layout;
mod model;
mod particles;
mod render;
mod scene;
mod state;
mod types;

pub use component::IdentityGraphCanvas;
pub use error::{ConfigurationError, ViewportError};
pub use layout::{LayoutParams, compute_layout};
pub use model::GraphModel;
pub use types::{DisplayConfig, GraphNode, LayoutMode, NodeDetail, NodeRole, UnknownLayoutMode};
