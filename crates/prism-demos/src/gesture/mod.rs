//! Gesture-to-transform mapping.
//!
//! Two variants share one configuration:
//! - [`DragTransform`] writes rotation/scale directly on every move (2D views)
//! - [`OrbitState`] only queues a pending rotation; the frame step applies it
//!   to the orientation (3D view)

mod config;
mod orbit;
mod status;
mod transform;

pub use config::GestureConfig;
pub use orbit::{Euler, OrbitState, PendingRotation};
pub use status::Status;
pub use transform::DragTransform;
