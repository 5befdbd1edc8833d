use prism_engine::coords::Vec2;

use super::{GestureConfig, Status};

const IDLE_HINT: &str = "drag horizontally to rotate, vertically to scale";

/// Rotation + scale driven directly by drag deltas.
///
/// Every move writes both values immediately; the next frame picks up
/// whatever was written last. `rotation` is unbounded, `scale` always stays
/// inside `[scale_min, scale_max]`.
#[derive(Debug, Clone)]
pub struct DragTransform {
    config: GestureConfig,
    rotation: f32,
    scale: f32,
    dirty: bool,
    status: Status,
}

impl DragTransform {
    /// Starts at rotation 0, scale 1 and dirty, so the first frame draws.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            rotation: 0.0,
            scale: config.clamp_scale(1.0),
            dirty: true,
            status: Status::Hint(IDLE_HINT),
        }
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Records where the drag began. Display text only.
    pub fn on_gesture_start(&mut self, position: Vec2) {
        self.status = Status::Started { x: position.x, y: position.y };
    }

    /// Applies one drag delta.
    pub fn on_gesture_move(&mut self, delta: Vec2, velocity: Vec2) {
        self.rotation += delta.x * self.config.rotate_gain;
        self.scale = self.config.clamp_scale(self.scale - delta.y * self.config.scale_gain);
        self.dirty = true;
        self.status = Status::Dragging { rotation: self.rotation, scale: self.scale };

        log::trace!(
            "drag {:+.1},{:+.1} @ {:.2},{:.2} -> rotation {:.3} scale {:.3}",
            delta.x,
            delta.y,
            velocity.x,
            velocity.y,
            self.rotation,
            self.scale
        );
    }

    /// Records the release velocity. Display text only.
    pub fn on_gesture_end(&mut self, velocity: Vec2) {
        self.status = Status::Released { vx: velocity.x, vy: velocity.y };
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Forces a redraw without changing the transform (e.g. after resize).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a redraw was due and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }
}
