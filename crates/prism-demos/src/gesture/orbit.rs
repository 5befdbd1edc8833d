use prism_engine::coords::Vec2;

use super::GestureConfig;

/// Rotation queued by gestures and not yet applied, in radians.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PendingRotation {
    pub x: f32,
    pub y: f32,
}

/// Cumulative Euler angles (XYZ order), in radians.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Orbit mapper for the 3D view.
///
/// Gestures only add to `pending`; the orientation is written exclusively by
/// [`consume_frame`](Self::consume_frame), which the frame step calls. A
/// frame therefore never observes half of a gesture.
#[derive(Debug, Clone)]
pub struct OrbitState {
    config: GestureConfig,
    pending: PendingRotation,
    need_update: bool,
    orientation: Euler,
}

impl OrbitState {
    /// Starts with a redraw due so the first frame shows the object.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            pending: PendingRotation::default(),
            need_update: true,
            orientation: Euler::default(),
        }
    }

    #[inline]
    pub fn pending(&self) -> PendingRotation {
        self.pending
    }

    #[inline]
    pub fn need_update(&self) -> bool {
        self.need_update
    }

    #[inline]
    pub fn orientation(&self) -> Euler {
        self.orientation
    }

    /// Queues one drag delta. Deltas inside the dead-zone on both axes are
    /// dropped; returns whether the delta was accepted.
    pub fn on_gesture_move(&mut self, delta: Vec2) -> bool {
        let threshold = self.config.move_threshold;
        if delta.x.abs() < threshold && delta.y.abs() < threshold {
            return false;
        }

        self.pending.y += delta.x * self.config.orbit_gain;
        self.pending.x -= delta.y * self.config.orbit_gain;
        self.need_update = true;
        true
    }

    /// Applies and clears the pending rotation if a redraw is due.
    ///
    /// Returns the orientation to render, or `None` when nothing changed.
    pub fn consume_frame(&mut self) -> Option<Euler> {
        if !self.need_update {
            return None;
        }

        let pending = std::mem::take(&mut self.pending);
        self.orientation.x += pending.x;
        self.orientation.y += pending.y;
        self.need_update = false;

        Some(self.orientation)
    }

    /// Requests a redraw without queuing any rotation.
    pub fn invalidate(&mut self) {
        self.need_update = true;
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled() -> OrbitState {
        let mut orbit = OrbitState::new(GestureConfig::default());
        orbit.consume_frame();
        orbit
    }

    // ── dead-zone ─────────────────────────────────────────────────────────

    #[test]
    fn jitter_below_threshold_is_ignored() {
        let mut orbit = settled();
        for (dx, dy) in [(0.5, 0.5), (-1.19, 1.19), (0.0, -1.0), (1.1999, 0.0)] {
            assert!(!orbit.on_gesture_move(Vec2::new(dx, dy)));
            assert_eq!(orbit.pending(), PendingRotation::default());
            assert!(!orbit.need_update());
        }
    }

    #[test]
    fn one_axis_over_threshold_is_enough() {
        let mut orbit = settled();
        assert!(orbit.on_gesture_move(Vec2::new(0.0, 1.2)));
        assert!(orbit.need_update());
    }

    #[test]
    fn jitter_then_real_drag() {
        let mut orbit = settled();
        orbit.on_gesture_move(Vec2::new(0.5, 0.5));
        orbit.on_gesture_move(Vec2::new(0.5, 0.5));
        assert_eq!(orbit.pending(), PendingRotation { x: 0.0, y: 0.0 });

        orbit.on_gesture_move(Vec2::new(2.0, 0.0));
        assert_eq!(orbit.pending(), PendingRotation { x: 0.0, y: 0.02 });
        assert!(orbit.need_update());
    }

    #[test]
    fn vertical_drag_pitches_the_other_way() {
        let mut orbit = settled();
        orbit.on_gesture_move(Vec2::new(0.0, 10.0));
        assert!((orbit.pending().x + 0.1).abs() < 1e-6);
    }

    // ── consume_frame ─────────────────────────────────────────────────────

    #[test]
    fn first_frame_is_due() {
        let mut orbit = OrbitState::new(GestureConfig::default());
        assert!(orbit.need_update());
        assert_eq!(orbit.consume_frame(), Some(Euler::default()));
    }

    #[test]
    fn consume_applies_and_clears_pending() {
        let mut orbit = settled();
        orbit.on_gesture_move(Vec2::new(10.0, 0.0));
        orbit.on_gesture_move(Vec2::new(10.0, -20.0));

        let applied = orbit.consume_frame().unwrap();
        assert!((applied.y - 0.2).abs() < 1e-6);
        assert!((applied.x - 0.2).abs() < 1e-6);
        assert_eq!(applied.z, 0.0);
        assert_eq!(orbit.pending(), PendingRotation::default());
        assert!(!orbit.need_update());
    }

    #[test]
    fn consume_twice_is_idempotent() {
        let mut orbit = settled();
        orbit.on_gesture_move(Vec2::new(30.0, 0.0));
        orbit.consume_frame();
        let before = orbit.orientation();

        assert_eq!(orbit.consume_frame(), None);
        assert_eq!(orbit.orientation(), before);
        assert!(!orbit.need_update());
    }

    #[test]
    fn orientation_accumulates_across_frames() {
        let mut orbit = settled();
        for _ in 0..3 {
            orbit.on_gesture_move(Vec2::new(100.0, 0.0));
            orbit.consume_frame();
        }
        assert!((orbit.orientation().y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn gestures_do_not_touch_orientation() {
        let mut orbit = settled();
        orbit.on_gesture_move(Vec2::new(50.0, 50.0));
        assert_eq!(orbit.orientation(), Euler::default());
    }

    #[test]
    fn invalidate_redraws_without_rotation() {
        let mut orbit = settled();
        orbit.invalidate();
        assert_eq!(orbit.consume_frame(), Some(Euler::default()));
    }
}
