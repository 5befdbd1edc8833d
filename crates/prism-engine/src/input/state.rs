use std::collections::HashSet;

use crate::coords::Vec2;

use super::types::{InputEvent, Key, KeyState, PointerId, PointerPhase};

/// Current input state for the demo window.
///
/// Holds "is down" information and the last known pointer position; the
/// runtime needs it to attach a position to mouse button events, which winit
/// reports without one.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels.
    pub pointer_pos: Option<Vec2>,

    /// Primary mouse button held.
    pub mouse_down: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    ///
    /// Returns `false` for key repeats and releases of keys that were never
    /// seen pressed, so callers can skip them.
    pub fn apply_event(&mut self, ev: &InputEvent) -> bool {
        match ev {
            InputEvent::Focused(focused) => {
                if !*focused {
                    // Avoids stuck keys/buttons when focus changes mid-press.
                    self.keys_down.clear();
                    self.mouse_down = false;
                }
                true
            }

            InputEvent::Hover(pos) => {
                self.pointer_pos = Some(*pos);
                true
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
                true
            }

            InputEvent::Pointer(p) => {
                if p.id == PointerId::Mouse {
                    // Cancels carry no real position.
                    if p.phase != PointerPhase::Cancel {
                        self.pointer_pos = Some(p.position);
                    }
                    match p.phase {
                        PointerPhase::Down => self.mouse_down = true,
                        PointerPhase::Up | PointerPhase::Cancel => self.mouse_down = false,
                        PointerPhase::Move => {}
                    }
                }
                true
            }

            InputEvent::Key { key, state, repeat } => match state {
                KeyState::Pressed => self.keys_down.insert(*key) && !*repeat,
                KeyState::Released => self.keys_down.remove(key),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::input::PointerEvent;

    fn mouse(phase: PointerPhase, x: f32, y: f32) -> InputEvent {
        InputEvent::Pointer(PointerEvent {
            id: PointerId::Mouse,
            phase,
            position: Vec2::new(x, y),
            at: Instant::now(),
        })
    }

    #[test]
    fn mouse_press_and_release_track_button() {
        let mut s = InputState::default();
        s.apply_event(&mouse(PointerPhase::Down, 3.0, 4.0));
        assert!(s.mouse_down);
        assert_eq!(s.pointer_pos, Some(Vec2::new(3.0, 4.0)));
        s.apply_event(&mouse(PointerPhase::Up, 5.0, 4.0));
        assert!(!s.mouse_down);
    }

    #[test]
    fn focus_loss_clears_held_inputs() {
        let mut s = InputState::default();
        s.apply_event(&mouse(PointerPhase::Down, 0.0, 0.0));
        s.apply_event(&InputEvent::Key { key: Key::R, state: KeyState::Pressed, repeat: false });
        s.apply_event(&InputEvent::Focused(false));
        assert!(!s.mouse_down);
        assert!(s.keys_down.is_empty());
    }

    #[test]
    fn key_repeat_is_not_a_fresh_press() {
        let mut s = InputState::default();
        let press = InputEvent::Key { key: Key::R, state: KeyState::Pressed, repeat: false };
        let repeat = InputEvent::Key { key: Key::R, state: KeyState::Pressed, repeat: true };
        assert!(s.apply_event(&press));
        assert!(!s.apply_event(&repeat));
        assert!(s.apply_event(&InputEvent::Key { key: Key::R, state: KeyState::Released, repeat: false }));
    }

    #[test]
    fn cancel_keeps_the_last_real_position() {
        let mut s = InputState::default();
        s.apply_event(&mouse(PointerPhase::Down, 3.0, 4.0));
        s.apply_event(&mouse(PointerPhase::Cancel, 0.0, 0.0));
        assert!(!s.mouse_down);
        assert_eq!(s.pointer_pos, Some(Vec2::new(3.0, 4.0)));
    }
}
