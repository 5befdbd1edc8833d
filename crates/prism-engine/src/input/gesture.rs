use std::time::Instant;

use crate::coords::Vec2;

use super::types::{GestureEvent, PointerEvent, PointerId, PointerPhase};

/// Weight of the newest sample in the smoothed velocity.
const VELOCITY_SMOOTHING: f32 = 0.5;

/// Lower bound on the time between two samples, in milliseconds.
///
/// Two samples delivered in the same event batch carry (nearly) the same
/// timestamp; without a floor their velocity would be unbounded.
const MIN_SAMPLE_MS: f32 = 1.0;

/// Folds a pointer stream into a single continuous drag.
///
/// The first contact that goes down owns the gesture until it is released or
/// cancelled; other contacts are ignored meanwhile. Zero-length moves are
/// dropped.
#[derive(Debug, Default)]
pub struct GestureTracker {
    active: Option<Drag>,
}

#[derive(Debug, Copy, Clone)]
struct Drag {
    pointer: PointerId,
    origin: Vec2,
    last: Vec2,
    last_at: Instant,
    velocity: Vec2,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one pointer sample; returns the gesture event it produces, if any.
    pub fn handle(&mut self, ev: &PointerEvent) -> Option<GestureEvent> {
        match ev.phase {
            PointerPhase::Down => {
                if self.active.is_some() {
                    return None;
                }
                self.active = Some(Drag {
                    pointer: ev.id,
                    origin: ev.position,
                    last: ev.position,
                    last_at: ev.at,
                    velocity: Vec2::zero(),
                });
                Some(GestureEvent::Start { position: ev.position })
            }

            PointerPhase::Move => {
                let drag = self.active.as_mut().filter(|d| d.pointer == ev.id)?;

                let delta = ev.position - drag.last;
                if delta.is_zero() {
                    return None;
                }

                let elapsed_ms = ev
                    .at
                    .saturating_duration_since(drag.last_at)
                    .as_secs_f32()
                    * 1000.0;
                let sample = delta / elapsed_ms.max(MIN_SAMPLE_MS);

                drag.velocity = drag.velocity.lerp(sample, VELOCITY_SMOOTHING);
                drag.last = ev.position;
                drag.last_at = ev.at;

                Some(GestureEvent::Move {
                    delta,
                    cumulative: ev.position - drag.origin,
                    velocity: drag.velocity,
                })
            }

            PointerPhase::Up | PointerPhase::Cancel => {
                if self.active.is_some_and(|d| d.pointer != ev.id) {
                    return None;
                }
                let drag = self.active.take()?;
                Some(GestureEvent::End { velocity: drag.velocity })
            }
        }
    }

    /// Ends any gesture in progress, e.g. when the window loses focus
    /// mid-drag and the release will never arrive.
    pub fn cancel(&mut self) -> Option<GestureEvent> {
        let drag = self.active.take()?;
        Some(GestureEvent::End { velocity: drag.velocity })
    }
}
