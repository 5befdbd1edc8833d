use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::coords::Vec2;
use crate::core::{App, AppControl, FrameCtx, MountCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{
    GestureTracker, InputEvent, InputState, Key, KeyState, PointerEvent, PointerId, PointerPhase,
};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            // Portrait, phone-like.
            initial_size: LogicalSize::new(420.0, 760.0),
        }
    }
}

/// Entry point for the runtime.
///
/// Drives a single window (the whole app is one screen) and one `App`.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input: InputState,
    gestures: GestureTracker,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Where the single view is in its lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Lifecycle {
    Unmounted,
    Mounted,
    TornDown,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    lifecycle: Lifecycle,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            lifecycle: Lifecycle::Unmounted,
            failure: None,
        }
    }

    fn create_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input: InputState::default(),
            gestures: GestureTracker::new(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    /// Creates the window + GPU context and mounts the app on it.
    fn mount(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let entry = self.create_entry(event_loop)?;

        let app = &mut self.app;
        entry.with(|fields| {
            let mut ctx = MountCtx {
                window: WindowCtx { window: fields.window },
                gpu: fields.gpu,
            };
            app.on_mount(&mut ctx)
        })?;

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        self.lifecycle = Lifecycle::Mounted;
        log::info!("view mounted");
        Ok(())
    }

    /// Stops frame ticks and drops the GPU context, in that order.
    fn tear_down(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle == Lifecycle::Mounted {
            self.app.on_unmount();
            log::info!("view unmounted");
        }
        self.lifecycle = Lifecycle::TornDown;
        self.entry = None;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.tear_down(event_loop);
    }

    /// Routes one input event to the input state, the gesture tracker and the app.
    fn dispatch_input(&mut self, event: &WindowEvent) -> AppControl {
        let Some(entry) = self.entry.as_mut() else {
            return AppControl::Continue;
        };
        let app = &mut self.app;

        entry.with_mut(|fields| {
            let Some(ev) = translate_input_event(fields.window, fields.input, event) else {
                return AppControl::Continue;
            };

            let fresh = fields.input.apply_event(&ev);

            match ev {
                InputEvent::Pointer(p) => {
                    if let Some(gesture) = fields.gestures.handle(&p) {
                        log::trace!("gesture: {gesture:?}");
                        app.on_gesture(&gesture);
                    }
                    AppControl::Continue
                }
                InputEvent::Focused(false) => {
                    if let Some(gesture) = fields.gestures.cancel() {
                        app.on_gesture(&gesture);
                    }
                    AppControl::Continue
                }
                InputEvent::Key { key, state: KeyState::Pressed, .. } if fresh => app.on_key(key),
                _ => AppControl::Continue,
            }
        })
    }

    fn resize(&mut self) {
        let Some(entry) = self.entry.as_mut() else { return };

        let viewport = entry.with_mut(|fields| {
            fields.gpu.resize(fields.window.inner_size());
            fields.window.request_redraw();
            WindowCtx { window: fields.window }.viewport()
        });

        log::debug!("resized to {}x{}", viewport.width, viewport.height);
        self.app.on_resize(viewport);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle != Lifecycle::Mounted {
            return;
        }
        let Some(entry) = self.entry.as_mut() else { return };
        let app = &mut self.app;

        let (control, fatal) = entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let mut ctx = FrameCtx::new(fields.window, fields.gpu, time);
            let control = app.on_frame(&mut ctx);
            (control, ctx.fatal)
        });

        if fatal {
            self.fail(event_loop, anyhow::anyhow!("GPU surface lost beyond recovery"));
        } else if control == AppControl::Exit {
            self.tear_down(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle != Lifecycle::Unmounted {
            return;
        }

        if let Err(e) = self.mount(event_loop) {
            self.fail(event_loop, e.context("failed to mount view"));
        }
    }

    fn suspended(&mut self, event_loop: &ActiveEventLoop) {
        // Mobile platforms invalidate the surface here; the context is never
        // recreated, so suspension ends the view.
        log::info!("suspended by the platform");
        self.tear_down(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle == Lifecycle::TornDown {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        if self.lifecycle == Lifecycle::Mounted && self.app.wants_frame() {
            if let Some(entry) = self.entry.as_ref() {
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.lifecycle != Lifecycle::Mounted {
            return;
        }

        if self.dispatch_input(&event) == AppControl::Exit {
            self.tear_down(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.tear_down(event_loop),
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => self.resize(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

fn translate_input_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let position = to_logical(window, *position);
            if state.mouse_down {
                Some(pointer(PointerId::Mouse, PointerPhase::Move, position))
            } else {
                Some(InputEvent::Hover(position))
            }
        }

        WindowEvent::MouseInput { state: st, button: MouseButton::Left, .. } => mouse_button(state, *st),

        WindowEvent::Touch(Touch { id, phase, location, .. }) => {
            let phase = match phase {
                TouchPhase::Started => PointerPhase::Down,
                TouchPhase::Moved => PointerPhase::Move,
                TouchPhase::Ended => PointerPhase::Up,
                TouchPhase::Cancelled => PointerPhase::Cancel,
            };
            Some(pointer(PointerId::Touch(*id), phase, to_logical(window, *location)))
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };
            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

/// Left-button press/release, positioned at the last known cursor location.
///
/// A press arriving before any cursor motion has nowhere to anchor the drag
/// and is dropped. A release after the cursor left the window cancels the
/// drag instead of ending it at a made-up position.
fn mouse_button(state: &InputState, button: ElementState) -> Option<InputEvent> {
    match (button, state.pointer_pos) {
        (ElementState::Pressed, Some(position)) => Some(pointer(PointerId::Mouse, PointerPhase::Down, position)),
        (ElementState::Pressed, None) => {
            log::debug!("ignoring mouse press before the cursor position is known");
            None
        }
        (ElementState::Released, _) if !state.mouse_down => None,
        (ElementState::Released, Some(position)) => Some(pointer(PointerId::Mouse, PointerPhase::Up, position)),
        (ElementState::Released, None) => Some(pointer(PointerId::Mouse, PointerPhase::Cancel, Vec2::zero())),
    }
}

fn pointer(id: PointerId, phase: PointerPhase, position: Vec2) -> InputEvent {
    InputEvent::Pointer(PointerEvent {
        id,
        phase,
        position,
        at: Instant::now(),
    })
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> Vec2 {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    Vec2::new(logical.x as f32, logical.y as f32)
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::KeyR) => Key::R,
        PhysicalKey::Code(other) => Key::Unknown(other as u32),
        // NativeKeyCode has no stable numeric form in winit 0.30.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::GestureEvent;

    fn track(state: &mut InputState, tracker: &mut GestureTracker, ev: Option<InputEvent>) -> Option<GestureEvent> {
        let ev = ev?;
        state.apply_event(&ev);
        match ev {
            InputEvent::Pointer(p) => tracker.handle(&p),
            _ => None,
        }
    }

    fn moved(state: &InputState, x: f32, y: f32) -> InputEvent {
        let position = Vec2::new(x, y);
        if state.mouse_down {
            pointer(PointerId::Mouse, PointerPhase::Move, position)
        } else {
            InputEvent::Hover(position)
        }
    }

    #[test]
    fn press_before_any_cursor_motion_is_dropped() {
        let mut state = InputState::default();
        let mut tracker = GestureTracker::new();

        assert!(mouse_button(&state, ElementState::Pressed).is_none());

        // The first motion only hovers; it must not become a huge drag delta.
        let ev = moved(&state, 301.0, 400.0);
        assert!(track(&mut state, &mut tracker, Some(ev)).is_none());
        assert!(!state.mouse_down);
        assert!(mouse_button(&state, ElementState::Released).is_none());
    }

    #[test]
    fn press_anchors_at_the_last_cursor_position() {
        let mut state = InputState::default();
        let mut tracker = GestureTracker::new();
        state.apply_event(&InputEvent::Hover(Vec2::new(300.0, 400.0)));

        let press = mouse_button(&state, ElementState::Pressed);
        assert_eq!(
            track(&mut state, &mut tracker, press),
            Some(GestureEvent::Start { position: Vec2::new(300.0, 400.0) })
        );

        let ev = moved(&state, 301.0, 400.0);
        let Some(GestureEvent::Move { delta, cumulative, .. }) = track(&mut state, &mut tracker, Some(ev)) else {
            panic!("expected a move");
        };
        assert_eq!(delta, Vec2::new(1.0, 0.0));
        assert_eq!(cumulative, Vec2::new(1.0, 0.0));

        let release = mouse_button(&state, ElementState::Released);
        assert!(matches!(track(&mut state, &mut tracker, release), Some(GestureEvent::End { .. })));
    }

    #[test]
    fn release_outside_the_window_cancels_without_moving_the_cursor() {
        let mut state = InputState::default();
        let mut tracker = GestureTracker::new();
        state.apply_event(&InputEvent::Hover(Vec2::new(10.0, 10.0)));
        let press = mouse_button(&state, ElementState::Pressed);
        track(&mut state, &mut tracker, press);
        state.apply_event(&InputEvent::PointerLeft);

        let release = mouse_button(&state, ElementState::Released);
        assert!(matches!(
            &release,
            Some(InputEvent::Pointer(PointerEvent { phase: PointerPhase::Cancel, .. }))
        ));
        assert!(matches!(track(&mut state, &mut tracker, release), Some(GestureEvent::End { .. })));
        assert!(!state.mouse_down);
        assert_eq!(state.pointer_pos, None);
    }
}
