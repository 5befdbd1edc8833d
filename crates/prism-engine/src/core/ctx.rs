use winit::window::Window;

use crate::coords::Viewport;
use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};
use crate::time::FrameTime;

/// Window handle and metadata visible to the app.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Returns the window size in logical pixels.
    pub fn viewport(&self) -> Viewport {
        let phys = self.window.inner_size();
        let logi: winit::dpi::LogicalSize<f64> = phys.to_logical(self.window.scale_factor());
        Viewport::new(logi.width as f32, logi.height as f32)
    }

    /// Replaces the window title. Used by the shell for on-screen status text.
    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

/// Context passed to `core::App::on_mount`.
pub struct MountCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a Gpu<'w>,
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub time: FrameTime,
    pub(crate) fatal: bool,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    pub(crate) fn new(window: &'a Window, gpu: &'a mut Gpu<'w>, time: FrameTime) -> Self {
        Self {
            window: WindowCtx { window },
            gpu,
            time,
            fatal: false,
        }
    }

    /// Acquires the next surface frame.
    ///
    /// Returns `None` when this tick has to be skipped (surface lost, outdated
    /// or timed out). A fatal surface error also returns `None` and makes the
    /// runtime exit after the callback.
    pub fn acquire_frame(&mut self) -> Option<GpuFrame> {
        match self.gpu.begin_frame() {
            Ok(frame) => {
                self.window.window.pre_present_notify();
                Some(frame)
            }
            Err(err) => {
                match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        log::error!("surface error is fatal; shutting down");
                        self.fatal = true;
                    }
                    action => log::debug!("skipping frame {}: {action:?}", self.time.frame_index),
                }
                None
            }
        }
    }
}
