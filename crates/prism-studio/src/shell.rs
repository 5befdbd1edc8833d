use prism_demos::{Demo, DemoKind, DemoView, FrameOutcome, GestureConfig, Status};
use prism_engine::coords::Viewport;
use prism_engine::core::{App, AppControl, FrameCtx, MountCtx, WindowCtx};
use prism_engine::input::{GestureEvent, Key};

/// Single-screen application shell: hosts one demo, forwards gestures to it
/// and mirrors its status line into the window title.
pub struct Shell {
    demo: Demo,
    base_title: String,
    shown: Option<Status>,
}

impl Shell {
    pub fn new(kind: DemoKind, gestures: GestureConfig, base_title: impl Into<String>) -> Self {
        Self {
            demo: Demo::new(kind, gestures),
            base_title: base_title.into(),
            shown: None,
        }
    }

    fn title_stale(&self) -> bool {
        self.shown != Some(self.demo.view().status())
    }

    fn sync_title(&mut self, window: &WindowCtx<'_>) {
        if !self.title_stale() {
            return;
        }
        let status = self.demo.view().status();
        window.set_title(&compose_title(&self.base_title, self.demo.kind(), &status));
        self.shown = Some(status);
    }
}

/// `"<base> · <demo title> · <status>"`.
pub fn compose_title(base: &str, kind: DemoKind, status: &Status) -> String {
    format!("{base} · {} · {status}", kind.title())
}

impl App for Shell {
    fn on_mount(&mut self, ctx: &mut MountCtx<'_, '_>) -> anyhow::Result<()> {
        let viewport = ctx.window.viewport();
        if !self.demo.mount(ctx.gpu, viewport) {
            log::warn!("demo `{}` was already mounted", self.demo.kind());
        }
        self.sync_title(&ctx.window);
        Ok(())
    }

    fn on_gesture(&mut self, gesture: &GestureEvent) {
        self.demo.view_mut().on_gesture(gesture);
    }

    fn on_key(&mut self, key: Key) -> AppControl {
        match key {
            Key::Escape => AppControl::Exit,
            Key::R => {
                log::info!("resetting demo `{}`", self.demo.kind());
                self.demo.view_mut().reset();
                AppControl::Continue
            }
            _ => AppControl::Continue,
        }
    }

    fn on_resize(&mut self, viewport: Viewport) {
        self.demo.view_mut().resize(viewport);
    }

    fn wants_frame(&self) -> bool {
        let view = self.demo.view();
        view.is_live() && (view.frame_due() || self.title_stale())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.demo.view_mut().advance(ctx.time.dt);
        self.sync_title(&ctx.window);

        let view = self.demo.view();
        if !view.frame_due() || !view.is_ready() {
            return AppControl::Continue;
        }

        let Some(frame) = ctx.acquire_frame() else {
            return AppControl::Continue;
        };
        if !self.demo.attach_frame(frame) {
            return AppControl::Continue;
        }

        match self.demo.view_mut().render() {
            FrameOutcome::Presented => {}
            outcome => log::debug!("frame {} not presented: {outcome:?}", ctx.time.frame_index),
        }

        // Rendering may have moved the status (the orbit view applies its
        // rotation here); show it without waiting for the next event.
        self.sync_title(&ctx.window);
        AppControl::Continue
    }

    fn on_unmount(&mut self) {
        self.demo.view_mut().unmount();
        log::debug!("demo `{}` released its GPU program", self.demo.kind());
    }
}
