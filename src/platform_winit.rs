//! Platform shell: winit event loop wiring.
//!
//! The loop keeps itself alive by requesting the next redraw from
//! `about_to_wait`; `CloseRequested` exiting the event loop is the
//! cancellation handle. The immersive-display probe is polled here because
//! its only effect is on the window title.

use crate::config;
use crate::gfx::Renderer;
use crate::xr;
use std::sync::mpsc::{Receiver, TryRecvError};
use wgpu::SurfaceError;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

const TITLE: &str = "Emberfield";

#[derive(Default)]
struct App {
    window: Option<Window>,
    state: Option<Renderer>,
    xr_probe: Option<Receiver<bool>>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = event_loop
                .create_window(WindowAttributes::default().with_title(TITLE))
                .expect("create window");
            let scene = config::load().unwrap_or_else(|e| {
                log::warn!("scene config unreadable, using defaults: {e:#}");
                config::SceneConfig::default()
            });
            let state = pollster::block_on(Renderer::new(&window, scene)).expect("wgpu init");
            self.window = Some(window);
            self.state = Some(state);
            self.xr_probe = Some(xr::probe());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let (Some(window), Some(state)) = (&self.window, &mut self.state) else {
            return;
        };
        if window.id() != window_id {
            return;
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::RedrawRequested => {
                if let Err(err) = state.render() {
                    match err {
                        SurfaceError::Lost | SurfaceError::Outdated => {
                            state.resize(window.inner_size())
                        }
                        SurfaceError::OutOfMemory => event_loop.exit(),
                        e => log::error!("render error: {e:?}"),
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // One-shot probe result; a positive report adds the affordance
        // marker, anything else silently drops the receiver.
        if let Some(rx) = &self.xr_probe {
            match rx.try_recv() {
                Ok(true) => {
                    if let Some(win) = &self.window {
                        win.set_title(&format!("{TITLE} — VR available"));
                    }
                    self.xr_probe = None;
                }
                Ok(false) | Err(TryRecvError::Disconnected) => self.xr_probe = None,
                Err(TryRecvError::Empty) => {}
            }
        }
        if let Some(win) = &self.window {
            win.request_redraw();
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = App::default();
    event_loop.run_app(&mut app)?;
    Ok(())
}
