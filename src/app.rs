use std::collections::HashMap;

use anyhow::anyhow;
use glam::{Vec2, vec2};
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{KeyCode, ModifiersState, PhysicalKey},
    window::WindowBuilder,
};

use crate::{
    Result,
    geometry::Rect,
    manager::{START_PAGE, WindowManager},
    windowing::backend::{BrowserWindow, WindowBackend, WindowId},
};

/// The browser shell: one winit event loop driving a [`WindowManager`].
/// Every manager call happens on the loop thread, so registry reads and
/// writes are never concurrent.
pub struct Shell {
    start_url: String,
}

impl Shell {
    pub fn new() -> Self {
        Self {
            start_url: START_PAGE.to_string(),
        }
    }

    pub fn with_start_url(mut self, url: impl Into<String>) -> Self {
        self.start_url = url.into();
        self
    }

    pub fn run(self) -> Result<()> {
        crate::init_logging();
        log::info!("Starting comet...");

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let screen = visible_bounds(&event_loop)?;
        log::debug!("screen bounds: {screen:?}");

        let mut manager = WindowManager::new(screen);
        let mut window_ids: HashMap<winit::window::WindowId, WindowId> = HashMap::new();

        {
            let mut backend = WinitBackend {
                target: &event_loop,
                ids: &mut window_ids,
            };
            manager.open(&mut backend, Some(&self.start_url))?;
        }

        let mut modifiers = ModifiersState::default();
        event_loop.run(move |event, elwt| {
            let Event::WindowEvent { window_id, event } = event else {
                return;
            };

            match event {
                WindowEvent::ModifiersChanged(state) => modifiers = state.state(),

                WindowEvent::CloseRequested => {
                    if let Some(id) = window_ids.remove(&window_id) {
                        let all_closed = manager.notify_closed(id);
                        log::debug!("window menu: {:?}", window_menu(&manager));
                        if all_closed {
                            elwt.exit();
                        }
                    }
                }

                // Menus are the embedder's business; the shell itself only
                // binds Ctrl/Cmd+N to open a fresh untitled window.
                WindowEvent::KeyboardInput { event, .. } => {
                    let open_requested = event.state == ElementState::Pressed
                        && !event.repeat
                        && event.physical_key == PhysicalKey::Code(KeyCode::KeyN)
                        && (modifiers.control_key() || modifiers.super_key());

                    if open_requested {
                        let mut backend = WinitBackend {
                            target: elwt,
                            ids: &mut window_ids,
                        };
                        match manager.open(&mut backend, None) {
                            Ok(_) => log::debug!("window menu: {:?}", window_menu(&manager)),
                            Err(e) => log::error!("could not open window: {e}"),
                        }
                    }
                }

                _ => {}
            }
        })?;

        Ok(())
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

/// Entries a window menu would list, in open order.
fn window_menu(manager: &WindowManager) -> Vec<String> {
    manager
        .current_windows()
        .iter()
        .map(|w| w.title().to_string())
        .collect()
}

// winit has no work-area query, so the primary monitor's full bounds
// stand in for the screen's visible bounds.
fn visible_bounds(target: &EventLoopWindowTarget<()>) -> Result<Rect> {
    let monitor = target
        .primary_monitor()
        .or_else(|| target.available_monitors().next())
        .ok_or_else(|| anyhow!("Failed to find a monitor"))?;

    let position = monitor.position();
    let size = monitor.size();
    Ok(Rect::new(
        vec2(position.x as f32, position.y as f32),
        vec2(size.width as f32, size.height as f32),
    ))
}

struct WinitBackend<'a> {
    target: &'a EventLoopWindowTarget<()>,
    ids: &'a mut HashMap<winit::window::WindowId, WindowId>,
}

impl WindowBackend for WinitBackend<'_> {
    fn create_window(
        &mut self,
        id: WindowId,
        url: Option<&str>,
    ) -> Result<Box<dyn BrowserWindow>> {
        // Until the web-view reports a page title, the URL is the title.
        let title = url.unwrap_or("New Window").to_string();

        let window = WindowBuilder::new()
            .with_title(title.clone())
            .with_visible(false)
            .build(self.target)?;

        self.ids.insert(window.id(), id);
        Ok(Box::new(WinitWindow {
            id,
            title,
            url: url.map(String::from),
            window,
        }))
    }
}

/// A native window plus the page it was opened on. The embedded web-view
/// that renders the page lives behind this type as far as the manager is
/// concerned.
struct WinitWindow {
    id: WindowId,
    title: String,
    url: Option<String>,
    window: winit::window::Window,
}

impl BrowserWindow for WinitWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.window.set_title(title);
    }

    fn set_position(&mut self, origin: Vec2) {
        self.window
            .set_outer_position(PhysicalPosition::new(origin.x as f64, origin.y as f64));
    }

    fn set_size(&mut self, size: Vec2) {
        let _ = self
            .window
            .request_inner_size(PhysicalSize::new(size.x as f64, size.y as f64));
    }

    fn show(&mut self) {
        self.window.set_visible(true);
    }
}
