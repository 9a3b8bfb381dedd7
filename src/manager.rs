use glam::Vec2;

use crate::geometry::Rect;
use crate::windowing::backend::{BrowserWindow, WindowBackend, WindowId};
use crate::windowing::placement::CascadeLayout;

/// The page the first window loads when the shell starts.
pub const START_PAGE: &str = "https://fancy-donut-8bec8d.netlify.app";

/// Owns the registry of open windows and decides where each new one
/// goes. Windows are created through a [`WindowBackend`] and driven only
/// through the [`BrowserWindow`] contract, so the manager itself never
/// touches the GUI toolkit.
pub struct WindowManager {
    open_windows: Vec<Box<dyn BrowserWindow>>,
    layout: CascadeLayout,
    untitled_count: u32,
}

impl WindowManager {
    pub fn new(screen: Rect) -> Self {
        Self {
            open_windows: Vec::new(),
            layout: CascadeLayout::new(screen),
            untitled_count: 0,
        }
    }

    /// Opens the single startup window.
    pub fn open_start_page(&mut self, backend: &mut dyn WindowBackend) -> crate::Result<WindowId> {
        self.open(backend, Some(START_PAGE))
    }

    /// Opens a new browser window at the next cascade position and shows
    /// it. A window opened without a URL is titled "Untitled N". On
    /// construction failure neither the registry nor the cascade cursor
    /// has changed.
    pub fn open(
        &mut self,
        backend: &mut dyn WindowBackend,
        url: Option<&str>,
    ) -> crate::Result<WindowId> {
        let id = WindowId::new();
        let mut window = backend.create_window(id, url)?;

        if url.is_none() {
            window.set_title(&format!("Untitled {}", self.next_untitled_count()));
        }

        window.set_position(self.layout.place());
        window.set_size(self.layout.window_size());
        window.show();

        log::info!("opened window {:?} ({})", id, window.title());
        self.open_windows.push(window);
        Ok(id)
    }

    /// Drops the window with the given id from the registry. Returns
    /// true exactly once: when the last open window has just closed.
    /// Unknown ids (a close already handled) are a no-op.
    pub fn notify_closed(&mut self, id: WindowId) -> bool {
        let before = self.open_windows.len();
        self.open_windows.retain(|w| w.id() != id);
        if self.open_windows.len() == before {
            return false;
        }

        log::info!("number of open windows is {}", self.open_windows.len());
        if self.open_windows.is_empty() {
            log::info!("all windows have been closed");
            true
        } else {
            false
        }
    }

    /// Increments and returns the counter behind "Untitled N" titles.
    pub fn next_untitled_count(&mut self) -> u32 {
        self.untitled_count += 1;
        self.untitled_count
    }

    /// Live view of the registry, in open order. Windows use this to
    /// build their window menus.
    pub fn current_windows(&self) -> &[Box<dyn BrowserWindow>] {
        &self.open_windows
    }

    pub fn window_count(&self) -> usize {
        self.open_windows.len()
    }

    pub fn window_size(&self) -> Vec2 {
        self.layout.window_size()
    }

    pub fn next_location(&self) -> Vec2 {
        self.layout.next_location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct WindowState {
        title: String,
        origin: Vec2,
        size: Vec2,
        shown: bool,
    }

    struct FakeWindow {
        id: WindowId,
        title: String,
        url: Option<String>,
        state: Rc<RefCell<WindowState>>,
    }

    impl BrowserWindow for FakeWindow {
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
            self.state.borrow_mut().title = title.to_string();
        }

        fn set_position(&mut self, origin: Vec2) {
            self.state.borrow_mut().origin = origin;
        }

        fn set_size(&mut self, size: Vec2) {
            self.state.borrow_mut().size = size;
        }

        fn show(&mut self) {
            self.state.borrow_mut().shown = true;
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        created: Vec<(WindowId, Rc<RefCell<WindowState>>)>,
        fail_next: bool,
    }

    impl WindowBackend for FakeBackend {
        fn create_window(
            &mut self,
            id: WindowId,
            url: Option<&str>,
        ) -> crate::Result<Box<dyn BrowserWindow>> {
            if self.fail_next {
                self.fail_next = false;
                return Err("window construction failed".into());
            }

            let state = Rc::new(RefCell::new(WindowState {
                title: url.unwrap_or_default().to_string(),
                ..WindowState::default()
            }));
            self.created.push((id, state.clone()));
            Ok(Box::new(FakeWindow {
                id,
                title: url.unwrap_or_default().to_string(),
                url: url.map(String::from),
                state,
            }))
        }
    }

    fn manager() -> WindowManager {
        WindowManager::new(Rect::new(Vec2::ZERO, vec2(1600.0, 900.0)))
    }

    #[test]
    fn startup_window_gets_computed_geometry() {
        let mut mgr = manager();
        let mut backend = FakeBackend::default();

        mgr.open_start_page(&mut backend).unwrap();

        assert_eq!(mgr.window_count(), 1);
        let (_, state) = &backend.created[0];
        let state = state.borrow();
        assert_eq!(state.origin, vec2(30.0, 20.0));
        assert!((state.size.x - 1184.0).abs() < 1e-3);
        assert!((state.size.y - 740.0).abs() < 1e-3);
        assert!(state.shown);
        assert_eq!(mgr.current_windows()[0].url(), Some(START_PAGE));
    }

    #[test]
    fn registry_balances_opens_and_closes() {
        let mut mgr = manager();
        let mut backend = FakeBackend::default();

        let a = mgr.open(&mut backend, Some("https://a.example")).unwrap();
        let b = mgr.open(&mut backend, Some("https://b.example")).unwrap();
        mgr.open(&mut backend, None).unwrap();
        assert_eq!(mgr.window_count(), 3);

        mgr.notify_closed(a);
        mgr.notify_closed(b);
        assert_eq!(mgr.window_count(), 1);

        // A close that was already handled changes nothing.
        mgr.notify_closed(a);
        assert_eq!(mgr.window_count(), 1);
    }

    #[test]
    fn untitled_counter_ignores_titled_windows() {
        let mut mgr = manager();
        let mut backend = FakeBackend::default();

        mgr.open(&mut backend, None).unwrap();
        mgr.open(&mut backend, Some("https://a.example")).unwrap();
        mgr.open(&mut backend, None).unwrap();

        assert_eq!(backend.created[0].1.borrow().title, "Untitled 1");
        assert_eq!(backend.created[2].1.borrow().title, "Untitled 2");
        assert_eq!(backend.created[1].1.borrow().title, "https://a.example");
    }

    #[test]
    fn close_removes_exactly_that_window() {
        let mut mgr = manager();
        let mut backend = FakeBackend::default();

        // Identical URLs; identity is by id.
        let url = Some("https://same.example");
        let a = mgr.open(&mut backend, url).unwrap();
        let b = mgr.open(&mut backend, url).unwrap();
        let c = mgr.open(&mut backend, url).unwrap();

        mgr.notify_closed(b);

        let remaining: Vec<WindowId> = mgr.current_windows().iter().map(|w| w.id()).collect();
        assert_eq!(remaining, vec![a, c]);
    }

    #[test]
    fn all_closed_signal_fires_exactly_once() {
        let mut mgr = manager();
        let mut backend = FakeBackend::default();

        let a = mgr.open(&mut backend, Some("https://a.example")).unwrap();
        let b = mgr.open(&mut backend, None).unwrap();

        assert!(!mgr.notify_closed(a));
        assert!(mgr.notify_closed(b));
        assert!(!mgr.notify_closed(b));
    }

    #[test]
    fn failed_construction_leaves_state_untouched() {
        let mut mgr = manager();
        let mut backend = FakeBackend::default();
        backend.fail_next = true;

        let cursor = mgr.next_location();
        assert!(mgr.open(&mut backend, Some("https://a.example")).is_err());
        assert_eq!(mgr.window_count(), 0);
        assert_eq!(mgr.next_location(), cursor);

        // The manager still works after a failure.
        mgr.open(&mut backend, Some("https://a.example")).unwrap();
        assert_eq!(mgr.window_count(), 1);
    }

    #[test]
    fn windows_cascade_by_fixed_step() {
        let mut mgr = manager();
        let mut backend = FakeBackend::default();

        for _ in 0..3 {
            mgr.open(&mut backend, None).unwrap();
        }

        let origins: Vec<Vec2> = backend
            .created
            .iter()
            .map(|(_, s)| s.borrow().origin)
            .collect();
        assert_eq!(origins[1] - origins[0], vec2(30.0, 20.0));
        assert_eq!(origins[2] - origins[1], vec2(30.0, 20.0));
    }

    #[test]
    fn current_windows_reflects_live_state() {
        let mut mgr = manager();
        let mut backend = FakeBackend::default();

        let a = mgr.open(&mut backend, Some("https://a.example")).unwrap();
        mgr.open(&mut backend, Some("https://b.example")).unwrap();
        assert_eq!(mgr.current_windows().len(), 2);

        mgr.notify_closed(a);
        assert_eq!(mgr.current_windows().len(), 1);
        assert_eq!(mgr.current_windows()[0].url(), Some("https://b.example"));
    }
}
