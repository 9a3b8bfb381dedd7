use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WindowId(u64);

static NEXT_WINDOW_ID: AtomicU64 = AtomicU64::new(0);
impl WindowId {
    pub fn new() -> Self {
        Self(NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Capability contract for one browser window. Implementations own the
/// platform window plus whatever web-view renders the page; the manager
/// never sees either directly.
pub trait BrowserWindow {
    fn id(&self) -> WindowId;
    fn title(&self) -> &str;
    fn url(&self) -> Option<&str>;

    fn set_title(&mut self, title: &str);
    fn set_position(&mut self, origin: Vec2);
    fn set_size(&mut self, size: Vec2);
    fn show(&mut self);
}

/// Creates windows on behalf of the manager. The winit-backed
/// implementation lives in `app`; tests substitute their own.
pub trait WindowBackend {
    fn create_window(
        &mut self,
        id: WindowId,
        url: Option<&str>,
    ) -> crate::Result<Box<dyn BrowserWindow>>;
}
