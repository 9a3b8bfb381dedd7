pub mod app;
pub mod geometry;
pub mod manager;
pub mod windowing;

pub use app::Shell;
pub use geometry::Rect;
pub use manager::{START_PAGE, WindowManager};
pub use windowing::backend::{BrowserWindow, WindowBackend, WindowId};
pub use windowing::placement::CascadeLayout;

pub use glam::Vec2;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub fn init_logging() {
    env_logger::init();
}
