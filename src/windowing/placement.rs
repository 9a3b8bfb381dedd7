use glam::{Vec2, vec2};

use crate::geometry::Rect;

/// Offset of the first window from the screen's top-left corner, and the
/// step between consecutive windows.
const CASCADE_STEP: Vec2 = Vec2::new(30.0, 20.0);

/// Hands out top-left corners for new windows, each displaced from the
/// previous one so stacked windows stay partially visible. When a window
/// would run off an edge of the screen, that axis snaps back to its
/// starting margin; the two axes wrap independently.
pub struct CascadeLayout {
    screen: Rect,
    next: Vec2,
    window_size: Vec2,
}

impl CascadeLayout {
    pub fn new(screen: Rect) -> Self {
        // Leave room below and to the right so several cascaded windows
        // fit on screen; cap the width at 1.6x the height.
        let height = screen.size.y - 160.0;
        let width = (screen.size.x - 130.0).min(height * 1.6);

        Self {
            screen,
            next: screen.origin + CASCADE_STEP,
            window_size: vec2(width, height),
        }
    }

    pub fn window_size(&self) -> Vec2 {
        self.window_size
    }

    /// Where the next window will go, without advancing the cursor.
    pub fn next_location(&self) -> Vec2 {
        self.next
    }

    /// Returns the origin for a new window and advances the cursor.
    pub fn place(&mut self) -> Vec2 {
        let origin = self.next;

        self.next += CASCADE_STEP;
        if self.next.x + self.window_size.x + 10.0 > self.screen.max_x() {
            self.next.x = self.screen.min_x() + CASCADE_STEP.x;
        }
        if self.next.y + self.window_size.y + 10.0 > self.screen.max_y() {
            self.next.y = self.screen.min_y() + CASCADE_STEP.y;
        }

        origin
    }
}
