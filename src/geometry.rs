use glam::Vec2;

#[derive(Debug, Copy, Clone)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.x
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.y
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let min = self.origin;
        let max = self.origin + self.size;
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }
}
