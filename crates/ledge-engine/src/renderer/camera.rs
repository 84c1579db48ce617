use glam::Mat4;

/// Scrolling window onto the world.
///
/// The offsets are whole world units; the renderer never sees a fractional
/// scroll position, which keeps tile edges pixel-aligned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World x of the left screen edge.
    pub left: i32,
    /// World y of the bottom screen edge.
    pub bottom: i32,
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
}

impl Viewport {
    /// A viewport of the given size anchored at the world origin.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            left: 0,
            bottom: 0,
            width,
            height,
        }
    }

    pub fn scroll_to(&mut self, left: i32, bottom: i32) {
        self.left = left;
        self.bottom = bottom;
    }

    pub fn right(&self) -> f32 {
        self.left as f32 + self.width
    }

    pub fn top(&self) -> f32 {
        self.bottom as f32 + self.height
    }

    /// Orthographic projection for the visible rectangle.
    /// Y-up, Z in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.left as f32,
            self.right(),
            self.bottom as f32,
            self.top(),
            0.0,
            1.0,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}
