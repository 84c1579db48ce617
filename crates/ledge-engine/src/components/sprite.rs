/// Identifies which texture atlas a sprite belongs to.
/// Index into the AssetManifest's atlas list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// Sprite component: defines how an entity appears visually.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteComponent {
    /// Which atlas this sprite belongs to.
    pub atlas: AtlasId,
    /// Column in the atlas grid.
    pub col: f32,
    /// Row in the atlas grid.
    pub row: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Draw the cell mirrored horizontally.
    pub flip_x: bool,
}

impl SpriteComponent {
    pub fn new(atlas: AtlasId, col: f32, row: f32) -> Self {
        Self {
            atlas,
            col,
            row,
            ..Default::default()
        }
    }

    /// The same cell, mirrored horizontally.
    pub fn flipped(self) -> Self {
        Self {
            flip_x: !self.flip_x,
            ..self
        }
    }
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self {
            atlas: AtlasId(0),
            col: 0.0,
            row: 0.0,
            alpha: 1.0,
            flip_x: false,
        }
    }
}
