use glam::Vec2;
use crate::api::types::{EntityId, Rect};
use crate::components::layer::RenderLayer;
use crate::components::sprite::SpriteComponent;

/// Fat Entity: a single struct with optional components.
/// Designed for simplicity over ECS purity.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are not drawn).
    pub active: bool,
    /// Center position in world space.
    pub pos: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Rendered size in world units.
    pub scale: Vec2,
    /// Collision box size in world units, centered on `pos`.
    pub extent: Vec2,
    /// Draw-order group.
    pub layer: RenderLayer,
    /// Sprite component (entities without one are not drawn).
    pub sprite: Option<SpriteComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            extent: Vec2::ONE,
            layer: RenderLayer::default(),
            sprite: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    /// Set the rendered size. The collision box follows unless set separately.
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self.extent = scale;
        self
    }

    pub fn with_extent(mut self, extent: Vec2) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    /// Axis-aligned collision box in world space.
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.extent)
    }
}
