pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, SoundEvent, GameEvent, Rect};
pub use components::entity::Entity;
pub use components::layer::RenderLayer;
pub use components::sprite::{SpriteComponent, AtlasId};
pub use components::tilemap::{TileMap, TileMapError, MapLayer, PlacedTile};
pub use core::physics::{PhysicsWorld, BodyDesc, BodyKind, CollisionType};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::camera::Viewport;
pub use renderer::traits::{FrameData, LayerBatch, Renderer};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::AssetError;
pub use assets::manifest::AssetManifest;
pub use assets::registry::SpriteRegistry;
pub use assets::store::AssetStore;
pub use systems::render::build_render_buffer;

#[cfg(feature = "physics")]
pub use core::rapier::RapierWorld;
