use glam::Vec2;

use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::assets::store::AssetStore;
use crate::components::entity::Entity;
use crate::core::physics::{BodyDesc, PhysicsWorld};
use crate::core::scene::Scene;
use crate::input::queue::InputEvent;
use crate::renderer::camera::Viewport;
use crate::renderer::instance::RenderBuffer;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Visible width in game units.
    pub world_width: f32,
    /// Visible height in game units.
    pub world_height: f32,
    /// Maximum number of render instances handed to the host (default: 4096).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Gravity vector for the physics world. Y-up, so downward is negative.
    pub gravity: Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 1920.0,
            world_height: 1080.0,
            max_instances: 4096,
            max_sounds: 32,
            max_events: 32,
            gravity: Vec2::ZERO,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Physics backend the game runs on.
    type Physics: PhysicsWorld;
    /// Fatal error surfaced to the host.
    type Error: std::error::Error + 'static;

    /// Read game settings from the loaded assets. Called once, before
    /// `config` and `init`.
    fn configure(&mut self, _assets: &AssetStore) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Return engine configuration.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext<Self::Physics>) -> Result<(), Self::Error>;

    /// One fixed tick. `input` holds the events that arrived since the last
    /// tick that saw input.
    fn update(
        &mut self,
        ctx: &mut EngineContext<Self::Physics>,
        input: &[InputEvent],
    ) -> Result<(), Self::Error>;

    /// Read-only render pass; typically positions the viewport.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext<P: PhysicsWorld> {
    pub scene: Scene,
    pub physics: P,
    pub assets: AssetStore,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl<P: PhysicsWorld> EngineContext<P> {
    pub fn new(physics: P) -> Self {
        Self {
            scene: Scene::new(),
            physics,
            assets: AssetStore::new(),
            sounds: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a context whose physics world follows `config`.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(P::new(config.gravity, config.fixed_dt))
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a sound event to be forwarded to the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body placed at the entity's position.
    pub fn spawn_with_body(&mut self, entity: Entity, desc: BodyDesc) -> EntityId {
        let id = entity.id;
        let desc = desc.with_position(entity.pos);
        self.physics.add_body(id, &desc);
        self.scene.spawn(entity);
        id
    }

    /// Despawn an entity and its physics body. Returns whether the entity existed.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        self.physics.remove_body(id);
        self.scene.despawn(id).is_some()
    }

    /// Discard every entity and body. Entity ids keep counting up.
    pub fn reset_world(&mut self) {
        self.scene.clear();
        self.physics.clear();
    }

    pub fn apply_force(&mut self, id: EntityId, force: Vec2) {
        self.physics.apply_force(id, force);
    }

    pub fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) {
        self.physics.apply_impulse(id, impulse);
    }

    pub fn set_friction(&mut self, id: EntityId, friction: f32) {
        self.physics.set_friction(id, friction);
    }

    pub fn is_on_ground(&self, id: EntityId) -> bool {
        self.physics.is_on_ground(id)
    }

    /// Movement of the entity's body during the last physics step.
    pub fn displacement(&self, id: EntityId) -> Vec2 {
        self.physics.displacement(id)
    }

    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.physics.velocity(id)
    }

    /// Step the physics simulation and sync positions back to entities.
    pub fn step_physics(&mut self) {
        self.physics.step();

        for entity in self.scene.iter_mut() {
            if let Some((pos, rot)) = self.physics.transform(entity.id) {
                entity.pos = pos;
                entity.rotation = rot;
            }
        }
    }
}

/// Render context for the game's read-only render pass.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
    pub viewport: &'a mut Viewport,
}

#[cfg(test)]
#[cfg(feature = "physics")]
mod physics_tests {
    use super::*;
    use crate::core::physics::CollisionType;
    use crate::core::rapier::RapierWorld;

    fn context(gravity: Vec2) -> EngineContext<RapierWorld> {
        EngineContext::from_config(&GameConfig {
            gravity,
            ..GameConfig::default()
        })
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ctx = context(Vec2::ZERO);
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert!(b > a);
    }

    #[test]
    fn frame_data_is_cleared() {
        let mut ctx = context(Vec2::ZERO);
        ctx.emit_sound(SoundEvent(1));
        ctx.emit_event(GameEvent { kind: 1.0, a: 5.0, ..Default::default() });
        assert_eq!(ctx.sounds.len(), 1);
        assert_eq!(ctx.events.len(), 1);
        ctx.clear_frame_data();
        assert!(ctx.sounds.is_empty());
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn spawn_with_body_creates_entity_and_physics() {
        let mut ctx = context(Vec2::ZERO);
        let id = ctx.next_id();
        let entity = Entity::new(id).with_pos(Vec2::new(100.0, 200.0));
        let desc = BodyDesc::dynamic(CollisionType::Item, Vec2::splat(10.0));

        ctx.spawn_with_body(entity, desc);

        assert_eq!(ctx.scene.len(), 1);
        assert_eq!(ctx.physics.body_count(), 1);
        let (pos, _) = ctx.physics.transform(id).unwrap();
        assert!((pos - Vec2::new(100.0, 200.0)).length() < 1e-3);
    }

    #[test]
    fn despawn_cleans_up_physics() {
        let mut ctx = context(Vec2::ZERO);
        let id = ctx.next_id();
        ctx.spawn_with_body(
            Entity::new(id),
            BodyDesc::dynamic(CollisionType::Item, Vec2::splat(10.0)),
        );

        assert!(ctx.despawn(id));
        assert_eq!(ctx.scene.len(), 0);
        assert_eq!(ctx.physics.body_count(), 0);
        assert!(!ctx.despawn(id));
    }

    #[test]
    fn reset_world_empties_scene_and_physics() {
        let mut ctx = context(Vec2::ZERO);
        for _ in 0..3 {
            let id = ctx.next_id();
            ctx.spawn_with_body(
                Entity::new(id),
                BodyDesc::fixed(CollisionType::Wall, Vec2::splat(10.0)),
            );
        }
        ctx.reset_world();
        assert!(ctx.scene.is_empty());
        assert_eq!(ctx.physics.body_count(), 0);
        assert_eq!(ctx.next_id(), EntityId(4));
    }

    #[test]
    fn step_physics_syncs_positions() {
        let mut ctx = context(Vec2::new(0.0, -1500.0));
        let id = ctx.next_id();
        let entity = Entity::new(id).with_pos(Vec2::new(100.0, 500.0));
        ctx.spawn_with_body(entity, BodyDesc::dynamic(CollisionType::Item, Vec2::splat(5.0)));

        for _ in 0..10 {
            ctx.step_physics();
        }

        let entity = ctx.scene.get(id).unwrap();
        assert!(entity.pos.y < 500.0, "entity should fall: y={}", entity.pos.y);
        assert!(ctx.displacement(id).y < 0.0);
        assert!(ctx.velocity(id).y < 0.0);
    }
}
