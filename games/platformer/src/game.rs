use std::marker::PhantomData;

use ledge_engine::*;
use thiserror::Error;

use crate::camera::update_viewport;
use crate::config::PlatformerConfig;
use crate::input::{apply_movement, movement_intent, try_jump, InputState};
use crate::level::{load_level, spawn_player, Level, LevelError};
use crate::player::{select_texture, PlayerAnimation, PlayerTextures};

pub const MANIFEST_RESOURCE: &str = "manifest.json";
pub const CONFIG_RESOURCE: &str = "config.json";

/// Sound played on pickup, and its event id when the manifest gives none.
const GEM_SOUND: &str = "gem";
const DEFAULT_GEM_SOUND_EVENT: u32 = 1;
/// Atlas holding the map tiles; atlas 0 when the manifest has no such atlas.
const TILES_ATLAS: &str = "tiles";

/// Game event kinds to the host
pub const EVENT_SCORE: f32 = 1.0;
pub const EVENT_LEVEL: f32 = 2.0;

#[derive(Debug, Error)]
pub enum PlatformerError {
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("invalid config.json")]
    Config(#[from] serde_json::Error),
}

/// State that exists once the game is initialised.
struct Session {
    player: EntityId,
    level: Level,
    textures: PlayerTextures,
    tiles: AtlasId,
    gem_sound: SoundEvent,
}

pub struct Platformer<P: PhysicsWorld> {
    config: PlatformerConfig,
    input: InputState,
    animation: PlayerAnimation,
    viewport: Viewport,
    score: u32,
    session: Option<Session>,
    _physics: PhantomData<fn() -> P>,
}

impl<P: PhysicsWorld> Platformer<P> {
    pub fn new() -> Self {
        Self::with_config(PlatformerConfig::default())
    }

    pub fn with_config(config: PlatformerConfig) -> Self {
        Self {
            viewport: Viewport::new(config.screen_width, config.screen_height),
            config,
            input: InputState::default(),
            animation: PlayerAnimation::default(),
            score: 0,
            session: None,
            _physics: PhantomData,
        }
    }

    pub fn settings(&self) -> &PlatformerConfig {
        &self.config
    }

    pub fn level(&self) -> Option<&Level> {
        self.session.as_ref().map(|s| &s.level)
    }

    pub fn player(&self) -> Option<EntityId> {
        self.session.as_ref().map(|s| s.player)
    }

    pub fn animation(&self) -> &PlayerAnimation {
        &self.animation
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Valuables collected over the whole run.
    pub fn score(&self) -> u32 {
        self.score
    }
}

impl<P: PhysicsWorld> Default for Platformer<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Load level `number` into an empty world and put the player at its spawn.
fn enter_level<P: PhysicsWorld>(
    ctx: &mut EngineContext<P>,
    config: &PlatformerConfig,
    session: &Session,
    animation: &PlayerAnimation,
    number: u32,
) -> Result<Level, LevelError> {
    let level = load_level(ctx, config, session.tiles, number)?;
    spawn_player(ctx, config, session.player, session.textures.resolve(animation.texture));
    Ok(level)
}

fn player_bounds<P: PhysicsWorld>(ctx: &EngineContext<P>, player: EntityId) -> Option<Rect> {
    ctx.scene.get(player).map(Entity::bounds)
}

impl<P: PhysicsWorld> Game for Platformer<P> {
    type Physics = P;
    type Error = PlatformerError;

    fn configure(&mut self, assets: &AssetStore) -> Result<(), PlatformerError> {
        if assets.contains(CONFIG_RESOURCE) {
            self.config = PlatformerConfig::from_json(assets.read(CONFIG_RESOURCE)?)?;
            log::info!("Loaded {}", CONFIG_RESOURCE);
        }
        self.viewport = Viewport::new(self.config.screen_width, self.config.screen_height);
        Ok(())
    }

    fn config(&self) -> GameConfig {
        self.config.game_config()
    }

    fn init(&mut self, ctx: &mut EngineContext<P>) -> Result<(), PlatformerError> {
        let manifest = AssetManifest::from_json(ctx.assets.read(MANIFEST_RESOURCE)?)?;
        let registry = SpriteRegistry::from_manifest(&manifest);
        let textures = PlayerTextures::from_registry(&registry, self.config.animation.walk_frames)?;

        let player = ctx.next_id();
        let tiles = AtlasId(manifest.atlas_index(TILES_ATLAS).unwrap_or(0));
        let gem_sound = SoundEvent(manifest.sound_event(GEM_SOUND).unwrap_or(DEFAULT_GEM_SOUND_EVENT));

        ctx.reset_world();
        let level = load_level(ctx, &self.config, tiles, self.config.first_level)?;
        spawn_player(ctx, &self.config, player, textures.resolve(self.animation.texture));
        let session = Session {
            player,
            level,
            textures,
            tiles,
            gem_sound,
        };

        self.viewport = Viewport::new(self.config.screen_width, self.config.screen_height);
        if let Some(bounds) = player_bounds(ctx, session.player) {
            self.viewport = update_viewport(bounds, self.viewport, &self.config.margins);
        }

        log::info!("Platformer ready: level {}", session.level.number);
        self.session = Some(session);
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext<P>, input: &[InputEvent]) -> Result<(), PlatformerError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let player = session.player;

        for event in input {
            if self.input.apply(event, &self.config.keys) {
                try_jump(ctx, player, self.config.player.jump_impulse);
            }
        }

        let on_ground = ctx.is_on_ground(player);
        apply_movement(ctx, player, movement_intent(&self.input, on_ground, &self.config.player));

        ctx.step_physics();

        let Some(bounds) = player_bounds(ctx, player) else {
            return Ok(());
        };

        if bounds.center().x >= session.level.end_of_map {
            let next = session.level.number + 1;
            log::info!("Level {} complete, advancing to level {}", session.level.number, next);
            ctx.reset_world();
            session.level = enter_level(ctx, &self.config, session, &self.animation, next)?;
            if let Some(bounds) = player_bounds(ctx, player) {
                self.viewport = update_viewport(bounds, self.viewport, &self.config.margins);
            }
            ctx.emit_event(GameEvent {
                kind: EVENT_LEVEL,
                a: next as f32,
                ..Default::default()
            });
            return Ok(());
        }

        self.viewport = update_viewport(bounds, self.viewport, &self.config.margins);

        let (picked, remaining): (Vec<EntityId>, Vec<EntityId>) =
            session.level.collectibles.iter().copied().partition(|&id| {
                ctx.scene
                    .get(id)
                    .is_some_and(|gem| gem.bounds().intersects(&bounds))
            });
        if !picked.is_empty() {
            for id in &picked {
                ctx.despawn(*id);
                ctx.emit_sound(session.gem_sound);
            }
            self.score += picked.len() as u32;
            session.level.collectibles = remaining;
            ctx.emit_event(GameEvent {
                kind: EVENT_SCORE,
                a: self.score as f32,
                b: session.level.number as f32,
                ..Default::default()
            });
        }

        let texture = select_texture(
            ctx.displacement(player),
            ctx.is_on_ground(player),
            &mut self.animation,
            &self.config.animation,
        );
        if let Some(entity) = ctx.scene.get_mut(player) {
            entity.sprite = Some(session.textures.resolve(texture));
        }
        Ok(())
    }

    fn render(&self, ctx: &mut RenderContext) {
        *ctx.viewport = self.viewport;
    }
}
