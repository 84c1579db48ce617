//! Player animation: picks idle, jump, fall or walk frames from how far the
//! body moved during the last physics step.

use glam::Vec2;
use ledge_engine::{AssetError, SpriteComponent, SpriteRegistry};

use crate::config::AnimationTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    Idle,
    Jump,
    Fall,
    Walk(u8),
}

/// Which player texture to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureHandle {
    pub kind: TextureKind,
    pub facing: Facing,
}

impl TextureHandle {
    pub fn new(kind: TextureKind, facing: Facing) -> Self {
        Self { kind, facing }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerAnimation {
    pub facing: Facing,
    /// Horizontal distance walked since the last walk frame change.
    pub odometer: f32,
    /// Current walk frame.
    pub frame: u8,
    pub texture: TextureHandle,
}

impl Default for PlayerAnimation {
    fn default() -> Self {
        Self {
            facing: Facing::Right,
            odometer: 0.0,
            frame: 0,
            texture: TextureHandle::new(TextureKind::Idle, Facing::Right),
        }
    }
}

/// Update `state` from one step's displacement and return the texture to draw.
pub fn select_texture(
    displacement: Vec2,
    is_grounded: bool,
    state: &mut PlayerAnimation,
    tuning: &AnimationTuning,
) -> TextureHandle {
    let Vec2 { x: dx, y: dy } = displacement;
    let dead_zone = tuning.dead_zone;

    if dx < -dead_zone && state.facing == Facing::Right {
        state.facing = Facing::Left;
    } else if dx > dead_zone && state.facing == Facing::Left {
        state.facing = Facing::Right;
    }

    if !is_grounded {
        if dy > dead_zone {
            state.texture = TextureHandle::new(TextureKind::Jump, state.facing);
            return state.texture;
        }
        if dy < -dead_zone {
            state.texture = TextureHandle::new(TextureKind::Fall, state.facing);
            return state.texture;
        }
    }

    if dx.abs() <= dead_zone {
        state.texture = TextureHandle::new(TextureKind::Idle, state.facing);
        return state.texture;
    }

    state.odometer += dx.abs();
    if state.odometer > tuning.distance_to_change_texture {
        state.odometer = 0.0;
        state.frame = (state.frame + 1) % tuning.walk_frames.max(1);
        state.texture = TextureHandle::new(TextureKind::Walk(state.frame), state.facing);
    }
    state.texture
}

/// Sprites for every player texture. Left-facing textures are the
/// right-facing cells drawn mirrored.
#[derive(Debug, Clone)]
pub struct PlayerTextures {
    idle: SpriteComponent,
    jump: SpriteComponent,
    fall: SpriteComponent,
    walk: Vec<SpriteComponent>,
}

impl PlayerTextures {
    /// Look up `player_idle`, `player_jump`, `player_fall` and
    /// `player_walk0..walk_frames` in the registry.
    pub fn from_registry(registry: &SpriteRegistry, walk_frames: u8) -> Result<Self, AssetError> {
        let walk = (0..walk_frames)
            .map(|i| registry.require(&format!("player_walk{}", i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            idle: registry.require("player_idle")?,
            jump: registry.require("player_jump")?,
            fall: registry.require("player_fall")?,
            walk,
        })
    }

    pub fn resolve(&self, handle: TextureHandle) -> SpriteComponent {
        let sprite = match handle.kind {
            TextureKind::Idle => self.idle,
            TextureKind::Jump => self.jump,
            TextureKind::Fall => self.fall,
            TextureKind::Walk(i) => self.walk.get(i as usize).copied().unwrap_or(self.idle),
        };
        match handle.facing {
            Facing::Right => sprite,
            Facing::Left => sprite.flipped(),
        }
    }
}
