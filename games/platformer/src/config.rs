use glam::Vec2;
use ledge_engine::GameConfig;
use serde::{Deserialize, Serialize};

/// Visible screen size in world units.
pub const SCREEN_WIDTH: f32 = 1920.0;
pub const SCREEN_HEIGHT: f32 = 1080.0;

/// Edge length of the source images, in pixels.
pub const SPRITE_IMAGE_SIZE: f32 = 128.0;
/// Scale applied to every sprite and tile.
pub const SPRITE_SCALE: f32 = 0.5;

/// Downward acceleration, world units per second squared.
pub const GRAVITY: f32 = 1500.0;

pub const PLAYER_FRICTION: f32 = 1.0;
pub const WALL_FRICTION: f32 = 0.7;
pub const DYNAMIC_ITEM_FRICTION: f32 = 0.6;
pub const PLAYER_MASS: f32 = 2.0;
pub const ITEM_MASS: f32 = 1.0;

pub const PLAYER_MAX_HORIZONTAL_SPEED: f32 = 250.0;
pub const PLAYER_MAX_VERTICAL_SPEED: f32 = 1300.0;
pub const PLAYER_MOVE_FORCE_ON_GROUND: f32 = 8000.0;
pub const PLAYER_MOVE_FORCE_IN_AIR: f32 = 900.0;
pub const PLAYER_JUMP_IMPULSE: f32 = 1400.0;

/// Level end = map width (tiles) * this + `END_OF_MAP_MARGIN`.
pub const END_OF_MAP_TILE_WIDTH: f32 = 30.0;
pub const END_OF_MAP_MARGIN: f32 = 800.0;

/// Below this per-step movement the player counts as standing still.
pub const DEAD_ZONE: f32 = 0.1;
/// Horizontal distance walked between walk frames.
pub const DISTANCE_TO_CHANGE_TEXTURE: f32 = 10.0;
pub const WALK_FRAMES: u8 = 8;

/// DOM key codes.
pub mod keys {
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_RIGHT: u32 = 39;
    pub const SPACE: u32 = 32;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const W: u32 = 87;
}

/// Distance the player may approach each screen edge before it scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportMargins {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Default for ViewportMargins {
    fn default() -> Self {
        Self {
            left: 900.0,
            right: 900.0,
            bottom: 50.0,
            top: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<u32>,
    pub right: Vec<u32>,
    pub jump: Vec<u32>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec![keys::ARROW_LEFT, keys::A],
            right: vec![keys::ARROW_RIGHT, keys::D],
            jump: vec![keys::ARROW_UP, keys::W, keys::SPACE],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTuning {
    pub dead_zone: f32,
    pub distance_to_change_texture: f32,
    pub walk_frames: u8,
}

impl Default for AnimationTuning {
    fn default() -> Self {
        Self {
            dead_zone: DEAD_ZONE,
            distance_to_change_texture: DISTANCE_TO_CHANGE_TEXTURE,
            walk_frames: WALK_FRAMES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub friction: f32,
    pub mass: f32,
    pub max_horizontal_speed: f32,
    pub max_vertical_speed: f32,
    pub move_force_on_ground: f32,
    pub move_force_in_air: f32,
    pub jump_impulse: f32,
    /// Spawn cell, counted in sprite-size units from the world origin.
    pub spawn_grid: [u32; 2],
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            friction: PLAYER_FRICTION,
            mass: PLAYER_MASS,
            max_horizontal_speed: PLAYER_MAX_HORIZONTAL_SPEED,
            max_vertical_speed: PLAYER_MAX_VERTICAL_SPEED,
            move_force_on_ground: PLAYER_MOVE_FORCE_ON_GROUND,
            move_force_in_air: PLAYER_MOVE_FORCE_IN_AIR,
            jump_impulse: PLAYER_JUMP_IMPULSE,
            spawn_grid: [2, 2],
        }
    }
}

/// Top-level game configuration, optionally read from `config.json`.
/// Any field left out keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub gravity: f32,
    pub sprite_image_size: f32,
    pub sprite_scale: f32,
    pub wall_friction: f32,
    pub item_friction: f32,
    pub item_mass: f32,
    pub end_of_map_tile_width: f32,
    pub end_of_map_margin: f32,
    pub first_level: u32,
    pub player: PlayerTuning,
    pub margins: ViewportMargins,
    pub keys: KeyBindings,
    pub animation: AnimationTuning,
}

impl Default for PlatformerConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            gravity: GRAVITY,
            sprite_image_size: SPRITE_IMAGE_SIZE,
            sprite_scale: SPRITE_SCALE,
            wall_friction: WALL_FRICTION,
            item_friction: DYNAMIC_ITEM_FRICTION,
            item_mass: ITEM_MASS,
            end_of_map_tile_width: END_OF_MAP_TILE_WIDTH,
            end_of_map_margin: END_OF_MAP_MARGIN,
            first_level: 1,
            player: PlayerTuning::default(),
            margins: ViewportMargins::default(),
            keys: KeyBindings::default(),
            animation: AnimationTuning::default(),
        }
    }
}

impl PlatformerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Grid pitch used to place the player: one pixel wider than a scaled sprite.
    pub fn sprite_size(&self) -> f32 {
        (self.sprite_image_size * self.sprite_scale).floor() + 1.0
    }

    /// Rendered size of the player.
    pub fn player_size(&self) -> Vec2 {
        Vec2::splat(self.sprite_image_size * self.sprite_scale)
    }

    /// Player centre for the configured spawn cell.
    pub fn player_spawn(&self) -> Vec2 {
        let size = self.sprite_size();
        let [gx, gy] = self.player.spawn_grid;
        Vec2::new(
            size * gx as f32 + size / 2.0,
            size * gy as f32 + size / 2.0,
        )
    }

    /// Right edge of a map `map_width` tiles wide; crossing it ends the level.
    pub fn end_of_map(&self, map_width: u32) -> f32 {
        map_width as f32 * self.end_of_map_tile_width + self.end_of_map_margin
    }

    /// Engine settings derived from the game settings.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            world_width: self.screen_width,
            world_height: self.screen_height,
            gravity: Vec2::new(0.0, -self.gravity),
            ..GameConfig::default()
        }
    }
}
