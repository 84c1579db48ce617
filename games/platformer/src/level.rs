//! Level loading: one physics body per map tile, plus the player at the
//! spawn cell.

use glam::Vec2;
use ledge_engine::{
    AssetError, AtlasId, BodyDesc, BodyKind, CollisionType, EngineContext, Entity, EntityId,
    PhysicsWorld, RenderLayer, SpriteComponent, TileMap, TileMapError,
};
use thiserror::Error;

use crate::config::PlatformerConfig;

pub const PLATFORMS_LAYER: &str = "Platforms";
pub const DYNAMIC_ITEMS_LAYER: &str = "Dynamic Items";
pub const VALUABLES_LAYER: &str = "Valuables";

pub const PLAYER_TAG: &str = "player";

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {level}: map resource unavailable")]
    Asset {
        level: u32,
        #[source]
        source: AssetError,
    },
    #[error("level {level}: invalid map")]
    Map {
        level: u32,
        #[source]
        source: TileMapError,
    },
}

/// Resource name of a level's map.
pub fn map_resource(number: u32) -> String {
    format!("maps/map{}.json", number)
}

/// A loaded level. Replaced wholesale when the player advances.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub number: u32,
    pub walls: Vec<EntityId>,
    pub items: Vec<EntityId>,
    /// Valuables not yet picked up.
    pub collectibles: Vec<EntityId>,
    /// Crossing this x ends the level.
    pub end_of_map: f32,
    pub map_width: u32,
    pub map_height: u32,
}

struct LayerSpawn {
    name: &'static str,
    tag: &'static str,
    kind: BodyKind,
    collision: CollisionType,
    render: RenderLayer,
    friction: f32,
    mass: f32,
}

fn spawn_layer<P: PhysicsWorld>(
    ctx: &mut EngineContext<P>,
    map: &TileMap,
    layer_spawn: &LayerSpawn,
    atlas: AtlasId,
    tile_size: Vec2,
) -> Vec<EntityId> {
    let Some(layer) = map.layer(layer_spawn.name) else {
        log::warn!("Map has no '{}' layer", layer_spawn.name);
        return Vec::new();
    };

    let half = tile_size / 2.0;
    let mut ids = Vec::new();
    for tile in map.tiles(layer) {
        let (col, row) = map.atlas_cell(tile.gid);
        let id = ctx.next_id();
        let entity = Entity::new(id)
            .with_tag(layer_spawn.tag)
            .with_pos(TileMap::tile_to_world(tile.x, tile.y, tile_size))
            .with_scale(tile_size)
            .with_layer(layer_spawn.render)
            .with_sprite(SpriteComponent::new(atlas, col, row));
        let desc = match layer_spawn.kind {
            BodyKind::Static => BodyDesc::fixed(layer_spawn.collision, half),
            BodyKind::Dynamic => BodyDesc::dynamic(layer_spawn.collision, half).with_mass(layer_spawn.mass),
        }
        .with_friction(layer_spawn.friction);
        ids.push(ctx.spawn_with_body(entity, desc));
    }
    ids
}

/// Read `maps/map{number}.json` and spawn its platforms, items and
/// valuables. Nothing is spawned if the map cannot be read.
pub fn load_level<P: PhysicsWorld>(
    ctx: &mut EngineContext<P>,
    config: &PlatformerConfig,
    tiles: AtlasId,
    number: u32,
) -> Result<Level, LevelError> {
    let resource = map_resource(number);
    let json = ctx
        .assets
        .read(&resource)
        .map_err(|source| LevelError::Asset { level: number, source })?;
    let map = TileMap::from_json(json).map_err(|source| LevelError::Map { level: number, source })?;

    let tile_size = Vec2::new(map.tile_width as f32, map.tile_height as f32) * config.sprite_scale;

    let walls = spawn_layer(
        ctx,
        &map,
        &LayerSpawn {
            name: PLATFORMS_LAYER,
            tag: "wall",
            kind: BodyKind::Static,
            collision: CollisionType::Wall,
            render: RenderLayer::Walls,
            friction: config.wall_friction,
            mass: 0.0,
        },
        tiles,
        tile_size,
    );
    let items = spawn_layer(
        ctx,
        &map,
        &LayerSpawn {
            name: DYNAMIC_ITEMS_LAYER,
            tag: "item",
            kind: BodyKind::Dynamic,
            collision: CollisionType::Item,
            render: RenderLayer::Items,
            friction: config.item_friction,
            mass: config.item_mass,
        },
        tiles,
        tile_size,
    );
    let collectibles = spawn_layer(
        ctx,
        &map,
        &LayerSpawn {
            name: VALUABLES_LAYER,
            tag: "gem",
            kind: BodyKind::Dynamic,
            collision: CollisionType::Item,
            render: RenderLayer::Collectibles,
            friction: config.item_friction,
            mass: config.item_mass,
        },
        tiles,
        tile_size,
    );

    let end_of_map = config.end_of_map(map.width);
    log::info!(
        "Level {} loaded: {}x{} tiles, {} walls, {} items, {} valuables, ends at x={}",
        number,
        map.width,
        map.height,
        walls.len(),
        items.len(),
        collectibles.len(),
        end_of_map
    );

    Ok(Level {
        number,
        walls,
        items,
        collectibles,
        end_of_map,
        map_width: map.width,
        map_height: map.height,
    })
}

/// Place the player at the spawn cell with a fresh body, keeping its id.
pub fn spawn_player<P: PhysicsWorld>(
    ctx: &mut EngineContext<P>,
    config: &PlatformerConfig,
    id: EntityId,
    sprite: SpriteComponent,
) {
    ctx.despawn(id);

    let size = config.player_size();
    let tuning = &config.player;
    let entity = Entity::new(id)
        .with_tag(PLAYER_TAG)
        .with_pos(config.player_spawn())
        .with_scale(size)
        .with_layer(RenderLayer::Player)
        .with_sprite(sprite);
    let desc = BodyDesc::dynamic(CollisionType::Player, size / 2.0)
        .with_friction(tuning.friction)
        .with_mass(tuning.mass)
        .with_fixed_rotation(true)
        .with_max_velocity(tuning.max_horizontal_speed, tuning.max_vertical_speed);
    ctx.spawn_with_body(entity, desc);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assets_with_levels, map_json, small_map, FakePhysics};
    use ledge_engine::GameConfig;

    fn context(levels: &[(u32, String)]) -> EngineContext<FakePhysics> {
        let mut ctx = EngineContext::from_config(&GameConfig::default());
        ctx.assets = assets_with_levels(levels);
        ctx
    }

    #[test]
    fn spawns_one_body_per_tile() {
        let mut ctx = context(&[(1, small_map())]);
        let config = PlatformerConfig::default();
        let level = load_level(&mut ctx, &config, AtlasId(1), 1).unwrap();

        assert_eq!(level.number, 1);
        assert_eq!(level.walls.len(), 4);
        assert_eq!(level.items.len(), 1);
        assert_eq!(level.collectibles.len(), 1);
        assert_eq!(ctx.scene.len(), 6);
        assert_eq!(ctx.physics.body_count(), 6);
        assert_eq!((level.map_width, level.map_height), (4, 3));
        assert_eq!(level.end_of_map, 4.0 * 30.0 + 800.0);
    }

    #[test]
    fn tiles_are_placed_bottom_up_at_scaled_pitch() {
        let mut ctx = context(&[(1, small_map())]);
        let level = load_level(&mut ctx, &PlatformerConfig::default(), AtlasId(1), 1).unwrap();

        // Bottom-left platform: cell (0, 0), 64-unit tiles.
        let wall = ctx.scene.get(level.walls[0]).unwrap();
        assert_eq!(wall.pos, Vec2::new(32.0, 32.0));
        assert_eq!(wall.scale, Vec2::splat(64.0));
        assert_eq!(wall.layer, RenderLayer::Walls);

        // Crate: data index 5 = column 1 of the middle row.
        let item = ctx.scene.get(level.items[0]).unwrap();
        assert_eq!(item.pos, Vec2::new(96.0, 96.0));
        let sprite = item.sprite.unwrap();
        assert_eq!((sprite.atlas, sprite.col, sprite.row), (AtlasId(1), 0.0, 1.0));

        let gem = ctx.scene.get(level.collectibles[0]).unwrap();
        assert_eq!(gem.pos, Vec2::new(224.0, 96.0));
        assert_eq!(gem.layer, RenderLayer::Collectibles);
    }

    #[test]
    fn bodies_carry_layer_materials() {
        let mut ctx = context(&[(1, small_map())]);
        let config = PlatformerConfig::default();
        let level = load_level(&mut ctx, &config, AtlasId(1), 1).unwrap();

        let wall = ctx.physics.body(level.walls[0]);
        assert_eq!(wall.desc.kind, BodyKind::Static);
        assert_eq!(wall.desc.collision, CollisionType::Wall);
        assert_eq!(wall.friction, 0.7);
        assert_eq!(wall.desc.half_extents, Vec2::splat(32.0));

        let item = ctx.physics.body(level.items[0]);
        assert_eq!(item.desc.kind, BodyKind::Dynamic);
        assert_eq!(item.desc.collision, CollisionType::Item);
        assert_eq!(item.friction, 0.6);
        assert_eq!(item.desc.mass, 1.0);

        let gem = ctx.physics.body(level.collectibles[0]);
        assert_eq!(gem.desc.kind, BodyKind::Dynamic);
        assert_eq!(gem.friction, 0.6);
    }

    #[test]
    fn missing_layer_yields_no_bodies() {
        let map = map_json(2, 1, &[("Platforms", vec![1, 1])]);
        let mut ctx = context(&[(1, map)]);
        let level = load_level(&mut ctx, &PlatformerConfig::default(), AtlasId(0), 1).unwrap();
        assert_eq!(level.walls.len(), 2);
        assert!(level.items.is_empty());
        assert!(level.collectibles.is_empty());
    }

    #[test]
    fn missing_map_is_an_error() {
        let mut ctx = context(&[]);
        match load_level(&mut ctx, &PlatformerConfig::default(), AtlasId(0), 3) {
            Err(LevelError::Asset { level, source: AssetError::NotFound(name) }) => {
                assert_eq!(level, 3);
                assert_eq!(name, "maps/map3.json");
            }
            other => panic!("expected missing map, got {:?}", other),
        }
        assert!(ctx.scene.is_empty());
    }

    #[test]
    fn malformed_map_is_an_error() {
        let mut ctx = context(&[(1, "{ \"width\": 2 ".to_string())]);
        assert!(matches!(
            load_level(&mut ctx, &PlatformerConfig::default(), AtlasId(0), 1),
            Err(LevelError::Map { level: 1, .. })
        ));
    }

    #[test]
    fn player_spawns_at_grid_two_two() {
        let mut ctx = context(&[]);
        let config = PlatformerConfig::default();
        let id = ctx.next_id();
        spawn_player(&mut ctx, &config, id, SpriteComponent::default());

        let player = ctx.scene.find_by_tag(PLAYER_TAG).unwrap();
        assert_eq!(player.id, id);
        assert_eq!(player.pos, Vec2::new(162.5, 162.5));
        assert_eq!(player.layer, RenderLayer::Player);

        let body = ctx.physics.body(id);
        assert_eq!(body.desc.collision, CollisionType::Player);
        assert_eq!(body.desc.mass, 2.0);
        assert_eq!(body.friction, 1.0);
        assert!(body.desc.fixed_rotation);
        assert_eq!(body.desc.max_velocity, Some(Vec2::new(250.0, 1300.0)));
    }

    #[test]
    fn respawning_player_keeps_a_single_entity() {
        let mut ctx = context(&[]);
        let config = PlatformerConfig::default();
        let id = ctx.next_id();
        spawn_player(&mut ctx, &config, id, SpriteComponent::default());
        ctx.physics.teleport(id, Vec2::new(999.0, 5.0));
        ctx.step_physics();

        spawn_player(&mut ctx, &config, id, SpriteComponent::default());
        assert_eq!(ctx.scene.len(), 1);
        assert_eq!(ctx.physics.body_count(), 1);
        assert_eq!(ctx.physics.body(id).position, Vec2::new(162.5, 162.5));
    }
}
