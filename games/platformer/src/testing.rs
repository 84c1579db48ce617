//! Test doubles shared by the game's unit tests.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use ledge_engine::{AssetStore, BodyDesc, EntityId, PhysicsWorld};

#[derive(Debug, Clone)]
pub struct FakeBody {
    pub desc: BodyDesc,
    pub position: Vec2,
    pub friction: f32,
    pub displacement: Vec2,
}

/// Recording physics world. Bodies move only by their scripted `motion`,
/// and ground contact is whatever the test puts in `grounded`.
#[derive(Debug, Default)]
pub struct FakePhysics {
    pub dt: f32,
    pub gravity: Vec2,
    pub bodies: HashMap<EntityId, FakeBody>,
    pub grounded: HashSet<EntityId>,
    /// Movement applied to a body on every step.
    pub motion: HashMap<EntityId, Vec2>,
    pub forces: Vec<(EntityId, Vec2)>,
    pub impulses: Vec<(EntityId, Vec2)>,
    pub frictions: Vec<(EntityId, f32)>,
    pub steps: u32,
    pub clears: u32,
}

impl FakePhysics {
    pub fn body(&self, id: EntityId) -> &FakeBody {
        &self.bodies[&id]
    }

    pub fn teleport(&mut self, id: EntityId, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.position = position;
        }
    }

    pub fn forget_calls(&mut self) {
        self.forces.clear();
        self.impulses.clear();
        self.frictions.clear();
    }
}

impl PhysicsWorld for FakePhysics {
    fn new(gravity: Vec2, dt: f32) -> Self {
        Self {
            gravity,
            dt,
            ..Self::default()
        }
    }

    fn add_body(&mut self, id: EntityId, desc: &BodyDesc) {
        self.bodies.insert(
            id,
            FakeBody {
                desc: desc.clone(),
                position: desc.position,
                friction: desc.friction,
                displacement: Vec2::ZERO,
            },
        );
    }

    fn remove_body(&mut self, id: EntityId) -> bool {
        self.bodies.remove(&id).is_some()
    }

    fn clear(&mut self) {
        self.bodies.clear();
        self.clears += 1;
    }

    fn apply_force(&mut self, id: EntityId, force: Vec2) {
        self.forces.push((id, force));
    }

    fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) {
        self.impulses.push((id, impulse));
    }

    fn set_friction(&mut self, id: EntityId, friction: f32) {
        self.frictions.push((id, friction));
        if let Some(body) = self.bodies.get_mut(&id) {
            body.friction = friction;
        }
    }

    fn is_on_ground(&self, id: EntityId) -> bool {
        self.bodies.contains_key(&id) && self.grounded.contains(&id)
    }

    fn step(&mut self) {
        for (id, body) in self.bodies.iter_mut() {
            let delta = self.motion.get(id).copied().unwrap_or(Vec2::ZERO);
            body.position += delta;
            body.displacement = delta;
        }
        self.steps += 1;
    }

    fn transform(&self, id: EntityId) -> Option<(Vec2, f32)> {
        self.bodies.get(&id).map(|b| (b.position, 0.0))
    }

    fn displacement(&self, id: EntityId) -> Vec2 {
        self.bodies
            .get(&id)
            .map(|b| b.displacement)
            .unwrap_or(Vec2::ZERO)
    }

    fn velocity(&self, id: EntityId) -> Vec2 {
        if self.dt <= 0.0 {
            return Vec2::ZERO;
        }
        self.displacement(id) / self.dt
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

/// A manifest declaring every sprite the player needs, a tile atlas and the
/// pickup sound.
pub fn manifest_json() -> String {
    let mut sprites = String::from(
        r#""player_idle": { "atlas": 0, "col": 0, "row": 0 },
           "player_jump": { "atlas": 0, "col": 1, "row": 0 },
           "player_fall": { "atlas": 0, "col": 2, "row": 0 }"#,
    );
    for i in 0..8 {
        sprites.push_str(&format!(
            r#", "player_walk{}": {{ "atlas": 0, "col": {}, "row": 1 }}"#,
            i, i
        ));
    }
    format!(
        r#"{{
            "atlases": [
                {{ "name": "player", "cols": 8, "rows": 2, "path": "player.png" }},
                {{ "name": "tiles", "cols": 8, "rows": 8, "path": "tiles.png" }}
            ],
            "sprites": {{ {} }},
            "sounds": {{ "gem": {{ "path": "gem.ogg", "event_id": 1 }} }}
        }}"#,
        sprites
    )
}

/// A map `width` x `height` with the given named layers (row 0 at the top).
pub fn map_json(width: u32, height: u32, layers: &[(&str, Vec<u32>)]) -> String {
    let layers: Vec<String> = layers
        .iter()
        .map(|(name, data)| {
            let data: Vec<String> = data.iter().map(u32::to_string).collect();
            format!(
                r#"{{ "name": "{}", "type": "tilelayer", "data": [{}] }}"#,
                name,
                data.join(",")
            )
        })
        .collect();
    format!(
        r#"{{ "width": {}, "height": {}, "tilewidth": 128, "tileheight": 128,
              "tilesets": [{{ "firstgid": 1, "columns": 8 }}],
              "layers": [{}] }}"#,
        width,
        height,
        layers.join(",")
    )
}

/// A 4x3 map: a floor row of platforms, one crate and one gem on the row
/// above.
pub fn small_map() -> String {
    map_json(
        4,
        3,
        &[
            ("Platforms", vec![0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4]),
            ("Dynamic Items", vec![0, 0, 0, 0, 0, 9, 0, 0, 0, 0, 0, 0]),
            ("Valuables", vec![0, 0, 0, 0, 0, 0, 0, 17, 0, 0, 0, 0]),
        ],
    )
}

pub fn assets_with_levels(levels: &[(u32, String)]) -> AssetStore {
    let mut store = AssetStore::new();
    store.insert("manifest.json", manifest_json());
    for (number, map) in levels {
        store.insert(format!("maps/map{}.json", number), map.clone());
    }
    store
}
