//! Physics capability used by games.
//!
//! Games talk to the simulation only through [`PhysicsWorld`], keyed by
//! [`EntityId`]. The rapier2d backend lives in `core::rapier`; tests can
//! substitute their own implementation.

use glam::Vec2;

use crate::api::types::EntityId;

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Immovable; participates in collisions only.
    Static,
    /// Integrated by the simulation (gravity, forces, impulses).
    Dynamic,
}

/// Collision-type tag. Selects how the body is treated by game rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionType {
    Player,
    Wall,
    Item,
}

/// Builder for describing a rigid body before creation.
/// Every body is an axis-aligned box collider.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub collision: CollisionType,
    pub position: Vec2,
    pub half_extents: Vec2,
    pub friction: f32,
    pub mass: f32,
    /// Infinite moment of inertia: the body never rotates.
    pub fixed_rotation: bool,
    /// Per-axis velocity caps (horizontal, vertical), enforced after every step.
    pub max_velocity: Option<Vec2>,
}

impl BodyDesc {
    /// Create a dynamic box body.
    pub fn dynamic(collision: CollisionType, half_extents: Vec2) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            collision,
            position: Vec2::ZERO,
            half_extents,
            friction: 0.5,
            mass: 1.0,
            fixed_rotation: false,
            max_velocity: None,
        }
    }

    /// Create a static box body.
    pub fn fixed(collision: CollisionType, half_extents: Vec2) -> Self {
        Self {
            kind: BodyKind::Static,
            fixed_rotation: true,
            ..Self::dynamic(collision, half_extents)
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_fixed_rotation(mut self, fixed: bool) -> Self {
        self.fixed_rotation = fixed;
        self
    }

    pub fn with_max_velocity(mut self, horizontal: f32, vertical: f32) -> Self {
        self.max_velocity = Some(Vec2::new(horizontal, vertical));
        self
    }
}

/// Rigid-body world as seen by game code.
///
/// Queries on unknown ids return neutral values (`None`, `Vec2::ZERO`,
/// `false`) instead of failing; the controller only asks about bodies it
/// spawned itself.
pub trait PhysicsWorld {
    /// Create an empty world. `gravity` is in world units per second squared
    /// (Y-up, so downward gravity is negative), `dt` is the fixed step.
    fn new(gravity: Vec2, dt: f32) -> Self
    where
        Self: Sized;

    /// Register a body for `id`. Replaces any body previously registered for it.
    fn add_body(&mut self, id: EntityId, desc: &BodyDesc);

    /// Remove the body for `id`. Returns whether one existed.
    fn remove_body(&mut self, id: EntityId) -> bool;

    /// Remove every body.
    fn clear(&mut self);

    /// Apply a continuous force for the next step only.
    fn apply_force(&mut self, id: EntityId, force: Vec2);

    /// Apply an instantaneous impulse.
    fn apply_impulse(&mut self, id: EntityId, impulse: Vec2);

    /// Change the friction coefficient of the body's collider.
    fn set_friction(&mut self, id: EntityId, friction: f32);

    /// Whether the body rests on a supporting surface.
    fn is_on_ground(&self, id: EntityId) -> bool;

    /// Advance the simulation by one fixed step.
    fn step(&mut self);

    /// Current position and rotation of the body.
    fn transform(&self, id: EntityId) -> Option<(Vec2, f32)>;

    /// Distance the body travelled during the most recent step.
    fn displacement(&self, id: EntityId) -> Vec2;

    /// Current linear velocity of the body.
    fn velocity(&self, id: EntityId) -> Vec2;

    /// Number of registered bodies.
    fn body_count(&self) -> usize;
}

/// Clamp a velocity to per-axis caps.
pub fn clamp_velocity(vel: Vec2, caps: Vec2) -> Vec2 {
    Vec2::new(
        vel.x.clamp(-caps.x, caps.x),
        vel.y.clamp(-caps.y, caps.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_pattern() {
        let desc = BodyDesc::dynamic(CollisionType::Player, Vec2::splat(32.0))
            .with_position(Vec2::new(10.0, 20.0))
            .with_friction(1.0)
            .with_mass(2.0)
            .with_fixed_rotation(true)
            .with_max_velocity(250.0, 1300.0);

        assert_eq!(desc.kind, BodyKind::Dynamic);
        assert_eq!(desc.collision, CollisionType::Player);
        assert_eq!(desc.position, Vec2::new(10.0, 20.0));
        assert!((desc.friction - 1.0).abs() < 0.001);
        assert!((desc.mass - 2.0).abs() < 0.001);
        assert!(desc.fixed_rotation);
        assert_eq!(desc.max_velocity, Some(Vec2::new(250.0, 1300.0)));
    }

    #[test]
    fn fixed_bodies_do_not_rotate() {
        let desc = BodyDesc::fixed(CollisionType::Wall, Vec2::splat(16.0));
        assert_eq!(desc.kind, BodyKind::Static);
        assert!(desc.fixed_rotation);
        assert!(desc.max_velocity.is_none());
    }

    #[test]
    fn clamp_velocity_per_axis() {
        let caps = Vec2::new(250.0, 1300.0);
        assert_eq!(clamp_velocity(Vec2::new(400.0, -2000.0), caps), Vec2::new(250.0, -1300.0));
        assert_eq!(clamp_velocity(Vec2::new(-10.0, 5.0), caps), Vec2::new(-10.0, 5.0));
    }
}
