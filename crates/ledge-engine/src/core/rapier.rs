use std::collections::HashMap;

use glam::Vec2;
use rapier2d::prelude::*;

use crate::api::types::EntityId;
use crate::core::physics::{clamp_velocity, BodyDesc, BodyKind, PhysicsWorld};

/// Minimum upward component of a contact normal for the contact to count as ground.
const GROUND_NORMAL_MIN_Y: f32 = 0.5;

// ---------------------------------------------------------------------------
// glam <-> nalgebra conversions
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn na_iso_to_pos_rot(iso: &nalgebra::Isometry2<f32>) -> (Vec2, f32) {
    let pos = Vec2::new(iso.translation.x, iso.translation.y);
    let rot = iso.rotation.angle();
    (pos, rot)
}

fn body_type(kind: BodyKind) -> RigidBodyType {
    match kind {
        BodyKind::Static => RigidBodyType::Fixed,
        BodyKind::Dynamic => RigidBodyType::Dynamic,
    }
}

/// Rapier handles plus the per-body bookkeeping rapier does not track for us.
#[derive(Debug, Clone, Copy)]
struct BodyRecord {
    body_handle: RigidBodyHandle,
    collider_handle: ColliderHandle,
    max_velocity: Option<Vec2>,
    position_before_step: Vec2,
    displacement: Vec2,
}

// ---------------------------------------------------------------------------
// RapierWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate behind the [`PhysicsWorld`] capability.
///
/// Friction coefficients combine multiplicatively, so a body with zero
/// friction slides freely over any surface. User forces last for exactly one
/// step. Velocity caps are applied after every step.
pub struct RapierWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    records: HashMap<EntityId, BodyRecord>,
}

impl RapierWorld {
    /// Current friction coefficient of a body's collider.
    pub fn friction(&self, id: EntityId) -> Option<f32> {
        let record = self.records.get(&id)?;
        self.colliders
            .get(record.collider_handle)
            .map(|c| c.friction())
    }
}

impl PhysicsWorld for RapierWorld {
    fn new(gravity: Vec2, dt: f32) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = dt;
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            records: HashMap::new(),
        }
    }

    fn add_body(&mut self, id: EntityId, desc: &BodyDesc) {
        self.remove_body(id);

        let rb = RigidBodyBuilder::new(body_type(desc.kind))
            .translation(vec2_to_na(desc.position))
            .locked_axes(if desc.fixed_rotation {
                LockedAxes::ROTATION_LOCKED
            } else {
                LockedAxes::empty()
            })
            .user_data(id.0 as u128)
            .build();
        let body_handle = self.bodies.insert(rb);

        let mut collider = ColliderBuilder::cuboid(desc.half_extents.x, desc.half_extents.y)
            .friction(desc.friction)
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .restitution(0.0);
        if desc.kind == BodyKind::Dynamic {
            collider = collider.mass(desc.mass);
        }
        let collider_handle =
            self.colliders
                .insert_with_parent(collider.build(), body_handle, &mut self.bodies);

        self.records.insert(
            id,
            BodyRecord {
                body_handle,
                collider_handle,
                max_velocity: desc.max_velocity,
                position_before_step: desc.position,
                displacement: Vec2::ZERO,
            },
        );
    }

    fn remove_body(&mut self, id: EntityId) -> bool {
        let Some(record) = self.records.remove(&id) else {
            return false;
        };
        self.bodies.remove(
            record.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        true
    }

    fn clear(&mut self) {
        let ids: Vec<EntityId> = self.records.keys().copied().collect();
        for id in ids {
            self.remove_body(id);
        }
    }

    fn apply_force(&mut self, id: EntityId, force: Vec2) {
        if let Some(record) = self.records.get(&id) {
            if let Some(rb) = self.bodies.get_mut(record.body_handle) {
                rb.add_force(vec2_to_na(force), true);
            }
        }
    }

    fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) {
        if let Some(record) = self.records.get(&id) {
            if let Some(rb) = self.bodies.get_mut(record.body_handle) {
                rb.apply_impulse(vec2_to_na(impulse), true);
            }
        }
    }

    fn set_friction(&mut self, id: EntityId, friction: f32) {
        if let Some(record) = self.records.get(&id) {
            if let Some(collider) = self.colliders.get_mut(record.collider_handle) {
                collider.set_friction(friction);
            }
        }
    }

    fn is_on_ground(&self, id: EntityId) -> bool {
        let Some(record) = self.records.get(&id) else {
            return false;
        };
        let own = record.collider_handle;
        self.narrow_phase.contact_pairs_with(own).any(|pair| {
            if !pair.has_any_active_contact {
                return false;
            }
            // Manifold normals point from collider1 towards collider2.
            let sign = if pair.collider1 == own { -1.0 } else { 1.0 };
            pair.manifolds
                .iter()
                .any(|m| !m.points.is_empty() && m.data.normal.y * sign > GROUND_NORMAL_MIN_Y)
        })
    }

    fn step(&mut self) {
        for record in self.records.values_mut() {
            if let Some(rb) = self.bodies.get(record.body_handle) {
                record.position_before_step = na_to_vec2(rb.translation());
            }
        }

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );

        for record in self.records.values_mut() {
            if let Some(rb) = self.bodies.get_mut(record.body_handle) {
                if let Some(caps) = record.max_velocity {
                    let clamped = clamp_velocity(na_to_vec2(rb.linvel()), caps);
                    rb.set_linvel(vec2_to_na(clamped), false);
                }
                rb.reset_forces(false);
                record.displacement = na_to_vec2(rb.translation()) - record.position_before_step;
            }
        }
    }

    fn transform(&self, id: EntityId) -> Option<(Vec2, f32)> {
        let record = self.records.get(&id)?;
        self.bodies
            .get(record.body_handle)
            .map(|rb| na_iso_to_pos_rot(rb.position()))
    }

    fn displacement(&self, id: EntityId) -> Vec2 {
        self.records
            .get(&id)
            .map(|r| r.displacement)
            .unwrap_or(Vec2::ZERO)
    }

    fn velocity(&self, id: EntityId) -> Vec2 {
        self.records
            .get(&id)
            .and_then(|r| self.bodies.get(r.body_handle))
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    fn body_count(&self) -> usize {
        self.records.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
