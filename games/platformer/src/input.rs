//! Held-key state and its translation into player forces.

use glam::Vec2;
use ledge_engine::{EngineContext, EntityId, InputEvent, PhysicsWorld};

use crate::config::{KeyBindings, PlayerTuning};

/// Friction set on the player while no horizontal key is driving it.
pub const FULL_FRICTION: f32 = 1.0;
/// Friction set on the player while it is being driven, so it slides freely.
pub const NO_FRICTION: f32 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Jump,
}

impl KeyBindings {
    pub fn action(&self, key_code: u32) -> Option<InputAction> {
        if self.left.contains(&key_code) {
            Some(InputAction::MoveLeft)
        } else if self.right.contains(&key_code) {
            Some(InputAction::MoveRight)
        } else if self.jump.contains(&key_code) {
            Some(InputAction::Jump)
        } else {
            None
        }
    }
}

/// Keys currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left_pressed: bool,
    pub right_pressed: bool,
    /// A jump key is down. Key-downs while set are auto-repeats.
    pub jump_held: bool,
}

impl InputState {
    /// Fold one key event into the state. Returns true when the event is a
    /// fresh jump press.
    pub fn apply(&mut self, event: &InputEvent, bindings: &KeyBindings) -> bool {
        match *event {
            InputEvent::KeyDown { key_code } => match bindings.action(key_code) {
                Some(InputAction::MoveLeft) => self.left_pressed = true,
                Some(InputAction::MoveRight) => self.right_pressed = true,
                Some(InputAction::Jump) => {
                    let pressed = !self.jump_held;
                    self.jump_held = true;
                    return pressed;
                }
                None => {}
            },
            InputEvent::KeyUp { key_code } => match bindings.action(key_code) {
                Some(InputAction::MoveLeft) => self.left_pressed = false,
                Some(InputAction::MoveRight) => self.right_pressed = false,
                Some(InputAction::Jump) => self.jump_held = false,
                None => {}
            },
        }
        false
    }
}

/// What the held keys ask of the player body this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementIntent {
    pub force: Option<Vec2>,
    pub friction: f32,
}

/// Translate held keys into a horizontal force and a friction setting.
/// Opposite keys held together cancel out.
pub fn movement_intent(input: &InputState, on_ground: bool, tuning: &PlayerTuning) -> MovementIntent {
    let magnitude = if on_ground {
        tuning.move_force_on_ground
    } else {
        tuning.move_force_in_air
    };
    let direction = match (input.left_pressed, input.right_pressed) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => {
            return MovementIntent {
                force: None,
                friction: FULL_FRICTION,
            }
        }
    };
    MovementIntent {
        force: Some(Vec2::new(direction * magnitude, 0.0)),
        friction: NO_FRICTION,
    }
}

pub fn apply_movement<P: PhysicsWorld>(
    ctx: &mut EngineContext<P>,
    player: EntityId,
    intent: MovementIntent,
) {
    if let Some(force) = intent.force {
        ctx.apply_force(player, force);
    }
    ctx.set_friction(player, intent.friction);
}

/// Jump if the player stands on something. Returns whether it jumped.
pub fn try_jump<P: PhysicsWorld>(ctx: &mut EngineContext<P>, player: EntityId, impulse: f32) -> bool {
    if !ctx.is_on_ground(player) {
        return false;
    }
    ctx.apply_impulse(player, Vec2::new(0.0, impulse));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys;

    fn state(left: bool, right: bool) -> InputState {
        InputState {
            left_pressed: left,
            right_pressed: right,
            jump_held: false,
        }
    }

    #[test]
    fn left_only_pushes_left_without_friction() {
        let tuning = PlayerTuning::default();
        let ground = movement_intent(&state(true, false), true, &tuning);
        assert_eq!(ground.force, Some(Vec2::new(-8000.0, 0.0)));
        assert_eq!(ground.friction, NO_FRICTION);

        let air = movement_intent(&state(true, false), false, &tuning);
        assert_eq!(air.force, Some(Vec2::new(-900.0, 0.0)));
        assert_eq!(air.friction, NO_FRICTION);
    }

    #[test]
    fn right_only_pushes_right_without_friction() {
        let tuning = PlayerTuning::default();
        let ground = movement_intent(&state(false, true), true, &tuning);
        assert_eq!(ground.force, Some(Vec2::new(8000.0, 0.0)));
        let air = movement_intent(&state(false, true), false, &tuning);
        assert_eq!(air.force, Some(Vec2::new(900.0, 0.0)));
        assert_eq!(air.friction, NO_FRICTION);
    }

    #[test]
    fn neither_or_both_brake() {
        let tuning = PlayerTuning::default();
        for on_ground in [true, false] {
            for (l, r) in [(false, false), (true, true)] {
                let intent = movement_intent(&state(l, r), on_ground, &tuning);
                assert_eq!(intent.force, None);
                assert_eq!(intent.friction, FULL_FRICTION);
            }
        }
    }

    #[test]
    fn key_bindings_cover_arrows_and_wasd() {
        let b = KeyBindings::default();
        assert_eq!(b.action(keys::ARROW_LEFT), Some(InputAction::MoveLeft));
        assert_eq!(b.action(keys::A), Some(InputAction::MoveLeft));
        assert_eq!(b.action(keys::D), Some(InputAction::MoveRight));
        assert_eq!(b.action(keys::SPACE), Some(InputAction::Jump));
        assert_eq!(b.action(keys::W), Some(InputAction::Jump));
        assert_eq!(b.action(13), None);
    }

    #[test]
    fn held_keys_track_down_and_up() {
        let b = KeyBindings::default();
        let mut s = InputState::default();
        s.apply(&InputEvent::KeyDown { key_code: keys::A }, &b);
        s.apply(&InputEvent::KeyDown { key_code: keys::ARROW_RIGHT }, &b);
        assert!(s.left_pressed && s.right_pressed);
        s.apply(&InputEvent::KeyUp { key_code: keys::A }, &b);
        assert!(!s.left_pressed && s.right_pressed);
    }

    #[test]
    fn jump_fires_once_per_press() {
        let b = KeyBindings::default();
        let mut s = InputState::default();
        let down = InputEvent::KeyDown { key_code: keys::SPACE };
        assert!(s.apply(&down, &b));
        // Auto-repeat while held.
        assert!(!s.apply(&down, &b));
        assert!(!s.apply(&down, &b));
        assert!(!s.apply(&InputEvent::KeyUp { key_code: keys::SPACE }, &b));
        assert!(s.apply(&down, &b));
    }
}
