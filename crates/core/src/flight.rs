//! Free-flight plane state and per-frame integration.

use crate::Vec3;

/// Linear throttle gain in units per second while accelerating.
pub const ACCEL_RATE: f32 = 5.0;
/// Hard cap on forward speed.
pub const MAX_SPEED: f32 = 10.0;
/// Multiplicative throttle decay applied once per integration call.
/// Intentionally per-call rather than per-second: the original behaved
/// this way and callers integrate once per frame.
pub const SPEED_DAMPING: f32 = 0.995;
/// Pitch/roll turn rate in degrees per second.
pub const TURN_RATE: f32 = 60.0;
/// Yaw turn rate in degrees per second.
pub const YAW_RATE: f32 = 30.0;
/// Orientation angles are clamped to +/- this many degrees.
pub const MAX_ANGLE: f32 = 60.0;

/// Which logical flight controls are currently held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub accelerate: bool,
    pub decelerate: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub roll_left: bool,
    pub roll_right: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
}

/// Plane state: position, orientation (degrees) and forward speed.
/// Mutated once per frame by [`FlightState::integrate`]; no other writer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlightState {
    pub position: Vec3,
    /// Pitch, degrees.
    pub rot_x: f32,
    /// Yaw, degrees.
    pub rot_y: f32,
    /// Roll, degrees.
    pub rot_z: f32,
    pub speed: f32,
}

impl FlightState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward unit vector derived from the current pitch and yaw.
    pub fn forward(&self) -> Vec3 {
        let pitch = self.rot_x.to_radians();
        let yaw = self.rot_y.to_radians();
        Vec3::new(
            yaw.sin() * pitch.cos(),
            -pitch.sin(),
            -yaw.cos() * pitch.cos(),
        )
    }

    /// Advance the state by `dt` seconds of held `controls`.
    ///
    /// Explicit Euler; a large `dt` (e.g. after a stall) produces a
    /// correspondingly large position jump.
    pub fn integrate(&mut self, controls: &Controls, dt: f32) {
        if controls.accelerate {
            self.speed = (self.speed + ACCEL_RATE * dt).min(MAX_SPEED);
        }
        if controls.decelerate {
            self.speed = (self.speed - ACCEL_RATE * 0.5 * dt).max(0.0);
        }
        // Per-call decay, see SPEED_DAMPING. Applied after the clamps,
        // so a held accelerate tops out at MAX_SPEED * SPEED_DAMPING.
        self.speed *= SPEED_DAMPING;

        if controls.pitch_up {
            self.rot_x += TURN_RATE * dt;
        }
        if controls.pitch_down {
            self.rot_x -= TURN_RATE * dt;
        }
        if controls.roll_left {
            self.rot_z += TURN_RATE * dt;
        }
        if controls.roll_right {
            self.rot_z -= TURN_RATE * dt;
        }
        if controls.yaw_left {
            self.rot_y += YAW_RATE * dt;
        }
        if controls.yaw_right {
            self.rot_y -= YAW_RATE * dt;
        }
        self.rot_x = self.rot_x.clamp(-MAX_ANGLE, MAX_ANGLE);
        self.rot_y = self.rot_y.clamp(-MAX_ANGLE, MAX_ANGLE);
        self.rot_z = self.rot_z.clamp(-MAX_ANGLE, MAX_ANGLE);

        self.position += self.forward() * self.speed * dt;
    }

    /// Return to the initial state (origin, level, stopped).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn idle_speed_decays_by_damping_factor() {
        let mut state = FlightState {
            speed: 4.0,
            ..Default::default()
        };
        state.integrate(&Controls::default(), 0.016);
        assert!((state.speed - 4.0 * SPEED_DAMPING).abs() < EPS);
    }

    #[test]
    fn idle_position_advances_along_forward() {
        let mut state = FlightState {
            speed: 2.0,
            rot_x: 30.0,
            rot_y: 45.0,
            ..Default::default()
        };
        let before = state;
        let dt = 0.5;
        state.integrate(&Controls::default(), dt);
        // Damping applies before translation.
        let expected = before.position + before.forward() * (before.speed * SPEED_DAMPING) * dt;
        assert!((state.position - expected).length() < EPS);
    }

    #[test]
    fn forward_is_unit_length_and_points_down_negative_z_at_rest() {
        let state = FlightState::new();
        let f = state.forward();
        assert!((f.length() - 1.0).abs() < EPS);
        assert!((f - Vec3::new(0.0, 0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn speed_stays_within_bounds() {
        let mut state = FlightState::new();
        let held = Controls {
            accelerate: true,
            ..Default::default()
        };
        for _ in 0..10_000 {
            state.integrate(&held, 0.1);
            // Decay runs after the throttle clamp, so the post-step
            // speed stays strictly under MAX_SPEED.
            assert!(state.speed >= 0.0 && state.speed <= MAX_SPEED * SPEED_DAMPING);
        }
        let held = Controls {
            decelerate: true,
            ..Default::default()
        };
        for _ in 0..10_000 {
            state.integrate(&held, 0.1);
            assert!(state.speed >= 0.0 && state.speed <= MAX_SPEED * SPEED_DAMPING);
        }
    }

    #[test]
    fn full_throttle_step_decays_from_the_cap() {
        let mut state = FlightState {
            speed: MAX_SPEED,
            ..Default::default()
        };
        let held = Controls {
            accelerate: true,
            ..Default::default()
        };
        state.integrate(&held, 0.016);
        assert!((state.speed - MAX_SPEED * SPEED_DAMPING).abs() < EPS);
    }

    #[test]
    fn angles_stay_clamped_under_sustained_input() {
        let mut state = FlightState::new();
        let held = Controls {
            pitch_up: true,
            roll_left: true,
            yaw_left: true,
            ..Default::default()
        };
        for _ in 0..1_000 {
            state.integrate(&held, 0.1);
        }
        assert!((state.rot_x - MAX_ANGLE).abs() < EPS);
        assert!((state.rot_y - MAX_ANGLE).abs() < EPS);
        assert!((state.rot_z - MAX_ANGLE).abs() < EPS);

        let held = Controls {
            pitch_down: true,
            roll_right: true,
            yaw_right: true,
            ..Default::default()
        };
        for _ in 0..1_000 {
            state.integrate(&held, 0.1);
        }
        assert!((state.rot_x + MAX_ANGLE).abs() < EPS);
        assert!((state.rot_y + MAX_ANGLE).abs() < EPS);
        assert!((state.rot_z + MAX_ANGLE).abs() < EPS);
    }

    #[test]
    fn yaw_turns_slower_than_pitch() {
        let mut state = FlightState::new();
        let held = Controls {
            pitch_up: true,
            yaw_left: true,
            ..Default::default()
        };
        state.integrate(&held, 0.1);
        assert!(state.rot_y < state.rot_x);
    }

    #[test]
    fn reset_returns_to_default() {
        let mut state = FlightState::new();
        let held = Controls {
            accelerate: true,
            pitch_up: true,
            ..Default::default()
        };
        for _ in 0..100 {
            state.integrate(&held, 0.05);
        }
        state.reset();
        assert_eq!(state, FlightState::default());
    }
}
