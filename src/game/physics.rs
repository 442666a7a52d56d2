//! Arrow flight physics

use crate::ws::protocol::{ArrowState, Velocity};

use super::POWER_SCALE;

/// A live arrow in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
}

impl Arrow {
    /// Launch from a point with the velocity derived from aim angle
    /// (degrees) and charge power
    pub fn launch(x: f32, y: f32, angle_deg: f32, power: u32) -> Self {
        let (vel_x, vel_y) = launch_velocity(angle_deg, power);
        Self { x, y, vel_x, vel_y }
    }

    /// Advance one simulation tick: gravity accelerates the velocity,
    /// then the position integrates the velocity
    pub fn advance(&mut self, gravity: f32) {
        self.vel_y += gravity;
        self.x += self.vel_x;
        self.y += self.vel_y;
    }

    /// True once the arrow has left the playfield. The top edge is open:
    /// an arrow above the field falls back in
    pub fn is_off_field(&self, width: f32, height: f32) -> bool {
        self.x < 0.0 || self.x > width || self.y > height
    }
}

/// Velocity components for a launch. Screen y grows downward, so an
/// upward shot gets a negative y component
pub fn launch_velocity(angle_deg: f32, power: u32) -> (f32, f32) {
    let radians = angle_deg.to_radians();
    let speed = power as f32 / POWER_SCALE;
    (radians.cos() * speed, -radians.sin() * speed)
}

impl From<&ArrowState> for Arrow {
    fn from(wire: &ArrowState) -> Self {
        Self {
            x: wire.x,
            y: wire.y,
            vel_x: wire.velocity.x,
            vel_y: wire.velocity.y,
        }
    }
}

impl From<&Arrow> for ArrowState {
    fn from(arrow: &Arrow) -> Self {
        Self {
            x: arrow.x,
            y: arrow.y,
            velocity: Velocity {
                x: arrow.vel_x,
                y: arrow.vel_y,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GRAVITY;

    /// Closed-form projectile motion after n ticks, given that the
    /// velocity is updated before the position each tick:
    /// x(n) = x0 + n*vx0, y(n) = y0 + n*vy0 + g*n*(n+1)/2
    fn closed_form(x0: f32, y0: f32, vx0: f32, vy0: f32, g: f32, n: u32) -> (f32, f32) {
        let n_f = n as f32;
        (
            x0 + n_f * vx0,
            y0 + n_f * vy0 + g * n_f * (n_f + 1.0) / 2.0,
        )
    }

    #[test]
    fn advance_matches_closed_form() {
        for &(g, n) in &[(0.0_f32, 7_u32), (0.3, 10), (0.5, 25), (1.0, 60)] {
            let mut arrow = Arrow {
                x: 12.0,
                y: 300.0,
                vel_x: 4.5,
                vel_y: -6.0,
            };
            for _ in 0..n {
                arrow.advance(g);
            }
            let (x, y) = closed_form(12.0, 300.0, 4.5, -6.0, g, n);
            assert!((arrow.x - x).abs() < 1e-2, "x diverged for g={g} n={n}");
            assert!((arrow.y - y).abs() < 1e-2, "y diverged for g={g} n={n}");
        }
    }

    #[test]
    fn full_power_launch_at_45_degrees() {
        // Launch at angle=45, power=100, scale=10, gravity=0.3 from
        // (50, 540); after 10 ticks the position matches the closed form
        let mut arrow = Arrow::launch(50.0, 540.0, 45.0, 100);
        let speed = 100.0 / POWER_SCALE;
        let expected_vx = 45.0_f32.to_radians().cos() * speed;
        let expected_vy = -45.0_f32.to_radians().sin() * speed;
        assert!((arrow.vel_x - expected_vx).abs() < 1e-5);
        assert!((arrow.vel_y - expected_vy).abs() < 1e-5);

        for _ in 0..10 {
            arrow.advance(GRAVITY);
        }
        let (x, y) = closed_form(50.0, 540.0, expected_vx, expected_vy, GRAVITY, 10);
        assert!((arrow.x - x).abs() < 1e-3);
        assert!((arrow.y - y).abs() < 1e-3);
    }

    #[test]
    fn upward_shots_leave_velocity_negative() {
        let (vx, vy) = launch_velocity(90.0, 50);
        assert!(vx.abs() < 1e-6);
        assert!(vy < 0.0);
    }

    #[test]
    fn off_field_ignores_top_edge() {
        let above = Arrow {
            x: 400.0,
            y: -50.0,
            vel_x: 0.0,
            vel_y: 0.0,
        };
        assert!(!above.is_off_field(800.0, 600.0));

        let left = Arrow {
            x: -1.0,
            y: 10.0,
            vel_x: 0.0,
            vel_y: 0.0,
        };
        assert!(left.is_off_field(800.0, 600.0));

        let below = Arrow {
            x: 400.0,
            y: 601.0,
            vel_x: 0.0,
            vel_y: 0.0,
        };
        assert!(below.is_off_field(800.0, 600.0));
    }

    #[test]
    fn wire_roundtrip_preserves_state() {
        let arrow = Arrow {
            x: 51.0,
            y: 530.5,
            vel_x: 7.07,
            vel_y: -7.07,
        };
        let wire = ArrowState::from(&arrow);
        assert_eq!(Arrow::from(&wire), arrow);
    }
}
