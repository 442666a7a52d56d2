//! Collision detection and outcome classification

use super::physics::Arrow;
use super::{APPLE_RADIUS, PLAYER_HEIGHT, PLAYER_WIDTH};

/// Outcome of checking the arrow against the designated duel target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    Miss,
    /// The target's apple was knocked off; the arrow is consumed
    AppleHit,
    /// The target's body was struck; the match ends, the arrow is consumed
    BodyHit,
}

/// Apple anchor point for an archer box anchored at (box_x, box_y)
pub fn apple_center(box_x: f32, box_y: f32) -> (f32, f32) {
    (box_x + PLAYER_WIDTH / 2.0, box_y - APPLE_RADIUS)
}

/// Strict circular overlap between a point and a circle
fn point_in_circle(px: f32, py: f32, cx: f32, cy: f32, radius: f32) -> bool {
    let dx = px - cx;
    let dy = py - cy;
    dx * dx + dy * dy < radius * radius
}

/// Classify the arrow against the opposing archer's box. The apple check
/// runs first; a single tick can never resolve both outcomes
pub fn check_duel_target(
    arrow: &Arrow,
    target_x: f32,
    target_y: f32,
    target_has_apple: bool,
) -> CollisionOutcome {
    if target_has_apple {
        let (ax, ay) = apple_center(target_x, target_y);
        if point_in_circle(arrow.x, arrow.y, ax, ay, APPLE_RADIUS) {
            return CollisionOutcome::AppleHit;
        }
    }

    // Strictly inside the box counts; grazing an edge does not
    if arrow.x > target_x
        && arrow.x < target_x + PLAYER_WIDTH
        && arrow.y > target_y
        && arrow.y < target_y + PLAYER_HEIGHT
    {
        return CollisionOutcome::BodyHit;
    }

    CollisionOutcome::Miss
}

/// Static practice target
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeTarget {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Remove every live target the arrow overlaps; returns how many were
/// struck. Practice hits do not consume the arrow, so one shot can clear
/// several targets on its way down
pub fn strike_targets(arrow: &Arrow, targets: &mut Vec<PracticeTarget>) -> usize {
    let before = targets.len();
    targets.retain(|t| !point_in_circle(arrow.x, arrow.y, t.x, t.y, t.radius));
    before - targets.len()
}
