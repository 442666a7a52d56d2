//! Game simulation modules
//!
//! Pure, deterministic, tick-driven. The server never runs this code; each
//! client simulates the match and the server relays turn events verbatim.

pub mod collision;
pub mod mode;
pub mod physics;
pub mod session;
pub mod turn;

pub use mode::MatchMode;
pub use physics::Arrow;
pub use session::{GameSession, PlayerState, RemoteEvent, SessionEvent};
pub use turn::{MatchPhase, Side, TurnMachine};

/// Playfield dimensions in world units. The width keeps the archers
/// within a full-power shot's range (v²/g ≈ 333 units at 45°)
pub const FIELD_WIDTH: f32 = 400.0;
pub const FIELD_HEIGHT: f32 = 600.0;

/// Archer bounding box, anchored at its top-left corner
pub const PLAYER_WIDTH: f32 = 30.0;
pub const PLAYER_HEIGHT: f32 = 60.0;

/// Apple radius; practice targets use the same size
pub const APPLE_RADIUS: f32 = 15.0;

/// Gravity pulling on a live arrow, units per tick squared
pub const GRAVITY: f32 = 0.3;

/// Power gained per tick while the charge intent is held
pub const POWER_INCREASE_RATE: u32 = 2;
/// Charge power ceiling
pub const MAX_POWER: u32 = 100;

/// Degrees the aim moves per discrete up/down intent
pub const ANGLE_CHANGE_RATE: f32 = 2.0;
/// Aim angle clamp bounds in degrees
pub const MIN_ANGLE: f32 = 10.0;
pub const MAX_ANGLE: f32 = 170.0;

/// Divisor converting charge power into launch speed
pub const POWER_SCALE: f32 = 10.0;

/// Discrete intents the input adapter produces for one simulation tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickIntents {
    /// Charge intent is held this tick
    pub charge: bool,
    /// Raise the aim angle
    pub aim_up: bool,
    /// Lower the aim angle
    pub aim_down: bool,
    /// Release the held charge, firing the arrow
    pub release: bool,
}
