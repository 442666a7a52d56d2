//! Per-client match simulation
//!
//! Each client runs the full two-player simulation: one side is locally
//! controlled, the opposing side is driven by relayed events. Relayed
//! events land in an inbox and are applied at the start of the next tick,
//! so the tick pipeline is the only writer of simulation state.

use std::collections::VecDeque;

use tracing::debug;

use crate::ws::protocol::ArrowState;

use super::collision::{self, CollisionOutcome, PracticeTarget};
use super::mode::MatchMode;
use super::physics::Arrow;
use super::turn::{MatchPhase, Side, TurnMachine};
use super::{
    TickIntents, ANGLE_CHANGE_RATE, APPLE_RADIUS, FIELD_HEIGHT, FIELD_WIDTH, GRAVITY, MAX_ANGLE,
    MAX_POWER, MIN_ANGLE, PLAYER_HEIGHT, PLAYER_WIDTH, POWER_INCREASE_RATE,
};

/// Archer state, one per side
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Top-left corner of the bounding box
    pub x: f32,
    pub y: f32,
    /// Aim angle in degrees, clamped to [MIN_ANGLE, MAX_ANGLE]
    pub angle: f32,
    /// Charge power, clamped to [0, MAX_POWER]
    pub power: u32,
    /// Still carries the apple
    pub has_apple: bool,
    pub score: u32,
}

impl PlayerState {
    fn spawn(side: Side) -> Self {
        let (x, angle) = match side {
            Side::A => (50.0, 45.0),
            Side::B => (FIELD_WIDTH - 50.0, 135.0),
        };
        Self {
            x,
            y: FIELD_HEIGHT - PLAYER_HEIGHT,
            angle,
            power: 0,
            has_apple: true,
            score: 0,
        }
    }

    /// Center of the bounding box; arrows launch from here
    pub fn center(&self) -> (f32, f32) {
        (self.x + PLAYER_WIDTH / 2.0, self.y + PLAYER_HEIGHT / 2.0)
    }
}

/// Relayed network events, buffered until the next tick
#[derive(Debug, Clone)]
pub enum RemoteEvent {
    /// Pairing completed; side A opens the match
    Started { is_first_player: bool },
    /// The opponent released a shot
    OpponentShot { arrow: ArrowState },
    /// The opponent reports our apple was knocked off
    AppleLost,
    /// Authoritative result announcement
    MatchResult { winner: Side },
}

/// Events the session emits for the network layer to report upstream
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A local release spawned an arrow (report `shoot`)
    Shot { arrow: ArrowState },
    /// The local shot knocked the opponent's apple off (report `hit_apple`)
    AppleHit,
    /// The local shot struck the opponent's body (report `hit_player`)
    BodyHit,
    /// A practice target was struck; local bookkeeping only
    TargetHit { remaining: usize },
    /// The match reached its terminal state
    MatchOver { winner: Side },
}

/// The client-side match simulation
pub struct GameSession {
    mode: MatchMode,
    local: Side,
    players: [PlayerState; 2],
    turn: TurnMachine,
    arrow: Option<Arrow>,
    targets: Vec<PracticeTarget>,
    inbox: VecDeque<RemoteEvent>,
}

impl GameSession {
    /// Networked duel; waits for the pairing announcement
    pub fn duel() -> Self {
        Self {
            mode: MatchMode::Duel,
            local: Side::A,
            players: [PlayerState::spawn(Side::A), PlayerState::spawn(Side::B)],
            turn: TurnMachine::waiting(),
            arrow: None,
            targets: Vec::new(),
            inbox: VecDeque::new(),
        }
    }

    /// Solo practice; the local archer acts immediately against one
    /// static target
    pub fn practice() -> Self {
        Self {
            mode: MatchMode::Practice,
            local: Side::A,
            players: [PlayerState::spawn(Side::A), PlayerState::spawn(Side::B)],
            turn: TurnMachine::starting_with(Side::A),
            arrow: None,
            targets: vec![PracticeTarget {
                x: FIELD_WIDTH - 150.0,
                y: FIELD_HEIGHT - 100.0,
                radius: APPLE_RADIUS,
            }],
            inbox: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.turn.phase()
    }

    pub fn is_charging(&self) -> bool {
        self.turn.is_charging()
    }

    pub fn local_side(&self) -> Side {
        self.local
    }

    pub fn player(&self, side: Side) -> &PlayerState {
        &self.players[side.index()]
    }

    pub fn arrow(&self) -> Option<&Arrow> {
        self.arrow.as_ref()
    }

    pub fn targets(&self) -> &[PracticeTarget] {
        &self.targets
    }

    /// Buffer a relayed event; it takes effect at the start of the next
    /// tick
    pub fn queue_remote(&mut self, event: RemoteEvent) {
        self.inbox.push_back(event);
    }

    /// One simulation tick: drain the inbox, apply local intents, fly the
    /// arrow, resolve collisions. Returns the events to report upstream
    pub fn tick(&mut self, intents: &TickIntents) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.drain_inbox(&mut events);
        self.apply_intents(intents, &mut events);
        self.advance_arrow(&mut events);
        events
    }

    fn drain_inbox(&mut self, events: &mut Vec<SessionEvent>) {
        while let Some(event) = self.inbox.pop_front() {
            match event {
                RemoteEvent::Started { is_first_player } => {
                    self.local = if is_first_player { Side::A } else { Side::B };
                    self.turn.begin(Side::A);
                }
                RemoteEvent::OpponentShot { arrow } => {
                    let remote = self.local.opponent();
                    if self.turn.release(remote) {
                        self.arrow = Some(Arrow::from(&arrow));
                    } else {
                        debug!(?arrow, "Shot event outside the opponent's turn, dropped");
                    }
                }
                RemoteEvent::AppleLost => {
                    // Our own simulation of the relayed arrow usually
                    // reaches the same conclusion first; apply once
                    if self.players[self.local.index()].has_apple {
                        self.players[self.local.index()].has_apple = false;
                        self.players[self.local.opponent().index()].score += 1;
                    }
                }
                RemoteEvent::MatchResult { winner } => {
                    self.arrow = None;
                    self.turn.finish(winner);
                    events.push(SessionEvent::MatchOver { winner });
                }
            }
        }
    }

    fn apply_intents(&mut self, intents: &TickIntents, events: &mut Vec<SessionEvent>) {
        if self.turn.active_side() != Some(self.local) {
            return;
        }
        let side = self.local;

        {
            let player = &mut self.players[side.index()];
            if intents.aim_up {
                player.angle = (player.angle + ANGLE_CHANGE_RATE).min(MAX_ANGLE);
            }
            if intents.aim_down {
                player.angle = (player.angle - ANGLE_CHANGE_RATE).max(MIN_ANGLE);
            }
        }

        if intents.charge {
            self.turn.start_charging(side);
            let player = &mut self.players[side.index()];
            player.power = (player.power + POWER_INCREASE_RATE).min(MAX_POWER);
        }

        if intents.release && self.turn.is_charging() {
            let player = &self.players[side.index()];
            let (cx, cy) = player.center();
            let arrow = Arrow::launch(cx, cy, player.angle, player.power);
            self.players[side.index()].power = 0;
            self.turn.release(side);
            events.push(SessionEvent::Shot {
                arrow: ArrowState::from(&arrow),
            });
            self.arrow = Some(arrow);
        }
    }

    fn advance_arrow(&mut self, events: &mut Vec<SessionEvent>) {
        let Some(mut arrow) = self.arrow.take() else {
            return;
        };
        arrow.advance(GRAVITY);

        let shooter = match self.turn.phase() {
            MatchPhase::Resolving { shooter } => Some(shooter),
            _ => None,
        };

        if let Some(shooter) = shooter {
            // Duel checks run against the shooter's designated target
            // (the non-active player) every tick, apple before body
            if self.mode.has_opponent_entity() {
                let target_side = shooter.opponent();
                let target = &self.players[target_side.index()];
                match collision::check_duel_target(&arrow, target.x, target.y, target.has_apple) {
                    CollisionOutcome::AppleHit => {
                        self.players[target_side.index()].has_apple = false;
                        self.players[shooter.index()].score += 1;
                        if shooter == self.local {
                            events.push(SessionEvent::AppleHit);
                        }
                        self.resolve(shooter, false, events);
                        return;
                    }
                    CollisionOutcome::BodyHit => {
                        if shooter == self.local {
                            events.push(SessionEvent::BodyHit);
                        }
                        self.resolve(shooter, true, events);
                        return;
                    }
                    CollisionOutcome::Miss => {}
                }
            }

            if self.mode.has_practice_targets() {
                let struck = collision::strike_targets(&arrow, &mut self.targets);
                if struck > 0 {
                    // The arrow keeps flying; one shot can clear a run of
                    // targets
                    events.push(SessionEvent::TargetHit {
                        remaining: self.targets.len(),
                    });
                }
            }
        }

        // Off-field cleanup runs after the collision checks
        if arrow.is_off_field(FIELD_WIDTH, FIELD_HEIGHT) {
            if let Some(shooter) = shooter {
                self.resolve(shooter, false, events);
            }
            return;
        }

        self.arrow = Some(arrow);
    }

    /// The live arrow is gone: flip the turn or end the match
    fn resolve(&mut self, shooter: Side, hit_body: bool, events: &mut Vec<SessionEvent>) {
        let next = self.mode.next_side(shooter);
        self.turn.arrow_resolved(hit_body, next);
        if hit_body {
            events.push(SessionEvent::MatchOver { winner: shooter });
        } else {
            // Entering a turn resets the charge state
            self.players[next.index()].power = 0;
        }
    }
}
