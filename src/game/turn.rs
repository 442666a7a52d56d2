//! Turn ownership state machine

/// The two sides of a match. The first client dequeued by the server is
/// side A and takes the opening turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

/// Match phase. Exactly one holds at any instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Queued but not yet paired; no arrow can exist here
    WaitingForOpponent,
    /// The named side is aiming and charging
    Turn(Side),
    /// An arrow is in flight; nobody owns a turn until it resolves
    Resolving { shooter: Side },
    /// Terminal: a body hit decided the match
    Over { winner: Side },
}

/// Owns whose turn it is and the charging sub-state. Transitions are
/// driven by input intents, the arrow lifecycle, and collision outcomes.
///
/// Release enters `Resolving` and the turn flips only once the arrow's
/// outcome is known, so "my turn" windows never overlap between sides.
#[derive(Debug, Clone)]
pub struct TurnMachine {
    phase: MatchPhase,
    charging: bool,
}

impl TurnMachine {
    /// Networked duel: wait for the pairing announcement
    pub fn waiting() -> Self {
        Self {
            phase: MatchPhase::WaitingForOpponent,
            charging: false,
        }
    }

    /// Local match: the given side acts immediately
    pub fn starting_with(first: Side) -> Self {
        Self {
            phase: MatchPhase::Turn(first),
            charging: false,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Charging is a sub-state of an active turn only
    pub fn is_charging(&self) -> bool {
        self.charging
    }

    pub fn active_side(&self) -> Option<Side> {
        match self.phase {
            MatchPhase::Turn(side) => Some(side),
            _ => None,
        }
    }

    /// Leave the waiting room: the first player takes the opening turn
    pub fn begin(&mut self, first: Side) {
        if self.phase == MatchPhase::WaitingForOpponent {
            self.phase = MatchPhase::Turn(first);
            self.charging = false;
        }
    }

    /// The active side starts holding the charge intent
    pub fn start_charging(&mut self, side: Side) {
        if self.phase == MatchPhase::Turn(side) {
            self.charging = true;
        }
    }

    /// A shot left the bow: the match resolves it before anyone owns a
    /// turn again. Returns false when `side` is not the active side
    pub fn release(&mut self, side: Side) -> bool {
        if self.phase == MatchPhase::Turn(side) {
            self.charging = false;
            self.phase = MatchPhase::Resolving { shooter: side };
            true
        } else {
            false
        }
    }

    /// The live arrow died. A body hit ends the match in the shooter's
    /// favor; otherwise `next` takes the turn
    pub fn arrow_resolved(&mut self, hit_body: bool, next: Side) {
        if let MatchPhase::Resolving { shooter } = self.phase {
            self.phase = if hit_body {
                MatchPhase::Over { winner: shooter }
            } else {
                MatchPhase::Turn(next)
            };
            self.charging = false;
        }
    }

    /// The server announced the result; terminal regardless of where the
    /// local simulation was
    pub fn finish(&mut self, winner: Side) {
        self.phase = MatchPhase::Over { winner };
        self.charging = false;
    }
}
