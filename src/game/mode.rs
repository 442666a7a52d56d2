//! Match mode capability set

use super::turn::Side;

/// What a match contains. Selected once at session creation; the
/// capability methods replace scattered single-player conditionals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Two archers over the network; a body hit ends the match
    Duel,
    /// Solo practice against static targets
    Practice,
}

impl MatchMode {
    /// Whether an opposing archer (body + apple) exists to hit
    pub fn has_opponent_entity(self) -> bool {
        matches!(self, MatchMode::Duel)
    }

    /// Whether static practice targets are seeded and checked
    pub fn has_practice_targets(self) -> bool {
        matches!(self, MatchMode::Practice)
    }

    /// Who acts after `shooter`'s arrow resolves without ending the match
    pub fn next_side(self, shooter: Side) -> Side {
        if self.has_opponent_entity() {
            shooter.opponent()
        } else {
            shooter
        }
    }
}
