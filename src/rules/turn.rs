//! Turn and phase sequencing.
//!
//! Phases cycle in a fixed order. Advancing past `Cleanup` wraps to `Untap`
//! of the next turn and hands the turn to the next seat. The machine never
//! terminates; whether the game is over is `GameState::check_game_end`'s
//! call.
//!
//! Reaching `Untap` does not untap anything. Callers apply `untap_all` for
//! the active player when they see the phase become `Untap`.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId};
use crate::zones::Zone;

/// A step of the turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Untap,
    Upkeep,
    Draw,
    Main1,
    CombatBegin,
    CombatDeclareAttackers,
    CombatDeclareBlockers,
    CombatDamage,
    CombatEnd,
    Main2,
    End,
    Cleanup,
}

impl Phase {
    /// Every phase in turn order.
    pub const ALL: [Phase; 12] = [
        Phase::Untap,
        Phase::Upkeep,
        Phase::Draw,
        Phase::Main1,
        Phase::CombatBegin,
        Phase::CombatDeclareAttackers,
        Phase::CombatDeclareBlockers,
        Phase::CombatDamage,
        Phase::CombatEnd,
        Phase::Main2,
        Phase::End,
        Phase::Cleanup,
    ];

    /// The following phase. `Cleanup` wraps to `Untap`.
    #[must_use]
    pub const fn next(self) -> Phase {
        match self {
            Phase::Untap => Phase::Upkeep,
            Phase::Upkeep => Phase::Draw,
            Phase::Draw => Phase::Main1,
            Phase::Main1 => Phase::CombatBegin,
            Phase::CombatBegin => Phase::CombatDeclareAttackers,
            Phase::CombatDeclareAttackers => Phase::CombatDeclareBlockers,
            Phase::CombatDeclareBlockers => Phase::CombatDamage,
            Phase::CombatDamage => Phase::CombatEnd,
            Phase::CombatEnd => Phase::Main2,
            Phase::Main2 => Phase::End,
            Phase::End => Phase::Cleanup,
            Phase::Cleanup => Phase::Untap,
        }
    }

    #[must_use]
    pub const fn is_combat(self) -> bool {
        matches!(
            self,
            Phase::CombatBegin
                | Phase::CombatDeclareAttackers
                | Phase::CombatDeclareBlockers
                | Phase::CombatDamage
                | Phase::CombatEnd
        )
    }
}

impl GameState {
    /// Move to the next phase. Wrapping to `Untap` starts the next turn for
    /// the next seat.
    #[must_use]
    pub fn advance_phase(&self) -> GameState {
        let mut next = self.clone();
        next.phase = self.phase.next();
        if next.phase == Phase::Untap {
            next.turn_number += 1;
            let seats = self.player_count().max(1);
            next.set_active_player_index((self.active_player_index() + 1) % seats);
            tracing::debug!(
                turn = next.turn_number,
                active = next.active_player_index(),
                "turn passed"
            );
        } else {
            tracing::debug!(phase = ?next.phase, "phase advanced");
        }
        next
    }

    /// Skip the rest of the current turn, stopping at the next `Untap`.
    #[must_use]
    pub fn pass_turn(&self) -> GameState {
        let mut next = self.advance_phase();
        while next.phase != Phase::Untap {
            next = next.advance_phase();
        }
        next
    }

    /// Untap every battlefield instance a player controls, except those
    /// flagged `doesnt_untap`. No other flag changes.
    #[must_use]
    pub fn untap_all(&self, player: PlayerId) -> GameState {
        let targets: Vec<usize> = self
            .instances()
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                c.zone == Zone::Battlefield && c.controller == player && c.tapped && !c.doesnt_untap
            })
            .map(|(i, _)| i)
            .collect();

        let mut next = self.clone();
        for &index in &targets {
            if let Some(instance) = next.instances_mut().get_mut(index) {
                instance.tapped = false;
            }
        }
        tracing::debug!(player = %player, untapped = targets.len(), "untap step");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_order() {
        for window in Phase::ALL.windows(2) {
            assert_eq!(window[0].next(), window[1]);
        }
        assert_eq!(Phase::Cleanup.next(), Phase::Untap);
    }

    #[test]
    fn test_twelve_steps_is_identity() {
        for start in Phase::ALL {
            let mut phase = start;
            for _ in 0..12 {
                phase = phase.next();
            }
            assert_eq!(phase, start);
        }
    }

    #[test]
    fn test_combat_phases() {
        let combat: Vec<_> = Phase::ALL.into_iter().filter(|p| p.is_combat()).collect();
        assert_eq!(combat.len(), 5);
        assert!(!Phase::Main1.is_combat());
    }

    #[test]
    fn test_default_is_untap() {
        assert_eq!(Phase::default(), Phase::Untap);
    }
}
