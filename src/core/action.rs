//! Intents: requests a client sends to the engine.
//!
//! Each `Intent` names one `GameState` operation and its arguments. A client
//! sends intents one at a time; `GameState::apply` returns the next state or
//! rejects malformed input. Intents are plain data and serialize, so a
//! client can queue, log, or replay them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::InstanceId;
use super::player::PlayerId;
use crate::cards::TokenSpec;
use crate::layout::Point;
use crate::zones::{LibraryEnd, LibraryPlacement, Zone};

/// A single request against the game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    MoveCard { instance: InstanceId, zone: Zone },
    DrawCard { player: PlayerId },
    DrawCards { player: PlayerId, count: usize },
    ShuffleLibrary { player: PlayerId },
    ShuffleSubset { player: PlayerId, count: usize, end: LibraryEnd },
    MoveToLibrary { instance: InstanceId, placement: LibraryPlacement },
    Mill { player: PlayerId, count: usize },
    AddCounter { instance: InstanceId, kind: String, amount: i64 },
    RemoveCounter { instance: InstanceId, kind: String, amount: i64 },
    Tap { instance: InstanceId },
    Untap { instance: InstanceId },
    Flip { instance: InstanceId },
    SetFaceDown { instance: InstanceId, face_down: bool },
    SetDoesntUntap { instance: InstanceId, doesnt_untap: bool },
    SetModifiers { instance: InstanceId, power: i32, toughness: i32 },
    SetAnnotation { instance: InstanceId, annotation: Option<String> },
    Attach { instance: InstanceId, host: InstanceId },
    Detach { instance: InstanceId },
    UpdateLife { player: PlayerId, life: i64 },
    UpdateCommanderDamage { player: PlayerId, source: InstanceId, damage: i64 },
    GiveControl { instance: InstanceId, controller: PlayerId },
    CreateTokens { player: PlayerId, spec: TokenSpec, count: usize },
    RemoveInstance { instance: InstanceId },
    RemovePlayer { player: PlayerId },
    AdvancePhase,
    PassTurn,
    UntapAll { player: PlayerId },
    Reposition {
        player: PlayerId,
        instances: SmallVec<[InstanceId; 4]>,
        drop: Point,
        columns: usize,
    },
}

impl Intent {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Intent::MoveCard { .. } => "move_card",
            Intent::DrawCard { .. } => "draw_card",
            Intent::DrawCards { .. } => "draw_cards",
            Intent::ShuffleLibrary { .. } => "shuffle_library",
            Intent::ShuffleSubset { .. } => "shuffle_subset",
            Intent::MoveToLibrary { .. } => "move_to_library",
            Intent::Mill { .. } => "mill",
            Intent::AddCounter { .. } => "add_counter",
            Intent::RemoveCounter { .. } => "remove_counter",
            Intent::Tap { .. } => "tap",
            Intent::Untap { .. } => "untap",
            Intent::Flip { .. } => "flip",
            Intent::SetFaceDown { .. } => "set_face_down",
            Intent::SetDoesntUntap { .. } => "set_doesnt_untap",
            Intent::SetModifiers { .. } => "set_modifiers",
            Intent::SetAnnotation { .. } => "set_annotation",
            Intent::Attach { .. } => "attach",
            Intent::Detach { .. } => "detach",
            Intent::UpdateLife { .. } => "update_life",
            Intent::UpdateCommanderDamage { .. } => "update_commander_damage",
            Intent::GiveControl { .. } => "give_control",
            Intent::CreateTokens { .. } => "create_tokens",
            Intent::RemoveInstance { .. } => "remove_instance",
            Intent::RemovePlayer { .. } => "remove_player",
            Intent::AdvancePhase => "advance_phase",
            Intent::PassTurn => "pass_turn",
            Intent::UntapAll { .. } => "untap_all",
            Intent::Reposition { .. } => "reposition",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_name() {
        let intent = Intent::Tap { instance: InstanceId(4) };
        assert_eq!(intent.name(), "tap");
        assert_eq!(Intent::PassTurn.name(), "pass_turn");
    }

    #[test]
    fn test_intent_serialization() {
        let intent = Intent::Reposition {
            player: PlayerId::new(1),
            instances: SmallVec::from_slice(&[InstanceId(3), InstanceId(5)]),
            drop: Point::new(12.0, 40.0),
            columns: 6,
        };

        let json = serde_json::to_string(&intent).unwrap();
        let deserialized: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(intent, deserialized);
    }
}
