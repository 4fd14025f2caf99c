//! Zone transition tests across several players.
//!
//! Ownership and control interplay, library ordering, and the cleanup that
//! happens when a permanent leaves the battlefield.

use commander_table::cards::{Card, Deck};
use commander_table::core::{EngineConfig, GameBuilder, GameState, InstanceId, PlayerId};
use commander_table::zones::{LibraryEnd, LibraryPlacement, Zone};
use commander_table::{EngineError, TokenSpec};

const ALICE: PlayerId = PlayerId::new(0);
const BOB: PlayerId = PlayerId::new(1);
const CAROL: PlayerId = PlayerId::new(2);
const DAVE: PlayerId = PlayerId::new(3);

fn deck(owner: &str) -> Deck {
    Deck::new(
        owner,
        Card::new(format!("{owner}'s Commander"), "Legendary Creature — Human"),
        (0..8).map(|i| Card::new(format!("{owner} {i}"), "Creature — Bear").with_power_toughness("2", "2")),
    )
}

/// Four players, unshuffled: each library top is "<owner> 7".
fn four_players() -> GameState {
    GameBuilder::new(EngineConfig::default().with_deck_size(8))
        .shuffle_libraries(false)
        .player("Alice", deck("Alice"))
        .player("Bob", deck("Bob"))
        .player("Carol", deck("Carol"))
        .player("Dave", deck("Dave"))
        .build()
        .unwrap()
}

fn top(state: &GameState, player: PlayerId) -> InstanceId {
    state.peek_library(player, 1)[0].id
}

fn library_names(state: &GameState, player: PlayerId) -> Vec<String> {
    state
        .peek_library(player, usize::MAX)
        .iter()
        .map(|c| c.card.name.clone())
        .collect()
}

/// Test that a stolen permanent returns to its owner when it dies.
#[test]
fn test_stolen_card_goes_to_owners_graveyard() {
    let state = four_players();
    let bear = top(&state, ALICE);
    let state = state.move_card(bear, Zone::Battlefield).give_control(bear, CAROL);

    assert!(state.instance(bear).unwrap().is_stolen());
    assert_eq!(state.battlefield_of(CAROL).len(), 1);
    assert!(state.battlefield_of(ALICE).is_empty());

    let state = state.move_card(bear, Zone::Graveyard);
    let card = state.instance(bear).unwrap();
    assert_eq!(card.controller, ALICE);
    assert!(!card.is_stolen());
    assert_eq!(state.card_count(ALICE, Zone::Graveyard), 1);
    assert_eq!(state.card_count(CAROL, Zone::Graveyard), 0);
}

/// Test that give_control pulls a card from hand onto the battlefield.
#[test]
fn test_give_control_from_hand() {
    let state = four_players().draw_card(DAVE);
    let card = state.cards_in_zone(DAVE, Zone::Hand)[0].id;

    let state = state.give_control(card, BOB);

    let instance = state.instance(card).unwrap();
    assert_eq!(instance.zone, Zone::Battlefield);
    assert_eq!(instance.controller, BOB);
    assert_eq!(instance.owner(), DAVE);
}

/// Test that a card put into another player's library lands in its owner's.
#[test]
fn test_library_returns_to_owner() {
    let state = four_players();
    let bear = top(&state, BOB);
    let state = state
        .move_card(bear, Zone::Battlefield)
        .give_control(bear, ALICE)
        .move_to_library(bear, LibraryPlacement::FromTop(3));

    assert_eq!(state.card_count(BOB, Zone::Library), 8);
    assert_eq!(state.card_count(ALICE, Zone::Library), 8);
    assert_eq!(library_names(&state, BOB)[2], "Bob 7");
    assert_eq!(state.instance(bear).unwrap().controller, BOB);
}

/// Test placements at both ends and in the middle.
#[test]
fn test_library_placements() {
    let state = four_players();
    let commander = state.cards_in_zone(ALICE, Zone::CommandZone)[0].id;

    let bottom = state.move_to_library(commander, LibraryPlacement::Bottom);
    assert_eq!(library_names(&bottom, ALICE).last().unwrap(), "Alice's Commander");

    let second = state.move_to_library(commander, LibraryPlacement::FromBottom(2));
    let names = library_names(&second, ALICE);
    assert_eq!(names[names.len() - 2], "Alice's Commander");

    let clamped = state.move_to_library(commander, LibraryPlacement::FromTop(50));
    assert_eq!(library_names(&clamped, ALICE).last().unwrap(), "Alice's Commander");
}

/// Test that top-then-draw hands back the same card.
#[test]
fn test_top_then_draw() {
    let state = four_players().mill(CAROL, 2);
    let milled = state.cards_in_zone(CAROL, Zone::Graveyard)[0].id;

    let state = state.move_to_library_top(milled).draw_card(CAROL);

    assert_eq!(state.instance(milled).unwrap().zone, Zone::Hand);
    assert_eq!(state.card_count(CAROL, Zone::Library), 6);
}

/// Test that a partial shuffle leaves the rest of the library in place.
#[test]
fn test_shuffle_bottom_keeps_top() {
    let state = four_players();
    let before = library_names(&state, DAVE);

    let state = state.shuffle_subset(DAVE, 4, LibraryEnd::Bottom);
    let after = library_names(&state, DAVE);

    assert_eq!(before[..4], after[..4]);
    let mut shuffled = after[4..].to_vec();
    shuffled.sort();
    let mut original = before[4..].to_vec();
    original.sort();
    assert_eq!(shuffled, original);
}

/// Test the cleanup when an enchanted permanent leaves the battlefield.
#[test]
fn test_leaving_battlefield_detaches_dependants() {
    let state = four_players().draw_cards(ALICE, 2);
    let hand: Vec<InstanceId> = state.cards_in_zone(ALICE, Zone::Hand).iter().map(|c| c.id).collect();
    let (host, aura) = (hand[0], hand[1]);

    let state = state
        .move_card(host, Zone::Battlefield)
        .move_card(aura, Zone::Battlefield)
        .attach(aura, host)
        .tap(host)
        .set_modifiers(host, 3, 3)
        .add_counter(host, "+1/+1", 2)
        .unwrap();
    assert_eq!(state.instance(host).unwrap().effective_power(), Some(5));

    let state = state.move_card(host, Zone::Exile);

    let host = state.instance(host).unwrap();
    assert!(!host.tapped);
    assert!(host.counters.is_empty());
    assert_eq!(host.effective_power(), Some(2));
    assert_eq!(state.instance(aura).unwrap().attached_to, None);
    assert_eq!(state.instance(aura).unwrap().zone, Zone::Battlefield);
}

/// Test untap_all only touches the player's own untappable permanents.
#[test]
fn test_untap_all() {
    let board = four_players()
        .create_tokens(ALICE, TokenSpec::new("Thopter", "Token Artifact Creature"), 3)
        .create_tokens(BOB, TokenSpec::new("Zombie", "Token Creature"), 1);
    let ids: Vec<InstanceId> = board.battlefield_of(ALICE).iter().map(|c| c.id).collect();
    let zombie = board.battlefield_of(BOB)[0].id;

    let state = ids
        .iter()
        .fold(board.clone(), |s, &id| s.tap(id))
        .tap(zombie)
        .set_doesnt_untap(ids[0], true)
        .untap_all(ALICE);

    assert!(state.instance(ids[0]).unwrap().tapped);
    assert!(!state.instance(ids[1]).unwrap().tapped);
    assert!(!state.instance(ids[2]).unwrap().tapped);
    assert!(state.instance(zombie).unwrap().tapped);
}

/// Test that malformed input is rejected before anything changes.
#[test]
fn test_rejections() {
    let state = four_players();
    let commander = state.cards_in_zone(BOB, Zone::CommandZone)[0].id;

    assert_eq!(
        state.add_counter(commander, "   ", 1).err(),
        Some(EngineError::BlankCounterType)
    );
    assert_eq!(
        state.remove_counter(commander, "loyalty", 0).err(),
        Some(EngineError::NonPositiveAmount(0))
    );
    assert_eq!(
        state.update_commander_damage(ALICE, commander, -1).err(),
        Some(EngineError::NegativeDamage(-1))
    );
    assert_eq!(
        state.add_counter(InstanceId(9999), "", 1).err(),
        Some(EngineError::BlankCounterType)
    );
}

/// Test that stale ids never disturb the table.
#[test]
fn test_stale_ids_are_ignored() {
    let state = four_players();
    let ghost = InstanceId(9999);
    let nobody = PlayerId::new(7);

    let next = state
        .move_card(ghost, Zone::Hand)
        .tap(ghost)
        .give_control(top(&state, ALICE), nobody)
        .draw_card(nobody)
        .mill(nobody, 3)
        .update_life(nobody, 0)
        .remove_instance(ghost)
        .add_counter(ghost, "charge", 1)
        .unwrap();

    assert_eq!(next.instances(), state.instances());
    assert_eq!(next.players(), state.players());
}

/// Test that a departed player's cards stay behind.
#[test]
fn test_remove_player() {
    let state = four_players().pass_turn().pass_turn().pass_turn();
    assert_eq!(state.active_player().map(|p| p.id), Some(DAVE));

    let state = state.remove_player(DAVE);

    assert_eq!(state.player_count(), 3);
    assert_eq!(state.active_player().map(|p| p.id), Some(CAROL));
    assert_eq!(state.card_count(DAVE, Zone::Library), 8);
    assert_eq!(state.advance_phase().phase, commander_table::Phase::Upkeep);
}
