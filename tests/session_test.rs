//! Session tests: identify, apply, persistence and degraded play

mod common;

use arcade_progress::domain::{AchievementId, CompanionStage, ConsumableKind, ItemKind};
use arcade_progress::games::MiniGame;
use arcade_progress::session::{GameEvent, Identified, SessionController, SessionError};
use arcade_progress::store::{ProfileStore, SqliteProfileStore};
use common::FlakyStore;
use tempfile::tempdir;

fn sqlite_session(path: &std::path::Path) -> SessionController {
    SessionController::new(Box::new(SqliteProfileStore::open(path).unwrap()))
}

#[test]
fn test_identify_creates_then_loads() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("profiles.db");

    let mut first = sqlite_session(&db);
    assert_eq!(first.identify("Nadia").unwrap().status, Identified::Created);
    first.apply(GameEvent::GameWon(MiniGame::GuessNumber)).unwrap();
    first.apply(GameEvent::GameWon(MiniGame::Hangman)).unwrap();
    drop(first);

    let mut second = sqlite_session(&db);
    assert_eq!(second.identify("NADIA").unwrap().status, Identified::Loaded);
    let profile = second.snapshot().unwrap();
    assert_eq!(profile.name, "Nadia");
    assert_eq!(profile.points, 8);
    assert!(profile.has_achievement(AchievementId::WordMaster));
    // counters are per session
    assert_eq!(second.tally().unwrap().total_wins, 0);
}

#[test]
fn test_switching_players_never_merges() {
    let dir = tempdir().unwrap();
    let mut session = sqlite_session(&dir.path().join("p.db"));

    session.identify("Ann").unwrap();
    session.apply(GameEvent::award(30, "seed")).unwrap();

    session.identify("Ben").unwrap();
    assert_eq!(session.snapshot().unwrap().points, 0);
    assert_eq!(session.tally().unwrap().consecutive_wins, 0);
    session.apply(GameEvent::award(2, "rps")).unwrap();

    assert_eq!(session.identify("ann").unwrap().status, Identified::Loaded);
    assert_eq!(session.snapshot().unwrap().points, 30);

    let names: Vec<String> = session
        .leaderboard()
        .top(10)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Ann", "Ben"]);
}

#[test]
fn test_apply_survives_store_outage() {
    let (store, handle) = FlakyStore::new();
    let mut session = SessionController::new(Box::new(store));
    session.identify("Zoe").unwrap();

    handle.set_down(true);
    let first = session.apply(GameEvent::award(5, "guess")).unwrap();
    assert!(!first.saved);
    assert!(first.warning.is_some());
    assert_eq!(first.profile.points, 5);
    assert!(session.is_degraded());

    let second = session.apply(GameEvent::award(5, "guess")).unwrap();
    assert!(!second.saved);
    assert!(second.warning.is_none(), "warned only once");
    assert_eq!(second.profile.points, 10);
    assert_eq!(handle.inner.find("zoe").unwrap().unwrap().points, 0);

    handle.set_down(false);
    let third = session.apply(GameEvent::award(2, "rps")).unwrap();
    assert!(third.saved);
    assert!(!session.is_degraded());
    // the recovered save carries everything played offline
    assert_eq!(handle.inner.find("zoe").unwrap().unwrap().points, 12);
}

#[test]
fn test_identify_while_store_down() {
    let (store, handle) = FlakyStore::new();
    handle.inner.update(&common::profile("Zoe", 40)).unwrap();
    handle.set_down(true);

    let mut session = SessionController::new(Box::new(store));
    let outcome = session.identify("Zoe").unwrap();
    assert_eq!(outcome.status, Identified::Created);
    assert!(outcome.warning.is_some());
    assert_eq!(session.snapshot().unwrap().points, 0);

    let played = session.apply(GameEvent::award(3, "hangman")).unwrap();
    assert!(!played.saved);
    assert!(played.warning.is_none());
}

#[test]
fn test_stored_row_survives_identify_during_outage() {
    let (store, handle) = FlakyStore::new();
    let mut saved = common::profile("Zoe", 500);
    saved.has_permanent_bonus = true;
    handle.inner.update(&saved).unwrap();

    handle.set_down(true);
    let mut session = SessionController::new(Box::new(store));
    session.identify("Zoe").unwrap();
    let offline = session.apply(GameEvent::award(3, "hangman")).unwrap();
    assert!(!offline.saved);

    handle.set_down(false);
    let back = session.apply(GameEvent::award(2, "rps")).unwrap();
    assert!(back.saved);
    assert!(back.warning.is_some(), "player is told the offline points were dropped");
    assert!(!session.is_degraded());

    // saved profile plus this award and the hat bonus
    let stored = handle.inner.find("zoe").unwrap().unwrap();
    assert_eq!(stored.points, 503);
    assert!(stored.has_permanent_bonus);
    assert_eq!(session.snapshot().unwrap(), &stored);
}

#[test]
fn test_unknown_player_saved_once_store_returns() {
    let (store, handle) = FlakyStore::new();
    handle.set_down(true);
    let mut session = SessionController::new(Box::new(store));
    session.identify("Newt").unwrap();

    handle.set_down(false);
    let played = session.apply(GameEvent::award(4, "guess")).unwrap();
    assert!(played.saved);
    assert!(played.warning.is_none());
    assert_eq!(handle.inner.find("newt").unwrap().unwrap().points, 4);
}

#[test]
fn test_failed_event_keeps_state() {
    let (store, _handle) = FlakyStore::new();
    let mut session = SessionController::new(Box::new(store));
    session.identify("Ivo").unwrap();

    assert!(matches!(
        session.apply(GameEvent::UseCompanionBoost),
        Err(SessionError::Progression(_))
    ));
    assert!(matches!(
        session.purchase(ItemKind::PermanentBonus),
        Err(SessionError::Shop(_))
    ));
    assert_eq!(session.snapshot().unwrap().points, 0);
}

#[test]
fn test_companion_journey() {
    let (store, handle) = FlakyStore::new();
    let mut session = SessionController::new(Box::new(store));
    session.identify("Pia").unwrap();

    session.apply(GameEvent::award(40, "seed")).unwrap();
    session.purchase(ItemKind::CompanionEgg).unwrap();
    session.purchase(ItemKind::PermanentBonus).unwrap();
    session
        .purchase(ItemKind::Consumable(ConsumableKind::CompanionBoost))
        .unwrap();

    // boost: 10 XP, egg -> juvenile
    let boosted = session.apply(GameEvent::UseCompanionBoost).unwrap();
    assert_eq!(boosted.profile.companion_stage, CompanionStage::Juvenile);
    assert_eq!(boosted.profile.consumables.companion_boost, 0);

    // code breaker: 8 base + 1 hat; XP gets the base only
    let won = session.apply(GameEvent::GameWon(MiniGame::CodeBreaker)).unwrap();
    assert_eq!(won.effects.points_granted, 9);
    assert_eq!(won.profile.companion_xp, 18);

    let stored = handle.inner.find("pia").unwrap().unwrap();
    assert_eq!(stored, won.profile);
    assert_eq!(
        stored.inventory_log,
        vec!["Companion Egg", "Magic Hat", "Companion Boost"]
    );
}
