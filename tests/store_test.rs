//! Store contract tests, run against every backend

mod common;

use arcade_progress::domain::{CompanionStage, Profile};
use arcade_progress::leaderboard::Leaderboard;
use arcade_progress::store::{
    MemoryProfileStore, ProfileStore, SheetProfileStore, SqliteProfileStore,
};
use common::profile;
use tempfile::{TempDir, tempdir};

/// One store of each kind; the TempDir keeps the files alive
fn backends() -> (TempDir, Vec<Box<dyn ProfileStore>>) {
    let dir = tempdir().unwrap();
    let stores: Vec<Box<dyn ProfileStore>> = vec![
        Box::new(MemoryProfileStore::new()),
        Box::new(SqliteProfileStore::open(&dir.path().join("profiles.db")).unwrap()),
        Box::new(SheetProfileStore::open(&dir.path().join("profiles.json")).unwrap()),
    ];
    (dir, stores)
}

fn rich_profile() -> Profile {
    let mut p = profile("Mara", 1234);
    p.consumables.hint = 1;
    p.consumables.retry = 3;
    p.has_permanent_bonus = true;
    p.inventory_log = vec!["Magic Hat".into(), "Retry Token".into(), "Companion Egg".into()];
    p.achievements.insert("five_wins".into());
    p.achievements.insert("living_legend".into());
    p.companion_stage = CompanionStage::Legendary;
    p.companion_xp = 1010;
    p.legend_awarded = true;
    p
}

#[test]
fn test_profiles_round_trip_through_every_backend() {
    let (_dir, stores) = backends();
    for store in &stores {
        let rich = rich_profile();
        let empty = Profile::new("Blank");
        store.update(&rich).unwrap();
        store.create(&empty).unwrap();

        assert_eq!(store.find("mara").unwrap().unwrap(), rich, "{}", store.backend());
        assert_eq!(store.find("BLANK").unwrap().unwrap(), empty, "{}", store.backend());
        assert!(store.find("nobody").unwrap().is_none());
    }
}

#[test]
fn test_leaderboard_order_on_every_backend() {
    let (_dir, stores) = backends();
    for store in &stores {
        for (name, points) in [("A", 50), ("B", 80), ("C", 10)] {
            store.update(&profile(name, points)).unwrap();
        }
        let board = Leaderboard::new(store.as_ref());
        let names: Vec<String> = board.top(10).unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["B", "A", "C"], "{}", store.backend());
        assert_eq!(board.rank("C").unwrap(), 3, "{}", store.backend());
        assert_eq!(board.top(2).unwrap().len(), 2);
    }
}

#[test]
fn test_create_keeps_existing_row() {
    let (_dir, stores) = backends();
    for store in &stores {
        store.update(&profile("Kim", 70)).unwrap();
        store.create(&Profile::new("kim")).unwrap();
        assert_eq!(store.count().unwrap(), 1, "{}", store.backend());
        assert_eq!(store.find("Kim").unwrap().unwrap().points, 70);
    }
}

#[test]
fn test_two_sheet_handles_share_one_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shared.json");
    let left = SheetProfileStore::open(&path).unwrap();
    let right = SheetProfileStore::open(&path).unwrap();

    left.update(&profile("Ola", 5)).unwrap();
    right.update(&profile("Per", 9)).unwrap();
    // last write wins on the same row
    left.update(&profile("per", 11)).unwrap();

    assert_eq!(right.count().unwrap(), 2);
    assert_eq!(right.find("Per").unwrap().unwrap().points, 11);
}

#[test]
fn test_seeded_memory_ranks_newcomer_last() {
    let store = common::seeded_store(&[("A", 50), ("B", 80), ("C", 10)]);
    assert_eq!(store.rank("Dee").unwrap(), 4);
    assert_eq!(store.count().unwrap(), 4);
}
