use atlas_profile::{sample_profiles, Profile, ProfileId, SAMPLE_PROFILE_COUNT};
use atlas_registry::{
    decode_profiles, encode_profiles, LoadOutcome, Persistence, ProfileRegistry, RegistryError,
    RegistryEvent, SearchScope, SeedReason, PROFILES_KEY,
};
use atlas_store::{MemoryStore, ProfileStore};
use atlas_test_utils::{profile_at, seeded_registry, temp_file_store, FailingStore, RecordingObserver};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;

fn stored(store: &dyn ProfileStore) -> Vec<Profile> {
    decode_profiles(&store.get(PROFILES_KEY).unwrap().unwrap()).unwrap()
}

#[derive(Debug, Clone)]
enum Op {
    Add { id: u8, lat: f64, lng: f64 },
    Update { id: u8, name: String },
    Remove { id: u8 },
    Select { id: Option<u8> },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..12u8, -90.0..90.0f64, -180.0..180.0f64).prop_map(|(id, lat, lng)| Op::Add { id, lat, lng }),
        (0..12u8, "[a-z ]{0,10}").prop_map(|(id, name)| Op::Update { id, name }),
        (0..12u8).prop_map(|id| Op::Remove { id }),
        proptest::option::of(0..12u8).prop_map(|id| Op::Select { id }),
    ]
}

proptest! {
    #[test]
    fn prop_store_mirrors_memory(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let store = Arc::new(MemoryStore::new());
        let registry = ProfileRegistry::open(Arc::clone(&store) as Arc<dyn ProfileStore>);

        for op in ops {
            match op {
                Op::Add { id, lat, lng } => {
                    let id = id.to_string();
                    let existed = registry.contains(&ProfileId::from(id.as_str()));
                    let result = registry.add(profile_at(&id, "added", lat, lng));
                    prop_assert_eq!(result.is_err(), existed);
                }
                Op::Update { id, name } => {
                    let id = ProfileId::from(id.to_string());
                    if let Some(mut profile) = registry.get(&id) {
                        profile.name = name;
                        prop_assert!(registry.update(profile));
                    } else {
                        prop_assert!(!registry.update(Profile::new(id, name)));
                    }
                }
                Op::Remove { id } => {
                    let id = ProfileId::from(id.to_string());
                    let existed = registry.contains(&id);
                    let selected_before = registry.selected_id();
                    prop_assert_eq!(registry.remove(&id), existed);
                    prop_assert!(!registry.contains(&id));
                    if existed {
                        prop_assert_ne!(registry.selected_id(), Some(id));
                    } else {
                        prop_assert_eq!(registry.selected_id(), selected_before);
                    }
                }
                Op::Select { id } => {
                    registry.select(id.map(|i| ProfileId::from(i.to_string())));
                }
            }
            prop_assert_eq!(stored(store.as_ref()), registry.profiles().to_vec());
        }
    }

    #[test]
    fn prop_add_then_remove_restores(lat in -89.0..89.0f64, lng in -179.0..179.0f64) {
        let (registry, store) = seeded_registry();
        let before = registry.profiles().to_vec();

        registry.add(profile_at("fresh", "Fresh", lat, lng)).unwrap();
        prop_assert!(registry.remove(&"fresh".into()));

        prop_assert_eq!(registry.profiles().to_vec(), before.clone());
        prop_assert_eq!(stored(store.as_ref()), before);
    }
}

#[test]
fn first_open_seeds_and_persists_samples() {
    let (registry, store) = seeded_registry();
    assert_eq!(registry.len(), SAMPLE_PROFILE_COUNT);
    assert_eq!(stored(store.as_ref()), sample_profiles());
    assert_eq!(registry.persistence(), Persistence::Durable);
}

#[test]
fn reopen_restores_previous_session() {
    let (file_store, _dir) = temp_file_store();
    let store: Arc<dyn ProfileStore> = Arc::new(file_store);

    let first = ProfileRegistry::open(Arc::clone(&store));
    first.remove(&"1".into());
    first.add(profile_at("9", "Nine", 10.0, 20.0)).unwrap();
    let expected = first.profiles().to_vec();
    drop(first);

    let second = ProfileRegistry::new(store);
    assert_eq!(second.load(), LoadOutcome::Restored { count: expected.len() });
    assert_eq!(second.profiles().to_vec(), expected);
}

#[test]
fn malformed_store_is_reseeded() {
    let store = Arc::new(MemoryStore::with_entry(PROFILES_KEY, "{not json"));
    let registry = ProfileRegistry::new(Arc::clone(&store) as Arc<dyn ProfileStore>);

    assert_eq!(
        registry.load(),
        LoadOutcome::Seeded { reason: SeedReason::Malformed }
    );
    assert_eq!(stored(store.as_ref()), sample_profiles());
}

#[test]
fn empty_array_is_a_valid_collection() {
    let store = Arc::new(MemoryStore::with_entry(PROFILES_KEY, "[]"));
    let registry = ProfileRegistry::open(store);
    assert!(registry.is_empty());
}

#[test]
fn duplicate_stored_ids_keep_first_and_write_back() {
    let profiles = vec![
        profile_at("a", "First", 1.0, 1.0),
        profile_at("a", "Second", 2.0, 2.0),
        profile_at("b", "Other", 3.0, 3.0),
    ];
    let store = Arc::new(MemoryStore::with_entry(
        PROFILES_KEY,
        encode_profiles(&profiles).unwrap(),
    ));
    let registry = ProfileRegistry::open(Arc::clone(&store) as Arc<dyn ProfileStore>);

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get(&"a".into()).unwrap().name, "First");
    assert_eq!(stored(store.as_ref()).len(), 2);
}

#[test]
fn unavailable_store_falls_back_to_memory() {
    let registry = ProfileRegistry::new(Arc::new(FailingStore::broken()));
    assert_eq!(
        registry.load(),
        LoadOutcome::Seeded { reason: SeedReason::StoreUnavailable }
    );
    assert_eq!(registry.persistence(), Persistence::MemoryOnly);

    registry.add(profile_at("9", "Nine", 1.0, 1.0)).unwrap();
    assert_eq!(registry.len(), SAMPLE_PROFILE_COUNT + 1);
}

#[test]
fn write_failure_mid_session_keeps_memory_state() {
    let store = Arc::new(FailingStore::new());
    let registry = ProfileRegistry::open(Arc::clone(&store) as Arc<dyn ProfileStore>);
    assert_eq!(registry.persistence(), Persistence::Durable);

    store.fail_writes(true);
    assert!(registry.remove(&"2".into()));
    assert_eq!(registry.persistence(), Persistence::MemoryOnly);
    assert_eq!(registry.len(), SAMPLE_PROFILE_COUNT - 1);

    // later writes are not attempted even once the store recovers
    store.fail_writes(false);
    assert!(registry.remove(&"3".into()));
    let raw = decode_profiles(&store.raw(PROFILES_KEY).unwrap()).unwrap();
    assert_eq!(raw.len(), SAMPLE_PROFILE_COUNT);
}

#[test]
fn duplicate_add_is_rejected_without_side_effects() {
    let (registry, _store) = seeded_registry();
    let observer = RecordingObserver::attach(&registry);

    let err = registry.add(profile_at("1", "Clash", 5.0, 5.0)).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateId(ref id) if id.as_str() == "1"));
    assert!(err.is_caller_error());
    assert_eq!(registry.len(), SAMPLE_PROFILE_COUNT);
    assert_eq!(observer.count(), 0);
}

#[test]
fn unknown_ids_are_silent_no_ops() {
    let (registry, store) = seeded_registry();
    let observer = RecordingObserver::attach(&registry);
    let before = store.get(PROFILES_KEY).unwrap();

    assert!(!registry.update(profile_at("404", "Ghost", 1.0, 1.0)));
    assert!(!registry.remove(&"404".into()));
    assert_eq!(store.get(PROFILES_KEY).unwrap(), before);
    assert_eq!(observer.count(), 0);
}

#[test]
fn removing_absent_id_keeps_stale_selection() {
    let (registry, _store) = seeded_registry();
    registry.select(Some("404".into()));
    let observer = RecordingObserver::attach(&registry);

    assert!(!registry.remove(&"404".into()));
    assert_eq!(registry.selected_id(), Some(ProfileId::from("404")));
    assert_eq!(observer.count(), 0);
}

#[test]
fn update_keeps_position() {
    let (registry, _store) = seeded_registry();
    let mut profile = registry.get(&"4".into()).unwrap();
    profile.name = "Renamed".into();
    assert!(registry.update(profile));

    assert_eq!(registry.profiles()[3].name, "Renamed");
}

#[test]
fn observers_see_events_with_post_change_snapshot() {
    let (registry, _store) = seeded_registry();
    let observer = RecordingObserver::attach(&registry);

    registry.select(Some("3".into()));
    registry.select(Some("3".into()));
    registry.remove(&"3".into());

    assert_eq!(
        observer.events(),
        vec![
            RegistryEvent::SelectionChanged {
                previous: None,
                current: Some("3".into()),
            },
            RegistryEvent::Removed {
                id: "3".into(),
                selection_cleared: true,
            },
        ]
    );
    let snapshot = observer.last_snapshot().unwrap();
    assert_eq!(snapshot.selected, None);
    assert!(snapshot.get(&"3".into()).is_none());
}

#[test]
fn dropped_observers_are_pruned() {
    let (registry, _store) = seeded_registry();
    let observer = RecordingObserver::attach(&registry);
    assert_eq!(registry.observer_count(), 1);

    drop(observer);
    registry.select(Some("1".into()));
    assert_eq!(registry.observer_count(), 0);
}

#[test]
fn reload_picks_up_external_writes() {
    let (file_store, dir) = temp_file_store();
    let registry = ProfileRegistry::open(Arc::new(file_store));
    let observer = RecordingObserver::attach(&registry);
    assert!(!registry.reload().unwrap());

    // another process edits the same store
    let other = atlas_store::FileStore::new(dir.path());
    let mut profiles = sample_profiles();
    profiles.truncate(2);
    other.set(PROFILES_KEY, &encode_profiles(&profiles).unwrap()).unwrap();

    assert!(registry.reload().unwrap());
    assert_eq!(registry.len(), 2);
    assert_eq!(observer.events(), vec![RegistryEvent::Reloaded]);
}

#[test]
fn reload_of_garbage_leaves_memory_untouched() {
    let store = Arc::new(MemoryStore::new());
    let registry = ProfileRegistry::open(Arc::clone(&store) as Arc<dyn ProfileStore>);
    store.set(PROFILES_KEY, "garbage").unwrap();

    assert!(matches!(registry.reload(), Err(RegistryError::Decode(_))));
    assert_eq!(registry.len(), SAMPLE_PROFILE_COUNT);
}

#[test]
fn search_scopes_differ_on_description() {
    let (registry, _store) = seeded_registry();

    let directory = registry.search("NODE.JS", SearchScope::Directory);
    assert!(directory.iter().any(|p| p.id.as_str() == "1"));
    assert!(registry.search("node.js", SearchScope::Admin).is_empty());
    assert_eq!(registry.search("", SearchScope::Admin).len(), SAMPLE_PROFILE_COUNT);
}

#[test]
fn reset_restores_samples_and_clears_selection() {
    let (registry, store) = seeded_registry();
    registry.remove(&"1".into());
    registry.select(Some("2".into()));

    registry.reset_to_samples();
    assert_eq!(registry.len(), SAMPLE_PROFILE_COUNT);
    assert_eq!(registry.selected_id(), None);
    assert_eq!(stored(store.as_ref()), sample_profiles());
}
