use atlas_map::{
    is_eligible, DetailMap, MapView, Route, SurfaceCommand, Viewport, ViewportConfig,
};
use atlas_profile::{Location, Profile, ProfileId};
use atlas_registry::ProfileRegistry;
use atlas_store::{MemoryStore, ProfileStore};
use atlas_test_utils::{
    profile_at, profile_without_location, seeded_registry, RecordingNavigator, RecordingSurface,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;

struct Harness {
    registry: Arc<ProfileRegistry>,
    view: Arc<MapView>,
    surface: RecordingSurface,
    navigator: Arc<RecordingNavigator>,
}

fn harness(registry: Arc<ProfileRegistry>) -> Harness {
    let surface = RecordingSurface::new();
    let navigator = Arc::new(RecordingNavigator::new());
    let view = MapView::attach(
        Arc::clone(&registry),
        Box::new(surface.clone()),
        Arc::clone(&navigator) as Arc<dyn atlas_map::Navigator>,
        ViewportConfig::default(),
    )
    .unwrap();
    Harness {
        registry,
        view,
        surface,
        navigator,
    }
}

fn eligible_ids(registry: &ProfileRegistry) -> Vec<ProfileId> {
    let mut ids: Vec<ProfileId> = registry
        .profiles()
        .iter()
        .filter(|p| is_eligible(p))
        .map(|p| p.id.clone())
        .collect();
    ids.sort();
    ids
}

#[derive(Debug, Clone)]
enum Op {
    Add(u8, Option<(f64, f64)>),
    Move(u8, Option<(f64, f64)>),
    Remove(u8),
    Select(Option<u8>),
}

fn coords() -> impl Strategy<Value = Option<(f64, f64)>> {
    prop_oneof![
        Just(None),
        Just(Some((0.0, 0.0))),
        (-90.0..90.0f64, -180.0..180.0f64).prop_map(Some),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..10u8, coords()).prop_map(|(id, c)| Op::Add(id, c)),
        (0..10u8, coords()).prop_map(|(id, c)| Op::Move(id, c)),
        (0..10u8).prop_map(Op::Remove),
        proptest::option::of(0..10u8).prop_map(Op::Select),
    ]
}

fn with_coords(mut profile: Profile, coords: Option<(f64, f64)>) -> Profile {
    profile.location = coords.map(|(lat, lng)| Location::new(lat, lng));
    profile
}

proptest! {
    #[test]
    fn prop_markers_match_eligible_profiles(ops in proptest::collection::vec(op_strategy(), 0..30)) {
        let h = harness(ProfileRegistry::open(Arc::new(MemoryStore::new())));

        for op in ops {
            match op {
                Op::Add(id, c) => {
                    let _ = h.registry.add(with_coords(profile_without_location(&id.to_string(), "p"), c));
                }
                Op::Move(id, c) => {
                    if let Some(profile) = h.registry.get(&ProfileId::from(id.to_string())) {
                        h.registry.update(with_coords(profile, c));
                    }
                }
                Op::Remove(id) => {
                    h.registry.remove(&ProfileId::from(id.to_string()));
                }
                Op::Select(id) => {
                    h.registry.select(id.map(|i| ProfileId::from(i.to_string())));
                }
            }
            prop_assert_eq!(h.view.marker_ids(), eligible_ids(&h.registry));
            for marker in h.view.markers() {
                let profile = h.registry.get(&marker.profile_id).unwrap();
                prop_assert_eq!(Some(marker.position), profile.plottable_location());
            }
        }
    }
}

#[test]
fn chicago_walkthrough() {
    let (registry, _store) = seeded_registry();
    let h = harness(registry);
    assert_eq!(h.view.marker_count(), 8);

    h.registry.select(Some("3".into()));
    assert_eq!(
        h.view.viewport(),
        Viewport::new(Location::new(41.8781, -87.6298), 10)
    );
    assert_eq!(h.view.open_popup(), Some("3".into()));

    assert!(h.registry.remove(&"3".into()));
    assert!(h.view.marker(&"3".into()).is_none());
    assert_eq!(h.registry.selected_id(), None);
    assert_eq!(h.view.open_popup(), None);

    h.registry
        .add(profile_at("9", "Null Island", 0.0, 0.0))
        .unwrap();
    assert_eq!(h.registry.len(), 8);
    assert!(h.view.marker(&"9".into()).is_none());
    assert_eq!(h.view.marker_count(), 7);
}

#[test]
fn marker_click_selects_profile() {
    let (registry, _store) = seeded_registry();
    let h = harness(registry);

    h.view.handle_marker_click(&"6".into()).unwrap();
    assert_eq!(h.registry.selected_id(), Some("6".into()));
    assert_eq!(h.view.viewport().center, Location::new(37.7749, -122.4194));

    // clicking the already-selected marker refocuses it
    h.view.pan_to(Location::new(10.0, 10.0));
    h.view.handle_marker_click(&"6".into()).unwrap();
    assert_eq!(h.view.viewport().center, Location::new(37.7749, -122.4194));
}

#[test]
fn view_details_navigates_without_touching_map() {
    let (registry, _store) = seeded_registry();
    let h = harness(registry);
    h.surface.clear();

    h.view.handle_view_details(&"2".into()).unwrap();
    assert_eq!(h.navigator.last(), Some(Route::ProfileDetail("2".into())));
    assert_eq!(h.navigator.last().unwrap().path(), "/profile/2");
    assert!(h.surface.commands().is_empty());
    assert_eq!(h.registry.selected_id(), None);
}

#[test]
fn unchanged_markers_are_not_recreated() {
    let (registry, _store) = seeded_registry();
    let h = harness(registry);
    h.surface.clear();

    h.registry.add(profile_at("9", "Nine", 12.0, 34.0)).unwrap();
    let commands = h.surface.commands();
    assert_eq!(commands.len(), 1);
    assert!(matches!(&commands[0], SurfaceCommand::AddMarker(m) if m.profile_id.as_str() == "9"));
}

#[test]
fn selection_only_moves_focus() {
    let (registry, _store) = seeded_registry();
    let h = harness(registry);
    h.surface.clear();

    h.registry.select(Some("4".into()));
    assert_eq!(
        h.surface.commands(),
        vec![
            SurfaceCommand::OpenPopup("4".into()),
            SurfaceCommand::SetView(Viewport::new(Location::new(29.7604, -95.3698), 10)),
        ]
    );
    assert_eq!(h.view.marker_count(), 8);
}

#[test]
fn edits_update_markers_in_place() {
    let (registry, _store) = seeded_registry();
    let h = harness(registry);
    h.surface.clear();

    let mut profile = h.registry.get(&"4".into()).unwrap();
    profile.name = "Renamed".into();
    profile.location = Some(Location::new(30.0, -96.0));
    h.registry.update(profile);

    let commands = h.surface.commands();
    assert_eq!(commands.len(), 2);
    assert_eq!(
        commands[0],
        SurfaceCommand::MoveMarker("4".into(), Location::new(30.0, -96.0))
    );
    assert!(matches!(&commands[1], SurfaceCommand::SetPopup(id, popup) if id.as_str() == "4" && popup.title == "Renamed"));
}

#[test]
fn selecting_unplottable_profile_changes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let registry = ProfileRegistry::open(Arc::clone(&store) as Arc<dyn ProfileStore>);
    registry.add(profile_without_location("9", "Nowhere")).unwrap();
    let h = harness(registry);
    let initial = h.view.viewport();
    h.surface.clear();

    h.registry.select(Some("9".into()));
    assert_eq!(h.view.viewport(), initial);
    assert!(h.surface.commands().is_empty());
    assert_eq!(h.registry.selected_id(), Some("9".into()));
}

#[test]
fn attach_renders_initial_view_first() {
    let (registry, _store) = seeded_registry();
    let h = harness(registry);

    let commands = h.surface.commands();
    assert_eq!(
        commands[0],
        SurfaceCommand::SetView(ViewportConfig::default().initial())
    );
    let added = commands
        .iter()
        .filter(|c| matches!(c, SurfaceCommand::AddMarker(_)))
        .count();
    assert_eq!(added, 8);
}

#[test]
fn invalid_config_is_rejected() {
    let (registry, _store) = seeded_registry();
    let result = MapView::attach(
        registry,
        Box::new(RecordingSurface::new()),
        Arc::new(RecordingNavigator::new()),
        ViewportConfig::default().with_zoom_range(12, 4),
    );
    assert!(result.is_err());
}

#[test]
fn detail_map_renders_single_open_popup() {
    let surface = RecordingSurface::new();
    let mut boxed = surface.clone();
    let profile = profile_at("5", "Sam", 47.6062, -122.3321);

    let map = DetailMap::render(&profile, &ViewportConfig::default(), &mut boxed).unwrap();
    assert_eq!(map.viewport.zoom, 12);
    assert_eq!(
        surface.commands().last(),
        Some(&SurfaceCommand::OpenPopup("5".into()))
    );
}
