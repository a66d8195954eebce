use floor_plan::core::snapshot::load_snapshot;
use floor_plan::core::Storage;
use floor_plan::render::render_svg;
use floor_plan::{
    Canvas, LayoutEngine, LocalStorage, PositionGenerator, RngSource, TransitionController,
    ZoneCatalog,
};
use std::time::Duration;
use tempfile::TempDir;

const INITIAL: &str = r#"[
    {"_id": "1", "firstName": "Ada", "lastName": "Lovelace", "zone": "Zone 1"},
    {"_id": "2", "firstName": "Alan", "lastName": "Turing", "zone": "Zone 2"},
    {"_id": "3", "firstName": "Grace", "lastName": "Hopper", "zone": "Zone 9"}
]"#;

const UPDATED: &str = "_id,firstName,lastName,zone\n\
1,Ada,Lovelace,Zone 3\n\
2,Alan,Turing,Zone 4\n\
3,Grace,Hopper,Zone 2\n\
4,Ken,Thompson,Zone 1\n";

async fn storage_with_snapshots() -> (TempDir, LocalStorage) {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path());
    storage.write_file("initial.json", INITIAL.as_bytes()).await.unwrap();
    storage.write_file("updated.csv", UPDATED.as_bytes()).await.unwrap();
    (temp_dir, storage)
}

#[tokio::test(start_paused = true)]
async fn test_end_to_end_layout_transition() {
    let (_temp_dir, storage) = storage_with_snapshots().await;
    let initial = load_snapshot(&storage, "initial.json").await.unwrap();
    let updated = load_snapshot(&storage, "updated.csv").await.unwrap();
    assert_eq!(initial.len(), 3);
    assert_eq!(updated.len(), 4);

    let engine = LayoutEngine::new(ZoneCatalog::standard(), PositionGenerator::default());
    let mut rng = RngSource::seeded(7);
    let mut transition =
        TransitionController::activate(initial.clone(), updated.clone(), Duration::from_secs(5));

    // Zone 9 does not exist, so Grace is not placed
    let first = engine.layout(&transition.current(), &mut rng);
    assert_eq!(first.len(), 2);
    assert!(first.iter().all(|p| p.id != "3"));

    assert!(transition.wait_for_swap().await);
    let active = transition.current();
    assert!(active.same_as(&updated));
    assert_eq!(active.entities(), updated.entities());

    let second = engine.layout(&active, &mut rng);
    assert_eq!(second.len(), 4);
    let ids: Vec<&str> = second.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4"]);
    for placement in &second {
        assert!((10.0..=1310.0).contains(&placement.point.x));
        assert!((10.0..=590.0).contains(&placement.point.y));
    }
}

#[tokio::test(start_paused = true)]
async fn test_teardown_before_delay_keeps_initial_snapshot() {
    let (_temp_dir, storage) = storage_with_snapshots().await;
    let initial = load_snapshot(&storage, "initial.json").await.unwrap();
    let updated = load_snapshot(&storage, "updated.csv").await.unwrap();

    let controller = TransitionController::activate(initial.clone(), updated, Duration::from_secs(5));
    let subscriber = controller.subscribe();

    tokio::time::sleep(Duration::from_secs(1)).await;
    drop(controller);
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert!(subscriber.borrow().snapshot.same_as(&initial));
}

#[tokio::test]
async fn test_rendered_svg_written_to_storage() {
    let (temp_dir, storage) = storage_with_snapshots().await;
    let snapshot = load_snapshot(&storage, "initial.json").await.unwrap();

    let canvas = Canvas::default();
    let engine = LayoutEngine::new(ZoneCatalog::standard(), PositionGenerator::new(canvas));
    let placements = engine.layout(&snapshot, &mut RngSource::seeded(1));
    let svg = render_svg(&canvas, engine.catalog(), &placements);
    storage.write_file("out/initial.svg", svg.as_bytes()).await.unwrap();

    let written = std::fs::read_to_string(temp_dir.path().join("out/initial.svg")).unwrap();
    assert!(written.contains(">Ada</text>"));
    assert!(written.contains(">Turing</text>"));
    assert!(!written.contains("Hopper"));
}

#[tokio::test]
async fn test_unsupported_snapshot_format() {
    let (_temp_dir, storage) = storage_with_snapshots().await;
    let err = load_snapshot(&storage, "positions.xml").await.unwrap_err();
    assert!(matches!(
        err,
        floor_plan::LayoutError::UnsupportedFormatError { .. }
    ));
}
