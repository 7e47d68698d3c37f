use std::sync::{Arc, Mutex};
use std::time::Duration;

use footprint3d::api::parse_feature_collection;
use footprint3d::geometry::{SceneOrigin, Units};
use footprint3d::render::{Viewport, renderer_for_path};
use footprint3d::scene::{
    Material, OrbitControls, PerspectiveCamera, RenderLoop, SceneOptions, Session,
};
use footprint3d::{GeometryError, RenderError};

const DATASET: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "id": "a",
     "geometry": {"type": "MultiPolygon", "coordinates": [[[[0, 0], [4, 0], [4, 2], [0, 2], [0, 0]]]]},
     "properties": {"hauteur": 10}},
    {"type": "Feature", "id": "b",
     "geometry": {"type": "Polygon", "coordinates": [[[10, 0], [12, 0], [12, 2], [10, 2], [10, 0]]]},
     "properties": {"height": 5}},
    {"type": "Feature", "id": "no-height",
     "geometry": {"type": "Polygon", "coordinates": [[[20, 0], [21, 0], [21, 1], [20, 0]]]},
     "properties": {}},
    {"type": "Feature", "id": "no-geometry", "geometry": null, "properties": {"height": 3}}
  ]
}"#;

fn degree_options() -> SceneOptions {
    SceneOptions {
        origin: SceneOrigin::FirstFeature,
        units: Units::Degrees,
        ..Default::default()
    }
}

fn session_for(path: &std::path::Path, sequence: bool, options: SceneOptions) -> Session {
    let renderer = renderer_for_path(path, Viewport::default(), sequence).unwrap();
    Session::new(
        renderer,
        PerspectiveCamera::default(),
        OrbitControls::default(),
        options,
        Material::default(),
    )
}

#[test]
fn test_dataset_to_stl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("city.stl");
    let features = parse_feature_collection(DATASET).unwrap();

    let mut session = session_for(&path, false, degree_options());
    let summary = session.load(&features);

    assert_eq!(summary.rendered, 2);
    assert_eq!(summary.skipped.len(), 2);
    assert!(summary
        .skipped
        .iter()
        .any(|(label, err)| label == "no-height" && *err == GeometryError::MissingHeight));
    assert!(summary
        .skipped
        .iter()
        .any(|(label, err)| label == "no-geometry" && *err == GeometryError::MissingGeometry));

    let nodes = session.scene().nodes();
    assert_eq!(nodes[0].position, [0.0, 0.0, 0.0]);
    assert_eq!(nodes[1].position, [9.0, 0.0, 0.0]);
    assert_eq!(nodes[0].depth, 10.0);
    assert_eq!(nodes[1].depth, 5.0);

    session.render_frame().unwrap();
    let triangles = session.scene().triangle_count();
    session.teardown();

    let mut file = std::fs::File::open(&path).unwrap();
    let mesh = stl_io::read_stl(&mut file).unwrap();
    assert_eq!(mesh.faces.len(), triangles);
    assert_eq!(triangles, 24);
}

#[test]
fn test_default_height_keeps_every_footprint() {
    let dir = tempfile::tempdir().unwrap();
    let features = parse_feature_collection(DATASET).unwrap();
    let options = SceneOptions {
        default_height: Some(3.0),
        ..degree_options()
    };

    let mut session = session_for(&dir.path().join("city.obj"), false, options);
    let summary = session.load(&features);
    assert_eq!(summary.rendered, 3);
    assert_eq!(summary.skipped.len(), 1);

    session.render_frame().unwrap();
    let obj = std::fs::read_to_string(dir.path().join("city.obj")).unwrap();
    assert!(obj.contains("o no-height"));
    assert!(dir.path().join("city.mtl").exists());
}

#[test]
fn test_empty_collection_renders_empty_scene() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.svg");
    let features = parse_feature_collection(r#"{"type": "FeatureCollection", "features": []}"#)
        .unwrap();

    let mut session = session_for(&path, false, SceneOptions::default());
    let summary = session.load(&features);
    assert_eq!(summary.rendered, 0);
    assert!(summary.skipped.is_empty());
    assert!(session.scene().is_empty());
    assert!(session.scene().origin().is_none());

    session.render_frame().unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(!svg.contains("<polygon"));
}

#[test]
fn test_render_loop_writes_frame_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orbit.svg");
    let features = parse_feature_collection(DATASET).unwrap();

    let mut session = session_for(&path, true, degree_options());
    session.load(&features);
    *session.controls_mut() = OrbitControls::default().with_auto_rotate(0.1);

    let session = Arc::new(Mutex::new(session));
    let render_loop = RenderLoop::start(Arc::clone(&session), Duration::from_millis(1), Some(3));
    assert_eq!(render_loop.wait().unwrap(), 3);

    for frame in 1..=3 {
        assert!(dir.path().join(format!("orbit_{:04}.svg", frame)).exists());
    }
    assert!(!dir.path().join("orbit_0004.svg").exists());

    let mut session = session.lock().unwrap();
    session.teardown();
    assert!(matches!(session.render_frame(), Err(RenderError::Closed)));
}

#[test]
fn test_unsupported_output_format() {
    let result = renderer_for_path(
        std::path::Path::new("city.gltf"),
        Viewport::default(),
        false,
    );
    assert!(matches!(result, Err(RenderError::UnsupportedFormat(_))));
}
