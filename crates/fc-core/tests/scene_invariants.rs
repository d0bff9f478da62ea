//! Integration tests: scene model invariants across the public API.

use fc_core::model::*;
use fc_core::view::ViewState;
use fc_core::{ConnectorId, Document, EditorError, NodeId};
use pretty_assertions::assert_eq;

fn chain(len: usize) -> (Scene, Vec<NodeId>) {
    let mut scene = Scene::new();
    let ids: Vec<_> = (0..len)
        .map(|i| scene.add_node(NodeType::Process, i as f64 * 200.0, 0.0).id)
        .collect();
    for pair in ids.windows(2) {
        scene.add_connector(pair[0], pair[1]).unwrap();
    }
    (scene, ids)
}

#[test]
fn resize_never_goes_below_minimum() {
    let start = Bounds::new(10.0, 10.0, 120.0, 60.0);
    let deltas = [-500.0, -61.0, -1.0, 0.0, 1.0, 59.0, 61.0, 500.0];
    for handle in ResizeHandle::ALL {
        for dx in deltas {
            for dy in deltas {
                let b = resize_bounds(start, handle, dx, dy);
                assert!(b.width >= MIN_NODE_WIDTH, "{handle:?} {dx} {dy}");
                assert!(b.height >= MIN_NODE_HEIGHT, "{handle:?} {dx} {dy}");
            }
        }
    }
}

#[test]
fn west_and_north_resize_keep_the_far_edges() {
    let start = Bounds::new(100.0, 100.0, 120.0, 60.0);
    let b = resize_bounds(start, ResizeHandle::NorthWest, 30.0, -10.0);
    assert_eq!(b.right(), start.right());
    assert_eq!(b.bottom(), start.bottom());
    assert_eq!((b.width, b.height), (90.0, 70.0));
}

#[test]
fn deleting_a_node_removes_exactly_its_connectors() {
    let (mut scene, ids) = chain(4);
    let untouched: Vec<_> = scene
        .connectors()
        .iter()
        .filter(|c| !c.touches(ids[1]))
        .copied()
        .collect();
    assert_eq!(scene.remove_nodes(&[ids[1]]), 1);
    assert_eq!(scene.connectors(), untouched.as_slice());
}

#[test]
fn self_and_dangling_connections_are_rejected() {
    let (mut scene, ids) = chain(2);
    assert_eq!(
        scene.add_connector(ids[0], ids[0]).unwrap_err(),
        EditorError::SelfConnection { from: ids[0] }
    );
    assert_eq!(
        scene.add_connector(ids[0], NodeId(77)).unwrap_err(),
        EditorError::UnknownNode(NodeId(77))
    );
    assert_eq!(scene.connectors().len(), 1);
}

#[test]
fn ids_stay_unique_through_duplicate_and_delete() {
    let (mut scene, ids) = chain(3);
    let copies = scene.duplicate(&ids);
    scene.remove_nodes(&copies[..1]);
    scene.duplicate(&copies[1..]);
    let mut seen: Vec<_> = scene.nodes().iter().map(|n| n.id).collect();
    let total = seen.len();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), total);
}

#[test]
fn load_resets_counters_past_existing_ids() {
    let json = r##"{
        "nodes": [
            { "id": 12, "type": "custom", "x": 0, "y": 0, "width": 120, "height": 60,
              "text": "Custom", "fillColor": "#ffffff", "borderColor": "#000000",
              "borderRadius": 5, "fontSize": 14 }
        ]
    }"##;
    let doc = Document::from_json(json).unwrap();
    assert!(doc.connectors.is_empty());
    let mut scene = Scene::new();
    scene.load(doc.snapshot());
    assert_eq!(scene.ids().peek_node(), NodeId(13));
    assert_eq!(scene.ids().peek_connector(), ConnectorId(1));
}

#[test]
fn unknown_node_type_is_malformed() {
    let json = r##"{ "nodes": [ { "id": 1, "type": "hexagon", "x": 0, "y": 0,
        "width": 1, "height": 1, "text": "", "fillColor": "#fff",
        "borderColor": "#000", "borderRadius": 0, "fontSize": 14 } ] }"##;
    assert!(matches!(
        Document::from_json(json),
        Err(EditorError::MalformedDocument(_))
    ));
}

#[test]
fn screen_scene_mapping_is_inverse() {
    let view = ViewState {
        zoom: 0.75,
        pan: Point::new(-120.0, 48.5),
        ..ViewState::default()
    };
    for (x, y) in [(0.0, 0.0), (799.0, 599.0), (-40.0, 3000.0)] {
        let p = Point::new(x, y);
        let back = view.scene_to_screen(view.screen_to_scene(p));
        assert!((back.x - p.x).abs() < 1e-9 && (back.y - p.y).abs() < 1e-9);
    }
}
