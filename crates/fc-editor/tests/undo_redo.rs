//! Integration tests: snapshot history through the editor.
//!
//! Drives `Editor` the way a host would and checks that every completed
//! action is exactly one undo step, and that undo/redo reproduce the
//! scene exactly.

use fc_core::model::*;
use fc_core::{EditorConfig, NodeId};
use fc_editor::{Editor, InputEvent, NodeProperty};
use pretty_assertions::assert_eq;

fn editor() -> Editor {
    Editor::new(EditorConfig {
        snap_to_grid: false,
        ..EditorConfig::default()
    })
}

fn fixture() -> Editor {
    let mut ed = editor();
    ed.load_json(include_str!("fixtures/order_flow.json")).unwrap();
    ed
}

// ─── Basic undo/redo ────────────────────────────────────────────────────

#[test]
fn k_undos_then_k_redos_reproduce_the_scene() {
    let mut ed = editor();
    let a = ed.add_node(NodeType::Process, Point::new(100.0, 100.0));
    let b = ed.add_node(NodeType::Decision, Point::new(300.0, 100.0));
    ed.connect(a, b).unwrap();
    ed.set_property(a, NodeProperty::Text("Charge card".into())).unwrap();
    ed.commit_property_edit();
    ed.select_all();
    ed.duplicate_selected();
    let expected = ed.scene().snapshot();

    for k in 1..=5 {
        for _ in 0..k {
            assert!(ed.undo());
        }
        for _ in 0..k {
            assert!(ed.redo());
        }
        assert_eq!(ed.scene().snapshot(), expected, "k = {k}");
    }
}

#[test]
fn undo_at_baseline_is_noop() {
    let mut ed = editor();
    assert!(!ed.undo());
    ed.add_node(NodeType::Start, Point::ORIGIN);
    assert!(ed.undo());
    assert!(!ed.undo());
    assert!(ed.scene().is_empty());
}

#[test]
fn new_action_after_undo_drops_redo() {
    let mut ed = editor();
    ed.add_node(NodeType::Start, Point::ORIGIN);
    ed.add_node(NodeType::Process, Point::new(200.0, 0.0));
    ed.undo();
    assert!(ed.can_redo());
    ed.add_node(NodeType::Io, Point::new(0.0, 200.0));
    assert!(!ed.can_redo());
    let kinds: Vec<_> = ed.scene().nodes().iter().map(|n| n.kind()).collect();
    assert_eq!(kinds, vec![NodeType::Start, NodeType::Io]);
}

#[test]
fn undo_does_not_reissue_ids() {
    let mut ed = editor();
    let first = ed.add_node(NodeType::Process, Point::ORIGIN);
    ed.undo();
    let second = ed.add_node(NodeType::Process, Point::ORIGIN);
    assert!(second > first);
}

#[test]
fn undoing_a_load_keeps_new_ids_unique() {
    let mut ed = editor();
    for i in 0..5 {
        ed.add_node(NodeType::Process, Point::new(i as f64 * 150.0, 0.0));
    }
    ed.load_json(
        r##"{ "nodes": [ { "id": 0, "type": "start", "x": 0, "y": 0, "width": 120,
            "height": 60, "text": "Start", "fillColor": "#ffffff",
            "borderColor": "#000000", "borderRadius": 30, "fontSize": 14 } ] }"##,
    )
    .unwrap();
    assert_eq!(ed.scene().ids().peek_node(), NodeId(1));

    assert!(ed.undo());
    assert_eq!(ed.scene().nodes().len(), 5);
    let added = ed.add_node(NodeType::Process, Point::new(0.0, 200.0));

    let mut ids: Vec<_> = ed.scene().nodes().iter().map(|n| n.id).collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
    assert_eq!(added, NodeId(5));
}

// ─── Capacity ───────────────────────────────────────────────────────────

#[test]
fn history_is_capped_at_fifty() {
    let mut ed = editor();
    for i in 0..60 {
        ed.add_node(NodeType::Process, Point::new(i as f64 * 10.0, 0.0));
    }
    assert_eq!(ed.history().len(), 50);

    let mut undos = 0;
    while ed.undo() {
        undos += 1;
    }
    assert_eq!(undos, 49);
    // The oldest reachable state already has 11 nodes.
    assert_eq!(ed.scene().nodes().len(), 11);
}

// ─── Gestures and history ───────────────────────────────────────────────

#[test]
fn click_without_moving_records_nothing() {
    let mut ed = editor();
    ed.add_node(NodeType::Process, Point::new(100.0, 100.0));
    let before = ed.history().len();
    ed.handle(&InputEvent::down(160.0, 130.0));
    ed.handle(&InputEvent::up(160.0, 130.0));
    assert_eq!(ed.history().len(), before);
    assert_eq!(ed.selection().len(), 1);
}

#[test]
fn resize_is_one_undo_step() {
    let mut ed = editor();
    let id = ed.add_node(NodeType::Process, Point::new(100.0, 100.0));
    let before = ed.history().len();
    // South-east corner.
    ed.handle(&InputEvent::down(219.0, 159.0));
    for step in 1..=10 {
        let d = step as f64 * 8.0;
        ed.handle(&InputEvent::move_to(219.0 + d, 159.0 + d));
    }
    ed.handle(&InputEvent::up(299.0, 239.0));
    assert_eq!(ed.history().len(), before + 1);
    let b = ed.scene().node(id).unwrap().bounds();
    assert_eq!((b.width, b.height), (200.0, 140.0));

    ed.undo();
    let b = ed.scene().node(id).unwrap().bounds();
    assert_eq!((b.width, b.height), (120.0, 60.0));
}

#[test]
fn box_select_is_not_history() {
    let mut ed = fixture();
    let before = ed.history().len();
    ed.handle(&InputEvent::down(0.0, 0.0));
    ed.handle(&InputEvent::move_to(600.0, 400.0));
    ed.handle(&InputEvent::up(600.0, 400.0));
    assert_eq!(ed.selection().len(), 3);
    assert_eq!(ed.history().len(), before);
}

// ─── Delete ─────────────────────────────────────────────────────────────

#[test]
fn delete_removes_exactly_the_touching_connectors() {
    let mut ed = fixture();
    assert_eq!(ed.scene().connectors().len(), 2);
    // Deleting the end node keeps start -> decision.
    assert_eq!(ed.delete_node(NodeId(7)), 1);
    let left: Vec<_> = ed
        .scene()
        .connectors()
        .iter()
        .map(|c| (c.from, c.to))
        .collect();
    assert_eq!(left, vec![(NodeId(0), NodeId(3))]);
    assert!(ed.selection().is_empty());

    ed.undo();
    assert_eq!(ed.scene().connectors().len(), 2);
}

#[test]
fn clear_canvas_then_undo() {
    let mut ed = fixture();
    let loaded = ed.scene().snapshot();
    ed.clear_canvas();
    assert!(ed.scene().is_empty());
    ed.undo();
    assert_eq!(ed.scene().snapshot(), loaded);
}
