// File: crates/healchart-core/tests/data_join.rs
// Purpose: Keyed enter/update/exit semantics of `Surface::join` and pointer dispatch.

use std::cell::Cell;
use std::rc::Rc;

use healchart_core::{Color, MarkSpec, PointerEvent, Shape, Style, Surface};

fn dot(key: &str, cx: f64) -> MarkSpec {
    MarkSpec::new(key, Shape::Circle { cx, cy: 0.0, r: 4.0 }, Style::filled(Color::STEELBLUE))
}

fn keys(surface: &Surface) -> Vec<String> {
    surface.marks().iter().map(|m| format!("{}/{}", m.class, m.key)).collect()
}

#[test]
fn enter_update_exit_counts() {
    let mut s = Surface::new("layer");
    let first = s.join("dot", vec![dot("a", 0.0), dot("b", 10.0)]);
    assert_eq!((first.entered, first.updated, first.exited), (2, 0, 0));

    let second = s.join("dot", vec![dot("b", 20.0), dot("c", 30.0)]);
    assert_eq!((second.entered, second.updated, second.exited), (1, 1, 1));
    assert_eq!(keys(&s), vec!["dot/b", "dot/c"]);
    assert_eq!(s.find("dot", "b").map(|m| m.shape.clone()), Some(Shape::Circle { cx: 20.0, cy: 0.0, r: 4.0 }));

    let cleared = s.join("dot", Vec::new());
    assert_eq!(cleared.exited, 2);
    assert!(s.is_empty());
}

#[test]
fn join_only_touches_its_own_class() {
    let mut s = Surface::new("layer");
    s.join("a", vec![dot("1", 0.0)]);
    s.join("b", vec![dot("1", 0.0), dot("2", 0.0)]);
    s.join("a", vec![dot("1", 5.0), dot("3", 5.0)]);

    assert_eq!(keys(&s), vec!["a/1", "a/3", "b/1", "b/2"]);
    let stats = s.join("b", Vec::new());
    assert_eq!(stats.exited, 2);
    assert_eq!(keys(&s), vec!["a/1", "a/3"]);
}

#[test]
fn marks_follow_data_order() {
    let mut s = Surface::new("layer");
    s.join("dot", vec![dot("a", 0.0), dot("b", 0.0), dot("c", 0.0)]);
    s.join("dot", vec![dot("c", 0.0), dot("a", 0.0), dot("b", 0.0)]);
    assert_eq!(keys(&s), vec!["dot/c", "dot/a", "dot/b"]);
}

#[test]
fn repeated_keys_get_their_own_marks() {
    let mut s = Surface::new("layer");
    let stats = s.join("dot", vec![dot("7", 0.0), dot("7", 1.0), dot("7", 2.0)]);
    assert_eq!(stats.entered, 3);
    assert_eq!(keys(&s), vec!["dot/7", "dot/7#1", "dot/7#2"]);

    let again = s.join("dot", vec![dot("7", 0.0), dot("7", 1.0), dot("7", 2.0)]);
    assert_eq!((again.entered, again.updated), (0, 3));
}

fn counting(key: &str, cx: f64, moves: &Rc<Cell<u32>>, leaves: &Rc<Cell<u32>>) -> MarkSpec {
    let (m, l) = (Rc::clone(moves), Rc::clone(leaves));
    dot(key, cx).on_hover(Rc::new(move |_| m.set(m.get() + 1)), Rc::new(move || l.set(l.get() + 1)))
}

#[test]
fn pointer_dispatch_fires_move_then_leave() {
    let moves = Rc::new(Cell::new(0));
    let leaves = Rc::new(Cell::new(0));
    let mut s = Surface::new("layer");
    s.join("dot", vec![counting("a", 0.0, &moves, &leaves), counting("b", 100.0, &moves, &leaves)]);

    s.pointer_move(&PointerEvent::new(1.0, 1.0));
    s.pointer_move(&PointerEvent::new(2.0, 0.0));
    assert_eq!((moves.get(), leaves.get()), (2, 0));

    s.pointer_move(&PointerEvent::new(100.0, 0.0));
    assert_eq!((moves.get(), leaves.get()), (3, 1));

    s.pointer_move(&PointerEvent::new(50.0, 50.0));
    assert_eq!(leaves.get(), 2);

    s.pointer_leave();
    assert_eq!(leaves.get(), 2, "nothing hovered, nothing to leave");
}

#[test]
fn hit_test_prefers_topmost_interactive_mark() {
    let moves = Rc::new(Cell::new(0));
    let leaves = Rc::new(Cell::new(0));
    let mut s = Surface::new("layer");
    s.join("under", vec![counting("u", 0.0, &moves, &leaves)]);
    s.join("over", vec![counting("o", 1.0, &moves, &leaves)]);
    s.join("static", vec![dot("s", 0.5)]);

    let hit = s.hit_test(0.5, 0.0).map(|m| (m.class, m.key.clone()));
    assert_eq!(hit, Some(("over", "o".to_string())));
}

#[test]
fn paths_are_never_hit() {
    let mut s = Surface::new("lines");
    let spec = MarkSpec::new("p", Shape::Path { points: vec![(0.0, 0.0), (10.0, 10.0)] }, Style::stroked(Color::RED, 2.0))
        .on_hover(Rc::new(|_| {}), Rc::new(|| {}));
    s.join("line", vec![spec]);
    assert!(s.hit_test(0.0, 0.0).is_none());
}
