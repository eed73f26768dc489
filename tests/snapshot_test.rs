//! Tests for cycle-safe cloning and stringification.

use serde_json::json;
use strictly_audited::{
    CIRCULAR, Live, MAX_DEPTH, RawView, SnapshotError, TOO_DEEP, safe_clone, stringify,
    stringify_pretty, unserializable,
};

/// View over a shared object, standing in for a reactive binding.
struct Binding(Live);

impl RawView for Binding {
    fn raw(&self) -> Result<Live, SnapshotError> {
        Ok(self.0.clone())
    }
}

/// View whose source has gone away.
struct Detached;

impl RawView for Detached {
    fn raw(&self) -> Result<Live, SnapshotError> {
        Err(SnapshotError::view("source dropped"))
    }

    fn kind(&self) -> &'static str {
        "binding"
    }
}

#[test]
fn test_leaves_pass_through() {
    assert_eq!(safe_clone(&Live::Null), json!(null));
    assert_eq!(safe_clone(&Live::from(true)), json!(true));
    assert_eq!(safe_clone(&Live::from(2.5)), json!(2.5));
    assert_eq!(safe_clone(&Live::from("x")), json!("x"));
}

#[test]
fn test_arrays_keep_order_and_length() {
    let items = Live::array([Live::from(3), Live::from("b"), Live::Null]);
    assert_eq!(safe_clone(&items), json!([3, "b", null]));
}

#[test]
fn test_cells_and_views_are_unwrapped() {
    let board = Live::array([Live::from("X"), Live::Null]);
    let state = Live::object([
        ("board", Live::cell(board.clone())),
        ("mirror", Live::view(Binding(board))),
        ("turn", Live::cell(Live::cell("O"))),
    ]);
    assert_eq!(
        safe_clone(&state),
        json!({ "board": ["X", null], "mirror": ["X", null], "turn": "O" })
    );
}

#[test]
fn test_self_reference_terminates() {
    let node = Live::object([("id", Live::from(1))]);
    node.insert("me", node.clone());
    assert_eq!(safe_clone(&node), json!({ "id": 1, "me": CIRCULAR }));
}

#[test]
fn test_indirect_cycle_terminates() {
    let a = Live::object([("name", Live::from("a"))]);
    let b = Live::array([a.clone()]);
    a.insert("children", b);
    assert_eq!(
        safe_clone(&a),
        json!({ "name": "a", "children": [CIRCULAR] })
    );
}

#[test]
fn test_cycle_through_view_terminates() {
    let root = Live::object::<&str>([]);
    root.insert("view", Live::view(Binding(root.clone())));
    assert_eq!(safe_clone(&root), json!({ "view": CIRCULAR }));
}

#[test]
fn test_shared_sibling_is_not_circular() {
    let shared = Live::array([Live::from(1)]);
    let parent = Live::object([("left", shared.clone()), ("right", shared)]);
    assert_eq!(safe_clone(&parent), json!({ "left": [1], "right": [1] }));
}

#[test]
fn test_failing_field_is_isolated() {
    let state = Live::object([
        ("ok", Live::from(1)),
        ("gone", Live::view(Detached)),
        ("handle", Live::Opaque("FileHandle")),
    ]);
    assert_eq!(
        safe_clone(&state),
        json!({
            "ok": 1,
            "gone": unserializable("binding"),
            "handle": "[Unserializable:FileHandle]",
        })
    );
}

#[test]
fn test_borrowed_node_becomes_sentinel() {
    let inner = Live::cell(5);
    let state = Live::object([("value", inner.clone())]);
    let Live::Cell(rc) = &inner else {
        unreachable!()
    };
    let _guard = rc.borrow_mut();
    assert_eq!(safe_clone(&state), json!({ "value": "[Unserializable:cell]" }));
}

#[test]
fn test_clone_is_detached_from_source() {
    let cell = Live::cell(1);
    let copy = safe_clone(&cell);
    assert!(cell.replace(Live::from(2)));
    assert_eq!(copy, json!(1));
    assert_eq!(safe_clone(&cell), json!(2));
}

#[test]
fn test_stringify_cyclic_graph() {
    let node = Live::object([("n", Live::from(1))]);
    node.insert("next", node.clone());
    assert_eq!(stringify(&node), r#"{"n":1,"next":"[Circular]"}"#);
}

#[test]
fn test_stringify_pretty_parses_back() {
    let node = Live::object([("xs", Live::array([Live::from(1), Live::from(2)]))]);
    let text = stringify_pretty(&node);
    assert!(text.contains('\n'));
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!({ "xs": [1, 2] }));
}

#[test]
fn test_capture_of_serializable_value() {
    #[derive(serde::Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }
    let live = Live::capture(&Point { x: 1, y: -1 });
    assert_eq!(safe_clone(&live), json!({ "x": 1, "y": -1 }));
}

/// Wraps `1` in `levels` single-item objects under the key `"next"`.
fn chain(levels: usize) -> Live {
    (0..levels).fold(Live::from(1), |inner, _| Live::object([("next", inner)]))
}

/// Unlinks the chain level by level so dropping it never recurses deeply.
fn unlink(mut value: Live) {
    loop {
        let next = match &value {
            Live::Object(entries) => entries.borrow_mut().remove("next"),
            _ => None,
        };
        match next {
            Some(inner) => value = inner,
            None => break,
        }
    }
}

#[test]
fn test_very_deep_chain_is_cut_off() {
    let value = chain(10_000);

    let plain = safe_clone(&value);
    let mut levels = 0;
    let mut cursor = &plain;
    while let Some(next) = cursor.get("next") {
        levels += 1;
        cursor = next;
    }
    assert_eq!(levels, MAX_DEPTH);
    assert_eq!(cursor, &json!(TOO_DEEP));

    let text = stringify(&value);
    assert!(text.contains(TOO_DEEP));
    unlink(value);
}
