//! End-to-end gesture scenarios: event sequences through the
//! interaction engine against a live store and viewport.

use ic_core::model::{DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH};
use ic_core::{GraphStore, IdeaNode, NodeId, ToolMode, Vec2, ViewportState};
use ic_editor::{
    DragState, HitTarget, InputEvent, InteractionEngine, PointerButton, ViewportController,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn setup_three() -> (GraphStore, ViewportController, InteractionEngine, [NodeId; 3]) {
    let mut store = GraphStore::new();
    let a = store.add_node(IdeaNode::text(Vec2::new(0.0, 0.0), "a"));
    let b = store.add_node(IdeaNode::text(Vec2::new(400.0, 0.0), "b"));
    let c = store.add_node(IdeaNode::text(Vec2::new(800.0, 0.0), "c"));
    (
        store,
        ViewportController::new(),
        InteractionEngine::new(),
        [a, b, c],
    )
}

fn down_on(node: NodeId, pos: Vec2, shift: bool) -> InputEvent {
    InputEvent::PointerDown {
        pos,
        button: PointerButton::Left,
        target: HitTarget::Node(node),
        shift,
    }
}

fn down_on_canvas(pos: Vec2) -> InputEvent {
    InputEvent::PointerDown {
        pos,
        button: PointerButton::Left,
        target: HitTarget::Canvas,
        shift: false,
    }
}

#[test]
fn pressing_unselected_node_replaces_selection() {
    let (mut store, mut vp, mut engine, [a, b, c]) = setup_three();
    store.set_selection([a, c]);

    engine.handle(&mut store, &mut vp, down_on(b, Vec2::new(410.0, 10.0), false));

    assert_eq!(store.selection().len(), 1);
    assert!(store.is_selected(b));
    assert!(!store.is_selected(a));
    assert!(!store.is_selected(c));
    assert!(matches!(engine.drag_state(), DragState::DraggingNodes { .. }));
}

#[test]
fn pressing_selected_node_keeps_group_and_drags_all() {
    let (mut store, mut vp, mut engine, [a, b, _c]) = setup_three();
    store.set_selection([a, b]);

    engine.handle(&mut store, &mut vp, down_on(a, Vec2::new(10.0, 10.0), false));
    assert_eq!(store.selection().len(), 2, "group selection survives");

    engine.handle(
        &mut store,
        &mut vp,
        InputEvent::PointerMove {
            pos: Vec2::new(40.0, 25.0),
        },
    );

    assert_eq!(store.node(a).unwrap().position, Vec2::new(30.0, 15.0));
    assert_eq!(store.node(b).unwrap().position, Vec2::new(430.0, 15.0));
}

#[test]
fn shift_click_toggles_exactly_one_and_starts_no_drag() {
    let (mut store, mut vp, mut engine, [a, b, c]) = setup_three();
    store.set_selection([a, b, c]);

    engine.handle(&mut store, &mut vp, down_on(b, Vec2::new(410.0, 10.0), true));

    assert_eq!(store.selection().len(), 2);
    assert!(!store.is_selected(b));
    assert!(store.is_selected(a) && store.is_selected(c));
    assert_eq!(engine.drag_state(), DragState::Idle);

    // Shift-click again adds it back.
    engine.handle(&mut store, &mut vp, down_on(b, Vec2::new(410.0, 10.0), true));
    assert!(store.is_selected(b));
    assert_eq!(store.selection().len(), 3);
}

#[test]
fn canvas_press_clears_selection_without_moving_anything() {
    let (mut store, mut vp, mut engine, [a, b, _c]) = setup_three();
    store.set_selection([a, b]);

    engine.handle(&mut store, &mut vp, down_on_canvas(Vec2::new(2000.0, 2000.0)));

    assert!(store.selection().is_empty());
    assert_eq!(store.node(a).unwrap().position, Vec2::new(0.0, 0.0));
    assert_eq!(store.node(b).unwrap().position, Vec2::new(400.0, 0.0));
    assert_eq!(engine.drag_state(), DragState::Idle);
    // Marquee is armed from the press point.
    let rect = engine.marquee_rect(Vec2::new(2100.0, 2050.0)).unwrap();
    assert_eq!((rect.x, rect.y), (2000.0, 2000.0));
    assert_eq!((rect.width, rect.height), (100.0, 50.0));
}

#[test]
fn drag_scales_screen_delta_by_zoom() {
    let (mut store, _vp, mut engine, [a, _b, _c]) = setup_three();
    let mut vp = ViewportController::with_state(ViewportState {
        offset: Vec2::ZERO,
        scale: 2.0,
    });
    store.set_selection([a]);

    engine.handle(&mut store, &mut vp, down_on(a, Vec2::new(100.0, 100.0), false));
    engine.handle(
        &mut store,
        &mut vp,
        InputEvent::PointerMove {
            pos: Vec2::new(140.0, 120.0),
        },
    );

    // 40/20 screen pixels at 2x = 20/10 world units.
    assert_eq!(store.node(a).unwrap().position, Vec2::new(20.0, 10.0));
}

#[test]
fn hand_tool_pans_from_canvas_and_ignores_nodes() {
    let (mut store, mut vp, mut engine, [a, _b, _c]) = setup_three();
    engine.set_tool(ToolMode::Hand);

    engine.handle(&mut store, &mut vp, down_on(a, Vec2::new(10.0, 10.0), false));
    assert_eq!(engine.drag_state(), DragState::Idle, "node press ignored");

    engine.handle(&mut store, &mut vp, down_on_canvas(Vec2::new(500.0, 500.0)));
    engine.handle(
        &mut store,
        &mut vp,
        InputEvent::PointerMove {
            pos: Vec2::new(530.0, 480.0),
        },
    );
    engine.handle(
        &mut store,
        &mut vp,
        InputEvent::PointerMove {
            pos: Vec2::new(540.0, 480.0),
        },
    );

    assert_eq!(vp.state().offset, Vec2::new(40.0, -20.0));
    assert_eq!(store.node(a).unwrap().position, Vec2::new(0.0, 0.0));
}

#[test]
fn middle_button_pans_even_over_a_node_in_select_mode() {
    let (mut store, mut vp, mut engine, [a, _b, _c]) = setup_three();
    store.set_selection([a]);

    engine.handle(
        &mut store,
        &mut vp,
        InputEvent::PointerDown {
            pos: Vec2::new(10.0, 10.0),
            button: PointerButton::Middle,
            target: HitTarget::Node(a),
            shift: false,
        },
    );
    engine.handle(
        &mut store,
        &mut vp,
        InputEvent::PointerMove {
            pos: Vec2::new(60.0, 10.0),
        },
    );

    assert_eq!(vp.state().offset, Vec2::new(50.0, 0.0));
    assert_eq!(store.node(a).unwrap().position, Vec2::new(0.0, 0.0));
    assert!(store.is_selected(a), "selection untouched by middle pan");
}

#[test]
fn wheel_zoom_routes_through_viewport() {
    let (mut store, mut vp, mut engine, _ids) = setup_three();

    engine.handle(
        &mut store,
        &mut vp,
        InputEvent::Wheel {
            pos: Vec2::new(640.0, 360.0),
            delta: Vec2::new(0.0, -200.0),
            zoom_modifier: true,
        },
    );
    assert!((vp.scale() - 1.2).abs() < 1e-4);

    engine.handle(
        &mut store,
        &mut vp,
        InputEvent::Wheel {
            pos: Vec2::new(640.0, 360.0),
            delta: Vec2::new(15.0, 30.0),
            zoom_modifier: false,
        },
    );
    // Pan leaves scale alone.
    assert!((vp.scale() - 1.2).abs() < 1e-4);
}

#[test]
fn pointer_up_always_returns_to_idle() {
    let (mut store, mut vp, mut engine, [a, _b, _c]) = setup_three();

    engine.handle(&mut store, &mut vp, down_on(a, Vec2::new(10.0, 10.0), false));
    assert!(matches!(engine.drag_state(), DragState::DraggingNodes { .. }));

    engine.handle(
        &mut store,
        &mut vp,
        InputEvent::PointerUp {
            pos: Vec2::new(10.0, 10.0),
        },
    );
    assert_eq!(engine.drag_state(), DragState::Idle);

    // A move after release does nothing.
    engine.handle(
        &mut store,
        &mut vp,
        InputEvent::PointerMove {
            pos: Vec2::new(999.0, 999.0),
        },
    );
    assert_eq!(store.node(a).unwrap().position, Vec2::new(0.0, 0.0));
}

#[test]
fn add_node_lands_near_world_center_and_becomes_sole_selection() {
    let mut store = GraphStore::new();
    let mut engine = InteractionEngine::new();
    engine.set_tool(ToolMode::Hand);
    let vp = ViewportController::with_state(ViewportState {
        offset: Vec2::new(-100.0, 60.0),
        scale: 2.0,
    });
    let mut rng = StdRng::seed_from_u64(7);

    let screen_center = Vec2::new(640.0, 360.0);
    let id = engine.add_node_at(&mut store, &vp, screen_center, &mut rng);

    let node = store.node(id).unwrap();
    // World center is ((640+100)/2, (360-60)/2) = (370, 150); the node's
    // top-left sits half a default size up-left of it, within scatter.
    let expected = Vec2::new(
        370.0 - DEFAULT_NODE_WIDTH / 2.0,
        150.0 - DEFAULT_NODE_HEIGHT / 2.0,
    );
    assert!((node.position.x - expected.x).abs() <= 20.0);
    assert!((node.position.y - expected.y).abs() <= 20.0);
    assert!(node.content.is_empty());

    assert_eq!(store.selection().len(), 1);
    assert!(store.is_selected(id));
    assert_eq!(engine.tool(), ToolMode::Select, "snaps back for editing");
}
