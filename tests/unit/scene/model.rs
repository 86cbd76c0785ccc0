use super::*;
use serde_json::json;

fn layer(v: serde_json::Value) -> LayerDef {
    serde_json::from_value(v).unwrap()
}

#[test]
fn lenient_numerics_accept_numbers_and_strings() {
    let l = layer(json!({
        "id": "c1",
        "panel": "p1",
        "start_x": 12.5,
        "start_y": "72",
        "size": "0.2",
    }));
    assert_eq!(l.start_x, Some(12.5));
    assert_eq!(l.start_y, Some(72.0));
    assert_eq!(l.size, Some(0.2));
}

#[test]
fn unparsable_numeric_becomes_default_marker() {
    let l = layer(json!({
        "id": "c1",
        "panel": "p1",
        "start_x": "wide",
        "speed": "inf",
        "fade_end": null,
    }));
    assert_eq!(l.start_x, None);
    assert_eq!(l.speed, None);
    assert_eq!(l.fade_end, None);
}

#[test]
fn drift_shorthands() {
    let bare = layer(json!({"id": "a", "panel": "p", "drift": -1}));
    assert_eq!(bare.drift.x, Some(-1.0));
    assert_eq!(bare.drift.y, None);

    let arr = layer(json!({"id": "a", "panel": "p", "drift": [1, -1]}));
    assert_eq!(arr.drift.x, Some(1.0));
    assert_eq!(arr.drift.y, Some(-1.0));

    let obj = layer(json!({"id": "a", "panel": "p", "drift": {"y": 1}}));
    assert_eq!(obj.drift.x, None);
    assert_eq!(obj.drift.y, Some(1.0));
}

#[test]
fn keep_out_defaults() {
    let k: KeepOutDef = serde_json::from_value(json!({"circle": {"panel": "p1"}})).unwrap();
    let KeepOutDef::Circle {
        panel,
        center,
        radius,
    } = k
    else {
        panic!("expected circle");
    };
    assert_eq!(panel, "p1");
    assert_eq!(center, Vec2Def { x: 50.0, y: 50.0 });
    assert_eq!(radius, 0.58);

    let k: KeepOutDef = serde_json::from_value(json!({"rect": {"panel": "p1"}})).unwrap();
    let KeepOutDef::Rect { width, height, .. } = k else {
        panic!("expected rect");
    };
    assert_eq!(width, 0.60);
    assert_eq!(height, 0.52);
}

#[test]
fn scale_shorthand_travels_from_one() {
    let g: GlobalDef =
        serde_json::from_value(json!({"id": "sky", "scale": 1.14})).unwrap();
    assert_eq!(g.scale.from, 1.0);
    assert_eq!(g.scale.to, 1.14);
    assert_eq!(g.accel, 1.0);
    assert_eq!(g.rise, 0.0);
}

#[test]
fn fade_edge_defaults() {
    let g: GlobalDef =
        serde_json::from_value(json!({"id": "sky", "fade": {"out": {}}})).unwrap();
    match g.fade {
        Some(FadeDef::Out { edge0, edge1 }) => {
            assert_eq!(edge0, 0.65);
            assert_eq!(edge1, 1.0);
        }
        other => panic!("expected fade out, got {other:?}"),
    }

    let g: GlobalDef =
        serde_json::from_value(json!({"id": "lake", "fade": {"in": {}}})).unwrap();
    match g.fade {
        Some(FadeDef::In { edge0, edge1 }) => {
            assert_eq!(edge0, 0.55);
            assert_eq!(edge1, 0.90);
        }
        other => panic!("expected fade in, got {other:?}"),
    }
}

#[test]
fn center_accepts_array_and_object() {
    let a: Vec2Def = serde_json::from_value(json!([30, 40])).unwrap();
    assert_eq!(a, Vec2Def { x: 30.0, y: 40.0 });
    let o: Vec2Def = serde_json::from_value(json!({"x": 30, "y": 40})).unwrap();
    assert_eq!(o, a);
}

#[test]
fn minimal_scene_gets_default_tunables_and_version() {
    let def: SceneDef = serde_json::from_value(json!({
        "panels": ["p1"],
        "phases": [{"name": "main", "start_panel": "p1", "end_panel": "p1"}],
    }))
    .unwrap();
    assert_eq!(def.version, "1");
    assert_eq!(def.phases[0].end_fraction, 0.5);
    assert_eq!(def.tunables.circle_margin, 42.0);
    assert_eq!(def.tunables.min_width_px, 76.0);
    assert_eq!(def.tunables.max_width_px, 560.0);
    assert_eq!(def.tunables.aspect, 0.6);
    assert!(def.layers.is_empty());
}
