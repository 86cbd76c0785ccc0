use super::*;
use crate::foundation::ids::{PanelIdx, PhaseIdx};
use crate::geometry::viewport::PanelAnchor;
use crate::normalize::pass::normalize_tunables;
use crate::scene::model::TunablesDef;

fn layer(index: usize, drift_x: f64) -> LayerIR {
    LayerIR {
        id: format!("l{index}"),
        asset: None,
        panel: PanelIdx(0),
        phase: PhaseIdx(0),
        index,
        start: Vec2::new(20.0, 30.0),
        end: Vec2::new(60.0, 70.0),
        size: 0.16,
        speed: 1.0,
        fade_start: 0.10,
        fade_end: 0.92,
        depth: 2,
        drift: Vec2::new(drift_x, 1.0),
    }
}

struct Fixture {
    snapshot: ViewportSnapshot,
    anchors: AnchorTable,
    registry: LayerRegistry,
    tunables: Tunables,
}

impl Fixture {
    fn new(layers: &[LayerIR]) -> Self {
        let snapshot = ViewportSnapshot {
            width: 1000.0,
            height: 800.0,
            scroll_offset: 0.0,
        };
        let anchors = AnchorTable::from_anchors(vec![PanelAnchor {
            top: 0.0,
            height: 800.0,
            resolved: true,
        }]);
        let tunables = normalize_tunables(&TunablesDef::default());
        let mut registry = LayerRegistry::default();
        registry.rebuild(layers, &tunables, &snapshot);
        Self {
            snapshot,
            anchors,
            registry,
            tunables,
        }
    }

    fn ctx(&self) -> LayerEvalCtx<'_> {
        LayerEvalCtx {
            snapshot: &self.snapshot,
            anchors: &self.anchors,
            registry: &self.registry,
            keep_outs: &[],
            tunables: &self.tunables,
            settle_clock: 0.0,
        }
    }
}

#[test]
fn position_interpolates_between_start_and_end_percent() {
    let layers = [layer(0, 1.0)];
    let fx = Fixture::new(&layers);
    let state = eval_layer(&layers[0], 0.5, &fx.ctx());
    // Midpoint percent (40, 50) of a 1000 x 800 panel box.
    assert!((state.anchor.x - 400.0).abs() < 1e-9);
    assert!((state.anchor.y - 400.0).abs() < 1e-9);
}

#[test]
fn resting_state_has_no_displacement() {
    let layers = [layer(0, 1.0)];
    let fx = Fixture::new(&layers);
    let state = eval_layer(&layers[0], 0.0, &fx.ctx());
    assert!(state.offset.x.abs() < 1e-9);
    assert!(state.offset.y.abs() < 1e-9);
    assert_eq!(state.opacity, 1.0);
}

#[test]
fn fade_runs_from_one_to_zero_over_the_fade_window() {
    let layers = [layer(0, 1.0)];
    let fx = Fixture::new(&layers);
    assert_eq!(eval_layer(&layers[0], 0.0, &fx.ctx()).opacity, 1.0);
    let mid = eval_layer(&layers[0], 0.5, &fx.ctx()).opacity;
    assert!(mid > 0.0 && mid < 1.0);
    assert_eq!(eval_layer(&layers[0], 1.0, &fx.ctx()).opacity, 0.0);
}

#[test]
fn opposite_drift_signs_mirror_horizontal_offsets() {
    let layers = [layer(0, 1.0), layer(0, -1.0)];
    let fx = Fixture::new(&layers);
    let plus = eval_layer(&layers[0], 1.0, &fx.ctx());
    let minus = eval_layer(&layers[1], 1.0, &fx.ctx());
    assert!((plus.offset.x + minus.offset.x).abs() < 1e-9);
    assert!(plus.offset.x > 0.0);
    // Full-progress horizontal drift is speed * vw * drift span.
    assert!((plus.offset.x - 420.0).abs() < 1e-9);
}

#[test]
fn faster_layers_drift_further() {
    let mut slow = layer(0, 1.0);
    slow.speed = 0.5;
    let fast = layer(0, 1.0);
    let layers = [slow, fast];
    let fx = Fixture::new(&layers);
    let s = eval_layer(&layers[0], 0.8, &fx.ctx());
    let f = eval_layer(&layers[1], 0.8, &fx.ctx());
    assert!(f.offset.x.abs() > s.offset.x.abs());
}

#[test]
fn settle_amplitude_grows_with_depth() {
    let mut shallow = layer(0, 1.0);
    shallow.depth = 1;
    let mut deep = layer(0, 1.0);
    deep.depth = 6;
    // Quarter progress puts the oscillation at its first peak.
    let layers = [shallow, deep];
    let fx = Fixture::new(&layers);
    let s = eval_layer(&layers[0], 0.25, &fx.ctx());
    let d = eval_layer(&layers[1], 0.25, &fx.ctx());
    let drift_y = 1.0 * 0.25 * (800.0 * fx.tunables.drift_span_y);
    let s_settle = s.offset.y - drift_y;
    let d_settle = d.offset.y - drift_y;
    assert!((s_settle - 10.0).abs() < 1e-9);
    assert!((d_settle - 20.0).abs() < 1e-9);
}

#[test]
fn derived_size_rides_along() {
    let layers = [layer(0, 1.0)];
    let fx = Fixture::new(&layers);
    let state = eval_layer(&layers[0], 0.3, &fx.ctx());
    assert!((state.width - 160.0).abs() < 1e-9);
    assert!((state.height - 96.0).abs() < 1e-9);
}

#[test]
fn keep_out_applies_to_the_owning_panel_only() {
    let layers = [layer(0, 1.0)];
    let fx = Fixture::new(&layers);
    let region = crate::eval::keepout::KeepOutPx {
        panel: PanelIdx(1),
        center: kurbo::Point::new(400.0, 400.0),
        shape: crate::eval::keepout::ShapePx::Circle { radius: 300.0 },
    };
    let ctx = LayerEvalCtx {
        keep_outs: std::slice::from_ref(&region),
        ..fx.ctx()
    };
    let state = eval_layer(&layers[0], 0.5, &ctx);
    assert!((state.anchor.x - 400.0).abs() < 1e-9);
    assert!((state.anchor.y - 400.0).abs() < 1e-9);
}
