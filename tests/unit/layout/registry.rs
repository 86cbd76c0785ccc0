use super::*;
use crate::normalize::pass::normalize_tunables;
use crate::scene::model::TunablesDef;
use kurbo::Vec2;

fn layer(size: f64) -> LayerIR {
    LayerIR {
        id: "l".to_owned(),
        asset: None,
        panel: crate::foundation::ids::PanelIdx(0),
        phase: crate::foundation::ids::PhaseIdx(0),
        index: 0,
        start: Vec2::new(50.0, 50.0),
        end: Vec2::new(50.0, 50.0),
        size,
        speed: 1.0,
        fade_start: 0.10,
        fade_end: 0.92,
        depth: 1,
        drift: Vec2::new(1.0, 1.0),
    }
}

fn snapshot(width: f64) -> ViewportSnapshot {
    ViewportSnapshot {
        width,
        height: 720.0,
        scroll_offset: 0.0,
    }
}

#[test]
fn classify_breakpoint_boundaries() {
    assert_eq!(Breakpoint::classify(320.0), Breakpoint::Narrow);
    assert_eq!(Breakpoint::classify(480.0), Breakpoint::Narrow);
    assert_eq!(Breakpoint::classify(481.0), Breakpoint::Medium);
    assert_eq!(Breakpoint::classify(900.0), Breakpoint::Medium);
    assert_eq!(Breakpoint::classify(901.0), Breakpoint::Wide);
    assert_eq!(Breakpoint::classify(1599.0), Breakpoint::Wide);
    assert_eq!(Breakpoint::classify(1600.0), Breakpoint::UltraWide);
}

#[test]
fn narrow_viewports_enlarge_layers() {
    assert!(Breakpoint::Narrow.size_multiplier() > Breakpoint::Medium.size_multiplier());
    assert!(Breakpoint::Medium.size_multiplier() > Breakpoint::Wide.size_multiplier());
    assert!(Breakpoint::UltraWide.size_multiplier() > Breakpoint::Wide.size_multiplier());
}

#[test]
fn derived_width_stays_within_bounds_at_every_breakpoint() {
    let tunables = normalize_tunables(&TunablesDef::default());
    let layers = vec![layer(0.01), layer(0.16), layer(0.9)];
    let mut registry = LayerRegistry::default();

    for width in [240.0, 480.0, 700.0, 900.0, 1280.0, 1600.0, 3840.0] {
        registry.rebuild(&layers, &tunables, &snapshot(width));
        for i in 0..layers.len() {
            let s = registry.size(LayerIdx(i as u32));
            assert!(
                (76.0..=560.0).contains(&s.width_px),
                "width {} out of bounds at viewport {width}",
                s.width_px
            );
            assert!((s.height_px - s.width_px * 0.6).abs() < 1e-9);
        }
    }
}

#[test]
fn rebuild_recomputes_rather_than_caches() {
    let tunables = normalize_tunables(&TunablesDef::default());
    let layers = vec![layer(0.16)];
    let mut registry = LayerRegistry::default();

    registry.rebuild(&layers, &tunables, &snapshot(1000.0));
    let wide = registry.size(LayerIdx(0)).width_px;
    assert!((wide - 160.0).abs() < 1e-9);

    registry.rebuild(&layers, &tunables, &snapshot(400.0));
    let narrow = registry.size(LayerIdx(0)).width_px;
    assert!((narrow - 400.0 * 0.16 * 1.18).abs() < 1e-9);
    assert_ne!(wide, narrow);
}
