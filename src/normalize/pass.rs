use crate::foundation::ids::{PanelIdx, PhaseIdx};
use crate::normalize::ir::{
    FadeIR, GlobalIR, KeepOutIR, KeepOutShapeIR, LayerIR, PhaseIR, PinIR, SceneIR, Tunables,
};
use crate::scene::model::{
    DriftDef, FadeDef, GlobalDef, KeepOutDef, LayerDef, SceneDef, TunablesDef,
};
use crate::schema::validate::{SchemaErrors, validate_scene};
use kurbo::Vec2;
use std::collections::HashMap;

const DEFAULT_START: f64 = 50.0;
const DEFAULT_SIZE: f64 = 0.16;
const DEFAULT_SPEED: f64 = 1.0;
const DEFAULT_FADE_START: f64 = 0.10;
const DEFAULT_FADE_END: f64 = 0.92;
const DEFAULT_DEPTH: u8 = 1;
const MAX_DEPTH: u8 = 6;

/// Lower a validated [`SceneDef`] into [`SceneIR`].
///
/// Structural problems surface as [`SchemaErrors`]. Numeric attribute
/// problems never do: each one is replaced by its documented default so a
/// single malformed layer cannot block the rest of the scene.
#[tracing::instrument(skip_all)]
pub(crate) fn normalize(def: &SceneDef) -> Result<SceneIR, SchemaErrors> {
    validate_scene(def)?;

    let panel_idx: HashMap<&str, PanelIdx> = def
        .panels
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), PanelIdx(i as u32)))
        .collect();
    let phase_idx: HashMap<&str, PhaseIdx> = def
        .phases
        .iter()
        .enumerate()
        .map(|(i, p)| (p.name.as_str(), PhaseIdx(i as u32)))
        .collect();

    let phases = def
        .phases
        .iter()
        .map(|p| PhaseIR {
            name: p.name.clone(),
            start: panel_idx[p.start_panel.as_str()],
            end: panel_idx[p.end_panel.as_str()],
            end_fraction: p.end_fraction,
        })
        .collect();

    let layers = def
        .layers
        .iter()
        .enumerate()
        .map(|(i, l)| normalize_layer(l, i, &panel_idx, &phase_idx))
        .collect();

    let globals = def
        .globals
        .iter()
        .map(|g| normalize_global(g, &panel_idx, &phase_idx))
        .collect();

    let keep_outs = def
        .keep_outs
        .iter()
        .map(|k| normalize_keep_out(k, &panel_idx))
        .collect();

    Ok(SceneIR {
        panels: def.panels.clone(),
        phases,
        layers,
        globals,
        keep_outs,
        tunables: normalize_tunables(&def.tunables),
    })
}

fn normalize_layer(
    def: &LayerDef,
    index: usize,
    panel_idx: &HashMap<&str, PanelIdx>,
    phase_idx: &HashMap<&str, PhaseIdx>,
) -> LayerIR {
    let start_x = def.start_x.unwrap_or(DEFAULT_START);
    let start_y = def.start_y.unwrap_or(DEFAULT_START);
    // An absent end means the layer holds its start position and only
    // drifts/fades.
    let end_x = def.end_x.unwrap_or(start_x);
    let end_y = def.end_y.unwrap_or(start_y);

    let depth = def
        .depth
        .map(|d| (d.round() as i64).clamp(DEFAULT_DEPTH as i64, MAX_DEPTH as i64) as u8)
        .unwrap_or(DEFAULT_DEPTH);

    LayerIR {
        id: def.id.clone(),
        asset: def.asset.clone(),
        panel: panel_idx[def.panel.as_str()],
        phase: def
            .phase
            .as_deref()
            .map(|p| phase_idx[p])
            .unwrap_or(PhaseIdx(0)),
        index,
        start: Vec2::new(start_x, start_y),
        end: Vec2::new(end_x, end_y),
        size: def.size.unwrap_or(DEFAULT_SIZE).max(0.0),
        speed: def.speed.unwrap_or(DEFAULT_SPEED),
        fade_start: def.fade_start.unwrap_or(DEFAULT_FADE_START),
        fade_end: def.fade_end.unwrap_or(DEFAULT_FADE_END),
        depth,
        drift: drift_signs(def.drift, index),
    }
}

/// Resolve drift signs, deriving deterministic alternating directions from
/// the declaration index for unset axes. Explicit zero also falls back so a
/// layer never silently loses its clearing motion.
fn drift_signs(drift: DriftDef, index: usize) -> Vec2 {
    let default_x = if index % 2 == 0 { -1.0 } else { 1.0 };
    let default_y = if index % 3 == 0 { -1.0 } else { 1.0 };
    let sign = |v: Option<f64>, default: f64| match v {
        Some(v) if v != 0.0 && v.is_finite() => v.signum(),
        _ => default,
    };
    Vec2::new(sign(drift.x, default_x), sign(drift.y, default_y))
}

fn normalize_global(
    def: &GlobalDef,
    panel_idx: &HashMap<&str, PanelIdx>,
    phase_idx: &HashMap<&str, PhaseIdx>,
) -> GlobalIR {
    GlobalIR {
        id: def.id.clone(),
        phase: def
            .phase
            .as_deref()
            .map(|p| phase_idx[p])
            .unwrap_or(PhaseIdx(0)),
        accel: if def.accel.is_finite() && def.accel > 0.0 {
            def.accel
        } else {
            1.0
        },
        scale_from: def.scale.from,
        scale_to: def.scale.to,
        fade: def.fade.map(|f| match f {
            FadeDef::In { edge0, edge1 } => FadeIR::In { edge0, edge1 },
            FadeDef::Out { edge0, edge1 } => FadeIR::Out { edge0, edge1 },
        }),
        rise: def.rise,
        pin: def.pin.as_ref().map(|p| PinIR {
            panel: panel_idx[p.panel.as_str()],
            fraction: p.fraction,
            band: (p.band[0].min(p.band[1]), p.band[0].max(p.band[1])),
        }),
    }
}

fn normalize_keep_out(def: &KeepOutDef, panel_idx: &HashMap<&str, PanelIdx>) -> KeepOutIR {
    match def {
        KeepOutDef::Circle {
            panel,
            center,
            radius,
        } => KeepOutIR {
            panel: panel_idx[panel.as_str()],
            center: Vec2::new(center.x, center.y),
            shape: KeepOutShapeIR::Circle {
                radius: radius.max(0.0),
            },
        },
        KeepOutDef::Rect {
            panel,
            center,
            width,
            height,
        } => KeepOutIR {
            panel: panel_idx[panel.as_str()],
            center: Vec2::new(center.x, center.y),
            shape: KeepOutShapeIR::Rect {
                width: width.max(0.0),
                height: height.max(0.0),
            },
        },
    }
}

pub(crate) fn normalize_tunables(def: &TunablesDef) -> Tunables {
    Tunables {
        circle_margin: def.circle_margin.max(0.0),
        rect_margin: def.rect_margin.max(0.0),
        rect_nudge_up: def.rect_nudge_up,
        rect_nudge_down: def.rect_nudge_down,
        keep_below_bias: def.keep_below_bias.max(1.0),
        keep_below_min_offset: def.keep_below_min_offset.max(0.0),
        drift_span_x: def.drift_span_x,
        drift_span_y: def.drift_span_y,
        settle_base: def.settle_base,
        settle_depth_gain: def.settle_depth_gain,
        min_width_px: def.min_width_px.max(0.0),
        max_width_px: def.max_width_px.max(def.min_width_px.max(0.0)),
        aspect: def.aspect.max(0.0),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/pass.rs"]
mod tests;
