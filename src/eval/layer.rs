use crate::eval::keepout::{self, KeepOutPx};
use crate::foundation::ids::LayerIdx;
use crate::foundation::math::{clamp01, lerp, smoothstep};
use crate::geometry::viewport::{AnchorTable, ViewportSnapshot};
use crate::layout::registry::LayerRegistry;
use crate::normalize::ir::{LayerIR, Tunables};
use crate::render::state::LayerState;
use kurbo::{Affine, Point, Vec2};
use std::f64::consts::PI;

/// Cached per-frame inputs for layer evaluation. Everything here is plain
/// numeric state; no layout reads happen past this point.
pub(crate) struct LayerEvalCtx<'a> {
    pub(crate) snapshot: &'a ViewportSnapshot,
    pub(crate) anchors: &'a AnchorTable,
    pub(crate) registry: &'a LayerRegistry,
    pub(crate) keep_outs: &'a [KeepOutPx],
    pub(crate) tunables: &'a Tunables,
    /// Extra settle-oscillation angle, host-advanced in the perpetual mode;
    /// `0` in the default scroll-driven mode.
    pub(crate) settle_clock: f64,
}

/// Evaluate one layer at the given owning-phase progress.
///
/// Total: any combination of finite inputs yields a state, so one layer can
/// never block the rest of the frame.
pub(crate) fn eval_layer(layer: &LayerIR, progress: f64, ctx: &LayerEvalCtx<'_>) -> LayerState {
    let idx = LayerIdx(layer.index as u32);
    let panel_height = ctx.anchors.get(layer.panel).height;
    let panel_width = ctx.snapshot.width;

    let x_pct = lerp(layer.start.x, layer.end.x, progress);
    let y_pct = lerp(layer.start.y, layer.end.y, progress);
    let candidate = Point::new(x_pct / 100.0 * panel_width, y_pct / 100.0 * panel_height);
    let start_px = Point::new(
        layer.start.x / 100.0 * panel_width,
        layer.start.y / 100.0 * panel_height,
    );

    let anchor = keepout::resolve(candidate, start_px, ctx.keep_outs, layer.panel, ctx.tunables);

    // Clearing motion plus a small settle oscillation. The oscillation is a
    // function of progress and the layer's index offset, so a stopped scroll
    // is a stable resting state.
    let drift = Vec2::new(
        layer.drift.x * layer.speed * progress * (panel_width * ctx.tunables.drift_span_x),
        layer.drift.y * layer.speed * progress * (ctx.snapshot.height * ctx.tunables.drift_span_y),
    );
    let settle = ((progress * 2.0 + layer.index as f64) * PI + ctx.settle_clock).sin()
        * (ctx.tunables.settle_base + f64::from(layer.depth) * ctx.tunables.settle_depth_gain);
    let offset = Vec2::new(drift.x, drift.y + settle);

    let opacity = clamp01(1.0 - smoothstep(layer.fade_start, layer.fade_end, progress));
    let size = ctx.registry.size(idx);

    LayerState {
        layer: idx,
        anchor,
        offset,
        width: size.width_px,
        height: size.height_px,
        opacity,
        depth: layer.depth,
        transform: Affine::translate(anchor.to_vec2() + offset),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/layer.rs"]
mod tests;
