use crate::foundation::ids::{GlobalIdx, LayerIdx};
use kurbo::{Affine, Point, Vec2};

/// Per-layer output state for one frame.
///
/// Positions are pixels within the layer's owning panel box. The composed
/// transform places the element center at `anchor + offset`; hosts that
/// manage positioning themselves can use the parts instead. No identity
/// beyond the current frame.
#[derive(Clone, Debug, serde::Serialize)]
pub struct LayerState {
    /// Which layer this state belongs to.
    pub layer: LayerIdx,
    /// Resolved anchor position (after keep-out avoidance), in panel pixels.
    pub anchor: Point,
    /// Drift plus settle displacement from the anchor.
    pub offset: Vec2,
    /// Derived pixel width at the current breakpoint.
    pub width: f64,
    /// Derived pixel height at the current breakpoint.
    pub height: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Depth order (stacking hint), `1..=6`.
    pub depth: u8,
    /// Composed center-anchored transform.
    pub transform: Affine,
}

/// Per-global output state for one frame.
#[derive(Clone, Debug, serde::Serialize)]
pub struct GlobalState {
    /// Which global element this state belongs to.
    pub global: GlobalIdx,
    /// Uniform scale factor.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Translation in viewport pixels (rise and/or pin).
    pub translate: Vec2,
    /// Composed center-anchored transform (translation then scale).
    pub transform: Affine,
}

/// One frame's complete output batch.
///
/// Emitted through [`crate::render::sink::RenderSink`] in one call so hosts
/// never interleave geometry reads with state application.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct SceneFrame {
    /// Scroll offset the batch was computed for.
    pub scroll_offset: f64,
    /// Layer states in declaration order.
    pub layers: Vec<LayerState>,
    /// Global states in declaration order.
    pub globals: Vec<GlobalState>,
}

impl SceneFrame {
    pub(crate) fn reset(&mut self, scroll_offset: f64) {
        self.scroll_offset = scroll_offset;
        self.layers.clear();
        self.globals.clear();
    }
}
