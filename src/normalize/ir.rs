use crate::foundation::ids::{PanelIdx, PhaseIdx};
use kurbo::Vec2;

/// Compact runtime form of a validated scene. All names are resolved to
/// typed indices and all documented defaults are substituted; per-frame code
/// never consults the boundary `Def` types.
#[derive(Debug, Clone)]
pub(crate) struct SceneIR {
    pub(crate) panels: Vec<String>,
    pub(crate) phases: Vec<PhaseIR>,
    pub(crate) layers: Vec<LayerIR>,
    pub(crate) globals: Vec<GlobalIR>,
    pub(crate) keep_outs: Vec<KeepOutIR>,
    pub(crate) tunables: Tunables,
}

#[derive(Debug, Clone)]
pub(crate) struct PhaseIR {
    pub(crate) name: String,
    pub(crate) start: PanelIdx,
    pub(crate) end: PanelIdx,
    pub(crate) end_fraction: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct LayerIR {
    pub(crate) id: String,
    pub(crate) asset: Option<String>,
    pub(crate) panel: PanelIdx,
    pub(crate) phase: PhaseIdx,
    /// Declaration index; seeds the settle oscillation offset and default
    /// drift signs.
    pub(crate) index: usize,
    /// Percent within the owning panel box.
    pub(crate) start: Vec2,
    pub(crate) end: Vec2,
    /// Fraction of viewport width.
    pub(crate) size: f64,
    pub(crate) speed: f64,
    pub(crate) fade_start: f64,
    pub(crate) fade_end: f64,
    /// Depth order, clamped to `1..=6`.
    pub(crate) depth: u8,
    /// Per-axis drift signs (`-1` or `+1`).
    pub(crate) drift: Vec2,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum KeepOutShapeIR {
    Circle {
        /// Fraction of the smaller viewport dimension.
        radius: f64,
    },
    Rect {
        /// Fraction of the panel width.
        width: f64,
        /// Fraction of the panel height.
        height: f64,
    },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct KeepOutIR {
    pub(crate) panel: PanelIdx,
    /// Percent within the owning panel box.
    pub(crate) center: Vec2,
    pub(crate) shape: KeepOutShapeIR,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum FadeIR {
    In { edge0: f64, edge1: f64 },
    Out { edge0: f64, edge1: f64 },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PinIR {
    pub(crate) panel: PanelIdx,
    pub(crate) fraction: f64,
    pub(crate) band: (f64, f64),
}

#[derive(Debug, Clone)]
pub(crate) struct GlobalIR {
    pub(crate) id: String,
    pub(crate) phase: PhaseIdx,
    pub(crate) accel: f64,
    pub(crate) scale_from: f64,
    pub(crate) scale_to: f64,
    pub(crate) fade: Option<FadeIR>,
    pub(crate) rise: f64,
    pub(crate) pin: Option<PinIR>,
}

/// Runtime copy of [`crate::scene::model::TunablesDef`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tunables {
    pub(crate) circle_margin: f64,
    pub(crate) rect_margin: f64,
    pub(crate) rect_nudge_up: f64,
    pub(crate) rect_nudge_down: f64,
    pub(crate) keep_below_bias: f64,
    pub(crate) keep_below_min_offset: f64,
    pub(crate) drift_span_x: f64,
    pub(crate) drift_span_y: f64,
    pub(crate) settle_base: f64,
    pub(crate) settle_depth_gain: f64,
    pub(crate) min_width_px: f64,
    pub(crate) max_width_px: f64,
    pub(crate) aspect: f64,
}
