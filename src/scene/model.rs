use serde::{Deserialize, Serialize};

/// Lenient numeric field: accepts a JSON number or a numeric string (the
/// declarative source feeds attribute strings through untouched). A value
/// that fails to parse, or is non-finite, deserializes to `None` so the
/// documented per-field default is substituted during normalization;
/// setup never aborts over one bad attribute.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(f64),
        Str(String),
        Other(serde::de::IgnoredAny),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Num(v) if v.is_finite() => Ok(Some(v)),
        Repr::Num(_) => Ok(None),
        Repr::Str(s) => {
            let parsed = s.trim().parse::<f64>().ok().filter(|v| v.is_finite());
            if parsed.is_none() {
                tracing::warn!(value = %s, "numeric attribute failed to parse; substituting default");
            }
            Ok(parsed)
        }
        Repr::Other(_) => Ok(None),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SceneDef {
    #[serde(default = "default_version")]
    pub(crate) version: String,
    pub(crate) panels: Vec<String>,
    pub(crate) phases: Vec<PhaseDef>,
    #[serde(default)]
    pub(crate) layers: Vec<LayerDef>,
    #[serde(default)]
    pub(crate) globals: Vec<GlobalDef>,
    #[serde(default)]
    pub(crate) keep_outs: Vec<KeepOutDef>,
    #[serde(default)]
    pub(crate) tunables: TunablesDef,
}

pub(crate) fn default_version() -> String {
    "1".to_owned()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PhaseDef {
    pub(crate) name: String,
    pub(crate) start_panel: String,
    pub(crate) end_panel: String,
    /// Fraction of the end panel's height added past its top when closing
    /// the span.
    #[serde(default = "default_end_fraction")]
    pub(crate) end_fraction: f64,
}

fn default_end_fraction() -> f64 {
    0.5
}

/// One decorative layer. All numeric attributes are lenient (see
/// [`lenient_f64`]); `None` means "use the documented default".
///
/// Defaults: start `(50, 50)` percent, end = start, size `0.16`, speed
/// `1.0`, fade `(0.10, 0.92)`, depth `1`, drift derived from the layer's
/// declaration index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LayerDef {
    pub(crate) id: String,
    /// Opaque asset reference, carried through untouched.
    #[serde(default)]
    pub(crate) asset: Option<String>,
    pub(crate) panel: String,
    /// Owning phase; defaults to the scene's first declared phase.
    #[serde(default)]
    pub(crate) phase: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub(crate) start_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub(crate) start_y: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub(crate) end_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub(crate) end_y: Option<f64>,
    /// Fraction of viewport width.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub(crate) size: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub(crate) speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub(crate) fade_start: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub(crate) fade_end: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub(crate) depth: Option<f64>,
    #[serde(default)]
    pub(crate) drift: DriftDef,
}

/// Per-axis drift direction signs.
///
/// Shorthands: a bare number sets `x`; a two-element array sets `[x, y]`.
/// Unset axes derive deterministic alternating signs from the layer's
/// declaration index.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub(crate) struct DriftDef {
    pub(crate) x: Option<f64>,
    pub(crate) y: Option<f64>,
}

impl<'de> Deserialize<'de> for DriftDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            Arr([f64; 2]),
            Obj {
                #[serde(default)]
                x: Option<f64>,
                #[serde(default)]
                y: Option<f64>,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(x) => Ok(Self {
                x: Some(x),
                y: None,
            }),
            Repr::Arr([x, y]) => Ok(Self {
                x: Some(x),
                y: Some(y),
            }),
            Repr::Obj { x, y } => Ok(Self { x, y }),
        }
    }
}

/// Percent point inside a panel box. Accepts `[x, y]` or `{x, y}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct Vec2Def {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl Default for Vec2Def {
    fn default() -> Self {
        Self { x: 50.0, y: 50.0 }
    }
}

impl<'de> Deserialize<'de> for Vec2Def {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f64; 2]),
            Obj { x: f64, y: f64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([x, y]) => Ok(Self { x, y }),
            Repr::Obj { x, y } => Ok(Self { x, y }),
        }
    }
}

/// A zone layers must stay clear of, bound to one panel. Static after setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum KeepOutDef {
    Circle {
        panel: String,
        #[serde(default)]
        center: Vec2Def,
        /// Radius as a fraction of the smaller viewport dimension.
        #[serde(default = "default_circle_radius")]
        radius: f64,
    },
    Rect {
        panel: String,
        #[serde(default)]
        center: Vec2Def,
        /// Width as a fraction of the panel width.
        #[serde(default = "default_rect_width")]
        width: f64,
        /// Height as a fraction of the panel height.
        #[serde(default = "default_rect_height")]
        height: f64,
    },
}

fn default_circle_radius() -> f64 {
    0.58
}

fn default_rect_width() -> f64 {
    0.60
}

fn default_rect_height() -> f64 {
    0.52
}

/// One global element (backgrounds, focal wrap). All outputs are closed-form
/// functions of the owning phase's progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct GlobalDef {
    pub(crate) id: String,
    /// Owning phase; defaults to the scene's first declared phase.
    #[serde(default)]
    pub(crate) phase: Option<String>,
    /// Re-acceleration factor applied to the owning phase's progress.
    #[serde(default = "default_accel")]
    pub(crate) accel: f64,
    #[serde(default)]
    pub(crate) scale: ScaleDef,
    #[serde(default)]
    pub(crate) fade: Option<FadeDef>,
    /// Upward travel at full progress, as a fraction of viewport height.
    #[serde(default)]
    pub(crate) rise: f64,
    #[serde(default)]
    pub(crate) pin: Option<PinDef>,
}

fn default_accel() -> f64 {
    1.0
}

/// Scale travel `from -> to` over the owning phase. A bare number is
/// shorthand for `{from: 1, to: <number>}`.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct ScaleDef {
    pub(crate) from: f64,
    pub(crate) to: f64,
}

impl Default for ScaleDef {
    fn default() -> Self {
        Self { from: 1.0, to: 1.0 }
    }
}

impl<'de> Deserialize<'de> for ScaleDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            Obj {
                #[serde(default = "default_scale_edge")]
                from: f64,
                #[serde(default = "default_scale_edge")]
                to: f64,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(to) => Ok(Self { from: 1.0, to }),
            Repr::Obj { from, to } => Ok(Self { from, to }),
        }
    }
}

fn default_scale_edge() -> f64 {
    1.0
}

/// Opacity curve over the owning phase's (re-accelerated) progress.
///
/// `in`: `smoothstep(edge0, edge1, p)`; `out`: `1 - smoothstep(edge0,
/// edge1, p)`. Edge defaults are the customary crossfade windows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum FadeDef {
    In {
        #[serde(default = "default_fade_in_edge0")]
        edge0: f64,
        #[serde(default = "default_fade_in_edge1")]
        edge1: f64,
    },
    Out {
        #[serde(default = "default_fade_out_edge0")]
        edge0: f64,
        #[serde(default = "default_fade_out_edge1")]
        edge1: f64,
    },
}

fn default_fade_in_edge0() -> f64 {
    0.55
}

fn default_fade_in_edge1() -> f64 {
    0.90
}

fn default_fade_out_edge0() -> f64 {
    0.65
}

fn default_fade_out_edge1() -> f64 {
    1.0
}

/// Pin a global element to a document point at a panel-height fraction,
/// expressed in viewport space and clamped to a viewport-fraction band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PinDef {
    pub(crate) panel: String,
    #[serde(default = "default_pin_fraction")]
    pub(crate) fraction: f64,
    /// `[low, high]` clamp band as fractions of viewport height.
    #[serde(default = "default_pin_band")]
    pub(crate) band: [f64; 2],
}

fn default_pin_fraction() -> f64 {
    0.5
}

fn default_pin_band() -> [f64; 2] {
    [0.25, 0.75]
}

/// Tunable visual constants. The exact magnitudes are presentation taste;
/// the keep-out postconditions hold for any non-negative values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct TunablesDef {
    /// Extra clearance past a circle's rim after a push.
    #[serde(default = "default_circle_margin")]
    pub(crate) circle_margin: f64,
    /// Extra clearance past a rectangle's vertical edge after a push.
    #[serde(default = "default_rect_margin")]
    pub(crate) rect_margin: f64,
    /// Vertical nudge applied when a rect push resolves above center.
    #[serde(default = "default_rect_nudge_up")]
    pub(crate) rect_nudge_up: f64,
    /// Vertical nudge applied when a rect push resolves below center.
    #[serde(default = "default_rect_nudge_down")]
    pub(crate) rect_nudge_down: f64,
    /// Push-magnitude multiplier for layers whose start lies below a
    /// circle's center.
    #[serde(default = "default_keep_below_bias")]
    pub(crate) keep_below_bias: f64,
    /// Minimum distance below a circle's center enforced for such layers.
    #[serde(default = "default_keep_below_min_offset")]
    pub(crate) keep_below_min_offset: f64,
    /// Horizontal drift travel at full progress, as a fraction of viewport
    /// width.
    #[serde(default = "default_drift_span_x")]
    pub(crate) drift_span_x: f64,
    /// Vertical drift travel at full progress, as a fraction of viewport
    /// height.
    #[serde(default = "default_drift_span_y")]
    pub(crate) drift_span_y: f64,
    /// Base settle-oscillation amplitude in pixels.
    #[serde(default = "default_settle_base")]
    pub(crate) settle_base: f64,
    /// Additional settle amplitude per depth-order step.
    #[serde(default = "default_settle_depth_gain")]
    pub(crate) settle_depth_gain: f64,
    /// Derived layer width lower bound in pixels.
    #[serde(default = "default_min_width_px")]
    pub(crate) min_width_px: f64,
    /// Derived layer width upper bound in pixels.
    #[serde(default = "default_max_width_px")]
    pub(crate) max_width_px: f64,
    /// Derived height as a fraction of derived width.
    #[serde(default = "default_aspect")]
    pub(crate) aspect: f64,
}

fn default_circle_margin() -> f64 {
    42.0
}

fn default_rect_margin() -> f64 {
    44.0
}

fn default_rect_nudge_up() -> f64 {
    18.0
}

fn default_rect_nudge_down() -> f64 {
    24.0
}

fn default_keep_below_bias() -> f64 {
    1.0
}

fn default_keep_below_min_offset() -> f64 {
    24.0
}

fn default_drift_span_x() -> f64 {
    0.42
}

fn default_drift_span_y() -> f64 {
    0.12
}

fn default_settle_base() -> f64 {
    8.0
}

fn default_settle_depth_gain() -> f64 {
    2.0
}

fn default_min_width_px() -> f64 {
    76.0
}

fn default_max_width_px() -> f64 {
    560.0
}

fn default_aspect() -> f64 {
    0.6
}

impl Default for TunablesDef {
    fn default() -> Self {
        Self {
            circle_margin: default_circle_margin(),
            rect_margin: default_rect_margin(),
            rect_nudge_up: default_rect_nudge_up(),
            rect_nudge_down: default_rect_nudge_down(),
            keep_below_bias: default_keep_below_bias(),
            keep_below_min_offset: default_keep_below_min_offset(),
            drift_span_x: default_drift_span_x(),
            drift_span_y: default_drift_span_y(),
            settle_base: default_settle_base(),
            settle_depth_gain: default_settle_depth_gain(),
            min_width_px: default_min_width_px(),
            max_width_px: default_max_width_px(),
            aspect: default_aspect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
