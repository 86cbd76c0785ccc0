use crate::foundation::ids::PanelIdx;

/// Viewport-relative bounding geometry of one panel, as read live from the
/// host layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRect {
    /// Top edge relative to the current viewport top (may be negative).
    pub top: f64,
    /// Panel height.
    pub height: f64,
}

/// Host seam for layout reads.
///
/// Implementations are queried only during setup and resize-triggered
/// rebuilds (plus one scroll-offset read per frame); the per-frame hot path
/// otherwise operates purely on cached numeric values.
pub trait GeometrySource {
    /// Current viewport `(width, height)`.
    fn viewport_size(&self) -> (f64, f64);
    /// Current scroll offset in document units.
    fn scroll_offset(&self) -> f64;
    /// Live bounding geometry for a named panel, or `None` when the panel
    /// cannot be resolved.
    fn panel_rect(&self, panel: &str) -> Option<PanelRect>;
}

/// Current-frame viewport values. Ephemeral; rebuilt every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSnapshot {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Scroll offset in document units.
    pub scroll_offset: f64,
}

impl ViewportSnapshot {
    /// Capture the current viewport values from the host.
    pub fn capture(source: &impl GeometrySource) -> Self {
        let (width, height) = source.viewport_size();
        Self {
            width,
            height,
            scroll_offset: source.scroll_offset(),
        }
    }

    /// Smaller viewport dimension.
    pub fn vmin(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// Absolute document-space position of one panel.
///
/// `resolved` is `false` for the documented fallback anchor (viewport top at
/// rebuild time, viewport height) substituted when the host cannot resolve
/// the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelAnchor {
    /// Absolute document-space top offset.
    pub top: f64,
    /// Panel height.
    pub height: f64,
    /// Whether the host resolved the panel, or the fallback was used.
    pub resolved: bool,
}

/// Cached per-panel anchors, rebuilt at setup and after every coalesced
/// resize. Reflow can move a panel without a scroll change, so anchors are
/// never carried across rebuilds.
#[derive(Debug, Default)]
pub(crate) struct AnchorTable {
    anchors: Vec<PanelAnchor>,
}

impl AnchorTable {
    #[tracing::instrument(skip_all)]
    pub(crate) fn rebuild(
        &mut self,
        source: &impl GeometrySource,
        snapshot: &ViewportSnapshot,
        panels: &[String],
    ) {
        self.anchors.clear();
        self.anchors.reserve(panels.len());
        for id in panels {
            let anchor = match source.panel_rect(id) {
                Some(rect) => PanelAnchor {
                    top: snapshot.scroll_offset + rect.top,
                    height: if rect.height > 0.0 {
                        rect.height
                    } else {
                        snapshot.height
                    },
                    resolved: true,
                },
                None => {
                    tracing::warn!(panel = %id, "panel not resolvable; using viewport fallback anchor");
                    PanelAnchor {
                        top: snapshot.scroll_offset,
                        height: snapshot.height,
                        resolved: false,
                    }
                }
            };
            self.anchors.push(anchor);
        }
    }

    pub(crate) fn get(&self, idx: PanelIdx) -> PanelAnchor {
        self.anchors[idx.0 as usize]
    }

    #[cfg(test)]
    pub(crate) fn from_anchors(anchors: Vec<PanelAnchor>) -> Self {
        Self { anchors }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/viewport.rs"]
mod tests;
