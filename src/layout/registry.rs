use crate::foundation::ids::LayerIdx;
use crate::geometry::viewport::ViewportSnapshot;
use crate::normalize::ir::{LayerIR, Tunables};

const NARROW_MAX: f64 = 480.0;
const MEDIUM_MAX: f64 = 900.0;
const ULTRA_WIDE_MIN: f64 = 1600.0;

/// Named viewport-width range selecting a size multiplier.
///
/// Narrow viewports enlarge layers so they stay perceptible; very wide
/// viewports enlarge them modestly to preserve visual density. The
/// multiplier values are presentation taste, not semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Breakpoint {
    /// Width `<= 480`.
    Narrow,
    /// Width `<= 900`.
    Medium,
    /// Width `< 1600`.
    Wide,
    /// Width `>= 1600`.
    UltraWide,
}

impl Breakpoint {
    /// Classify a viewport width.
    pub fn classify(width: f64) -> Self {
        if width <= NARROW_MAX {
            Self::Narrow
        } else if width <= MEDIUM_MAX {
            Self::Medium
        } else if width < ULTRA_WIDE_MIN {
            Self::Wide
        } else {
            Self::UltraWide
        }
    }

    /// Layer size multiplier for this breakpoint.
    pub fn size_multiplier(self) -> f64 {
        match self {
            Self::Narrow => 1.18,
            Self::Medium => 1.08,
            Self::Wide => 1.0,
            Self::UltraWide => 1.06,
        }
    }
}

/// Derived pixel size for one layer at the current viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct DerivedSize {
    pub(crate) width_px: f64,
    pub(crate) height_px: f64,
}

/// Per-layer derived pixel fields.
///
/// Rebuilt from the current snapshot on setup and after every coalesced
/// resize; never carried across resizes, so a reflowed layout cannot leave
/// stale sizes behind.
#[derive(Debug, Default)]
pub(crate) struct LayerRegistry {
    sizes: Vec<DerivedSize>,
}

impl LayerRegistry {
    #[tracing::instrument(skip_all)]
    pub(crate) fn rebuild(
        &mut self,
        layers: &[LayerIR],
        tunables: &Tunables,
        snapshot: &ViewportSnapshot,
    ) {
        let multiplier = Breakpoint::classify(snapshot.width).size_multiplier();
        self.sizes.clear();
        self.sizes.reserve(layers.len());
        for layer in layers {
            let width_px = (snapshot.width * layer.size * multiplier)
                .clamp(tunables.min_width_px, tunables.max_width_px);
            self.sizes.push(DerivedSize {
                width_px,
                height_px: width_px * tunables.aspect,
            });
        }
    }

    pub(crate) fn size(&self, idx: LayerIdx) -> DerivedSize {
        self.sizes[idx.0 as usize]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/registry.rs"]
mod tests;
