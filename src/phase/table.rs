use crate::foundation::ids::PhaseIdx;
use crate::foundation::math::clamp01;
use crate::geometry::viewport::AnchorTable;
use crate::normalize::ir::PhaseIR;

/// One geometry unit; the smallest span a phase may divide by.
const MIN_SPAN: f64 = 1.0;

#[derive(Clone, Copy, Debug, Default)]
struct PhaseSpan {
    start: f64,
    end: f64,
}

/// Named, independently-scoped scroll spans mapped to clamped `[0, 1]`
/// progress values.
///
/// Spans are rebuilt from the anchor table whenever geometry changes; a
/// degenerate span (`end <= start`, typically from a fallback anchor) is
/// floored to one geometry unit with a warning rather than failing.
#[derive(Debug, Default)]
pub(crate) struct PhaseTable {
    spans: Vec<PhaseSpan>,
}

impl PhaseTable {
    #[tracing::instrument(skip_all)]
    pub(crate) fn rebuild(&mut self, phases: &[PhaseIR], anchors: &AnchorTable) {
        self.spans.clear();
        self.spans.reserve(phases.len());
        for phase in phases {
            let start = anchors.get(phase.start).top;
            let end_anchor = anchors.get(phase.end);
            let end = end_anchor.top + phase.end_fraction * end_anchor.height;
            if end <= start {
                tracing::warn!(
                    phase = %phase.name,
                    start,
                    end,
                    "degenerate phase span; flooring to one geometry unit"
                );
            }
            self.spans.push(PhaseSpan { start, end });
        }
    }

    /// Progress of one phase at `scroll_offset`, clamped to `[0, 1]`.
    pub(crate) fn progress(&self, idx: PhaseIdx, scroll_offset: f64) -> f64 {
        let span = self.spans[idx.0 as usize];
        clamp01((scroll_offset - span.start) / (span.end - span.start).max(MIN_SPAN))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/phase/table.rs"]
mod tests;
