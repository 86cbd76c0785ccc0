use crate::eval::global::eval_global;
use crate::eval::keepout::{self, KeepOutPx};
use crate::eval::layer::{LayerEvalCtx, eval_layer};
use crate::foundation::error::{StratusError, StratusResult};
use crate::foundation::ids::{GlobalIdx, LayerIdx, PhaseIdx};
use crate::geometry::viewport::{AnchorTable, GeometrySource, ViewportSnapshot};
use crate::layout::registry::LayerRegistry;
use crate::normalize::ir::SceneIR;
use crate::normalize::pass::normalize;
use crate::phase::table::PhaseTable;
use crate::render::sink::RenderSink;
use crate::render::state::SceneFrame;
use crate::scene::composition::Scene;
use crate::schedule::frame::{FrameScheduler, TickHost};
use smallvec::SmallVec;

/// Settle-oscillation behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SettleMode {
    /// Oscillation is a pure function of scroll progress; scrolling to a
    /// stop yields a stable resting state.
    #[default]
    ScrollDriven,
    /// Oscillation additionally advances with a host-driven clock
    /// ([`Choreographer::advance_clock`]) and continues absent scrolling.
    Perpetual,
}

/// Options fixed at construction.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChoreographerOpts {
    /// Freeze every layer and global element at its resting
    /// (progress = 0) state for the whole session.
    pub reduced_motion: bool,
    /// Settle-oscillation behavior.
    pub settle: SettleMode,
}

/// Scroll-driven scene choreographer.
///
/// One instance owns all mutable state for one scene: the current snapshot,
/// cached anchors, phase spans, derived layer sizes, and keep-out shapes.
/// Instances never share state; construct one per use-site.
///
/// Wiring contract: route raw scroll/resize events to
/// [`notify_scroll`](Self::notify_scroll) /
/// [`notify_resize`](Self::notify_resize) (flag-setting only), and call
/// [`on_frame`](Self::on_frame) from the host's frame callback. A new
/// instance is primed, so the first frame callback performs the initial
/// build and emit.
#[derive(Debug)]
pub struct Choreographer {
    ir: SceneIR,
    opts: ChoreographerOpts,
    scheduler: FrameScheduler,

    snapshot: ViewportSnapshot,
    anchors: AnchorTable,
    phases: PhaseTable,
    registry: LayerRegistry,
    keep_outs: SmallVec<[KeepOutPx; 4]>,

    progress: Vec<f64>,
    frame: SceneFrame,
    clock: f64,
    rebuild_scroll: f64,
}

impl Choreographer {
    /// Validate and normalize a scene into a ready choreographer.
    pub fn new(scene: &Scene, opts: ChoreographerOpts) -> StratusResult<Self> {
        let ir = normalize(scene.def())
            .map_err(|e| StratusError::validation(format!("scene validation failed: {e}")))?;
        Ok(Self {
            ir,
            opts,
            scheduler: FrameScheduler::new(),
            snapshot: ViewportSnapshot::default(),
            anchors: AnchorTable::default(),
            phases: PhaseTable::default(),
            registry: LayerRegistry::default(),
            keep_outs: SmallVec::new(),
            progress: Vec::new(),
            frame: SceneFrame::default(),
            clock: 0.0,
            rebuild_scroll: 0.0,
        })
    }

    /// Handle a raw scroll notification. Sets a flag and requests at most
    /// one frame callback; never computes or reads layout.
    pub fn notify_scroll(&mut self, host: &mut impl TickHost) {
        self.scheduler.notify_scroll(host);
    }

    /// Handle a raw resize notification. Like scroll, but the next frame
    /// additionally rebuilds anchors, phase spans, derived sizes, and
    /// keep-out shapes.
    pub fn notify_resize(&mut self, host: &mut impl TickHost) {
        self.scheduler.notify_resize(host);
    }

    /// Advance the perpetual settle clock by `dt_secs` and schedule a
    /// recompute. No-op in [`SettleMode::ScrollDriven`] or reduced motion.
    pub fn advance_clock(&mut self, dt_secs: f64, host: &mut impl TickHost) {
        if self.opts.settle != SettleMode::Perpetual || self.opts.reduced_motion {
            return;
        }
        self.clock += dt_secs;
        self.scheduler.notify_scroll(host);
    }

    /// Run one coalesced frame: capture the snapshot, rebuild geometry if
    /// owed, evaluate every phase/global/layer, and emit a single
    /// [`SceneFrame`] batch to `sink`.
    ///
    /// Returns `Ok(false)` when the frame was idle (nothing pending, or
    /// disabled) and nothing was emitted.
    pub fn on_frame(
        &mut self,
        source: &impl GeometrySource,
        sink: &mut impl RenderSink,
    ) -> StratusResult<bool> {
        let Some(work) = self.scheduler.begin_frame() else {
            return Ok(false);
        };

        // Last-writer-wins: only the offset at callback time matters.
        self.snapshot = ViewportSnapshot::capture(source);
        if work.rebuild_geometry {
            self.rebuild_geometry(source);
        }

        let scroll = self.snapshot.scroll_offset;
        self.progress.clear();
        for i in 0..self.ir.phases.len() {
            let p = if self.opts.reduced_motion {
                0.0
            } else {
                self.phases.progress(PhaseIdx(i as u32), scroll)
            };
            self.progress.push(p);
        }

        self.frame.reset(scroll);

        // Under reduced motion a pinned global is positioned once per
        // rebuild and then left alone.
        let pin_scroll = if self.opts.reduced_motion {
            self.rebuild_scroll
        } else {
            scroll
        };
        for (i, global) in self.ir.globals.iter().enumerate() {
            let p = self.progress[global.phase.0 as usize];
            self.frame.globals.push(eval_global(
                GlobalIdx(i as u32),
                global,
                p,
                &self.snapshot,
                &self.anchors,
                pin_scroll,
            ));
        }

        let ctx = LayerEvalCtx {
            snapshot: &self.snapshot,
            anchors: &self.anchors,
            registry: &self.registry,
            keep_outs: &self.keep_outs,
            tunables: &self.ir.tunables,
            settle_clock: if self.opts.settle == SettleMode::Perpetual && !self.opts.reduced_motion
            {
                self.clock
            } else {
                0.0
            },
        };
        for layer in &self.ir.layers {
            let p = self.progress[layer.phase.0 as usize];
            self.frame.layers.push(eval_layer(layer, p, &ctx));
        }

        sink.apply(&self.frame)?;
        Ok(true)
    }

    /// Halt the choreographer: subsequent notifications and frame callbacks
    /// are no-ops. Idempotent.
    pub fn disable(&mut self) {
        self.scheduler.disable();
    }

    /// Whether the choreographer is still live.
    pub fn is_enabled(&self) -> bool {
        self.scheduler.is_enabled()
    }

    /// Whether reduced motion was requested at construction.
    pub fn reduced_motion(&self) -> bool {
        self.opts.reduced_motion
    }

    /// Resolve a layer index back to its declared id.
    pub fn layer_id(&self, idx: LayerIdx) -> &str {
        &self.ir.layers[idx.0 as usize].id
    }

    /// Resolve a layer index to its opaque asset reference, if declared.
    pub fn layer_asset(&self, idx: LayerIdx) -> Option<&str> {
        self.ir.layers[idx.0 as usize].asset.as_deref()
    }

    /// Resolve a global index back to its declared id.
    pub fn global_id(&self, idx: GlobalIdx) -> &str {
        &self.ir.globals[idx.0 as usize].id
    }

    /// Resolve a layer index to its owning panel id.
    pub fn layer_panel(&self, idx: LayerIdx) -> &str {
        &self.ir.panels[self.ir.layers[idx.0 as usize].panel.0 as usize]
    }

    #[tracing::instrument(skip_all)]
    fn rebuild_geometry(&mut self, source: &impl GeometrySource) {
        self.rebuild_scroll = self.snapshot.scroll_offset;
        self.anchors
            .rebuild(source, &self.snapshot, &self.ir.panels);
        self.phases.rebuild(&self.ir.phases, &self.anchors);
        self.registry
            .rebuild(&self.ir.layers, &self.ir.tunables, &self.snapshot);
        keepout::rebuild(
            &mut self.keep_outs,
            &self.ir.keep_outs,
            &self.anchors,
            &self.snapshot,
        );
        tracing::debug!(
            panels = self.ir.panels.len(),
            layers = self.ir.layers.len(),
            keep_outs = self.keep_outs.len(),
            "geometry rebuilt"
        );
    }

    #[cfg(test)]
    pub(crate) fn panel_anchor(
        &self,
        idx: crate::foundation::ids::PanelIdx,
    ) -> crate::geometry::viewport::PanelAnchor {
        self.anchors.get(idx)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/choreographer.rs"]
mod tests;
