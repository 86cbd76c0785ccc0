use crate::foundation::ids::GlobalIdx;
use crate::foundation::math::{accelerate, clamp01, lerp, smoothstep};
use crate::geometry::viewport::{AnchorTable, ViewportSnapshot};
use crate::normalize::ir::{FadeIR, GlobalIR};
use crate::render::state::GlobalState;
use kurbo::{Affine, Vec2};

/// Evaluate one global element at the given owning-phase progress.
///
/// `pin_scroll` is the scroll offset pinned elements track: the live offset
/// normally, the rebuild-time offset under reduced motion (the element is
/// positioned once and then left alone).
pub(crate) fn eval_global(
    idx: GlobalIdx,
    global: &GlobalIR,
    progress: f64,
    snapshot: &ViewportSnapshot,
    anchors: &AnchorTable,
    pin_scroll: f64,
) -> GlobalState {
    let p = accelerate(progress, global.accel);

    let scale = lerp(global.scale_from, global.scale_to, p);
    let opacity = match global.fade {
        None => 1.0,
        Some(FadeIR::In { edge0, edge1 }) => smoothstep(edge0, edge1, p),
        Some(FadeIR::Out { edge0, edge1 }) => 1.0 - smoothstep(edge0, edge1, p),
    };

    let mut translate = Vec2::new(0.0, -(p * snapshot.height * global.rise));
    if let Some(pin) = global.pin {
        // Pin to a panel-fraction document point, expressed in viewport
        // space and clamped to the configured band.
        let anchor = anchors.get(pin.panel);
        let doc_y = anchor.top + pin.fraction * anchor.height;
        let viewport_y = doc_y - pin_scroll;
        translate.y +=
            viewport_y.clamp(pin.band.0 * snapshot.height, pin.band.1 * snapshot.height);
    }

    GlobalState {
        global: idx,
        scale,
        opacity: clamp01(opacity),
        translate,
        transform: Affine::translate(translate) * Affine::scale(scale),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/global.rs"]
mod tests;
