use crate::foundation::ids::PanelIdx;
use crate::geometry::viewport::{AnchorTable, ViewportSnapshot};
use crate::normalize::ir::{KeepOutIR, KeepOutShapeIR, Tunables};
use kurbo::Point;
use smallvec::SmallVec;

/// Pixel-resolved keep-out shape, rebuilt with the rest of the geometry.
#[derive(Clone, Copy, Debug)]
pub(crate) struct KeepOutPx {
    pub(crate) panel: PanelIdx,
    pub(crate) center: Point,
    pub(crate) shape: ShapePx,
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum ShapePx {
    Circle { radius: f64 },
    Rect { half_w: f64, half_h: f64 },
}

pub(crate) fn rebuild(
    out: &mut SmallVec<[KeepOutPx; 4]>,
    keep_outs: &[KeepOutIR],
    anchors: &AnchorTable,
    snapshot: &ViewportSnapshot,
) {
    out.clear();
    for k in keep_outs {
        let panel_h = anchors.get(k.panel).height;
        let center = Point::new(
            k.center.x / 100.0 * snapshot.width,
            k.center.y / 100.0 * panel_h,
        );
        let shape = match k.shape {
            KeepOutShapeIR::Circle { radius } => ShapePx::Circle {
                radius: radius * snapshot.vmin(),
            },
            KeepOutShapeIR::Rect { width, height } => ShapePx::Rect {
                half_w: width * snapshot.width * 0.5,
                half_h: height * panel_h * 0.5,
            },
        };
        out.push(KeepOutPx {
            panel: k.panel,
            center,
            shape,
        });
    }
}

/// Push `candidate` outside every keep-out shape owned by `panel`.
///
/// Single pass in declaration order; shapes are not iteratively re-resolved
/// against each other. `start` is the layer's declared start position in
/// panel pixels: when it lies below a circle's center, the keep-below bias
/// first clamps the candidate to the protected side and then scales the push,
/// so such a layer can never resolve above the region.
///
/// Postconditions: distance from a circle's center is `>= radius`; a
/// resolved position is never strictly inside a rectangle.
pub(crate) fn resolve(
    mut candidate: Point,
    start: Point,
    regions: &[KeepOutPx],
    panel: PanelIdx,
    tunables: &Tunables,
) -> Point {
    for region in regions.iter().filter(|r| r.panel == panel) {
        candidate = match region.shape {
            ShapePx::Circle { radius } => {
                resolve_circle(candidate, start, region.center, radius, tunables)
            }
            ShapePx::Rect { half_w, half_h } => {
                resolve_rect(candidate, region.center, half_w, half_h, tunables)
            }
        };
    }
    candidate
}

fn resolve_circle(
    mut p: Point,
    start: Point,
    center: Point,
    radius: f64,
    tunables: &Tunables,
) -> Point {
    let keep_below = start.y > center.y;
    if keep_below {
        p.y = p.y.max(center.y + tunables.keep_below_min_offset);
    }

    let d = p - center;
    let dist = d.hypot();
    if dist >= radius {
        return p;
    }

    // Fixed fallback direction for a dead-center candidate; randomizing here
    // would flicker frame to frame.
    let (nx, ny) = if dist == 0.0 {
        (1.0, 0.0)
    } else {
        (d.x / dist, d.y / dist)
    };
    let mut push = (radius - dist) + tunables.circle_margin;
    if keep_below {
        push *= tunables.keep_below_bias;
    }
    Point::new(p.x + nx * push, p.y + ny * push)
}

fn resolve_rect(mut p: Point, center: Point, half_w: f64, half_h: f64, tunables: &Tunables) -> Point {
    let x0 = center.x - half_w;
    let x1 = center.x + half_w;
    let y0 = center.y - half_h;
    let y1 = center.y + half_h;

    if p.x <= x0 || p.x >= x1 || p.y <= y0 || p.y >= y1 {
        return p;
    }

    let to_left = p.x - x0;
    let to_right = x1 - p.x;
    p.x += if to_left < to_right {
        -(to_left + tunables.rect_margin)
    } else {
        to_right + tunables.rect_margin
    };
    p.y += if p.y < center.y {
        -tunables.rect_nudge_up
    } else {
        tunables.rect_nudge_down
    };
    p
}

#[cfg(test)]
#[path = "../../tests/unit/eval/keepout.rs"]
mod tests;
