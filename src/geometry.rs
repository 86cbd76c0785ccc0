/// Viewport snapshots, panel anchors, and the host geometry seam.
pub mod viewport;
