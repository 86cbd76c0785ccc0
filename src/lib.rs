//! Stratus is a scroll-driven scene choreography engine.
//!
//! It maps a one-dimensional scroll offset and viewport geometry into
//! per-frame visual state (position, scale, opacity, composed transform) for
//! a set of layered decorative elements and a handful of global elements,
//! while keeping moving layers clear of configured keep-out regions. The
//! public API is session-oriented:
//!
//! - Load and validate a [`Scene`]
//! - Create a [`Choreographer`]
//! - Route host scroll/resize notifications through it and run one
//!   [`Choreographer::on_frame`] per coalesced display frame, emitting a
//!   [`SceneFrame`] into a [`RenderSink`]
//!
//! Stratus never renders, fetches assets, or touches a host event system.
//! All host interaction crosses three narrow seams: [`GeometrySource`]
//! (layout reads, invoked only from setup/resize rebuilds), [`TickHost`]
//! (one coalesced callback per frame), and [`RenderSink`] (batched state
//! output).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod eval;
mod foundation;
mod layout;
mod normalize;
mod phase;
mod schema;

/// Host geometry seam and cached anchor state.
pub mod geometry;
/// Per-frame output state and the sink contract.
pub mod render;
/// Scene boundary document.
pub mod scene;
/// Event coalescing and the host frame-callback contract.
pub mod schedule;
/// Session-oriented choreography API.
pub mod session;

pub use kurbo::{Affine, Point, Vec2};

pub use crate::foundation::error::{StratusError, StratusResult};
pub use crate::foundation::ids::{GlobalIdx, LayerIdx, PanelIdx, PhaseIdx};
pub use crate::foundation::math::{accelerate, clamp01, lerp, smoothstep};

pub use crate::geometry::viewport::{GeometrySource, PanelAnchor, PanelRect, ViewportSnapshot};
pub use crate::layout::registry::Breakpoint;
pub use crate::render::sink::{InMemorySink, RenderSink};
pub use crate::render::state::{GlobalState, LayerState, SceneFrame};
pub use crate::scene::composition::Scene;
pub use crate::schedule::frame::TickHost;
pub use crate::session::choreographer::{Choreographer, ChoreographerOpts, SettleMode};
