// Copyright 2026 the Awning Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Awning Overlay: retained popup/tooltip controllers over the Awning kernels.
//!
//! This crate is the layer an embedder actually talks to. It composes the
//! pure kernels ([`awning_placement`] for geometry, [`awning_events`] for
//! the shared dispatcher, [`awning_timing`] for delays and debouncing,
//! [`awning_style`] for class resolution) into two controllers:
//!
//! - [`popup::Popup`]: attachment-point placement (anchor point × overlay
//!   point), width syncing, and a max-height cap. Controlled through an
//!   `open` prop by default, with optional self-managed triggers.
//! - [`tooltip::Tooltip`]: compass placement with viewport-aware fallback,
//!   anchor lookup by token, show/hide trigger events with optional delays,
//!   and global dismiss handling.
//!
//! The embedder supplies the environment through the [`host::Host`] trait
//! (geometry queries, viewport), routes input through an
//! [`awning_events::EventHub`], mounts floating content via the
//! [`layer::OverlayLayer`] (the portal: surfaces render outside their
//! logical parent while keeping the logical anchor relationship), and drives
//! time by calling `pump(now)`; the controllers never read a clock.
//!
//! ## State and change notification
//!
//! Each controller owns its open state, measured style, timers, and event
//! bindings exclusively. Mutations accumulate into an [`Update`] set drained
//! once per step via `take_updates()`, so a consumer renders exactly once
//! per transition. A closed controller keeps its surface unmounted (closed
//! means *not in the layer*, not merely hidden) and its style is `None`
//! until both the anchor and the mounted surface are measurable, so content
//! is never flashed at the wrong spot.
//!
//! ## Teardown
//!
//! Dropping a controller unmounts its surface, cancels pending timers and
//! the re-measure debounce, and releases every hub subscription. Handlers
//! hold only weak references back to the controller, so no callback can
//! fire into a dropped controller.
//!
//! ## Minimal example
//!
//! ```
//! use std::rc::Rc;
//!
//! use awning_overlay::{ElementId, Host, Hub, OverlayLayer, Popup, PopupConfig, SurfaceId};
//! use awning_placement::Viewport;
//! use kurbo::{Rect, Size, Vec2};
//!
//! // A host with one 150×150 element and an unscrolled 800×600 window.
//! struct StaticHost;
//!
//! impl Host for StaticHost {
//!     fn find_anchor(&self, _token: &str) -> Option<ElementId> {
//!         None
//!     }
//!     fn element_rect(&self, _element: ElementId) -> Option<Rect> {
//!         Some(Rect::new(150.0, 150.0, 300.0, 300.0))
//!     }
//!     fn surface_size(&self, _surface: SurfaceId) -> Option<Size> {
//!         Some(Size::new(100.0, 80.0))
//!     }
//!     fn viewport(&self) -> Viewport {
//!         Viewport::new(Vec2::ZERO, Size::new(800.0, 600.0))
//!     }
//! }
//!
//! let hub = Hub::new();
//! let layer = OverlayLayer::new();
//! let popup = Popup::new(
//!     &hub,
//!     Rc::new(StaticHost),
//!     &layer,
//!     PopupConfig {
//!         anchor: Some(ElementId(1)),
//!         open: Some(true),
//!         ..Default::default()
//!     },
//! );
//!
//! // Mounted below the anchor, left edges flush, width synced.
//! let style = popup.style().expect("anchor and surface are measurable");
//! assert_eq!((style.left, style.top), (150.0, 300.0));
//! assert_eq!(style.width, Some(150.0));
//! ```

pub mod host;
pub mod layer;
pub mod popup;
pub mod tooltip;
pub mod trigger;

pub use host::Host;
pub use layer::OverlayLayer;
pub use popup::{Popup, PopupConfig};
pub use tooltip::{Tooltip, TooltipConfig};
pub use trigger::{Transition, TriggerConfig, TriggerMachine, TriggerSet};

use awning_events::EventHub;

/// Width of the debounce window applied to viewport-change re-measurement,
/// in milliseconds. Bursts of scroll/resize events collapse into one
/// trailing recomputation.
pub const REPOSITION_DEBOUNCE_MS: u64 = 200;

/// Identifier for an element in the embedder's tree.
///
/// Opaque to this crate: the host allocates them and answers geometry
/// queries for them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Identifier for a surface mounted in the [`OverlayLayer`].
///
/// Allocated by the layer, monotonic, never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub(crate) u64);

/// The event-target vocabulary shared through the hub: either an element in
/// the embedder's tree or a mounted overlay surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// An element in the embedder's tree.
    Element(ElementId),
    /// A surface mounted in the overlay layer.
    Surface(SurfaceId),
}

/// The hub type the overlay controllers bind against.
pub type Hub = EventHub<Target>;

/// Positioning output for a mounted surface, applied by the embedder as
/// absolute inline style.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SurfaceStyle {
    /// Document-absolute top, in px.
    pub top: f64,
    /// Document-absolute left, in px.
    pub left: f64,
    /// Forced width in px, when the controller syncs to the anchor's width.
    pub width: Option<f64>,
    /// Height cap in px, enforced via style independently of positioning.
    pub max_height: Option<f64>,
}

bitflags::bitflags! {
    /// Pending changes a consumer has not rendered yet.
    ///
    /// Controllers accumulate these as they transition and hand them over
    /// once through `take_updates()`, the notify-on-change half of the
    /// state contract.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Update: u8 {
        /// The controller transitioned to open.
        const OPENED = 0b0000_0001;
        /// The controller transitioned to closed.
        const CLOSED = 0b0000_0010;
        /// The surface's style (position/size caps) changed.
        const STYLED = 0b0000_0100;
        /// A surface was mounted into the layer.
        const MOUNTED = 0b0000_1000;
        /// A surface was unmounted from the layer.
        const UNMOUNTED = 0b0001_0000;
    }
}
