// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pan_zoom --heading-base-level=0

//! Understory Pan Zoom: the authoritative pan/zoom transform of a vector
//! graphics viewport, kept in sync with its rendering surface.
//!
//! Gesture code (drag, wheel, pinch) decides *which* transform it wants;
//! this crate decides whether, how, and when that transform becomes the one
//! on screen. It provides:
//! - A transform store: the original (baseline) and active transforms, in
//!   raw matrix form ([`RawTransform`]) with baseline-relative
//!   [`PanZoom`] views derived on demand.
//! - A commit pipeline: [`ShadowViewport::propose`] drops no-op proposals,
//!   offers the rest to [`ViewportHooks`] for veto or rewrite, and commits.
//! - A frame flush: commits are coalesced into at most one pending
//!   [`FlushRequest`], written to the [`Surface`] on a later frame and gated
//!   again by the `render` hook.
//!
//! It does **not** own any DOM or rendering backend. Callers provide:
//! - A [`Surface`] binding that reads and writes the element's transform.
//! - A [`FrameScheduler`], or the stock [`FrameThrottle`], plus a frame loop
//!   (for example `requestAnimationFrame`) that calls
//!   [`ShadowViewport::on_frame`].
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//!
//! use kurbo::{Rect, Size};
//! use understory_pan_zoom::{
//!     ChangeSource, ProposeOutcome, RawTransform, ShadowViewport, Surface, ViewportOptions,
//! };
//!
//! struct Svg {
//!     view_box: Option<String>,
//!     transform: RawTransform,
//! }
//!
//! impl Surface for Svg {
//!     fn current_transform(&self) -> RawTransform {
//!         self.transform
//!     }
//!     fn apply_transform(&mut self, transform: RawTransform) {
//!         self.transform = transform;
//!     }
//!     fn bounding_box(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 100.0, 100.0)
//!     }
//!     fn rendered_rect(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 400.0, 300.0)
//!     }
//!     fn view_box_attribute(&self) -> Option<String> {
//!         self.view_box.clone()
//!     }
//!     fn clear_view_box_attribute(&mut self) {
//!         self.view_box = None;
//!     }
//! }
//!
//! let svg = Svg {
//!     view_box: Some("0 0 100 100".into()),
//!     transform: RawTransform::IDENTITY,
//! };
//! let options = ViewportOptions::new(Size::new(400.0, 300.0));
//! let mut viewport = ShadowViewport::with_throttle(svg, (), options).unwrap();
//!
//! // The view box was fitted into 400x300 and applied right away.
//! assert_eq!(viewport.state(), RawTransform::uniform(3.0, 50.0, 0.0));
//! assert_eq!(viewport.surface().transform, viewport.state());
//!
//! // Zoom in 2x relative to the initial view.
//! let outcome = viewport.propose(
//!     RawTransform::uniform(6.0, 0.0, 0.0),
//!     ChangeSource::External("wheel"),
//! );
//! assert_eq!(outcome, ProposeOutcome::Committed { flush_scheduled: true });
//! assert_eq!(viewport.relative_zooms().zoom_x, 2.0);
//!
//! // The surface catches up on the next frame.
//! viewport.on_frame(Duration::from_millis(16));
//! assert_eq!(viewport.surface().transform, RawTransform::uniform(6.0, 0.0, 0.0));
//! ```
//!
//! ## Design notes
//!
//! - Transforms are axis-aligned: independent X/Y scale and translation, no
//!   skew or rotation.
//! - Zoom counts as changed only when both axes change; pan counts as
//!   changed when either axis does. See [`RawTransform::differs_from`].
//! - Relative zoom is always derived from the two stored transforms and is
//!   never cached separately.
//! - Values are not validated; non-finite numbers reach the surface as is.
//! - Hooks get the payload by value and answer with a [`Verdict`]; they
//!   cannot reach the viewport, so commits and flushes are never re-entered.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod error;
mod hooks;
mod options;
mod schedule;
mod surface;
mod transform;
mod view_box;
mod viewport;

pub use error::{ViewBoxIssue, ViewportError};
pub use hooks::{ChangeSource, HookEvent, Trigger, Verdict, ViewportHooks};
pub use options::ViewportOptions;
pub use schedule::{FlushRequest, FrameScheduler, FrameThrottle, RefreshRate, ViewportId};
pub use surface::Surface;
pub use transform::{PanZoom, RawTransform, Zooms};
pub use view_box::ViewBox;
pub use viewport::{FlushOutcome, FlushState, ProposeOutcome, ShadowViewport};
