// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shadow viewport: cached transform state plus the commit/flush pipeline.

use core::time::Duration;

use kurbo::{Affine, Vec2};

use crate::error::ViewportError;
use crate::hooks::{ChangeSource, Verdict, ViewportHooks};
use crate::options::ViewportOptions;
use crate::schedule::{FlushRequest, FrameScheduler, FrameThrottle, ViewportId};
use crate::surface::Surface;
use crate::transform::{RawTransform, Zooms};
use crate::view_box::ViewBox;

/// Whether a flush is outstanding.
///
/// `Idle → Pending` when a commit requests a flush, `Pending → Idle` when
/// the flush runs, whatever its hooks decide. A commit while `Pending` only
/// updates the active state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlushState {
    /// No flush is scheduled.
    #[default]
    Idle,
    /// A flush has been handed to the scheduler and has not run yet.
    Pending,
}

/// Result of [`ShadowViewport::propose`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProposeOutcome {
    /// The proposal matched the active state; no hook ran.
    Unchanged,
    /// The `panzoom` hook rejected the proposal; nothing changed.
    Vetoed,
    /// The active state was overwritten.
    Committed {
        /// `false` when a flush was already pending and will pick up the
        /// new state.
        flush_scheduled: bool,
    },
}

/// Result of a flush.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlushOutcome {
    /// This transform was written to the surface.
    Rendered(RawTransform),
    /// The `render` hook rejected the flush; the surface kept its previous
    /// transform.
    Vetoed,
    /// The request belongs to another viewport and was not run.
    Ignored,
}

/// Authoritative pan/zoom state of one surface.
///
/// `ShadowViewport` owns two [`RawTransform`]s:
///
/// - the **original state**, captured at creation and used as the zoom
///   baseline for every [`PanZoom`](crate::PanZoom) it hands out;
/// - the **active state**, the transform the surface should show.
///
/// Proposals go through [`propose`](Self::propose), which vetoes no-ops,
/// consults [`ViewportHooks::pan_zoom`], commits to the active state and asks
/// the [`FrameScheduler`] for a flush. At most one flush is outstanding: any
/// number of commits between two frames collapse into one surface write of
/// the latest active state, performed by [`on_frame`](Self::on_frame) (or
/// [`flush`](Self::flush) for hosts that drive the scheduler themselves).
///
/// ## Divergence after a vetoed render
///
/// When [`ViewportHooks::render`] rejects a flush, the pending lock is still
/// released but the surface is left untouched. The surface then shows an
/// older transform than [`state`](Self::state) until a later commit causes
/// another flush to be accepted. Likewise, a payload rewritten by the
/// `render` hook reaches the surface but is not written back to the active
/// state.
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_pan_zoom::{
///     ChangeSource, FlushOutcome, RawTransform, ShadowViewport, Surface, ViewportOptions,
/// };
/// use core::time::Duration;
///
/// #[derive(Default)]
/// struct Group {
///     applied: Vec<RawTransform>,
/// }
///
/// impl Surface for Group {
///     fn current_transform(&self) -> RawTransform {
///         RawTransform::IDENTITY
///     }
///     fn apply_transform(&mut self, transform: RawTransform) {
///         self.applied.push(transform);
///     }
///     fn bounding_box(&self) -> Rect {
///         Rect::new(0.0, 0.0, 100.0, 100.0)
///     }
///     fn rendered_rect(&self) -> Rect {
///         Rect::new(0.0, 0.0, 400.0, 300.0)
///     }
///     fn view_box_attribute(&self) -> Option<String> {
///         None
///     }
///     fn clear_view_box_attribute(&mut self) {}
/// }
///
/// let options = ViewportOptions::new(Size::new(400.0, 300.0));
/// let mut viewport = ShadowViewport::with_throttle(Group::default(), (), options).unwrap();
///
/// viewport.propose(RawTransform::uniform(2.0, 10.0, 0.0), ChangeSource::External("zoom"));
/// viewport.propose(RawTransform::uniform(2.0, 20.0, 0.0), ChangeSource::External("pan"));
///
/// // Both commits are flushed together on the next frame.
/// let outcome = viewport.on_frame(Duration::from_millis(16));
/// assert_eq!(outcome, Some(FlushOutcome::Rendered(RawTransform::uniform(2.0, 20.0, 0.0))));
/// assert_eq!(viewport.surface().applied.len(), 2); // initial write + one flush
/// ```
#[derive(Debug)]
pub struct ShadowViewport<S, H = (), F = FrameThrottle> {
    id: ViewportId,
    surface: S,
    hooks: H,
    scheduler: F,
    options: ViewportOptions,
    view_box: ViewBox,
    original_state: RawTransform,
    active_state: RawTransform,
    flush_state: FlushState,
}

impl<S, H> ShadowViewport<S, H, FrameThrottle>
where
    S: Surface,
    H: ViewportHooks,
{
    /// Creates a viewport driven by a [`FrameThrottle`] built from
    /// `options.refresh_rate`.
    pub fn with_throttle(
        surface: S,
        hooks: H,
        options: ViewportOptions,
    ) -> Result<Self, ViewportError> {
        Self::new(surface, hooks, FrameThrottle::new(options.refresh_rate), options)
    }
}

impl<S, H, F> ShadowViewport<S, H, F>
where
    S: Surface,
    H: ViewportHooks,
    F: FrameScheduler,
{
    /// Takes ownership of `surface`'s transform.
    ///
    /// The active state starts as the surface's current transform. If the
    /// surface carries a `viewBox` attribute, it is parsed, fitted into
    /// `options.size` (replacing the active state), and stripped from the
    /// surface; otherwise the surface's bounding box becomes the view box.
    /// The resulting active state is captured as the original state and
    /// written to the surface immediately, without waiting for a frame.
    ///
    /// Fails only if the `viewBox` attribute cannot be parsed, in which case
    /// the surface is left untouched.
    pub fn new(
        surface: S,
        hooks: H,
        scheduler: F,
        options: ViewportOptions,
    ) -> Result<Self, ViewportError> {
        let active_state = surface.current_transform();
        let mut viewport = Self {
            id: ViewportId::next(),
            surface,
            hooks,
            scheduler,
            options,
            view_box: ViewBox::default(),
            original_state: active_state,
            active_state,
            flush_state: FlushState::Idle,
        };
        viewport.cache_view_box()?;
        viewport.original_state = viewport.active_state;
        tracing::debug!(
            viewport = ?viewport.id,
            view_box = ?viewport.view_box,
            original = %viewport.original_state,
            "viewport initialized"
        );
        viewport.render();
        Ok(viewport)
    }

    fn cache_view_box(&mut self) -> Result<(), ViewportError> {
        if let Some(attribute) = self.surface.view_box_attribute() {
            let view_box = ViewBox::parse(&attribute)?;
            self.surface.clear_view_box_attribute();
            self.view_box = view_box;
            self.active_state = view_box.fit(self.options.size);
            self.request_flush();
        } else {
            self.view_box = ViewBox::from(self.surface.bounding_box());
        }
        Ok(())
    }

    /// Returns the identity of this viewport.
    #[must_use]
    pub fn id(&self) -> ViewportId {
        self.id
    }

    /// Returns the options the viewport was created with.
    #[must_use]
    pub fn options(&self) -> &ViewportOptions {
        &self.options
    }

    /// Returns the cached view box.
    #[must_use]
    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    /// Returns the transform captured at creation.
    #[must_use]
    pub fn original_state(&self) -> RawTransform {
        self.original_state
    }

    /// Returns the active transform.
    #[must_use]
    pub fn state(&self) -> RawTransform {
        self.active_state
    }

    /// Returns the active transform as an affine matrix.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.active_state.to_affine()
    }

    /// Returns the absolute zoom of the active state.
    #[must_use]
    pub fn zooms(&self) -> Zooms {
        self.active_state.zooms()
    }

    /// Returns the zoom of the active state relative to the original state.
    #[must_use]
    pub fn relative_zooms(&self) -> Zooms {
        self.active_state.to_pan_zoom(&self.original_state).zooms()
    }

    /// Returns the translation of the active state.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.active_state.pan()
    }

    /// Returns whether a flush is outstanding.
    #[must_use]
    pub fn flush_state(&self) -> FlushState {
        self.flush_state
    }

    /// Shorthand for `flush_state() == FlushState::Pending`.
    #[must_use]
    pub fn is_flush_pending(&self) -> bool {
        self.flush_state == FlushState::Pending
    }

    /// Recomputes the view box from the surface's on-screen size.
    ///
    /// Use after the embedding container resized the surface. The new view
    /// box has its origin at `(0, 0)` and the rendered size divided by the
    /// active zoom. Transforms are not touched.
    pub fn recompute_view_box(&mut self) -> ViewBox {
        let rendered = self.surface.rendered_rect();
        let zooms = self.zooms();
        self.view_box = ViewBox::new(
            0.0,
            0.0,
            rendered.width() / zooms.zoom_x,
            rendered.height() / zooms.zoom_y,
        );
        self.view_box
    }

    /// Proposes a new active transform.
    ///
    /// The proposal is a no-op unless its zoom differs on both axes or its
    /// pan differs on either axis (see [`RawTransform::differs_from`]).
    /// Otherwise it is offered to [`ViewportHooks::pan_zoom`] in normalized
    /// form; if accepted, the returned payload becomes the active state and
    /// a flush is requested unless one is already pending.
    ///
    /// Values are not validated.
    pub fn propose(&mut self, transform: RawTransform, source: ChangeSource) -> ProposeOutcome {
        if !transform.differs_from(&self.active_state) {
            tracing::trace!(viewport = ?self.id, ?source, "proposal matches active state");
            return ProposeOutcome::Unchanged;
        }

        let offered = transform.to_pan_zoom(&self.original_state);
        let Verdict::Accept(pan_zoom) = self.hooks.pan_zoom(offered, source) else {
            tracing::debug!(viewport = ?self.id, ?source, "proposal vetoed");
            return ProposeOutcome::Vetoed;
        };

        self.active_state = RawTransform::from_pan_zoom(pan_zoom, &self.original_state);
        let flush_scheduled = self.request_flush();
        tracing::debug!(
            viewport = ?self.id,
            ?source,
            state = %self.active_state,
            flush_scheduled,
            "proposal committed"
        );
        ProposeOutcome::Committed { flush_scheduled }
    }

    /// Proposes the scale and translation of `affine`; skew is ignored.
    pub fn propose_affine(&mut self, affine: Affine, source: ChangeSource) -> ProposeOutcome {
        self.propose(RawTransform::from_affine(affine), source)
    }

    /// Frame callback: flushes if the scheduler has a request due at `now`.
    pub fn on_frame(&mut self, now: Duration) -> Option<FlushOutcome> {
        let request = self.scheduler.take_due(now)?;
        Some(self.flush(request))
    }

    /// Runs the flush for `request`.
    ///
    /// Requests issued by other viewports are ignored. Otherwise this calls
    /// [`ViewportHooks::before_render`], offers the active state to
    /// [`ViewportHooks::render`], writes the accepted payload to the surface,
    /// releases the pending lock, and calls
    /// [`ViewportHooks::after_render`].
    pub fn flush(&mut self, request: FlushRequest) -> FlushOutcome {
        if request.viewport() != self.id {
            tracing::warn!(
                viewport = ?self.id,
                requested = ?request.viewport(),
                "ignoring flush request for another viewport"
            );
            return FlushOutcome::Ignored;
        }
        self.render()
    }

    fn request_flush(&mut self) -> bool {
        if self.flush_state == FlushState::Pending {
            return false;
        }
        self.flush_state = FlushState::Pending;
        self.scheduler.schedule(FlushRequest::new(self.id));
        true
    }

    fn render(&mut self) -> FlushOutcome {
        let pan_zoom = self.active_state.to_pan_zoom(&self.original_state);

        self.hooks.before_render();
        let outcome = match self.hooks.render(pan_zoom) {
            Verdict::Accept(pan_zoom) => {
                let transform = RawTransform::from_pan_zoom(pan_zoom, &self.original_state);
                self.surface.apply_transform(transform);
                tracing::debug!(viewport = ?self.id, %transform, "surface updated");
                FlushOutcome::Rendered(transform)
            }
            Verdict::Reject => {
                tracing::debug!(viewport = ?self.id, "render vetoed; surface left stale");
                FlushOutcome::Vetoed
            }
        };
        self.flush_state = FlushState::Idle;
        self.hooks.after_render();

        outcome
    }

    /// Returns the rendering surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the hooks.
    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Returns the hooks mutably.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Returns the scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    /// Returns the scheduler mutably.
    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    /// Gives back the surface, hooks and scheduler.
    pub fn into_parts(self) -> (S, H, F) {
        (self.surface, self.hooks, self.scheduler)
    }
}
