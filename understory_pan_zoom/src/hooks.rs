// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Veto/mutation hooks around commits and flushes.
//!
//! A [`ShadowViewport`](crate::ShadowViewport) offers every candidate
//! transform to its hooks twice:
//!
//! 1. [`ViewportHooks::pan_zoom`] when a proposal is committed to the store,
//!    tagged with the [`ChangeSource`] that proposed it.
//! 2. [`ViewportHooks::render`] when the frame flush is about to write the
//!    store to the surface. A flush may coalesce several proposals, so no
//!    source is passed here.
//!
//! Both return a [`Verdict`]: reject, or accept a (possibly rewritten)
//! [`PanZoom`]. [`ViewportHooks::before_render`] and
//! [`ViewportHooks::after_render`] bracket every flush and cannot veto.
//!
//! Hooks never see the viewport itself, so they cannot re-enter it. To steer
//! a transform, rewrite the payload and return it.

use core::fmt;

use crate::transform::PanZoom;

/// Origin of a proposed transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeSource {
    /// A change the host makes on its own behalf rather than in response to
    /// user input, such as a programmatic reset. The original state is
    /// never affected, whatever the source.
    System,
    /// A change requested from outside, tagged by the caller.
    External(&'static str),
}

impl ChangeSource {
    /// Returns `true` for [`ChangeSource::System`].
    #[must_use]
    pub const fn is_system(self) -> bool {
        matches!(self, Self::System)
    }
}

/// Answer from a vetoing hook.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Verdict {
    /// Go ahead with this payload. It may differ from the one offered.
    Accept(PanZoom),
    /// Drop the change.
    Reject,
}

impl Verdict {
    /// Returns the accepted payload, if any.
    #[must_use]
    pub const fn accepted(self) -> Option<PanZoom> {
        match self {
            Self::Accept(pan_zoom) => Some(pan_zoom),
            Self::Reject => None,
        }
    }
}

/// The four hook points, with their event names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookEvent {
    /// A proposal is about to be committed.
    PanZoom,
    /// A flush is starting.
    BeforeRender,
    /// A flush is about to write to the surface.
    Render,
    /// A flush has finished.
    AfterRender,
}

impl HookEvent {
    /// Returns the event name: `panzoom`, `before:render`, `render`, or
    /// `after:render`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PanZoom => "panzoom",
            Self::BeforeRender => "before:render",
            Self::Render => "render",
            Self::AfterRender => "after:render",
        }
    }
}

/// Callbacks consulted by a [`ShadowViewport`](crate::ShadowViewport).
///
/// Every method has an accepting default, so implementors only override the
/// hook points they care about.
pub trait ViewportHooks {
    /// Offered each proposal that differs from the active state.
    fn pan_zoom(&mut self, pan_zoom: PanZoom, source: ChangeSource) -> Verdict {
        let _ = source;
        Verdict::Accept(pan_zoom)
    }

    /// Called at the start of every flush.
    fn before_render(&mut self) {}

    /// Offered the active state just before it is written to the surface.
    fn render(&mut self, pan_zoom: PanZoom) -> Verdict {
        Verdict::Accept(pan_zoom)
    }

    /// Called at the end of every flush, after the pending lock is released.
    fn after_render(&mut self) {}
}

/// Accepts everything unchanged.
impl ViewportHooks for () {}

impl<H: ViewportHooks + ?Sized> ViewportHooks for &mut H {
    fn pan_zoom(&mut self, pan_zoom: PanZoom, source: ChangeSource) -> Verdict {
        (**self).pan_zoom(pan_zoom, source)
    }

    fn before_render(&mut self) {
        (**self).before_render();
    }

    fn render(&mut self, pan_zoom: PanZoom) -> Verdict {
        (**self).render(pan_zoom)
    }

    fn after_render(&mut self) {
        (**self).after_render();
    }
}

/// Adapts a single dispatcher closure into [`ViewportHooks`].
///
/// The closure is called with the [`HookEvent`], the payload for
/// [`HookEvent::PanZoom`] and [`HookEvent::Render`], and the source for
/// [`HookEvent::PanZoom`]. It may rewrite the payload in place; returning
/// `false` vetoes. The return value is ignored for
/// [`HookEvent::BeforeRender`] and [`HookEvent::AfterRender`].
///
/// ```
/// use understory_pan_zoom::{ChangeSource, HookEvent, PanZoom, Trigger, Verdict, ViewportHooks};
///
/// // Never zoom out past the initial view.
/// let mut hooks = Trigger::new(|event, payload: Option<&mut PanZoom>, _source| {
///     if let (HookEvent::PanZoom, Some(pz)) = (event, payload) {
///         pz.zoom_x = pz.zoom_x.max(1.0);
///         pz.zoom_y = pz.zoom_y.max(1.0);
///     }
///     true
/// });
///
/// let offered = PanZoom { x: 0.0, y: 0.0, zoom_x: 0.5, zoom_y: 2.0 };
/// let verdict = hooks.pan_zoom(offered, ChangeSource::External("wheel"));
/// assert_eq!(
///     verdict,
///     Verdict::Accept(PanZoom { x: 0.0, y: 0.0, zoom_x: 1.0, zoom_y: 2.0 })
/// );
/// ```
pub struct Trigger<F> {
    dispatch: F,
}

impl<F> Trigger<F>
where
    F: FnMut(HookEvent, Option<&mut PanZoom>, Option<ChangeSource>) -> bool,
{
    /// Wraps `dispatch`.
    pub fn new(dispatch: F) -> Self {
        Self { dispatch }
    }

    fn gate(
        &mut self,
        event: HookEvent,
        mut pan_zoom: PanZoom,
        source: Option<ChangeSource>,
    ) -> Verdict {
        if (self.dispatch)(event, Some(&mut pan_zoom), source) {
            Verdict::Accept(pan_zoom)
        } else {
            Verdict::Reject
        }
    }
}

impl<F> ViewportHooks for Trigger<F>
where
    F: FnMut(HookEvent, Option<&mut PanZoom>, Option<ChangeSource>) -> bool,
{
    fn pan_zoom(&mut self, pan_zoom: PanZoom, source: ChangeSource) -> Verdict {
        self.gate(HookEvent::PanZoom, pan_zoom, Some(source))
    }

    fn before_render(&mut self) {
        let _ = (self.dispatch)(HookEvent::BeforeRender, None, None);
    }

    fn render(&mut self, pan_zoom: PanZoom) -> Verdict {
        self.gate(HookEvent::Render, pan_zoom, None)
    }

    fn after_render(&mut self) {
        let _ = (self.dispatch)(HookEvent::AfterRender, None, None);
    }
}

impl<F> fmt::Debug for Trigger<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger").finish_non_exhaustive()
    }
}
