// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles shared by the integration tests.

#![allow(dead_code, reason = "not every test file uses every double")]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::Rect;
use understory_pan_zoom::{
    ChangeSource, FlushRequest, FrameScheduler, HookEvent, PanZoom, RawTransform, Surface,
    Verdict, ViewportHooks,
};

/// Observable state of a [`SharedSurface`].
#[derive(Debug, Default)]
pub(crate) struct SurfaceState {
    pub(crate) transform: RawTransform,
    pub(crate) view_box_attribute: Option<String>,
    pub(crate) bounding_box: Rect,
    pub(crate) rendered_rect: Rect,
    pub(crate) applied: Vec<RawTransform>,
}

/// Surface whose state stays reachable after the viewport takes it.
#[derive(Clone, Debug, Default)]
pub(crate) struct SharedSurface(pub(crate) Rc<RefCell<SurfaceState>>);

impl SharedSurface {
    pub(crate) fn with_view_box(attribute: &str) -> Self {
        let surface = Self::default();
        surface.0.borrow_mut().view_box_attribute = Some(attribute.to_owned());
        surface
    }

    pub(crate) fn applied(&self) -> Vec<RawTransform> {
        self.0.borrow().applied.clone()
    }

    pub(crate) fn transform(&self) -> RawTransform {
        self.0.borrow().transform
    }
}

impl Surface for SharedSurface {
    fn current_transform(&self) -> RawTransform {
        self.0.borrow().transform
    }

    fn apply_transform(&mut self, transform: RawTransform) {
        let mut state = self.0.borrow_mut();
        state.transform = transform;
        state.applied.push(transform);
    }

    fn bounding_box(&self) -> Rect {
        self.0.borrow().bounding_box
    }

    fn rendered_rect(&self) -> Rect {
        self.0.borrow().rendered_rect
    }

    fn view_box_attribute(&self) -> Option<String> {
        self.0.borrow().view_box_attribute.clone()
    }

    fn clear_view_box_attribute(&mut self) {
        self.0.borrow_mut().view_box_attribute = None;
    }
}

/// One recorded hook call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct HookCall {
    pub(crate) event: HookEvent,
    pub(crate) payload: Option<PanZoom>,
    pub(crate) source: Option<ChangeSource>,
}

/// Hooks that log every call and can veto or rewrite on demand.
#[derive(Debug, Default)]
pub(crate) struct RecordingHooks {
    pub(crate) calls: Vec<HookCall>,
    pub(crate) veto_pan_zoom: bool,
    pub(crate) veto_render: bool,
    pub(crate) rewrite_pan_zoom: Option<fn(PanZoom) -> PanZoom>,
    pub(crate) rewrite_render: Option<fn(PanZoom) -> PanZoom>,
}

impl RecordingHooks {
    pub(crate) fn events(&self) -> Vec<HookEvent> {
        self.calls.iter().map(|call| call.event).collect()
    }

    pub(crate) fn count(&self, event: HookEvent) -> usize {
        self.calls.iter().filter(|call| call.event == event).count()
    }

    pub(crate) fn clear(&mut self) {
        self.calls.clear();
    }

    fn record(&mut self, event: HookEvent, payload: Option<PanZoom>, source: Option<ChangeSource>) {
        self.calls.push(HookCall {
            event,
            payload,
            source,
        });
    }
}

impl ViewportHooks for RecordingHooks {
    fn pan_zoom(&mut self, pan_zoom: PanZoom, source: ChangeSource) -> Verdict {
        self.record(HookEvent::PanZoom, Some(pan_zoom), Some(source));
        if self.veto_pan_zoom {
            return Verdict::Reject;
        }
        Verdict::Accept(self.rewrite_pan_zoom.map_or(pan_zoom, |f| f(pan_zoom)))
    }

    fn before_render(&mut self) {
        self.record(HookEvent::BeforeRender, None, None);
    }

    fn render(&mut self, pan_zoom: PanZoom) -> Verdict {
        self.record(HookEvent::Render, Some(pan_zoom), None);
        if self.veto_render {
            return Verdict::Reject;
        }
        Verdict::Accept(self.rewrite_render.map_or(pan_zoom, |f| f(pan_zoom)))
    }

    fn after_render(&mut self) {
        self.record(HookEvent::AfterRender, None, None);
    }
}

/// Scheduler that counts `schedule` calls and releases on every frame.
#[derive(Debug, Default)]
pub(crate) struct CountingScheduler {
    pub(crate) scheduled: Vec<FlushRequest>,
    pub(crate) queued: Option<FlushRequest>,
}

impl FrameScheduler for CountingScheduler {
    fn schedule(&mut self, request: FlushRequest) {
        self.scheduled.push(request);
        self.queued = Some(request);
    }

    fn take_due(&mut self, _now: Duration) -> Option<FlushRequest> {
        self.queued.take()
    }
}
